// src/noyau/session.rs
//
// Session de calcul : valeur explicite possédée par l'appelant (l'app egui, un test...).
// - état d'expression (deux chaînes)
// - drapeaux de mode
// - évaluateur injecté
// - écran injecté (puits d'affichage)
//
// Le moteur d'opérations et le contrôleur EMPRUNTENT la session :
//   session.operations().square();
//   session.controleur().equals(&mut historique);

use std::fmt;

use log::{debug, trace};

use super::constantes::AFFICHAGE_VIDE;
use super::controleur::Controleur;
use super::erreur::EvaluationError;
use super::eval::{EvaluateurNatif, Evaluator};
use super::expression::ExpressionState;
use super::modes::{Mode, ModeFlags};
use super::operations::Operations;

/// Puits d'affichage : reçoit la chaîne d'affichage après chaque mutation.
pub trait DisplaySink {
    fn render(&mut self, affichage: &str);

    /// Dernier texte montré à l'utilisateur.
    fn texte(&self) -> &str;

    /// Nombre de rafraîchissements reçus depuis la création.
    fn rendus(&self) -> u64;
}

/// Écran par défaut : garde le dernier texte rendu ("0" si l'expression est vide).
#[derive(Clone, Debug, Default)]
pub struct Ecran {
    texte: String,
    rendus: u64,
}

impl DisplaySink for Ecran {
    fn render(&mut self, affichage: &str) {
        self.texte = if affichage.is_empty() {
            AFFICHAGE_VIDE.to_string()
        } else {
            affichage.to_string()
        };
        self.rendus += 1;
        trace!("écran: {:?}", self.texte);
    }

    fn texte(&self) -> &str {
        &self.texte
    }

    fn rendus(&self) -> u64 {
        self.rendus
    }
}

pub struct CalculatorSession {
    pub(super) expression: ExpressionState,
    pub(super) modes: ModeFlags,
    evaluateur: Box<dyn Evaluator>,
    ecran: Box<dyn DisplaySink>,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(Box::new(EvaluateurNatif))
    }
}

impl fmt::Debug for CalculatorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorSession")
            .field("expression", &self.expression)
            .field("modes", &self.modes)
            .field("ecran", &self.ecran.texte())
            .finish_non_exhaustive()
    }
}

impl CalculatorSession {
    /// Session vide, modes par défaut (DEG, primaire, standard); écran déjà rendu ("0").
    pub fn new(evaluateur: Box<dyn Evaluator>) -> Self {
        Self::avec_ecran(evaluateur, Box::new(Ecran::default()))
    }

    /// Comme `new`, avec un écran fourni par l'appelant (premier rendu inclus).
    pub fn avec_ecran(evaluateur: Box<dyn Evaluator>, ecran: Box<dyn DisplaySink>) -> Self {
        let mut s = Self {
            expression: ExpressionState::new(),
            modes: ModeFlags::default(),
            evaluateur,
            ecran,
        };
        s.render();
        s
    }

    pub fn expression(&self) -> &ExpressionState {
        &self.expression
    }

    pub fn modes(&self) -> &ModeFlags {
        &self.modes
    }

    pub fn ecran(&self) -> &dyn DisplaySink {
        self.ecran.as_ref()
    }

    pub fn evaluateur(&self) -> &dyn Evaluator {
        self.evaluateur.as_ref()
    }

    /// Demande un rafraîchissement de l'écran.
    pub fn render(&mut self) {
        self.ecran.render(self.expression.affichage());
    }

    /// Moteur d'opérations (x², 10^x, π, n!, ±, 1/x, F-E, trig...).
    pub fn operations(&mut self) -> Operations<'_> {
        Operations::new(self)
    }

    /// Contrôleur d'évaluation ("=" et C).
    pub fn controleur(&mut self) -> Controleur<'_> {
        Controleur::new(self)
    }

    /// Retour arrière (seule sortie d'erreur avec C).
    ///
    /// En notation F-E, l'affichage n'est qu'un rendu du nombre : on repasse d'abord
    /// en standard pour que les deux chaînes reculent ensemble.
    pub fn backspace(&mut self) {
        if self.modes.exponential {
            self.modes.basculer(Mode::Exponential);
            let texte = self.expression.evaluable().to_string();
            self.expression.set_miroir(texte);
        }
        self.expression.backspace();
        debug!("backspace -> {:?}", self.expression.evaluable());
        self.render();
    }

    pub fn clear(&mut self) {
        self.controleur().clear();
    }

    /// Bascule DEG/RAD, 2nd ou F-E.
    ///
    /// DEG/RAD et 2nd ne touchent pas l'expression (actifs même en erreur).
    /// F-E reformate le nombre courant et ne bascule que si l'expression est un nombre.
    pub fn toggle(&mut self, mode: Mode) {
        match mode {
            Mode::Exponential => self.operations().exponentielle(),
            Mode::Degree | Mode::Secondary => {
                let actif = self.modes.basculer(mode);
                debug!("mode {mode:?} -> {actif}");
                self.render();
            }
        }
    }

    /// Valeur numérique de l'expression courante (opérande des touches mémoire).
    ///
    /// Expression vide ou en erreur => 0.
    pub fn valeur_courante(&self) -> Result<f64, EvaluationError> {
        let e = &self.expression;
        if e.is_empty() || e.is_error() {
            return Ok(0.0);
        }
        self.evaluateur.evaluate(e.evaluable())
    }
}
