//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder la session de calcul, l'historique, la mémoire et la config,
//! et router chaque touche (bouton ou clavier) vers le noyau.
//!
//! Contrats :
//! - Aucune logique d'expression ici : tout passe par la session.
//! - Une touche = une action complète, sans effet de bord caché.

use log::debug;

use super::historique::Historique;
use super::memoire::{ActionMemoire, Memoire};
use super::stockage;
use crate::config::Config;
use crate::noyau::{CalculatorSession, EvalOutcome, Mode, Operation};

/// Toute entrée possible de la calculatrice (pavé, menus, clavier).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Touche {
    /// Chiffre, point, parenthèse ou opérateur simple.
    Saisie(char),
    Carre,
    Racine,
    PuissanceDix,
    Puissance,
    Pi,
    E,
    Factorielle,
    Signe,
    Inverse,
    /// sin/cos/tan, floor/ceil/log/ln/abs.
    Fonction(Operation),
    Egal,
    Retour,
    Effacer,
    Bascule(Mode),
    Memoire(ActionMemoire),
}

pub struct AppCalc {
    pub session: CalculatorSession,
    pub historique: Historique,
    pub memoire: Memoire,
    pub config: Config,

    // --- UX ---
    /// Motif du dernier "=" raté (affiché sous l'écran).
    pub message: Option<String>,
}

impl AppCalc {
    pub fn new(config: Config) -> Self {
        let historique = Historique::charger(stockage::ouvrir(&config), config.historique_max);
        let memoire = Memoire::charger(stockage::ouvrir(&config));
        Self::assembler(config, historique, memoire)
    }

    pub(crate) fn assembler(config: Config, historique: Historique, memoire: Memoire) -> Self {
        Self {
            session: CalculatorSession::default(),
            historique,
            memoire,
            config,
            message: None,
        }
    }

    /* ------------------------ Actions ------------------------ */

    pub fn appliquer(&mut self, touche: Touche) {
        debug!("touche {touche:?}");
        self.message = None;

        let s = &mut self.session;
        match touche {
            Touche::Saisie(c) => s.operations().saisir(c),
            Touche::Carre => s.operations().square(),
            Touche::Racine => s.operations().racine(),
            Touche::PuissanceDix => s.operations().puissance_dix(),
            Touche::Puissance => s.operations().puissance(),
            Touche::Pi => s.operations().pi(),
            Touche::E => s.operations().e(),
            Touche::Factorielle => s.operations().factorielle(),
            Touche::Signe => s.operations().changer_signe(),
            Touche::Inverse => s.operations().inverse(),
            Touche::Fonction(op @ (Operation::Sin | Operation::Cos | Operation::Tan)) => {
                s.operations().trig(op)
            }
            Touche::Fonction(op) => s.operations().fonction(op),
            Touche::Egal => self.egal(),
            Touche::Retour => s.backspace(),
            Touche::Effacer => s.clear(),
            Touche::Bascule(mode) => s.toggle(mode),
            Touche::Memoire(action) => self.memoire.appliquer(action, &mut self.session),
        }
    }

    fn egal(&mut self) {
        if let EvalOutcome::Echec(e) = self.session.controleur().equals(&mut self.historique) {
            self.message = Some(e.to_string());
        }
    }

    /// Clic sur une entrée d'historique : son résultat devient l'expression.
    pub fn rappel_historique(&mut self, index: usize) {
        if let Some(entree) = self.historique.get(index) {
            let resultat = entree.resultat.clone();
            self.session.operations().rappel_resultat(&resultat);
        }
    }

    pub fn effacer_historique(&mut self) {
        self.historique.clear();
    }

    /// Touche disponible ? (MC / MR grisés quand la mémoire est vide)
    pub fn active(&self, touche: Touche) -> bool {
        match touche {
            Touche::Memoire(a) => !a.exige_valeur() || !self.memoire.is_empty(),
            _ => true,
        }
    }
}
