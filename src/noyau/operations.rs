// src/noyau/operations.rs
//
// Moteur d'opérations : une méthode par touche scientifique.
// Schéma commun :
//   1) refus si l'expression est en erreur (l'erreur est collante)
//   2) précondition propre à l'opération
//   3) fragment via le formateur, application sur l'état d'expression
//   4) rafraîchissement de l'écran

use log::debug;
use num_bigint::BigUint;
use num_traits::One;

use super::constantes::*;
use super::erreur::EvaluationError;
use super::eval::{formater_exponentiel, formater_nombre};
use super::formateur::{format, Operation};
use super::modes::Mode;
use super::session::CalculatorSession;

pub struct Operations<'s> {
    session: &'s mut CalculatorSession,
}

impl<'s> Operations<'s> {
    pub(super) fn new(session: &'s mut CalculatorSession) -> Self {
        Self { session }
    }

    /// L'erreur est collante : seules C et ⌫ en sortent.
    fn bloque(&self, nom: &str) -> bool {
        let bloque = self.session.expression.is_error();
        if bloque {
            debug!("{nom}: ignoré (état d'erreur)");
        }
        bloque
    }

    fn ajouter(&mut self, op: Operation) {
        let f = format(op, &self.session.modes);
        self.session.expression.append(f.evaluable, f.affichage);
    }

    /* ------------------------ Saisie directe ------------------------ */

    /// Touche simple (chiffre, point, parenthèse, + - * /) : même texte des deux côtés.
    ///
    /// `+ * /` sont refusés après un opérateur; `-` seulement après `-`
    /// (un signe reste possible : `3*-2`).
    pub fn saisir(&mut self, c: char) {
        if self.bloque("saisie") {
            return;
        }
        let eval = self.session.expression.evaluable();
        let accepte = match c {
            '0'..='9' | '.' | '(' | ')' => true,
            '+' | '*' | '/' => !OPERATEUR_FIN.is_match(eval),
            '-' => !eval.ends_with('-'),
            _ => false,
        };
        if !accepte {
            debug!("saisie {c:?} refusée après {eval:?}");
            return;
        }

        let mut buf = [0u8; 4];
        let t = c.encode_utf8(&mut buf);
        self.session.expression.append(t, t);
        self.session.render();
    }

    /* ------------------------ Puissances ------------------------ */

    /// x² / x³ : remplace un suffixe existant (jamais empilé), refusé après un opérateur.
    pub fn square(&mut self) {
        if self.bloque("carré") {
            return;
        }
        let retire = self.session.expression.retirer_suffixe_puissance();

        let e = &self.session.expression;
        if e.is_empty() || OPERATEUR_FIN.is_match(e.evaluable()) {
            if retire {
                self.session.render();
            }
            return;
        }

        self.ajouter(Operation::Carre);
        self.session.render();
    }

    /// 10^x : `*` implicite après une valeur complète.
    pub fn puissance_dix(&mut self) {
        if self.bloque("10^x") {
            return;
        }
        let e = &self.session.expression;
        if !e.is_empty() && !OPERATEUR_OU_PAREN_FIN.is_match(e.evaluable()) {
            self.session
                .expression
                .append(MULTIPLICATION, MULTIPLICATION);
        }
        self.ajouter(Operation::PuissanceDix);
        self.session.render();
    }

    /// x^y : jamais deux `**` de suite.
    pub fn puissance(&mut self) {
        if self.bloque("x^y") {
            return;
        }
        if self
            .session
            .expression
            .evaluable()
            .ends_with(OPERATEUR_PUISSANCE)
        {
            return;
        }
        self.ajouter(Operation::Puissance);
        self.session.render();
    }

    /* ------------------------ Constantes ------------------------ */

    pub fn pi(&mut self) {
        self.constante(Operation::Pi);
    }

    pub fn e(&mut self) {
        self.constante(Operation::E);
    }

    /// π / e : `3` + π => `3*π`, mais `(` + π => `(π`.
    fn constante(&mut self, op: Operation) {
        if self.bloque("constante") {
            return;
        }
        let apres_chiffre = self
            .session
            .expression
            .evaluable()
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_digit());
        if apres_chiffre {
            self.session
                .expression
                .append(MULTIPLICATION, MULTIPLICATION);
        }
        self.ajouter(op);
        self.session.render();
    }

    /* ------------------------ n!, ±, 1/x ------------------------ */

    /// n! : remplace l'entier final par sa factorielle (évaluable), ajoute `!` (affichage).
    ///
    /// Pas d'entier final => rien. Entier illisible ou trop grand => erreur.
    pub fn factorielle(&mut self) {
        if self.bloque("factorielle") {
            return;
        }

        let eval = self.session.expression.evaluable();
        let debut = eval.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        let prefixe = &eval[..debut];

        // pas de chiffres, ou partie décimale (5.5!) : rien à faire
        if debut == eval.len() || prefixe.ends_with('.') {
            self.session.render();
            return;
        }

        match factorielle_texte(&eval[debut..]) {
            Ok(v) => {
                let nouvel_eval = format!("{prefixe}{v}");
                let nouvel_aff = format!("{}{FACTORIELLE}", self.session.expression.affichage());
                self.session.expression.set(nouvel_eval, nouvel_aff);
            }
            Err(e) => {
                debug!("factorielle: {e}");
                self.session.expression.set_erreur();
            }
        }
        self.session.render();
    }

    /// ± : négation du nombre final. Expression vide => "0".
    ///
    /// L'affichage est ensuite forcé égal à l'évaluable.
    pub fn changer_signe(&mut self) {
        if self.bloque("±") {
            return;
        }
        if self.session.expression.is_empty() {
            self.session.expression.set_miroir("0");
        }

        let eval = self.session.expression.evaluable();
        let Some(m) = NOMBRE_FIN.find(eval) else {
            self.session.render();
            return;
        };

        // "3-5" : le moins est binaire, seul "5" change de signe
        let mut debut = m.start();
        if eval[debut..].starts_with('-') && !moins_est_un_signe(&eval[..debut]) {
            debut += 1;
        }

        if let Ok(v) = eval[debut..].parse::<f64>() {
            if v.is_finite() {
                let nouveau = format!("{}{}", &eval[..debut], formater_nombre(-v));
                self.session.expression.set_miroir(nouveau);
            }
        }
        self.session.render();
    }

    /// 1/x : le nombre final devient `1/(n)`; l'affichage suit l'évaluable.
    pub fn inverse(&mut self) {
        if self.bloque("1/x") {
            return;
        }
        let eval = self.session.expression.evaluable();
        if let Some(m) = NOMBRE_DECIMAL_FIN.find(eval) {
            if let Ok(v) = m.as_str().parse::<f64>() {
                let nouveau = format!("{}1/({})", &eval[..m.start()], formater_nombre(v));
                self.session.expression.set_miroir(nouveau);
            }
        }
        self.session.render();
    }

    /* ------------------------ Notation F-E ------------------------ */

    /// Bascule standard / exponentielle; ne fait rien si l'expression n'est pas un nombre.
    pub fn exponentielle(&mut self) {
        if self.bloque("F-E") {
            return;
        }
        let eval = self.session.expression.evaluable().trim();
        let v = match eval.parse::<f64>() {
            Ok(v) if !eval.is_empty() && v.is_finite() => v,
            _ => return,
        };

        let actif = self.session.modes.basculer(Mode::Exponential);
        self.session.expression.set_miroir(formater_nombre(v));
        if actif {
            self.session
                .expression
                .set_affichage(formater_exponentiel(v, DECIMALES_MANTISSE));
        }
        debug!("F-E -> {actif}");
        self.session.render();
    }

    /* ------------------------ Fonctions ------------------------ */

    /// sin / cos / tan : fragment dépendant de DEG/RAD, toujours légal.
    pub fn trig(&mut self, op: Operation) {
        debug_assert!(matches!(op, Operation::Sin | Operation::Cos | Operation::Tan));
        self.ouvrir(op);
    }

    /// √ / ∛ selon 2nd.
    pub fn racine(&mut self) {
        self.ouvrir(Operation::Racine);
    }

    /// floor, ceil, log, ln, abs : ouvrants de fonction, toujours légaux.
    pub fn fonction(&mut self, op: Operation) {
        self.ouvrir(op);
    }

    fn ouvrir(&mut self, op: Operation) {
        if self.bloque("fonction") {
            return;
        }
        self.ajouter(op);
        debug!("{op:?} -> {:?}", self.session.expression.evaluable());
        self.session.render();
    }

    /* ------------------------ Rappels ------------------------ */

    /// MR : l'expression est remplacée par la valeur mémorisée.
    pub fn rappel_memoire(&mut self, valeur: f64) {
        if self.bloque("MR") {
            return;
        }
        self.session.expression.set_miroir(formater_nombre(valeur));
        self.session.render();
    }

    /// Clic sur une entrée d'historique : l'expression devient ce résultat.
    pub fn rappel_resultat(&mut self, resultat: &str) {
        if self.bloque("historique") {
            return;
        }
        self.session.expression.set_miroir(resultat);
        self.session.render();
    }
}

/// Un `-` placé en tête ou après un opérateur / `(` est un signe, pas une soustraction.
fn moins_est_un_signe(avant: &str) -> bool {
    avant.is_empty() || avant.ends_with(['+', '-', '*', '/', '('])
}

/// n! exact (produit itératif), rendu en texte décimal.
pub(super) fn factorielle_texte(chiffres: &str) -> Result<String, EvaluationError> {
    let n: u32 = chiffres
        .parse()
        .map_err(|_| EvaluationError::Factorielle(format!("entier illisible: {chiffres}")))?;
    if n > FACTORIELLE_MAX {
        return Err(EvaluationError::Factorielle(format!(
            "{n}! dépasse {FACTORIELLE_MAX}!"
        )));
    }

    let mut acc = BigUint::one();
    for i in 2..=n {
        acc *= i;
    }
    Ok(acc.to_string())
}
