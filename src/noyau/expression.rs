// src/noyau/expression.rs
//
// État d'expression : deux chaînes synchronisées.
// - evaluable : syntaxe machine (passée à l'évaluateur)
// - affichage : glyphes lisibles (passés à l'écran)
//
// Invariants :
//   evaluable == ERREUR  <=>  affichage == ERREUR   (après chaque mutation)
//   evaluable vide       <=>  affichage vide        (après chaque retour arrière)
//
// Les préconditions (opérateur après opérateur, etc.) sont à la charge de l'appelant.

use super::constantes::{
    AFFICHAGE_PUISSANCE, ERREUR, EXPOSANT_2_OU_3_FIN, FACTORIELLE, JETONS_COMPOSES,
    OPERATEUR_PUISSANCE, PUISSANCE_2_OU_3_FIN, PUISSANCE_CARRE,
};
use super::operations::factorielle_texte;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionState {
    evaluable: String,
    affichage: String,
}

impl ExpressionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluable(&self) -> &str {
        &self.evaluable
    }

    pub fn affichage(&self) -> &str {
        &self.affichage
    }

    pub fn is_empty(&self) -> bool {
        self.evaluable.is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.evaluable == ERREUR
    }

    /// Concatène un fragment à chacune des deux chaînes.
    pub fn append(&mut self, evaluable: &str, affichage: &str) {
        self.evaluable.push_str(evaluable);
        self.affichage.push_str(affichage);
        self.verifier();
    }

    /// Remplace les deux chaînes d'un coup (résultat, rappel mémoire/historique).
    pub fn set(&mut self, evaluable: impl Into<String>, affichage: impl Into<String>) {
        self.evaluable = evaluable.into();
        self.affichage = affichage.into();
        self.verifier();
    }

    /// Même texte des deux côtés (après "=", ±, 1/x).
    pub fn set_miroir(&mut self, texte: impl Into<String>) {
        let texte = texte.into();
        self.affichage.clone_from(&texte);
        self.evaluable = texte;
        self.verifier();
    }

    /// Remplace seulement l'affichage (notation F-E). L'évaluable ne bouge pas.
    pub fn set_affichage(&mut self, affichage: impl Into<String>) {
        self.affichage = affichage.into();
        self.verifier();
    }

    /// Bascule les deux chaînes sur la sentinelle.
    pub fn set_erreur(&mut self) {
        self.set_miroir(ERREUR);
    }

    pub fn clear(&mut self) {
        self.evaluable.clear();
        self.affichage.clear();
    }

    /// Retire le suffixe carré/cube s'il est porté par LES DEUX chaînes.
    /// Retourne true si quelque chose a été retiré.
    pub fn retirer_suffixe_puissance(&mut self) -> bool {
        let porte_eval = PUISSANCE_2_OU_3_FIN.is_match(&self.evaluable);
        if !porte_eval || !EXPOSANT_2_OU_3_FIN.is_match(&self.affichage) {
            return false;
        }
        tronquer_octets(&mut self.evaluable, PUISSANCE_CARRE.len());
        self.affichage.pop();
        true
    }

    /// Retour arrière : retire le dernier JETON logique, pas seulement le dernier caractère.
    ///
    /// Priorités :
    /// 1. vide => rien
    /// 2. erreur => tout effacer (l'erreur est un jeton atomique)
    /// 3. `**` nu (affichage en `^`) => retire `**` / un glyphe
    /// 4. `**2` / `**3` (affichage en ² / ³) => retire 3 caractères / un glyphe
    /// 5. `!` final => retire `!` et rend à l'évaluable l'argument de la factorielle
    /// 6. jeton composé de la table (`Math.sin(` / `sin(`...) => retire le bloc des deux côtés
    /// 7. sinon => un caractère de chaque côté
    ///
    /// Après ±, 1/x ou "=", l'affichage est une copie de l'évaluable : `Math.sin(` y est
    /// du texte brut, il part caractère par caractère des deux côtés.
    pub fn backspace(&mut self) {
        if self.evaluable.is_empty() {
            return;
        }
        if self.is_error() {
            self.clear();
            return;
        }

        if self.evaluable.ends_with(OPERATEUR_PUISSANCE)
            && self.affichage.ends_with(AFFICHAGE_PUISSANCE)
        {
            tronquer_octets(&mut self.evaluable, OPERATEUR_PUISSANCE.len());
            self.affichage.pop();
        } else if self.retirer_suffixe_puissance() {
            // déjà fait
        } else if self.affichage.ends_with(FACTORIELLE) {
            self.retirer_factorielle();
        } else if let Some((eval, aff)) = self.jeton_compose_final() {
            tronquer_octets(&mut self.evaluable, eval.len());
            tronquer_octets(&mut self.affichage, aff.len());
        } else {
            self.evaluable.pop();
            self.affichage.pop();
        }

        // une chaîne vide seule n'a pas de sens : l'écran et "=" divergeraient
        if self.evaluable.is_empty() != self.affichage.is_empty() {
            self.clear();
        }
        self.verifier();
    }

    /// Un jeton composé ne compte que si l'affichage porte son glyphe, pas le texte machine.
    fn jeton_compose_final(&self) -> Option<(&'static str, &'static str)> {
        JETONS_COMPOSES.iter().copied().find(|(eval, aff)| {
            self.evaluable.ends_with(eval)
                && self.affichage.ends_with(aff)
                && !self.affichage.ends_with(eval)
        })
    }

    /// `5!` (évaluable `120`) redevient `5`; `3!!` (évaluable `720`) redevient `3!` / `6`.
    fn retirer_factorielle(&mut self) {
        self.affichage.pop();
        let Some(valeur) = argument_factorielle(&self.affichage) else {
            return;
        };
        let debut = self
            .evaluable
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .len();
        self.evaluable.truncate(debut);
        self.evaluable.push_str(&valeur);
    }

    /// Garde-fou : une seule chaîne en erreur est un bug du moteur.
    fn verifier(&self) {
        debug_assert_eq!(
            self.evaluable == ERREUR,
            self.affichage == ERREUR,
            "désynchronisation: eval={:?} aff={:?}",
            self.evaluable,
            self.affichage
        );
    }
}

/// Valeur (texte décimal) de l'opérande final d'un affichage : `12` => 12, `3!` => 6, `5²` => 2.
fn argument_factorielle(affichage: &str) -> Option<String> {
    let sans_bang = affichage.trim_end_matches(FACTORIELLE);
    let profondeur = affichage.len() - sans_bang.len();

    let mut valeur = match sans_bang.chars().last()? {
        '²' => "2".to_string(),
        '³' => "3".to_string(),
        _ => {
            let debut = sans_bang
                .trim_end_matches(|c: char| c.is_ascii_digit())
                .len();
            if debut == sans_bang.len() {
                return None;
            }
            sans_bang[debut..].to_string()
        }
    };
    for _ in 0..profondeur {
        valeur = factorielle_texte(&valeur).ok()?;
    }
    Some(valeur)
}

/// Retire `n` octets en fin de chaîne (les suffixes retirés sont ASCII ou des jetons entiers).
fn tronquer_octets(s: &mut String, n: usize) {
    let fin = s.len().saturating_sub(n);
    s.truncate(fin);
}
