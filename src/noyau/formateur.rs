// src/noyau/formateur.rs
//
// Formateur de jetons : opération logique + modes -> (fragment évaluable, glyphe).
// Pur, piloté par table. Aucune lecture de l'expression ici.

use super::constantes::*;
use super::modes::ModeFlags;

/// Paire (évaluable, affichage) apportée par un jeton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub evaluable: &'static str,
    pub affichage: &'static str,
}

impl Fragment {
    const fn new(evaluable: &'static str, affichage: &'static str) -> Self {
        Self {
            evaluable,
            affichage,
        }
    }
}

/// Opérations à fragment fixe (ou dépendant seulement des modes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Sin,
    Cos,
    Tan,
    /// x² (primaire) / x³ (secondaire).
    Carre,
    /// √ (primaire) / ∛ (secondaire).
    Racine,
    PuissanceDix,
    Puissance,
    Pi,
    E,
    Plancher,
    Plafond,
    Log,
    Ln,
    Abs,
}

/// Table : opération -> fragment, selon DEG/RAD et 2nd.
pub fn format(op: Operation, modes: &ModeFlags) -> Fragment {
    use Operation::*;

    match op {
        // trig : seul l'évaluable dépend de DEG/RAD
        Sin if modes.degree => Fragment::new(SINUS_DEG, AFFICHAGE_SINUS),
        Sin => Fragment::new(SINUS, AFFICHAGE_SINUS),
        Cos if modes.degree => Fragment::new(COSINUS_DEG, AFFICHAGE_COSINUS),
        Cos => Fragment::new(COSINUS, AFFICHAGE_COSINUS),
        Tan if modes.degree => Fragment::new(TANGENTE_DEG, AFFICHAGE_TANGENTE),
        Tan => Fragment::new(TANGENTE, AFFICHAGE_TANGENTE),

        Carre if modes.secondary => Fragment::new(PUISSANCE_CUBE, EXPOSANT_3),
        Carre => Fragment::new(PUISSANCE_CARRE, EXPOSANT_2),
        Racine if modes.secondary => Fragment::new(RACINE_CUBIQUE, AFFICHAGE_RACINE_CUBIQUE),
        Racine => Fragment::new(RACINE_CARREE, AFFICHAGE_RACINE_CARREE),

        PuissanceDix => Fragment::new(PUISSANCE_10, AFFICHAGE_PUISSANCE_10),
        Puissance => Fragment::new(OPERATEUR_PUISSANCE, AFFICHAGE_PUISSANCE),
        Pi => Fragment::new(PI, AFFICHAGE_PI),
        E => Fragment::new(super::constantes::E, AFFICHAGE_E),
        Plancher => Fragment::new(PLANCHER, AFFICHAGE_PLANCHER),
        Plafond => Fragment::new(PLAFOND, AFFICHAGE_PLAFOND),
        Log => Fragment::new(LOG10, AFFICHAGE_LOG),
        Ln => Fragment::new(LN, AFFICHAGE_LN),
        Abs => Fragment::new(ABS, AFFICHAGE_ABS),
    }
}
