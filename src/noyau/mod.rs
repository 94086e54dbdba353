//! Noyau double chaîne
//!
//! Organisation interne :
//! - constantes.rs : fragments, glyphes, motifs regex précompilés
//! - modes.rs      : DEG/RAD, 2nd, F-E
//! - formateur.rs  : opération + modes -> (évaluable, affichage)
//! - expression.rs : les deux chaînes + retour arrière
//! - operations.rs : x², 10^x, π, n!, ±, 1/x, F-E, trig, saisie
//! - controleur.rs : "=" et C
//! - session.rs    : CalculatorSession + écran
//! - jetons.rs     : tokenisation de la chaîne évaluable
//! - rpn.rs        : shunting-yard + pile f64
//! - eval.rs       : évaluateur natif + arrondi + texte des nombres

pub mod constantes;
pub mod controleur;
pub mod erreur;
pub mod eval;
pub mod expression;
pub mod formateur;
pub mod jetons;
pub mod modes;
pub mod operations;
pub mod rpn;
pub mod session;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use controleur::{EvalOutcome, HistorySink};
pub use formateur::Operation;
pub use modes::Mode;
pub use session::CalculatorSession;
