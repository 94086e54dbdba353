// src/noyau/erreur.rs

use thiserror::Error;

/// Seul type d'erreur du noyau : l'évaluation a échoué.
///
/// Ne traverse jamais une opération publique : le contrôleur la convertit
/// en sentinelle "Error" sur les deux chaînes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// Expression mal formée (jeton inattendu, parenthèses, opérande manquant).
    #[error("erreur de syntaxe: {0}")]
    Syntaxe(String),

    #[error("division par zéro")]
    DivisionParZero,

    /// Résultat hors domaine (log ≤ 0, √ négative, débordement...).
    #[error("hors domaine: {0}")]
    Domaine(String),

    /// Argument de factorielle illisible ou trop grand.
    #[error("factorielle impossible: {0}")]
    Factorielle(String),
}

impl EvaluationError {
    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }
}
