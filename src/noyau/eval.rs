//! Noyau : évaluation (pipeline réel)
//!
//! tokenize -> RPN -> pile f64 -> arrondi -> texte
//!
//! Le moteur double chaîne ne connaît que le trait [`Evaluator`] :
//! n'importe quel évaluateur acceptant la syntaxe évaluable du formateur convient.

use log::trace;

use super::constantes::DECIMALES_RESULTAT;
use super::erreur::EvaluationError;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};

/// Capacité injectée : chaîne évaluable -> nombre, ou erreur.
pub trait Evaluator {
    fn evaluate(&self, texte: &str) -> Result<f64, EvaluationError>;
}

/// Évaluateur par défaut : jetons -> RPN -> f64.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluateurNatif;

impl Evaluator for EvaluateurNatif {
    fn evaluate(&self, texte: &str) -> Result<f64, EvaluationError> {
        let s = texte.trim();
        if s.is_empty() {
            return Err(EvaluationError::syntaxe("entrée vide"));
        }

        let jetons = tokenize(s)?;
        let rpn = to_rpn(&jetons)?;
        trace!("rpn: {}", format_tokens(&rpn));

        eval_rpn(&rpn)
    }
}

/// Au-delà de 2^53 / 1000, `v * 1000` n'a plus de partie fractionnaire fiable.
const LIMITE_ARRONDI: f64 = 9_007_199_254_740_992.0;

/// Arrondi à `DECIMALES_RESULTAT` décimales, sur la valeur décimale exacte du double.
///
/// `1.0005` vaut en fait 1.000499999... : il donne 1. Une vraie demi-valeur
/// (`0.0625`, exacte en binaire) part loin de zéro : 0.063.
pub fn arrondir(v: f64) -> f64 {
    let facteur = 10f64.powi(DECIMALES_RESULTAT);
    if !v.is_finite() || v.abs() * facteur >= LIMITE_ARRONDI {
        return v;
    }

    let p = v * facteur;
    // erreur exacte du produit arrondi (fma) : dit de quel côté de p est le vrai v*1000
    let reste = v.mul_add(facteur, -p);
    let n = if p.fract().abs() == 0.5 && reste != 0.0 {
        if reste > 0.0 {
            p.ceil()
        } else {
            p.floor()
        }
    } else {
        p.round()
    };
    n / facteur
}

/// Texte d'un nombre : forme décimale la plus courte, jamais "-0".
pub fn formater_nombre(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

/// Notation F-E : "1.23×10^4" (mantisse à 2 décimales).
pub fn formater_exponentiel(v: f64, decimales: usize) -> String {
    let brut = format!("{v:.decimales$e}");
    match brut.split_once('e') {
        Some((mantisse, exposant)) => {
            let exp = exposant.parse::<i32>().unwrap_or(0);
            format!("{mantisse}×10^{exp}")
        }
        None => brut,
    }
}
