// src/noyau/constantes.rs
//
// Constantes du moteur double chaîne (évaluable / affichage).
// - Sentinelle d'erreur
// - Fragments (évaluable ↔ glyphe)
// - Motifs de fin d'expression, compilés une seule fois
//
// Les frontières de jetons vivent ICI (pas de littéraux regex éparpillés).

use std::sync::LazyLock;

use regex::Regex;

/// Valeur sentinelle : les deux chaînes y basculent ensemble en cas d'échec.
pub const ERREUR: &str = "Error";

/// Affichage d'une expression vide.
pub const AFFICHAGE_VIDE: &str = "0";

/// Précision de l'arrondi après "=".
pub const DECIMALES_RESULTAT: i32 = 3;

/// Chiffres de mantisse en notation exponentielle (F-E).
pub const DECIMALES_MANTISSE: usize = 2;

/// Au-delà, n! ne tient plus dans un f64 (l'évaluateur verrait l'infini).
pub const FACTORIELLE_MAX: u32 = 170;

/* ------------------------ Puissances ------------------------ */

pub const OPERATEUR_PUISSANCE: &str = "**";
pub const AFFICHAGE_PUISSANCE: &str = "^";

pub const PUISSANCE_CARRE: &str = "**2";
pub const PUISSANCE_CUBE: &str = "**3";
pub const EXPOSANT_2: &str = "²";
pub const EXPOSANT_3: &str = "³";

pub const PUISSANCE_10: &str = "10**";
pub const AFFICHAGE_PUISSANCE_10: &str = "10^";

pub const MULTIPLICATION: &str = "*";
pub const FACTORIELLE: &str = "!";

/* ------------------------ Constantes ------------------------ */

pub const PI: &str = "Math.PI";
pub const AFFICHAGE_PI: &str = "π";
pub const E: &str = "Math.E";
pub const AFFICHAGE_E: &str = "e";

/* ------------------------ Trigonométrie ------------------------ */

pub const SINUS: &str = "Math.sin(";
pub const SINUS_DEG: &str = "Math.sin((Math.PI/180)*";
pub const AFFICHAGE_SINUS: &str = "sin(";

pub const COSINUS: &str = "Math.cos(";
pub const COSINUS_DEG: &str = "Math.cos((Math.PI/180)*";
pub const AFFICHAGE_COSINUS: &str = "cos(";

pub const TANGENTE: &str = "Math.tan(";
pub const TANGENTE_DEG: &str = "Math.tan((Math.PI/180)*";
pub const AFFICHAGE_TANGENTE: &str = "tan(";

/* ------------------------ Fonctions ------------------------ */

pub const PLANCHER: &str = "Math.floor(";
pub const AFFICHAGE_PLANCHER: &str = "floor(";
pub const PLAFOND: &str = "Math.ceil(";
pub const AFFICHAGE_PLAFOND: &str = "ceil(";
pub const LOG10: &str = "Math.log10(";
pub const AFFICHAGE_LOG: &str = "log(";
pub const LN: &str = "Math.log(";
pub const AFFICHAGE_LN: &str = "ln(";
pub const ABS: &str = "Math.abs(";
pub const AFFICHAGE_ABS: &str = "abs(";
pub const RACINE_CARREE: &str = "Math.sqrt(";
pub const AFFICHAGE_RACINE_CARREE: &str = "√(";
pub const RACINE_CUBIQUE: &str = "Math.cbrt(";
pub const AFFICHAGE_RACINE_CUBIQUE: &str = "∛(";

/// Jetons multi-caractères (évaluable, affichage) qu'un retour arrière retire d'un bloc.
///
/// Ordre : les formes "degrés" avant les formes nues (plus longues d'abord).
pub const JETONS_COMPOSES: &[(&str, &str)] = &[
    (SINUS_DEG, AFFICHAGE_SINUS),
    (COSINUS_DEG, AFFICHAGE_COSINUS),
    (TANGENTE_DEG, AFFICHAGE_TANGENTE),
    (SINUS, AFFICHAGE_SINUS),
    (COSINUS, AFFICHAGE_COSINUS),
    (TANGENTE, AFFICHAGE_TANGENTE),
    (PLANCHER, AFFICHAGE_PLANCHER),
    (PLAFOND, AFFICHAGE_PLAFOND),
    (LOG10, AFFICHAGE_LOG),
    (LN, AFFICHAGE_LN),
    (ABS, AFFICHAGE_ABS),
    (RACINE_CARREE, AFFICHAGE_RACINE_CARREE),
    (RACINE_CUBIQUE, AFFICHAGE_RACINE_CUBIQUE),
    (PI, AFFICHAGE_PI),
    (E, AFFICHAGE_E),
];

/* ------------------------ Motifs (fin de chaîne) ------------------------ */

fn motif(src: &str) -> Regex {
    // Motifs statiques : une faute ici est un bug de compilation du tableau, pas une entrée utilisateur.
    Regex::new(src).unwrap_or_else(|e| panic!("motif invalide {src:?}: {e}"))
}

/// Nombre final, signe éventuel compris : `-12.5` dans `3*-12.5`.
pub static NOMBRE_FIN: LazyLock<Regex> = LazyLock::new(|| motif(r"(-?\d+(\.\d+)?)$"));

/// Nombre final non signé.
pub static NOMBRE_DECIMAL_FIN: LazyLock<Regex> = LazyLock::new(|| motif(r"(\d+(\.\d+)?)$"));

/// Suffixe carré / cube côté évaluable.
pub static PUISSANCE_2_OU_3_FIN: LazyLock<Regex> = LazyLock::new(|| motif(r"\*\*[23]$"));

/// Glyphe ² / ³ côté affichage.
pub static EXPOSANT_2_OU_3_FIN: LazyLock<Regex> = LazyLock::new(|| motif(r"[²³]$"));

/// Opérateur final (`^` inclus pour la chaîne d'affichage).
pub static OPERATEUR_FIN: LazyLock<Regex> = LazyLock::new(|| motif(r"[*+\-/^]$"));

/// Opérateur ou parenthèse ouvrante finale.
pub static OPERATEUR_OU_PAREN_FIN: LazyLock<Regex> = LazyLock::new(|| motif(r"[+\-*/(]$"));
