// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis l'évaluer sur une pile de flottants
//
// Règles:
// - Ident(name):
//    - fonction connue (Math.sin, ...) => unaire, doit être suivie de '('
//    - constante connue (Math.PI, Math.E) => valeur
//    - sinon => erreur de syntaxe
// - Moins unaire: Tok::Neg (préfixe), lie moins fort que ** : -2**2 = -(2**2)
// - Pas de multiplication implicite : "2(3)" ou "2Math.PI" sont refusés.

use std::f64::consts;

use super::erreur::EvaluationError;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::StarStar => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::StarStar)
}

/// Fonctions unaires reconnues dans la chaîne évaluable.
pub fn fonction(name: &str) -> Option<fn(f64) -> f64> {
    let f: fn(f64) -> f64 = match name {
        "Math.sin" => f64::sin,
        "Math.cos" => f64::cos,
        "Math.tan" => f64::tan,
        "Math.floor" => f64::floor,
        "Math.ceil" => f64::ceil,
        "Math.log10" => f64::log10,
        "Math.log" => f64::ln,
        "Math.abs" => f64::abs,
        "Math.sqrt" => f64::sqrt,
        "Math.cbrt" => f64::cbrt,
        _ => return None,
    };
    Some(f)
}

/// Constantes nommées.
pub fn constante(name: &str) -> Option<f64> {
    match name {
        "Math.PI" => Some(consts::PI),
        "Math.E" => Some(consts::E),
        _ => None,
    }
}

fn is_fonction_tok(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if fonction(name).is_some())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("Math.sqrt"), LPar, Num(9), RPar, Star, Minus, Num(2)]
///   rpn:    [Num(9), Ident("Math.sqrt"), Num(2), Neg, Star]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, EvaluationError> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les valeurs collées.
    let mut prev_was_value = false;

    for (idx, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(EvaluationError::syntaxe("deux valeurs sans opérateur"));
                }
                out.push(tok.clone());
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if prev_was_value {
                    return Err(EvaluationError::syntaxe("deux valeurs sans opérateur"));
                }
                if fonction(name).is_some() {
                    // fonction : reste sur la pile jusqu'à la fin de son argument
                    if !matches!(tokens.get(idx + 1), Some(Tok::LPar)) {
                        return Err(EvaluationError::syntaxe(format!("'(' attendue après {name}")));
                    }
                    ops.push(tok.clone());
                    prev_was_value = false;
                } else if constante(name).is_some() {
                    out.push(tok.clone());
                    prev_was_value = true;
                } else {
                    return Err(EvaluationError::syntaxe(format!("identifiant inconnu: {name}")));
                }
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(EvaluationError::syntaxe("multiplication implicite non supportée"));
                }
                ops.push(Tok::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(EvaluationError::syntaxe("')' inattendue"));
                }
                // dépile jusqu'à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(EvaluationError::syntaxe("')' sans '(' correspondante"));
                }

                // si une fonction est au sommet, elle sort avec son argument
                if ops.last().is_some_and(is_fonction_tok) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            // signes en position préfixe
            Tok::Plus if !prev_was_value => {}
            Tok::Minus if !prev_was_value => {
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                if !prev_was_value {
                    return Err(EvaluationError::syntaxe("opérateur sans opérande gauche"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || is_fonction_tok(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(tok);

                    let doit_pop = if is_right_associative(tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok.clone());
                prev_was_value = false;
            }

            Tok::Neg => return Err(EvaluationError::syntaxe("jeton interne inattendu")),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(EvaluationError::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN sur une pile de flottants.
///
/// - division par un zéro exact => DivisionParZero
/// - toute valeur non finie (NaN, ±∞) => Domaine
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, EvaluationError> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        match tok {
            Tok::Num(n) => st.push(*n),

            Tok::Ident(name) => {
                if let Some(c) = constante(name) {
                    st.push(c);
                    continue;
                }
                let f = fonction(name)
                    .ok_or_else(|| EvaluationError::syntaxe(format!("identifiant inconnu: {name}")))?;
                let x = st
                    .pop()
                    .ok_or_else(|| EvaluationError::syntaxe("fonction sans argument"))?;
                st.push(fini(f(x), name)?);
            }

            Tok::Neg => {
                let x = st
                    .pop()
                    .ok_or_else(|| EvaluationError::syntaxe("signe sans opérande"))?;
                st.push(-x);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::StarStar => {
                let b = st
                    .pop()
                    .ok_or_else(|| EvaluationError::syntaxe("expression invalide"))?;
                let a = st
                    .pop()
                    .ok_or_else(|| EvaluationError::syntaxe("expression invalide"))?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => {
                        if b == 0.0 {
                            return Err(EvaluationError::DivisionParZero);
                        }
                        a / b
                    }
                    _ => a.powf(b),
                };
                st.push(fini(v, "opération")?);
            }

            Tok::LPar | Tok::RPar => {
                return Err(EvaluationError::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        (None, _) => Err(EvaluationError::syntaxe("expression vide")),
        _ => Err(EvaluationError::syntaxe("expression invalide")),
    }
}

fn fini(v: f64, contexte: &str) -> Result<f64, EvaluationError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EvaluationError::Domaine(format!("{contexte} => {v}")))
    }
}
