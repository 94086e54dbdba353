// src/noyau/jetons.rs
//
// Tokenisation de la chaîne évaluable.

use super::erreur::EvaluationError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes nommées (Math.sin, Math.PI, ...)
    // NOTE: le passage en RPN décidera si c'est une fonction ou une constante.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    StarStar, // **

    // Moins unaire : jamais produit par tokenize(), injecté par to_rpn().
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne évaluable en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 1.5, .5, 5.) avec exposant optionnel (1e3, 2.5e-4)
/// - opérateurs + - * / **
/// - parenthèses ( )
/// - identifiants pointés [a-zA-Z_][a-zA-Z0-9_.]* (ex: Math.sin, Math.PI)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, EvaluationError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = puissance, "*" = produit
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::StarStar);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            _ => {}
        }

        // Identifiants : Math.xxx
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '_' || chars[i] == '.')
            {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word));
            continue;
        }

        // Nombre décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            // exposant : e / E, signe optionnel, au moins un chiffre
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            let lit: String = chars[start..i].iter().collect();
            if lit == "." {
                return Err(EvaluationError::syntaxe("point isolé"));
            }
            let n = lit
                .parse::<f64>()
                .map_err(|_| EvaluationError::syntaxe(format!("nombre invalide: {lit}")))?;
            out.push(Tok::Num(n));
            continue;
        }

        return Err(EvaluationError::syntaxe(format!(
            "caractère inattendu: '{c}'"
        )));
    }

    Ok(out)
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::StarStar => "**".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
