// src/noyau/controleur.rs
//
// Contrôleur d'évaluation : "=" et C.
// "=" : évalue la chaîne évaluable, arrondit, publie (libellé, résultat) dans l'historique.
// Aucune erreur ne sort d'ici : un échec devient la sentinelle "Error".

use log::info;

use super::erreur::EvaluationError;
use super::eval::{arrondir, formater_nombre};
use super::session::CalculatorSession;

/// Destinataire des calculs réussis (libellé = chaîne d'affichage).
pub trait HistorySink {
    fn add(&mut self, expression: &str, resultat: &str);
}

/// Issue d'un "=".
#[derive(Clone, Debug, PartialEq)]
pub enum EvalOutcome {
    /// Expression vide ou déjà en erreur : rien n'a changé.
    Ignore,
    Succes { expression: String, resultat: String },
    Echec(EvaluationError),
}

pub struct Controleur<'s> {
    session: &'s mut CalculatorSession,
}

impl<'s> Controleur<'s> {
    pub(super) fn new(session: &'s mut CalculatorSession) -> Self {
        Self { session }
    }

    pub fn equals(&mut self, historique: &mut dyn HistorySink) -> EvalOutcome {
        let e = &self.session.expression;
        if e.is_empty() || e.is_error() {
            return EvalOutcome::Ignore;
        }

        let expression = e.affichage().to_string();
        let issue = match self.session.evaluateur().evaluate(e.evaluable()) {
            Ok(v) => {
                let resultat = formater_nombre(arrondir(v));
                info!("{expression} = {resultat}");
                historique.add(&expression, &resultat);
                self.session.expression.set_miroir(resultat.as_str());
                EvalOutcome::Succes {
                    expression,
                    resultat,
                }
            }
            Err(err) => {
                info!("{expression} : {err}");
                self.session.expression.set_erreur();
                EvalOutcome::Echec(err)
            }
        };

        self.session.render();
        issue
    }

    pub fn clear(&mut self) {
        self.session.expression.clear();
        self.session.render();
    }
}
