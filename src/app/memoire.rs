// src/app/memoire.rs
//
// Touches mémoire : MC, MR, M+, M-, MS.
// Opérande = valeur de l'expression courante (0 si vide ou en erreur).
// Expression non évaluable => la touche ne fait rien.
// Persistance : texte décimal sous `memoryKey`, clé supprimée quand la mémoire est vide.

use log::{debug, warn};

use super::stockage::{signaler, Stockage};
use crate::noyau::eval::formater_nombre;
use crate::noyau::CalculatorSession;

pub const CLE_MEMOIRE: &str = "memoryKey";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionMemoire {
    /// Vide la mémoire.
    Mc,
    /// Rappel dans l'expression.
    Mr,
    MPlus,
    MMoins,
    /// Mémorise la valeur courante.
    Ms,
}

impl ActionMemoire {
    pub const TOUTES: [ActionMemoire; 5] = [
        ActionMemoire::Mc,
        ActionMemoire::Mr,
        ActionMemoire::MPlus,
        ActionMemoire::MMoins,
        ActionMemoire::Ms,
    ];

    pub fn libelle(self) -> &'static str {
        match self {
            ActionMemoire::Mc => "MC",
            ActionMemoire::Mr => "MR",
            ActionMemoire::MPlus => "M+",
            ActionMemoire::MMoins => "M-",
            ActionMemoire::Ms => "MS",
        }
    }

    /// MC et MR n'ont de sens que si une valeur est mémorisée.
    pub fn exige_valeur(self) -> bool {
        matches!(self, ActionMemoire::Mc | ActionMemoire::Mr)
    }
}

pub struct Memoire {
    valeur: Option<f64>,
    stockage: Box<dyn Stockage>,
}

impl Memoire {
    pub fn charger(stockage: Box<dyn Stockage>) -> Self {
        let valeur = match stockage.lire(CLE_MEMOIRE) {
            Ok(v) => v
                .and_then(|t| t.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite()),
            Err(e) => {
                warn!("mémoire ignorée: {e}");
                None
            }
        };
        Self { valeur, stockage }
    }

    pub fn valeur(&self) -> Option<f64> {
        self.valeur
    }

    pub fn is_empty(&self) -> bool {
        self.valeur.is_none()
    }

    /// Applique une touche mémoire sur la session (MR modifie l'expression).
    pub fn appliquer(&mut self, action: ActionMemoire, session: &mut CalculatorSession) {
        let courante = match session.valeur_courante() {
            Ok(v) => v,
            Err(e) => {
                debug!("{}: ignoré ({e})", action.libelle());
                return;
            }
        };

        let nouvelle = match action {
            ActionMemoire::Mc => None,
            ActionMemoire::Mr => {
                if let Some(v) = self.valeur {
                    session.operations().rappel_memoire(v);
                }
                self.valeur
            }
            ActionMemoire::MPlus => Some(self.valeur.unwrap_or(0.0) + courante),
            ActionMemoire::MMoins => Some(self.valeur.unwrap_or(0.0) - courante),
            ActionMemoire::Ms => Some(courante),
        };

        match nouvelle {
            Some(v) if !v.is_finite() => {
                warn!("{}: débordement, mémoire inchangée", action.libelle());
            }
            _ => self.valeur = nouvelle,
        }
        debug!("{} -> {:?}", action.libelle(), self.valeur);

        self.sauver();
        session.render();
    }

    fn sauver(&mut self) {
        let r = match self.valeur {
            Some(v) => self.stockage.ecrire(CLE_MEMOIRE, &formater_nombre(v)),
            None => self.stockage.supprimer(CLE_MEMOIRE),
        };
        signaler("mémoire non sauvée", r);
    }
}
