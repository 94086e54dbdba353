// src/app/historique.rs
//
// Historique des calculs réussis : plus récent en tête, borné, persisté en JSON
// sous la clé `historyKey` : [{"expression": "...", "result": "..."}, ...]

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::stockage::{signaler, Stockage, StockageError};
use crate::noyau::HistorySink;

pub const CLE_HISTORIQUE: &str = "historyKey";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    #[serde(rename = "result")]
    pub resultat: String,
}

pub struct Historique {
    entrees: Vec<HistoryEntry>,
    max: usize,
    stockage: Box<dyn Stockage>,
}

impl Historique {
    /// Recharge l'historique persistant; JSON absent ou illisible => vide.
    pub fn charger(stockage: Box<dyn Stockage>, max: usize) -> Self {
        let mut entrees = match lire_entrees(stockage.as_ref()) {
            Ok(e) => e,
            Err(e) => {
                warn!("historique ignoré: {e}");
                Vec::new()
            }
        };
        entrees.truncate(max);
        debug!("historique: {} entrée(s)", entrees.len());

        Self {
            entrees,
            max,
            stockage,
        }
    }

    /// Plus récent en premier.
    pub fn entrees(&self) -> &[HistoryEntry] {
        &self.entrees
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entrees.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn ajouter(&mut self, expression: &str, resultat: &str) {
        self.entrees.insert(
            0,
            HistoryEntry {
                expression: expression.to_string(),
                resultat: resultat.to_string(),
            },
        );
        self.entrees.truncate(self.max);
        self.sauver();
    }

    /// Vide la liste; la clé reste présente avec `[]`.
    pub fn clear(&mut self) {
        self.entrees.clear();
        self.sauver();
    }

    fn sauver(&mut self) {
        let r = serde_json::to_string(&self.entrees)
            .map_err(StockageError::from)
            .and_then(|json| self.stockage.ecrire(CLE_HISTORIQUE, &json));
        signaler("historique non sauvé", r);
    }
}

impl HistorySink for Historique {
    fn add(&mut self, expression: &str, resultat: &str) {
        self.ajouter(expression, resultat);
    }
}

fn lire_entrees(stockage: &dyn Stockage) -> Result<Vec<HistoryEntry>, StockageError> {
    match stockage.lire(CLE_HISTORIQUE)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
