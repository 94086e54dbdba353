// src/app/stockage.rs
//
// Stockage clé/valeur (même contrat que localStorage).
// - natif : un fichier par clé dans le dossier de données
// - web   : window.localStorage
// - tests / repli : HashMap en mémoire

use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use log::warn;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StockageError {
    #[error("entrée/sortie: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON invalide: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stockage indisponible: {0}")]
    Indisponible(String),
}

pub trait Stockage {
    /// `Ok(None)` si la clé n'existe pas.
    fn lire(&self, cle: &str) -> Result<Option<String>, StockageError>;
    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), StockageError>;
    /// Supprimer une clé absente n'est pas une erreur.
    fn supprimer(&mut self, cle: &str) -> Result<(), StockageError>;
}

/* ------------------------ Mémoire vive ------------------------ */

#[derive(Clone, Debug, Default)]
pub struct StockageMemoire {
    valeurs: HashMap<String, String>,
}

impl Stockage for StockageMemoire {
    fn lire(&self, cle: &str) -> Result<Option<String>, StockageError> {
        Ok(self.valeurs.get(cle).cloned())
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), StockageError> {
        self.valeurs.insert(cle.to_string(), valeur.to_string());
        Ok(())
    }

    fn supprimer(&mut self, cle: &str) -> Result<(), StockageError> {
        self.valeurs.remove(cle);
        Ok(())
    }
}

/* ------------------------ Fichiers (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct StockageFichiers {
    dossier: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl StockageFichiers {
    /// Le dossier est créé à la première écriture.
    pub fn new(dossier: impl Into<PathBuf>) -> Self {
        Self {
            dossier: dossier.into(),
        }
    }

    fn chemin(&self, cle: &str) -> PathBuf {
        self.dossier.join(cle)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Stockage for StockageFichiers {
    fn lire(&self, cle: &str) -> Result<Option<String>, StockageError> {
        match std::fs::read_to_string(self.chemin(cle)) {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), StockageError> {
        std::fs::create_dir_all(&self.dossier)?;
        std::fs::write(self.chemin(cle), valeur)?;
        Ok(())
    }

    fn supprimer(&mut self, cle: &str) -> Result<(), StockageError> {
        match std::fs::remove_file(self.chemin(cle)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/* ------------------------ localStorage (web) ------------------------ */

#[cfg(target_arch = "wasm32")]
pub struct StockageLocal {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl StockageLocal {
    pub fn new() -> Result<Self, StockageError> {
        let w = web_sys::window()
            .ok_or_else(|| StockageError::Indisponible("window() indisponible".into()))?;
        let storage = w
            .local_storage()
            .map_err(|e| StockageError::Indisponible(format!("{e:?}")))?
            .ok_or_else(|| StockageError::Indisponible("localStorage absent".into()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
fn js(e: wasm_bindgen::JsValue) -> StockageError {
    StockageError::Indisponible(format!("{e:?}"))
}

#[cfg(target_arch = "wasm32")]
impl Stockage for StockageLocal {
    fn lire(&self, cle: &str) -> Result<Option<String>, StockageError> {
        self.storage.get_item(cle).map_err(js)
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), StockageError> {
        self.storage.set_item(cle, valeur).map_err(js)
    }

    fn supprimer(&mut self, cle: &str) -> Result<(), StockageError> {
        self.storage.remove_item(cle).map_err(js)
    }
}

/* ------------------------ Choix selon la cible ------------------------ */

/// Stockage de la plateforme courante.
#[cfg(not(target_arch = "wasm32"))]
pub fn ouvrir(config: &Config) -> Box<dyn Stockage> {
    Box::new(StockageFichiers::new(config.data_dir.clone()))
}

/// Stockage de la plateforme courante (repli en mémoire si localStorage est refusé).
#[cfg(target_arch = "wasm32")]
pub fn ouvrir(_config: &Config) -> Box<dyn Stockage> {
    match StockageLocal::new() {
        Ok(s) => Box::new(s),
        Err(e) => {
            warn!("{e}, historique et mémoire non persistés");
            Box::new(StockageMemoire::default())
        }
    }
}

/// Journalise un échec de persistance sans l'imposer à l'appelant.
pub(crate) fn signaler(contexte: &str, r: Result<(), StockageError>) {
    if let Err(e) = r {
        warn!("{contexte}: {e}");
    }
}
