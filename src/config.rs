// src/config.rs
//
// Configuration de l'application (natif + web).
// Ordre de résolution : défauts -> fichier `config.json` du dossier de données -> variables d'env.
// Sur wasm32 : ni fichier ni env, donc les défauts (le stockage passe par localStorage).

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Nom du fichier de configuration optionnel dans le dossier de données.
pub const FICHIER_CONFIG: &str = "config.json";

/// Taille d'historique par défaut (entrées les plus récentes).
pub const HISTORIQUE_MAX_DEFAUT: usize = 5;

/// Bornes acceptées pour la taille d'historique.
const HISTORIQUE_MIN: usize = 1;
const HISTORIQUE_LIMITE: usize = 50;

const ENV_DATA_DIR: &str = "CALC_SCI_DATA_DIR";
const ENV_HISTORY_MAX: &str = "CALC_SCI_HISTORY_MAX";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dossier des fichiers `historyKey` / `memoryKey` (natif).
    pub data_dir: PathBuf,
    /// Nombre d'entrées gardées dans l'historique.
    pub historique_max: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: dossier_par_defaut(),
            historique_max: HISTORIQUE_MAX_DEFAUT,
        }
    }
}

fn dossier_par_defaut() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".calculatrice_sci")
}

impl Config {
    /// Configuration effective au démarrage.
    #[must_use]
    pub fn charger() -> Self {
        let dir = Self::default().with_env_overrides().data_dir;
        let cfg = Self::depuis_fichier(&dir.join(FICHIER_CONFIG)).with_env_overrides();
        debug!("config: {cfg:?}");
        cfg
    }

    /// Lit un fichier JSON; absent => défauts, illisible => défauts + avertissement.
    fn depuis_fichier(path: &Path) -> Self {
        std::fs::read_to_string(path).map_or_else(
            |_| Self::default(),
            |contenu| match serde_json::from_str::<Self>(&contenu) {
                Ok(cfg) => cfg.normaliser(),
                Err(e) => {
                    warn!("config illisible ({}): {e}, défauts utilisés", path.display());
                    Self::default()
                }
            },
        )
    }

    /// Surcharges par variables d'environnement.
    ///
    /// Seules les variables présentes comptent; une valeur invalide est ignorée.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|cle| std::env::var(cle).ok())
    }

    /// Même règles que [`Config::with_env_overrides`], source injectable (tests).
    #[must_use]
    pub fn with_overrides_from(mut self, lire: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lire(ENV_DATA_DIR) {
            if !val.trim().is_empty() {
                self.data_dir = PathBuf::from(val);
            }
        }
        if let Some(n) = lire(ENV_HISTORY_MAX).and_then(|v| v.trim().parse::<usize>().ok()) {
            if (HISTORIQUE_MIN..=HISTORIQUE_LIMITE).contains(&n) {
                self.historique_max = n;
            }
        }
        self
    }

    fn normaliser(mut self) -> Self {
        if !(HISTORIQUE_MIN..=HISTORIQUE_LIMITE).contains(&self.historique_max) {
            warn!(
                "historique_max={} hors bornes, {HISTORIQUE_MAX_DEFAUT} utilisé",
                self.historique_max
            );
            self.historique_max = HISTORIQUE_MAX_DEFAUT;
        }
        self
    }
}
