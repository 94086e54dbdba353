// src/noyau/modes.rs
//
// Drapeaux de mode : DEG/RAD, 2nd, F-E.
// Seul état transversal mutable avec l'expression elle-même; jamais persisté.

/// Les trois bascules indépendantes de la calculatrice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeFlags {
    /// true = degrés (DEG), false = radians (RAD).
    pub degree: bool,
    /// Jeu secondaire (x³ / ∛ au lieu de x² / √).
    pub secondary: bool,
    /// Affichage en notation exponentielle (F-E).
    pub exponential: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            degree: true,
            secondary: false,
            exponential: false,
        }
    }
}

/// Bascule demandée par l'entrée (bouton dédié).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Degree,
    Secondary,
    Exponential,
}

impl ModeFlags {
    /// Inverse un drapeau et retourne sa nouvelle valeur.
    pub fn basculer(&mut self, mode: Mode) -> bool {
        let drapeau = match mode {
            Mode::Degree => &mut self.degree,
            Mode::Secondary => &mut self.secondary,
            Mode::Exponential => &mut self.exponential,
        };
        *drapeau = !*drapeau;
        *drapeau
    }

    /// Libellé de l'unité d'angle.
    pub fn unite(&self) -> &'static str {
        if self.degree {
            "DEG"
        } else {
            "RAD"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valeurs_par_defaut() {
        let m = ModeFlags::default();
        assert!(m.degree);
        assert!(!m.secondary);
        assert!(!m.exponential);
        assert_eq!(m.unite(), "DEG");
    }

    #[test]
    fn bascules_independantes() {
        let mut m = ModeFlags::default();
        assert!(m.basculer(Mode::Secondary));
        assert!(!m.basculer(Mode::Degree));
        assert_eq!(m.unite(), "RAD");
        assert!(m.secondary);
        assert!(!m.exponential);
        assert!(!m.basculer(Mode::Secondary));
    }
}
