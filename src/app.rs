// src/app.rs
//
// Calculatrice scientifique : module App (racine)
// ----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (état, vue, historique, mémoire, stockage)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l'impl eframe::App (compatible NATIF + WEB)
//
// Clavier (global, pas de champ texte à focaliser) :
// - chiffres et ( ) * - + / .  => saisie
// - Enter ou =                 => évaluer
// - Backspace                  => retour arrière
// - Escape                     => C

pub mod etat;
pub mod historique;
pub mod memoire;
pub mod stockage;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::{AppCalc, Touche};

use eframe::egui;

/// Traduit les événements clavier de la frame en touches de calculatrice.
fn touches_clavier(events: &[egui::Event]) -> Vec<Touche> {
    let mut out = Vec::new();
    for ev in events {
        match ev {
            egui::Event::Text(t) => {
                for c in t.chars() {
                    match c {
                        '0'..='9' | '(' | ')' | '*' | '-' | '+' | '/' | '.' => {
                            out.push(Touche::Saisie(c))
                        }
                        '=' => out.push(Touche::Egal),
                        _ => {}
                    }
                }
            }
            egui::Event::Key {
                key, pressed: true, ..
            } => match key {
                egui::Key::Enter => out.push(Touche::Egal),
                egui::Key::Backspace => out.push(Touche::Retour),
                egui::Key::Escape => out.push(Touche::Effacer),
                _ => {}
            },
            _ => {}
        }
    }
    out
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let touches = ctx.input(|i| touches_clavier(&i.events));
        for t in touches {
            self.appliquer(t);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
