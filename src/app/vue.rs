// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// - Écran : chaîne d'affichage de la session ("0" si vide) + DEG/RAD + indicateur M
// - Bascules DEG / 2nd / F-E, touches mémoire
// - Menus trigonométrie / fonctions
// - Pavé scientifique (libellés x²/x³ et √x/∛x selon 2nd)
// - Historique repliable (clic = rappel du résultat)
//
// Les clics sont collectés puis appliqués après le dessin : aucune mutation pendant l'UI.

use eframe::egui;

use super::etat::{AppCalc, Touche};
use super::memoire::ActionMemoire;
use crate::noyau::{Mode, Operation};

const TAILLE_TOUCHE: [f32; 2] = [56.0, 36.0];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let mut clic: Option<Touche> = None;
        let mut rappel: Option<usize> = None;
        let mut vider_historique = false;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice scientifique");
                ui.add_space(6.0);

                self.ui_ecran(ui);
                ui.add_space(8.0);

                self.ui_modes(ui, &mut clic);
                self.ui_memoire(ui, &mut clic);
                self.ui_menus(ui, &mut clic);

                ui.add_space(8.0);
                self.ui_pave(ui, &mut clic);

                ui.add_space(8.0);
                ui.separator();
                self.ui_historique(ui, &mut rappel, &mut vider_historique);
            });

        if let Some(t) = clic {
            self.appliquer(t);
        }
        if let Some(i) = rappel {
            self.rappel_historique(i);
        }
        if vider_historique {
            self.effacer_historique();
        }
    }

    fn ui_ecran(&self, ui: &mut egui::Ui) {
        let modes = self.session.modes();

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.small(modes.unite());
                    if modes.secondary {
                        ui.small("2nd");
                    }
                    if modes.exponential {
                        ui.small("F-E");
                    }
                    if !self.memoire.is_empty() {
                        ui.small("M");
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(self.session.ecran().texte())
                            .monospace()
                            .size(28.0),
                    );
                });
            });

        if let Some(msg) = &self.message {
            ui.colored_label(ui.visuals().error_fg_color, msg);
        }
    }

    fn ui_modes(&self, ui: &mut egui::Ui, clic: &mut Option<Touche>) {
        let modes = self.session.modes();
        ui.horizontal(|ui| {
            if ui
                .selectable_label(modes.degree, "DEG")
                .on_hover_text("Degrés / radians")
                .clicked()
            {
                *clic = Some(Touche::Bascule(Mode::Degree));
            }
            if ui.selectable_label(modes.secondary, "2nd").clicked() {
                *clic = Some(Touche::Bascule(Mode::Secondary));
            }
            if ui
                .selectable_label(modes.exponential, "F-E")
                .on_hover_text("Notation exponentielle")
                .clicked()
            {
                *clic = Some(Touche::Bascule(Mode::Exponential));
            }
        });
    }

    fn ui_memoire(&self, ui: &mut egui::Ui, clic: &mut Option<Touche>) {
        ui.horizontal(|ui| {
            for action in ActionMemoire::TOUTES {
                let t = Touche::Memoire(action);
                let resp = ui.add_enabled(
                    self.active(t),
                    egui::Button::new(action.libelle()).min_size(egui::vec2(44.0, 26.0)),
                );
                if resp.clicked() {
                    *clic = Some(t);
                }
            }
        });
    }

    fn ui_menus(&self, ui: &mut egui::Ui, clic: &mut Option<Touche>) {
        ui.horizontal(|ui| {
            ui.menu_button("Trigonométrie", |ui| {
                for (label, op) in [("sin", Operation::Sin), ("cos", Operation::Cos), ("tan", Operation::Tan)] {
                    if ui.button(label).clicked() {
                        *clic = Some(Touche::Fonction(op));
                    }
                }
            });
            ui.menu_button("Fonctions", |ui| {
                for (label, op) in [
                    ("⌊x⌋ floor", Operation::Plancher),
                    ("⌈x⌉ ceil", Operation::Plafond),
                    ("|x| abs", Operation::Abs),
                    ("log", Operation::Log),
                    ("ln", Operation::Ln),
                ] {
                    if ui.button(label).clicked() {
                        *clic = Some(Touche::Fonction(op));
                    }
                }
            });
        });
    }

    fn ui_pave(&self, ui: &mut egui::Ui, clic: &mut Option<Touche>) {
        let secondaire = self.session.modes().secondary;
        let (carre, racine) = if secondaire {
            ("x³", "∛x")
        } else {
            ("x²", "√x")
        };

        let lignes: [&[(&str, Touche)]; 6] = [
            &[
                (carre, Touche::Carre),
                (racine, Touche::Racine),
                ("xʸ", Touche::Puissance),
                ("10ˣ", Touche::PuissanceDix),
                ("n!", Touche::Factorielle),
            ],
            &[
                ("π", Touche::Pi),
                ("e", Touche::E),
                ("1/x", Touche::Inverse),
                ("(", Touche::Saisie('(')),
                (")", Touche::Saisie(')')),
            ],
            &[
                ("7", Touche::Saisie('7')),
                ("8", Touche::Saisie('8')),
                ("9", Touche::Saisie('9')),
                ("/", Touche::Saisie('/')),
                ("⌫", Touche::Retour),
            ],
            &[
                ("4", Touche::Saisie('4')),
                ("5", Touche::Saisie('5')),
                ("6", Touche::Saisie('6')),
                ("*", Touche::Saisie('*')),
                ("C", Touche::Effacer),
            ],
            &[
                ("1", Touche::Saisie('1')),
                ("2", Touche::Saisie('2')),
                ("3", Touche::Saisie('3')),
                ("-", Touche::Saisie('-')),
                ("±", Touche::Signe),
            ],
            &[
                ("0", Touche::Saisie('0')),
                (".", Touche::Saisie('.')),
                ("+", Touche::Saisie('+')),
                ("=", Touche::Egal),
            ],
        ];

        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in lignes {
                    for &(label, touche) in ligne {
                        if ui.add_sized(TAILLE_TOUCHE, egui::Button::new(label)).clicked() {
                            *clic = Some(touche);
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_historique(&self, ui: &mut egui::Ui, rappel: &mut Option<usize>, vider: &mut bool) {
        let titre = format!(
            "Historique ({}/{})",
            self.historique.entrees().len(),
            self.config.historique_max
        );
        egui::CollapsingHeader::new(titre)
            .id_salt("historique")
            .default_open(false)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.monospace("Aucun calcul pour l'instant");
                    return;
                }

                for (i, e) in self.historique.entrees().iter().enumerate() {
                    let texte = format!("{} = {}", e.expression, e.resultat);
                    if ui
                        .add(egui::Button::new(egui::RichText::new(texte).monospace()).frame(false))
                        .on_hover_text("Reprendre ce résultat")
                        .clicked()
                    {
                        *rappel = Some(i);
                    }
                }

                ui.add_space(4.0);
                if ui.button("Effacer l'historique").clicked() {
                    *vider = true;
                }
            });
    }
}
