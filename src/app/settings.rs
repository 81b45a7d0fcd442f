//! Settings sidebar - presets, grid tuning, overlay toggles

use eframe::egui;
use crate::config::Preset;
use crate::core::ConstellationConfig;
use crate::theme::colors;
use super::BackdropApp;

impl BackdropApp {
    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        let width = ctx.screen_rect().width() * 0.18;
        let mut next = self.config.clone();
        let mut chosen_preset = None;

        egui::SidePanel::left("settings")
            .default_width(width)
            .min_width(220.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BACKGROUND).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, colors::TIMBERWOLF))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Preset:").color(colors::SECONDARY_TEXT));
                    for &preset in Preset::ALL {
                        if ui
                            .radio(self.preset == Some(preset), preset.name())
                            .clicked()
                        {
                            chosen_preset = Some(preset);
                        }
                    }
                });

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Grid:").color(colors::SECONDARY_TEXT));
                    let grid = &mut next.grid;
                    let full_width = ui.available_width();
                    ui.spacing_mut().slider_width = full_width * 0.6;

                    ui.add(egui::Slider::new(&mut grid.opacity, 0.0..=1.0).text("opacity"));
                    ui.add(egui::Slider::new(&mut grid.size, 1.0..=16.0).text("size"));
                    ui.add(egui::Slider::new(&mut grid.min_gap, 0.0..=80.0).text("min gap"));
                    ui.add(egui::Slider::new(&mut grid.stroke_width, 0.5..=3.0).text("stroke"));

                    ui.add_space(4.0);
                    ui.checkbox(&mut grid.cursor_effect, "Cursor brightening");
                    ui.add_enabled_ui(grid.cursor_effect, |ui| {
                        ui.add(egui::Slider::new(&mut grid.cursor_radius, 0.0..=400.0).text("radius"));
                        ui.add(egui::Slider::new(&mut grid.hover_opacity, 0.0..=1.0).text("hover opacity"));
                        ui.add(
                            egui::Slider::new(&mut grid.throttle_ms, 0.0..=100.0)
                                .text("throttle ms")
                                .clamping(egui::SliderClamping::Always),
                        );
                    });
                });

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Overlays:").color(colors::SECONDARY_TEXT));

                    let mut stars_on = next.constellation.is_some();
                    if ui.checkbox(&mut stars_on, "Constellation").changed() {
                        next.constellation = stars_on.then(ConstellationConfig::default);
                    }
                    if let Some(stars) = next.constellation.as_mut() {
                        let mut count = stars.star_count as u32;
                        if ui
                            .add(egui::Slider::new(&mut count, 0..=60).text("stars"))
                            .changed()
                        {
                            stars.star_count = count as usize;
                        }
                        ui.add(
                            egui::Slider::new(&mut stars.connect_distance, 0.0..=1.0)
                                .text("connect"),
                        );
                    }

                    ui.checkbox(&mut next.pointer.enabled, "Star pointer");
                    ui.checkbox(&mut next.show_hud, "HUD");
                });

                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new("F1 settings / F2 HUD")
                        .color(colors::SECONDARY_TEXT)
                        .small(),
                );
            });

        if let Some(preset) = chosen_preset {
            let mut config = preset.config();
            // Overlay toggles are viewer preferences, not part of a preset
            config.show_hud = self.config.show_hud;
            config.transparent = self.config.transparent;
            self.apply_config(config);
            self.preset = Some(preset);
        } else if next != self.config {
            self.apply_config(next);
            self.preset = None;
        }
    }
}
