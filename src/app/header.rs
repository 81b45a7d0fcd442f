//! HUD overlay: frame rate, layout and pointer status

use std::collections::VecDeque;

use eframe::egui;
use crate::theme::colors;
use crate::time::now_ms;
use super::BackdropApp;

impl BackdropApp {
    pub(crate) fn render_hud(&mut self, ctx: &egui::Context) {
        self.fps_counter.tick();

        let layout = self.grid.layout();
        let pointer = self.grid.pointer();
        let stars = self.constellation.as_ref().map(|c| c.stars().len());

        egui::Area::new(egui::Id::new("hud"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(colors::BG_ELEVATED)
                    .stroke(egui::Stroke::new(1.0, colors::TIMBERWOLF))
                    .corner_radius(4.0)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        let muted = |text: String| egui::RichText::new(text).color(colors::SECONDARY_TEXT).monospace();

                        ui.label(
                            egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                                .color(colors::PRIMARY_TEXT)
                                .monospace(),
                        );
                        ui.label(muted(format!(
                            "{}x{} marks / gap {:.1}",
                            layout.columns, layout.rows, layout.gap
                        )));
                        ui.label(muted(format!("{} layout passes", self.grid.layout_passes())));
                        if pointer.active {
                            ui.label(muted(format!(
                                "pointer {:.0},{:.0}",
                                pointer.pos.x, pointer.pos.y
                            )));
                        } else {
                            ui.label(muted("pointer idle".to_string()));
                        }
                        if let Some(stars) = stars {
                            ui.label(muted(format!("{stars} stars")));
                        }

                        let settings_text = if self.show_settings { "Settings <<<" } else { "Settings >>>" };
                        if ui.button(egui::RichText::new(settings_text)).clicked() {
                            self.show_settings = !self.show_settings;
                        }
                    });
            });
    }
}

/// FPS counter over the last 60 frames
pub struct FpsCounter {
    frames: VecDeque<f64>,
}

impl FpsCounter {
    const WINDOW: usize = 60;

    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(Self::WINDOW + 1),
        }
    }

    pub fn tick(&mut self) {
        self.record(now_ms());
    }

    fn record(&mut self, at_ms: f64) {
        self.frames.push_back(at_ms);
        if self.frames.len() > Self::WINDOW {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
