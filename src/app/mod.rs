//! Backdrop app
//!
//! The eframe app that hosts the dot grid on both native and WASM. It owns
//! one [`DotGrid`], the optional constellation layer and the pointer glyph,
//! and drives them from egui input each frame.

mod constellation;
mod cursor;
mod grid;
mod header;
mod settings;

use eframe::egui;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::{BackdropConfig, Preset};
use crate::core::{Constellation, ConstellationConfig, DotGrid, Palette};
use crate::theme::{colors, paper_visuals};
use crate::time::{now_ms, now_seconds};

/// Dot grid backdrop - runs on both native and WASM
pub struct BackdropApp {
    pub(crate) config: BackdropConfig,
    /// Palette variable references resolve against (site palette + overrides)
    pub(crate) palette: Palette,
    pub(crate) grid: DotGrid,
    pub(crate) constellation: Option<Constellation>,
    /// Last pointer position seen over the window, screen space
    pub(crate) last_pointer: Option<egui::Pos2>,
    /// Preset the current config came from, if unedited
    pub(crate) preset: Option<Preset>,
    pub(crate) fps_counter: header::FpsCounter,
    pub(crate) show_settings: bool,
}

impl BackdropApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: BackdropConfig) -> Self {
        cc.egui_ctx.set_visuals(paper_visuals());
        Self::with_config(config)
    }

    pub fn with_config(config: BackdropConfig) -> Self {
        info!(
            constellation = config.constellation.is_some(),
            pointer = config.pointer.enabled,
            transparent = config.transparent,
            "Creating backdrop"
        );
        let palette = config.palette();
        let grid = DotGrid::new(config.grid.clone());
        let constellation = config.constellation.clone().map(new_constellation);

        Self {
            config,
            palette,
            grid,
            constellation,
            last_pointer: None,
            preset: None,
            fps_counter: header::FpsCounter::new(),
            show_settings: false,
        }
    }

    pub fn with_preset(preset: Preset) -> Self {
        let mut app = Self::with_config(preset.config());
        app.mark_preset(preset);
        app
    }

    /// Record the preset the current config came from
    pub fn mark_preset(&mut self, preset: Preset) {
        self.preset = Some(preset);
    }

    /// Swap in a whole new configuration, keeping the mounted grid
    pub(crate) fn apply_config(&mut self, config: BackdropConfig) {
        self.palette = config.palette();
        self.grid.set_config(config.grid.clone());

        self.constellation = match (self.constellation.take(), config.constellation.clone()) {
            (Some(mut existing), Some(next)) => {
                existing.set_config(next, now_seconds());
                Some(existing)
            }
            (None, Some(next)) => Some(new_constellation(next)),
            (_, None) => None,
        };

        self.config = config;
    }

    /// Mount on the first frame, resize afterwards
    fn track_surface(&mut self, rect: egui::Rect) {
        if self.grid.is_mounted() {
            self.grid.resize(rect);
        } else {
            self.grid.mount(rect);
        }
    }

    /// Turn egui's hover position into move / leave events for the grid
    fn track_pointer(&mut self, ctx: &egui::Context, now_ms: f64) {
        let hover = ctx.input(|i| i.pointer.hover_pos());
        match (hover, self.last_pointer) {
            (Some(pos), last) if last != Some(pos) => {
                self.grid.pointer_move(pos, now_ms);
            }
            (None, Some(_)) => self.grid.pointer_leave(),
            _ => {}
        }
        self.last_pointer = hover;
        self.grid.tick(now_ms);
    }
}

fn new_constellation(config: ConstellationConfig) -> Constellation {
    Constellation::new(config, SmallRng::from_entropy())
}

impl eframe::App for BackdropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Continuous redraw: the pointer glyph spins and stars pulse
        ctx.request_repaint();

        let now_ms = now_ms();
        let now_s = now_ms / 1000.0;

        if ctx.input(|i| i.key_pressed(egui::Key::F1)) {
            self.show_settings = !self.show_settings;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::F2)) {
            self.config.show_hud = !self.config.show_hud;
        }

        // Settings sidebar (must be shown before CentralPanel)
        if self.show_settings {
            self.render_settings(ctx);
        }

        let fill = if self.config.transparent {
            egui::Color32::TRANSPARENT
        } else {
            colors::BACKGROUND
        };

        let mut surface = egui::Rect::NOTHING;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(fill))
            .show(ctx, |ui| {
                surface = ui.max_rect();
                self.track_surface(surface);
                self.track_pointer(ctx, now_ms);

                let painter = ui.painter_at(surface);
                self.paint_grid(&painter);
                self.paint_constellation(&painter, surface, now_s);
            });

        if self.config.show_hud {
            self.render_hud(ctx);
        }

        self.paint_pointer(ctx, surface, now_s);
    }

    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        if self.config.transparent {
            [0.0; 4]
        } else {
            visuals.panel_fill.to_normalized_gamma_f32()
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.grid.unmount();
        self.constellation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColorRef;

    #[test]
    fn apply_config_swaps_constellation() {
        let mut app = BackdropApp::with_config(BackdropConfig::default());
        assert!(app.constellation.is_none());

        app.apply_config(Preset::NotFound.config());
        assert_eq!(
            app.constellation.as_ref().map(|c| c.config().star_count),
            Some(30)
        );

        app.apply_config(Preset::Work.config());
        assert!(app.constellation.is_none());
        assert_eq!(app.grid.config().min_gap, 30.0);
    }

    #[test]
    fn apply_config_rebuilds_palette() {
        let mut app = BackdropApp::with_config(BackdropConfig::default());
        let mut config = BackdropConfig::default();
        config.palette.insert("color-border-color".into(), "#102030".into());
        app.apply_config(config);

        let border = app.palette.resolve(&ColorRef::var("color-border-color"));
        assert_eq!(border, egui::Color32::from_rgb(0x10, 0x20, 0x30));
    }

    #[test]
    fn track_surface_mounts_then_resizes() {
        let mut app = BackdropApp::with_preset(Preset::Work);
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(300.0, 100.0));
        app.track_surface(rect);
        assert!(app.grid.is_mounted());
        assert_eq!(app.grid.layout_passes(), 1);

        app.track_surface(rect);
        assert_eq!(app.grid.layout_passes(), 1);

        app.track_surface(egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(900.0, 100.0)));
        assert_eq!(app.grid.layout_passes(), 2);
    }

    #[test]
    fn on_exit_stops_the_grid() {
        use eframe::App as _;

        let mut app = BackdropApp::with_preset(Preset::NotFound);
        app.track_surface(egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(300.0, 100.0)));
        app.on_exit(None);

        assert!(!app.grid.is_mounted());
        assert!(app.constellation.is_none());
        app.track_surface(egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(900.0, 900.0)));
        assert_eq!(app.grid.marks().count(), 0);
    }
}
