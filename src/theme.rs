//! Warm paper theme matching the portfolio site

use egui::Color32;

/// Site palette, also registered as theme variables (see `Palette::portfolio`)
pub mod colors {
    use super::Color32;

    // === Surfaces ===
    pub const BACKGROUND: Color32 = Color32::from_rgb(255, 252, 242);     // #FFFCF2 - page background
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(246, 242, 232);    // #F6F2E8 - panels

    // === Text ===
    pub const PRIMARY_TEXT: Color32 = Color32::from_rgb(37, 36, 34);      // #252422
    pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(79, 77, 72);    // #4F4D48

    // === Lines & accents ===
    pub const BORDER: Color32 = Color32::from_rgb(121, 117, 110);         // #79756E - grid marks, stars
    pub const TIMBERWOLF: Color32 = Color32::from_rgb(204, 197, 185);     // #CCC5B9
}

/// egui Visuals for the settings panel and HUD drawn over the backdrop
pub fn paper_visuals() -> egui::Visuals {
    use colors::*;

    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BACKGROUND;
    visuals.faint_bg_color = BG_ELEVATED;

    visuals.override_text_color = Some(PRIMARY_TEXT);

    visuals.widgets.noninteractive.bg_fill = BACKGROUND;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, SECONDARY_TEXT);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, TIMBERWOLF);

    visuals.widgets.inactive.bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.weak_bg_fill = BG_ELEVATED;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, SECONDARY_TEXT);
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, TIMBERWOLF);

    visuals.widgets.hovered.bg_fill = TIMBERWOLF;
    visuals.widgets.hovered.weak_bg_fill = TIMBERWOLF;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, PRIMARY_TEXT);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, BORDER);

    visuals.widgets.active.bg_fill = TIMBERWOLF;
    visuals.widgets.active.weak_bg_fill = TIMBERWOLF;
    visuals.widgets.active.fg_stroke = egui::Stroke::new(1.0, PRIMARY_TEXT);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, PRIMARY_TEXT);

    visuals.selection.bg_fill = TIMBERWOLF;
    visuals.selection.stroke = egui::Stroke::new(1.0, PRIMARY_TEXT);

    visuals.hyperlink_color = PRIMARY_TEXT;

    // Flat, like the site
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
