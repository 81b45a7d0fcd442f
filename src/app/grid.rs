//! Dot grid painting

use eframe::egui;
use super::BackdropApp;

impl BackdropApp {
    /// Stroke every mark as a plus at its proximity opacity
    pub(crate) fn paint_grid(&self, painter: &egui::Painter) {
        let config = self.grid.config();
        // Resolved per frame so palette edits apply immediately
        let color = self.palette.resolve(&config.color);
        let origin = self.grid.bounds().min.to_vec2();

        for mark in self.grid.marks() {
            let opacity = mark.opacity.clamp(0.0, 1.0);
            if opacity <= 0.0 {
                continue;
            }
            let stroke = egui::Stroke::new(config.stroke_width, color.gamma_multiply(opacity));
            for [a, b] in mark.segments(config.size) {
                painter.line_segment([a + origin, b + origin], stroke);
            }
        }
    }
}
