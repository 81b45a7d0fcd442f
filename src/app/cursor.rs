//! Pointer glyph overlay

use eframe::egui;
use crate::theme::colors;
use super::BackdropApp;

impl BackdropApp {
    /// Replace the system cursor with the spinning star while over the backdrop
    pub(crate) fn paint_pointer(&self, ctx: &egui::Context, surface: egui::Rect, now_s: f64) {
        let pointer = &self.config.pointer;
        if !pointer.enabled {
            return;
        }
        let Some(pos) = self.last_pointer else {
            return;
        };
        // The settings panel shrinks the surface, so it keeps the normal cursor
        if !surface.contains(pos) {
            return;
        }

        ctx.set_cursor_icon(egui::CursorIcon::None);
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("pointer_glyph"),
        ));
        painter.add(egui::Shape::closed_line(
            pointer.outline(pos, now_s),
            egui::Stroke::new(pointer.stroke_width, colors::PRIMARY_TEXT),
        ));
    }
}
