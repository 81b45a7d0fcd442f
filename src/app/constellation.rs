//! Constellation layer painting

use eframe::egui;
use super::BackdropApp;

impl BackdropApp {
    pub(crate) fn paint_constellation(&mut self, painter: &egui::Painter, rect: egui::Rect, now_s: f64) {
        let Some(constellation) = self.constellation.as_mut() else {
            return;
        };
        constellation.update(rect.size(), now_s);

        let t = constellation.elapsed(now_s);
        let config = constellation.config();
        let layer = config.opacity.clamp(0.0, 1.0);
        let line_color = self.palette.resolve(&config.line_color);
        let star_color = self.palette.resolve(&config.star_color);
        let origin = rect.min.to_vec2();

        // Lines under stars
        for link in constellation.links() {
            let alpha = link.opacity_at(t) * layer;
            if alpha <= 0.0 {
                continue;
            }
            painter.line_segment(
                [link.start + origin, link.end + origin],
                egui::Stroke::new(link.weight, line_color.gamma_multiply(alpha)),
            );
        }

        for star in constellation.stars() {
            let look = star.appearance(t);
            if look.opacity <= 0.0 || look.scale <= 0.0 {
                continue;
            }
            painter.circle_filled(
                star.pos + origin,
                star.size * look.scale,
                star_color.gamma_multiply((look.opacity * layer).min(1.0)),
            );
        }
    }
}
