//! Custom pointer glyph: a slowly spinning four-point star

use std::f32::consts::TAU;

use egui::{pos2, Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Star outline in a 32x32 box (path `M16 7 L17 14 L23 16 L17 18 L16 25 L15 18 L9 16 L15 14 Z`)
const OUTLINE: [[f32; 2]; 8] = [
    [16.0, 7.0],
    [17.0, 14.0],
    [23.0, 16.0],
    [17.0, 18.0],
    [16.0, 25.0],
    [15.0, 18.0],
    [9.0, 16.0],
    [15.0, 14.0],
];
const VIEWBOX: f32 = 32.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub enabled: bool,
    /// Seconds per full turn
    pub spin_period: f32,
    /// Rendered box size, px
    pub size: f32,
    pub stroke_width: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spin_period: 3.0,
            size: 32.0,
            stroke_width: 0.75,
        }
    }
}

impl PointerConfig {
    /// Rotation in radians at `t` seconds
    pub fn angle(&self, t: f64) -> f32 {
        if self.spin_period <= 0.0 {
            return 0.0;
        }
        let period = self.spin_period as f64;
        ((t.rem_euclid(period) / period) as f32) * TAU
    }

    /// Closed outline centered on `center`, rotated for time `t`
    pub fn outline(&self, center: Pos2, t: f64) -> Vec<Pos2> {
        let (sin, cos) = self.angle(t).sin_cos();
        let scale = self.size / VIEWBOX;
        OUTLINE
            .iter()
            .map(|&[x, y]| {
                let local = Vec2::new(x - VIEWBOX / 2.0, y - VIEWBOX / 2.0) * scale;
                pos2(
                    center.x + local.x * cos - local.y * sin,
                    center.y + local.x * sin + local.y * cos,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_at_rest() {
        let config = PointerConfig::default();
        let outline = config.outline(pos2(100.0, 100.0), 0.0);
        assert_eq!(outline.len(), 8);
        // Top tip is 9px above the center
        assert!((outline[0].x - 100.0).abs() < 1e-4);
        assert!((outline[0].y - 91.0).abs() < 1e-4);
    }

    #[test]
    fn test_quarter_turn() {
        let config = PointerConfig::default();
        // 0.75s of a 3s period is a quarter turn: the top tip points right
        let outline = config.outline(pos2(0.0, 0.0), 0.75);
        assert!((outline[0].x - 9.0).abs() < 1e-3, "{:?}", outline[0]);
        assert!(outline[0].y.abs() < 1e-3);
    }

    #[test]
    fn test_angle_wraps() {
        let config = PointerConfig::default();
        assert!((config.angle(3.0) - 0.0).abs() < 1e-6);
        assert!((config.angle(4.5) - TAU / 2.0).abs() < 1e-5);

        let frozen = PointerConfig {
            spin_period: 0.0,
            ..Default::default()
        };
        assert_eq!(frozen.angle(1.234), 0.0);
    }

    #[test]
    fn test_scaled_outline() {
        let config = PointerConfig {
            size: 64.0,
            ..Default::default()
        };
        let outline = config.outline(pos2(0.0, 0.0), 0.0);
        // Right tip: (23 - 16) * 2
        assert!((outline[2].x - 14.0).abs() < 1e-4);
    }
}
