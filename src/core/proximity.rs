//! Pointer proximity brightening

use egui::Pos2;

/// Pointer position relative to the container
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub pos: Pos2,
    /// Pointer is inside the container bounds
    pub active: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        // Far off-screen so a stray read never brightens anything
        Self {
            pos: Pos2::new(-1000.0, -1000.0),
            active: false,
        }
    }
}

impl PointerState {
    /// Position if the pointer is active
    pub fn active_pos(&self) -> Option<Pos2> {
        self.active.then_some(self.pos)
    }
}

/// Linear opacity falloff around the pointer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proximity {
    /// Opacity of marks outside the radius
    pub base: f32,
    /// Opacity of a mark directly under the pointer
    pub peak: f32,
    pub radius: f32,
}

impl Proximity {
    pub fn new(base: f32, peak: f32, radius: f32) -> Self {
        Self { base, peak, radius }
    }

    /// Opacity for a mark at `mark`, given an optional active pointer position.
    pub fn opacity(&self, mark: Pos2, pointer: Option<Pos2>) -> f32 {
        let Some(pointer) = pointer else {
            return self.base;
        };
        if self.radius <= 0.0 {
            return self.base;
        }

        let distance = mark.distance(pointer);
        if distance <= self.radius {
            let t = 1.0 - distance / self.radius;
            self.base + t * (self.peak - self.base)
        } else {
            self.base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_peak_at_pointer() {
        let p = Proximity::new(0.15, 1.0, 50.0);
        let at = pos2(150.0, 50.0);
        assert!((p.opacity(at, Some(at)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_base_at_and_beyond_radius() {
        let p = Proximity::new(0.15, 1.0, 50.0);
        let pointer = pos2(0.0, 0.0);
        assert_eq!(p.opacity(pos2(50.0, 0.0), Some(pointer)), 0.15);
        assert_eq!(p.opacity(pos2(30.0, 40.0), Some(pointer)), 0.15);
        assert_eq!(p.opacity(pos2(50.1, 0.0), Some(pointer)), 0.15);
        assert_eq!(p.opacity(pos2(500.0, 500.0), Some(pointer)), 0.15);
    }

    #[test]
    fn test_inactive_pointer_is_base() {
        let p = Proximity::new(0.35, 0.9, 120.0);
        assert_eq!(p.opacity(pos2(10.0, 10.0), None), 0.35);

        let pointer = PointerState {
            pos: pos2(10.0, 10.0),
            active: false,
        };
        assert_eq!(p.opacity(pos2(10.0, 10.0), pointer.active_pos()), 0.35);
    }

    #[test]
    fn test_monotonic_falloff() {
        let p = Proximity::new(0.2, 0.8, 120.0);
        let pointer = Some(pos2(0.0, 0.0));
        let mut prev = f32::MAX;
        for step in 0..=130 {
            let opacity = p.opacity(pos2(step as f32, 0.0), pointer);
            assert!(opacity <= prev, "opacity rose at distance {step}");
            prev = opacity;
        }
    }

    #[test]
    fn test_halfway_is_midpoint() {
        let p = Proximity::new(0.2, 0.8, 100.0);
        let opacity = p.opacity(pos2(50.0, 0.0), Some(pos2(0.0, 0.0)));
        assert!((opacity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_radius_disables() {
        let p = Proximity::new(0.3, 1.0, 0.0);
        let at = pos2(1.0, 1.0);
        assert_eq!(p.opacity(at, Some(at)), 0.3);
    }
}
