//! Dot grid component state: layout, pointer tracking and lifecycle
//!
//! Owns everything one grid instance needs between frames. The host feeds it
//! container bounds and pointer events; [`DotGrid::marks`] yields what to
//! draw. After [`DotGrid::unmount`] every operation is a no-op.

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::color::ColorRef;
use super::layout::GridLayout;
use super::proximity::{PointerState, Proximity};
use super::throttle::Throttle;

/// Grid appearance and behaviour
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub color: ColorRef,
    /// Base opacity of every mark
    pub opacity: f32,
    /// Mark size (length of each arm of the plus), px
    pub size: f32,
    pub min_gap: f32,
    pub cursor_effect: bool,
    pub cursor_radius: f32,
    /// Opacity of a mark directly under the pointer
    pub hover_opacity: f32,
    pub stroke_width: f32,
    pub throttle_ms: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            color: ColorRef::default(),
            opacity: 0.35,
            size: 4.0,
            min_gap: 20.0,
            cursor_effect: true,
            cursor_radius: 120.0,
            hover_opacity: 0.9,
            stroke_width: 1.0,
            throttle_ms: 10.0,
        }
    }
}

impl GridConfig {
    pub fn proximity(&self) -> Proximity {
        Proximity::new(self.opacity, self.hover_opacity, self.cursor_radius)
    }

    /// Whether switching from `self` to `other` moves any mark
    fn layout_differs(&self, other: &Self) -> bool {
        self.size != other.size || self.min_gap != other.min_gap
    }
}

/// One mark ready to draw
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mark {
    /// Center, container-local
    pub center: Pos2,
    pub opacity: f32,
}

impl Mark {
    /// The plus shape: vertical segment, then horizontal segment, each `size` long
    pub fn segments(&self, size: f32) -> [[Pos2; 2]; 2] {
        let half = size / 2.0;
        let Pos2 { x, y } = self.center;
        [
            [Pos2::new(x, y - half), Pos2::new(x, y + half)],
            [Pos2::new(x - half, y), Pos2::new(x + half, y)],
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    TornDown,
}

/// A responsive grid of plus marks brightened near the pointer
#[derive(Debug)]
pub struct DotGrid {
    config: GridConfig,
    lifecycle: Lifecycle,
    /// Container rect in screen space
    bounds: Rect,
    layout: GridLayout,
    pointer: PointerState,
    pointer_throttle: Throttle<Pos2>,
    /// Number of layout computations, for diagnostics
    layout_passes: u64,
}

impl DotGrid {
    pub fn new(config: GridConfig) -> Self {
        let pointer_throttle = Throttle::new(config.throttle_ms);
        Self {
            config,
            lifecycle: Lifecycle::Created,
            bounds: Rect::NOTHING,
            layout: GridLayout::default(),
            pointer: PointerState::default(),
            pointer_throttle,
            layout_passes: 0,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Attach to a container and compute the first layout
    pub fn mount(&mut self, bounds: Rect) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.bounds = bounds;
        self.recompute();
        info!(
            width = bounds.width(),
            height = bounds.height(),
            marks = self.layout.len(),
            "Dot grid mounted"
        );
    }

    /// Container moved or changed size. Only a size change recomputes the layout.
    pub fn resize(&mut self, bounds: Rect) {
        if !self.is_mounted() || bounds == self.bounds {
            return;
        }
        let size_changed = bounds.size() != self.bounds.size();
        self.bounds = bounds;
        if size_changed {
            self.recompute();
        }
    }

    /// Replace the configuration
    pub fn set_config(&mut self, config: GridConfig) {
        if self.lifecycle == Lifecycle::TornDown || config == self.config {
            return;
        }
        let relayout = self.config.layout_differs(&config);
        if config.throttle_ms != self.config.throttle_ms {
            self.pointer_throttle = Throttle::new(config.throttle_ms);
        }
        if !config.cursor_effect {
            self.pointer.active = false;
            self.pointer_throttle.cancel();
        }
        self.config = config;
        if relayout && self.is_mounted() {
            self.recompute();
        }
    }

    /// Pointer moved to `screen_pos`. Throttled; returns true if it was applied now.
    pub fn pointer_move(&mut self, screen_pos: Pos2, now_ms: f64) -> bool {
        if !self.is_mounted() || !self.config.cursor_effect {
            return false;
        }
        match self.pointer_throttle.push(screen_pos, now_ms) {
            Some(pos) => {
                self.apply_pointer(pos);
                true
            }
            None => false,
        }
    }

    /// Pointer left the container
    pub fn pointer_leave(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.pointer_throttle.cancel();
        self.pointer.active = false;
    }

    /// Flush a throttled pointer position whose window has elapsed
    pub fn tick(&mut self, now_ms: f64) {
        if !self.is_mounted() {
            return;
        }
        if let Some(pos) = self.pointer_throttle.poll(now_ms) {
            self.apply_pointer(pos);
        }
    }

    /// When the next throttled pointer update is due, if any
    pub fn next_deadline(&self) -> Option<f64> {
        if !self.is_mounted() {
            return None;
        }
        self.pointer_throttle.deadline()
    }

    /// Marks with their current opacity, container-local
    pub fn marks(&self) -> impl Iterator<Item = Mark> + '_ {
        let proximity = self.config.proximity();
        let pointer = if self.config.cursor_effect {
            self.pointer.active_pos()
        } else {
            None
        };
        let points: &[Pos2] = if self.is_mounted() {
            &self.layout.points
        } else {
            &[]
        };
        points.iter().map(move |&center| Mark {
            center,
            opacity: proximity.opacity(center, pointer),
        })
    }

    /// Detach: drop pending pointer updates and stop all recomputation
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::TornDown {
            return;
        }
        self.lifecycle = Lifecycle::TornDown;
        self.pointer_throttle.cancel();
        self.pointer.active = false;
        self.layout = GridLayout::default();
        info!(layout_passes = self.layout_passes, "Dot grid unmounted");
    }

    fn recompute(&mut self) {
        self.layout = GridLayout::compute(
            self.bounds.width(),
            self.bounds.height(),
            self.config.size,
            self.config.min_gap,
        );
        self.layout_passes += 1;
        debug!(pass = self.layout_passes, marks = self.layout.len(), "Dot grid relayout");
    }

    fn apply_pointer(&mut self, screen_pos: Pos2) {
        let local = screen_pos - self.bounds.min;
        let size = self.bounds.size();
        let inside = local.x >= 0.0 && local.x <= size.x && local.y >= 0.0 && local.y <= size.y;
        if inside {
            self.pointer = PointerState {
                pos: local.to_pos2(),
                active: true,
            };
        } else {
            self.pointer.active = false;
        }
        trace!(x = local.x, y = local.y, inside, "Pointer applied");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn reference_grid() -> DotGrid {
        let config = GridConfig {
            opacity: 0.15,
            hover_opacity: 1.0,
            cursor_radius: 50.0,
            ..Default::default()
        };
        let mut grid = DotGrid::new(config);
        grid.mount(Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 100.0)));
        grid
    }

    #[test]
    fn test_no_marks_before_mount() {
        let grid = DotGrid::new(GridConfig::default());
        assert_eq!(grid.marks().count(), 0);
        assert!(!grid.is_mounted());
    }

    #[test]
    fn test_pointer_at_center() {
        let mut grid = reference_grid();
        assert_eq!(grid.marks().count(), 48);

        assert!(grid.pointer_move(pos2(150.0, 50.0), 0.0));
        let pointer = pos2(150.0, 50.0);

        let nearest = grid
            .marks()
            .min_by(|a, b| {
                a.center
                    .distance(pointer)
                    .total_cmp(&b.center.distance(pointer))
            })
            .unwrap();
        // Nearest mark sits ~19px from the exact center of a 12x4 grid
        assert!(nearest.center.distance(pointer) < 20.0);
        assert!(nearest.opacity > 0.65, "nearest opacity {}", nearest.opacity);

        for mark in grid.marks() {
            if mark.center.distance(pointer) >= 50.0 {
                assert_eq!(mark.opacity, 0.15);
            }
        }
    }

    #[test]
    fn test_mark_on_pointer_reaches_peak() {
        let mut grid = reference_grid();
        let first = grid.layout().points[0];
        grid.pointer_move(first, 0.0);
        let mark = grid.marks().next().unwrap();
        assert!((mark.opacity - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pointer_is_container_local() {
        let mut grid = DotGrid::new(GridConfig::default());
        grid.mount(Rect::from_min_size(pos2(100.0, 200.0), vec2(300.0, 100.0)));
        grid.pointer_move(pos2(250.0, 250.0), 0.0);
        let pointer = grid.pointer();
        assert!(pointer.active);
        assert_eq!(pointer.pos, pos2(150.0, 50.0));
    }

    #[test]
    fn test_pointer_outside_deactivates() {
        let mut grid = reference_grid();
        grid.pointer_move(pos2(10.0, 10.0), 0.0);
        assert!(grid.pointer().active);
        grid.pointer_move(pos2(400.0, 10.0), 100.0);
        assert!(!grid.pointer().active);
        assert!(grid.marks().all(|m| m.opacity == 0.15));
    }

    #[test]
    fn test_pointer_leave() {
        let mut grid = reference_grid();
        grid.pointer_move(pos2(10.0, 10.0), 0.0);
        grid.pointer_move(pos2(20.0, 10.0), 1.0);
        grid.pointer_leave();
        assert!(!grid.pointer().active);
        // The pending move was dropped with the leave
        grid.tick(100.0);
        assert!(!grid.pointer().active);
    }

    #[test]
    fn test_pointer_throttled_then_trailing() {
        let mut grid = reference_grid();
        assert!(grid.pointer_move(pos2(10.0, 10.0), 0.0));
        assert!(!grid.pointer_move(pos2(20.0, 10.0), 3.0));
        assert!(!grid.pointer_move(pos2(30.0, 10.0), 6.0));
        assert_eq!(grid.pointer().pos, pos2(10.0, 10.0));
        assert_eq!(grid.next_deadline(), Some(10.0));

        grid.tick(10.0);
        assert_eq!(grid.pointer().pos, pos2(30.0, 10.0));
        assert_eq!(grid.next_deadline(), None);
    }

    #[test]
    fn test_cursor_effect_disabled() {
        let mut grid = DotGrid::new(GridConfig {
            cursor_effect: false,
            ..Default::default()
        });
        grid.mount(Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 100.0)));
        assert!(!grid.pointer_move(pos2(150.0, 50.0), 0.0));
        assert!(grid.marks().all(|m| m.opacity == 0.35));
    }

    #[test]
    fn test_resize_recomputes_only_on_size_change() {
        let mut grid = reference_grid();
        assert_eq!(grid.layout_passes(), 1);

        // Moved, same size
        grid.resize(Rect::from_min_size(pos2(10.0, 10.0), vec2(300.0, 100.0)));
        assert_eq!(grid.layout_passes(), 1);

        grid.resize(Rect::from_min_size(pos2(10.0, 10.0), vec2(600.0, 100.0)));
        assert_eq!(grid.layout_passes(), 2);
        assert!(grid.layout().columns > 12);
    }

    #[test]
    fn test_set_config_relayout() {
        let mut grid = reference_grid();
        let mut config = grid.config().clone();

        config.hover_opacity = 0.5;
        grid.set_config(config.clone());
        assert_eq!(grid.layout_passes(), 1);

        config.min_gap = 30.0;
        grid.set_config(config);
        assert_eq!(grid.layout_passes(), 2);
    }

    #[test]
    fn test_nothing_after_unmount() {
        let mut grid = reference_grid();
        grid.pointer_move(pos2(10.0, 10.0), 0.0);
        grid.pointer_move(pos2(20.0, 10.0), 1.0);
        grid.unmount();
        let passes = grid.layout_passes();

        grid.resize(Rect::from_min_size(pos2(0.0, 0.0), vec2(900.0, 900.0)));
        grid.pointer_move(pos2(50.0, 50.0), 100.0);
        grid.tick(200.0);
        grid.set_config(GridConfig::default());
        grid.mount(Rect::from_min_size(pos2(0.0, 0.0), vec2(900.0, 900.0)));

        assert_eq!(grid.layout_passes(), passes);
        assert!(!grid.pointer().active);
        assert_eq!(grid.marks().count(), 0);
        assert_eq!(grid.next_deadline(), None);
    }

    #[test]
    fn test_mark_is_a_plus() {
        let mark = Mark {
            center: pos2(10.0, 10.0),
            opacity: 1.0,
        };
        let [vertical, horizontal] = mark.segments(4.0);
        assert_eq!(vertical, [pos2(10.0, 8.0), pos2(10.0, 12.0)]);
        assert_eq!(horizontal, [pos2(8.0, 10.0), pos2(12.0, 10.0)]);
    }
}
