//! Constellation: scattered pulsing stars joined by faint lines
//!
//! Stars are placed with a jittered grid (plus four anchored corner stars),
//! keeping clear of a central area where page content sits. Every pair of
//! stars closer than a fraction of the container width gets a link whose
//! opacity and weight fall off with distance.

use egui::{pos2, Pos2, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::color::ColorRef;
use super::viewport;

/// Jitter applied inside each grid cell (0 = cell corner, 1 = anywhere in cell)
const CELL_JITTER: f32 = 0.7;
/// Stars are kept this far from the container edge
const EDGE_MARGIN: f32 = 25.0;
/// Links fade in over this many seconds
const LINK_FADE_IN: f32 = 1.5;
/// Attempts per missing star before giving up on the random fill
const FILL_ATTEMPTS_PER_STAR: usize = 1000;
/// Upper bound on `star_count`; larger configured counts are clamped
pub const MAX_STARS: usize = 500;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    pub star_color: ColorRef,
    pub line_color: ColorRef,
    pub star_count: usize,
    /// Seconds per pulse cycle
    pub pulse_duration: f32,
    /// Nominal star radius, px
    pub star_size: f32,
    /// Link threshold as a fraction of container width
    pub connect_distance: f32,
    /// Threshold used instead on compact (narrow) viewports
    pub compact_connect_distance: Option<f32>,
    pub avoid_center_radius: f32,
    /// Opacity of the whole layer
    pub opacity: f32,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            star_color: ColorRef::var("color-border-color"),
            line_color: ColorRef::var("color-border-color"),
            star_count: 7,
            pulse_duration: 3.0,
            star_size: 1.5,
            connect_distance: 0.35,
            compact_connect_distance: None,
            avoid_center_radius: 60.0,
            opacity: 1.0,
        }
    }
}

impl ConstellationConfig {
    /// Link threshold fraction for a container of `width`
    pub fn connect_fraction(&self, width: f32) -> f32 {
        match self.compact_connect_distance {
            Some(compact) if viewport::is_compact(width) => compact,
            _ => self.connect_distance,
        }
    }
}

/// One star
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub id: usize,
    /// Container-local position
    pub pos: Pos2,
    /// Radius, px
    pub size: f32,
    /// Seconds before the star first appears
    pub delay: f32,
    pub pulse_duration: f32,
    pub brightness: f32,
    /// Seconds between blink cycles; `None` for a plain pulsing star
    pub blink_delay: Option<f32>,
}

/// Animated opacity and scale of a star at some instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    pub opacity: f32,
    pub scale: f32,
}

const PULSE_TIMES: [f32; 3] = [0.0, 0.5, 1.0];
const PULSE_OPACITY: [f32; 3] = [0.4, 1.0, 0.4];
const PULSE_SCALE: [f32; 3] = [0.8, 1.2, 0.8];

const BLINK_TIMES: [f32; 6] = [0.0, 0.4, 0.8, 0.81, 0.9, 1.0];
const BLINK_OPACITY: [f32; 6] = [0.4, 1.0, 0.4, 0.0, 0.7, 0.4];
const BLINK_SCALE: [f32; 6] = [0.8, 1.2, 0.8, 0.2, 1.0, 0.8];

impl Star {
    /// Opacity and scale `t` seconds after the constellation was generated
    pub fn appearance(&self, t: f32) -> Appearance {
        if t < self.delay {
            return Appearance {
                opacity: 0.0,
                scale: 0.0,
            };
        }

        let (times, opacity, scale, hold): (&[f32], &[f32], &[f32], f32) = match self.blink_delay {
            Some(hold) => (&BLINK_TIMES, &BLINK_OPACITY, &BLINK_SCALE, hold.max(0.0)),
            None => (&PULSE_TIMES, &PULSE_OPACITY, &PULSE_SCALE, 0.0),
        };

        let progress = if self.pulse_duration <= 0.0 {
            1.0
        } else {
            let phase = (t - self.delay) % (self.pulse_duration + hold);
            (phase / self.pulse_duration).min(1.0)
        };

        Appearance {
            opacity: self.brightness * keyframe(times, opacity, progress),
            scale: keyframe(times, scale, progress),
        }
    }
}

/// Line between two stars
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub start: Pos2,
    pub end: Pos2,
    /// Target opacity once faded in
    pub opacity: f32,
    /// Stroke width, px
    pub weight: f32,
}

impl Link {
    /// Opacity `t` seconds after generation (eased fade-in)
    pub fn opacity_at(&self, t: f32) -> f32 {
        let progress = (t / LINK_FADE_IN).clamp(0.0, 1.0);
        self.opacity * ease_in_out(progress)
    }
}

/// Place `config.star_count` stars inside a container of `size`
pub fn generate_stars<R: Rng>(size: Vec2, config: &ConstellationConfig, rng: &mut R) -> Vec<Star> {
    let count = config.star_count.min(MAX_STARS);
    if count < config.star_count {
        warn!(
            requested = config.star_count,
            max = MAX_STARS,
            "Star count clamped"
        );
    }
    let base_size = config.star_size;
    let base_pulse = config.pulse_duration;
    let center = pos2(size.x / 2.0, size.y / 2.0);
    let mut stars: Vec<Star> = Vec::with_capacity(count);

    // Anchored corner stars
    let corners = [
        pos2(size.x * 0.2, size.y * 0.2),
        pos2(size.x * 0.8, size.y * 0.2),
        pos2(size.x * 0.2, size.y * 0.8),
        pos2(size.x * 0.8, size.y * 0.8),
    ];
    for (idx, corner) in corners.iter().take(count).enumerate() {
        stars.push(Star {
            id: stars.len(),
            pos: pos2(
                corner.x + rng.gen_range(-15.0..15.0),
                corner.y + rng.gen_range(-15.0..15.0),
            ),
            size: base_size * rng.gen_range(1.0..1.3),
            delay: 0.1 * idx as f32,
            pulse_duration: base_pulse * rng.gen_range(0.9..1.2),
            brightness: rng.gen_range(0.8..1.0),
            blink_delay: Some(rng.gen_range(5.0..15.0)),
        });
    }

    // Jittered grid, column-major
    let grid_size = ((count as f32 * 1.5).sqrt()).floor() as usize;
    if grid_size > 0 {
        let cell = Vec2::new(size.x / grid_size as f32, size.y / grid_size as f32);
        'cells: for i in 0..grid_size {
            for j in 0..grid_size {
                if stars.len() >= count {
                    break 'cells;
                }
                let x = cell.x * (i as f32 + CELL_JITTER * rng.gen::<f32>());
                let y = cell.y * (j as f32 + CELL_JITTER * rng.gen::<f32>());
                if pos2(x, y).distance(center) < config.avoid_center_radius {
                    continue;
                }
                let pos = pos2(
                    clamp_margin(x, size.x),
                    clamp_margin(y, size.y),
                );

                let micro = rng.gen::<f32>() < 0.4;
                let blinks = rng.gen::<f32>() < 0.3;
                let (star_size, pulse, brightness) = if micro {
                    (
                        base_size * rng.gen_range(0.3..0.6),
                        base_pulse * rng.gen_range(1.2..2.0),
                        rng.gen_range(0.4..0.7),
                    )
                } else {
                    (
                        base_size * rng.gen_range(0.6..1.1),
                        base_pulse * rng.gen_range(0.8..1.2),
                        rng.gen_range(0.6..1.0),
                    )
                };
                stars.push(Star {
                    id: stars.len(),
                    pos,
                    size: star_size,
                    delay: rng.gen_range(0.0..3.0),
                    pulse_duration: pulse,
                    brightness,
                    blink_delay: blinks.then(|| rng.gen_range(7.0..22.0)),
                });
            }
        }
    }

    // Top up anywhere outside the center
    let mut attempts = 0;
    let max_attempts = FILL_ATTEMPTS_PER_STAR.saturating_mul(count);
    while stars.len() < count && size.x > 0.0 && size.y > 0.0 {
        attempts += 1;
        if attempts > max_attempts {
            warn!(
                placed = stars.len(),
                wanted = count,
                avoid_center_radius = config.avoid_center_radius,
                "No room left for stars outside the center"
            );
            break;
        }
        let pos = pos2(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y);
        if pos.distance(center) < config.avoid_center_radius {
            continue;
        }
        stars.push(Star {
            id: stars.len(),
            pos,
            size: base_size * rng.gen_range(0.4..1.0),
            delay: rng.gen_range(0.0..3.0),
            pulse_duration: base_pulse * rng.gen_range(0.8..1.2),
            brightness: rng.gen_range(0.5..1.0),
            blink_delay: (rng.gen::<f32>() < 0.3).then(|| rng.gen_range(7.0..22.0)),
        });
    }

    stars
}

/// Links between every pair of stars closer than `width * fraction`
pub fn connect(stars: &[Star], width: f32, fraction: f32, star_size: f32) -> Vec<Link> {
    let threshold = width * fraction;
    if threshold <= 0.0 || star_size <= 0.0 {
        return Vec::new();
    }

    let mut links = Vec::new();
    for (i, a) in stars.iter().enumerate() {
        for b in &stars[i + 1..] {
            let distance = a.pos.distance(b.pos);
            if distance >= threshold {
                continue;
            }
            let closeness = 1.0 - distance / threshold;
            let base_opacity = 0.2 + closeness * 0.6;
            links.push(Link {
                from: a.id,
                to: b.id,
                start: a.pos,
                end: b.pos,
                opacity: base_opacity * (a.brightness + b.brightness) / 2.0,
                weight: 0.1 + 0.3 * closeness * ((a.size + b.size) / (2.0 * star_size)),
            });
        }
    }
    links
}

/// Stars and links for one container size, regenerated when the size changes
#[derive(Debug)]
pub struct Constellation {
    config: ConstellationConfig,
    size: Vec2,
    stars: Vec<Star>,
    links: Vec<Link>,
    /// Seconds timestamp of the last generation
    generated_at: f64,
    rng: SmallRng,
}

impl Constellation {
    pub fn new(config: ConstellationConfig, rng: SmallRng) -> Self {
        Self {
            config,
            size: Vec2::ZERO,
            stars: Vec::new(),
            links: Vec::new(),
            generated_at: 0.0,
            rng,
        }
    }

    pub fn with_seed(config: ConstellationConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &ConstellationConfig {
        &self.config
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Seconds since the current stars were generated
    pub fn elapsed(&self, now_s: f64) -> f32 {
        (now_s - self.generated_at).max(0.0) as f32
    }

    /// Track the container size; regenerates on change. Returns true if regenerated.
    pub fn update(&mut self, size: Vec2, now_s: f64) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        self.regenerate(now_s);
        true
    }

    pub fn set_config(&mut self, config: ConstellationConfig, now_s: f64) {
        if config == self.config {
            return;
        }
        self.config = config;
        self.regenerate(now_s);
    }

    fn regenerate(&mut self, now_s: f64) {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            self.stars.clear();
            self.links.clear();
            return;
        }
        self.stars = generate_stars(self.size, &self.config, &mut self.rng);
        self.links = connect(
            &self.stars,
            self.size.x,
            self.config.connect_fraction(self.size.x),
            self.config.star_size,
        );
        self.generated_at = now_s;
        debug!(
            stars = self.stars.len(),
            links = self.links.len(),
            width = self.size.x,
            height = self.size.y,
            "Constellation generated"
        );
    }
}

fn clamp_margin(v: f32, extent: f32) -> f32 {
    v.min(extent - EDGE_MARGIN).max(EDGE_MARGIN)
}

/// CSS `cubic-bezier(0.42, 0, 0.58, 1)` ease-in-out on [0, 1]
fn ease_in_out(t: f32) -> f32 {
    const X1: f32 = 0.42;
    const X2: f32 = 0.58;

    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    let bezier = |p1: f32, p2: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };
    // x(s) is monotonic for these control points, so bisect for x(s) = t
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..24 {
        let mid = 0.5 * (lo + hi);
        if bezier(X1, X2, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    bezier(0.0, 1.0, 0.5 * (lo + hi))
}

/// Value of an eased keyframe track at `progress` in [0, 1]
fn keyframe(times: &[f32], values: &[f32], progress: f32) -> f32 {
    debug_assert_eq!(times.len(), values.len());
    let Some(&last) = values.last() else {
        return 0.0;
    };
    for k in 1..times.len() {
        if progress <= times[k] {
            let span = times[k] - times[k - 1];
            let t = if span > 0.0 {
                (progress - times[k - 1]) / span
            } else {
                1.0
            };
            return values[k - 1] + (values[k] - values[k - 1]) * ease_in_out(t);
        }
    }
    last
}
