//! Backdrop configuration and page presets
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Presets reproduce the settings the portfolio pages use.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::{ColorRef, ConstellationConfig, GridConfig, Palette, PointerConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
}

/// Everything one backdrop instance needs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub grid: GridConfig,
    /// Optional constellation layer drawn over the grid
    pub constellation: Option<ConstellationConfig>,
    pub pointer: PointerConfig,
    /// Theme variable overrides, e.g. `"color-border-color": "#79756e"`
    pub palette: HashMap<String, String>,
    /// Clear to transparent so host content shows through (web)
    pub transparent: bool,
    /// Show the FPS / layout overlay
    pub show_hud: bool,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            constellation: None,
            pointer: PointerConfig::default(),
            palette: HashMap::new(),
            transparent: false,
            show_hud: false,
        }
    }
}

impl BackdropConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!(path = %path.display(), "Loaded backdrop config");
        Ok(config)
    }

    /// Site palette with this config's overrides applied
    pub fn palette(&self) -> Palette {
        let mut palette = Palette::portfolio();
        palette.extend_from_strings(&self.palette);
        palette
    }
}

/// Settings used by the portfolio pages
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Component defaults
    #[default]
    Default,
    /// 404 page: grid plus a dim constellation
    NotFound,
    Work,
    Contact,
    /// Contact links panel: constellation around a central button
    ContactLinks,
}

impl Preset {
    pub const ALL: &'static [Preset] = &[
        Preset::Default,
        Preset::NotFound,
        Preset::Work,
        Preset::Contact,
        Preset::ContactLinks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::NotFound => "not-found",
            Preset::Work => "work",
            Preset::Contact => "contact",
            Preset::ContactLinks => "contact-links",
        }
    }

    pub fn config(self) -> BackdropConfig {
        let border = ColorRef::var("color-border-color");
        match self {
            Preset::Default => BackdropConfig::default(),
            Preset::NotFound => BackdropConfig {
                grid: GridConfig {
                    color: border.clone(),
                    opacity: 0.2,
                    size: 4.0,
                    min_gap: 20.0,
                    cursor_effect: true,
                    cursor_radius: 120.0,
                    hover_opacity: 0.8,
                    ..Default::default()
                },
                constellation: Some(ConstellationConfig {
                    star_color: border.clone(),
                    line_color: border,
                    star_count: 30,
                    pulse_duration: 4.0,
                    star_size: 1.5,
                    connect_distance: 0.3,
                    opacity: 0.4,
                    ..Default::default()
                }),
                ..Default::default()
            },
            Preset::Work | Preset::Contact => BackdropConfig {
                grid: page_grid(border),
                ..Default::default()
            },
            Preset::ContactLinks => BackdropConfig {
                grid: page_grid(border.clone()),
                constellation: Some(ConstellationConfig {
                    star_color: border.clone(),
                    line_color: border,
                    star_count: 15,
                    pulse_duration: 4.0,
                    star_size: 1.5,
                    connect_distance: 0.5,
                    compact_connect_distance: Some(0.2),
                    avoid_center_radius: 100.0,
                    ..Default::default()
                }),
                ..Default::default()
            },
        }
    }
}

/// Grid shared by the work and contact pages
fn page_grid(color: ColorRef) -> GridConfig {
    GridConfig {
        color,
        opacity: 0.15,
        size: 4.0,
        min_gap: 30.0,
        cursor_effect: true,
        cursor_radius: 200.0,
        hover_opacity: 1.0,
        ..Default::default()
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_component() {
        let config = BackdropConfig::default();
        assert_eq!(config.grid.opacity, 0.35);
        assert_eq!(config.grid.size, 4.0);
        assert_eq!(config.grid.min_gap, 20.0);
        assert!(config.grid.cursor_effect);
        assert_eq!(config.grid.cursor_radius, 120.0);
        assert_eq!(config.grid.hover_opacity, 0.9);
        assert_eq!(config.grid.throttle_ms, 10.0);
        assert!(config.constellation.is_none());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "grid": { "min_gap": 30, "color": "var(--color-border-color)" },
            "constellation": { "star_count": 12 },
            "transparent": true
        }"#;
        let config = BackdropConfig::from_json(json).unwrap();
        assert_eq!(config.grid.min_gap, 30.0);
        assert_eq!(config.grid.size, 4.0);
        assert_eq!(config.grid.color, ColorRef::var("color-border-color"));
        assert_eq!(config.constellation.as_ref().map(|c| c.star_count), Some(12));
        assert_eq!(
            config.constellation.as_ref().map(|c| c.pulse_duration),
            Some(3.0)
        );
        assert!(config.transparent);
        assert!(config.pointer.enabled);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            BackdropConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            BackdropConfig::from_json(r#"{ "grid": { "color": "nope" } }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            BackdropConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_preset_names_round_trip() {
        for &preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
            let json = serde_json::to_string(&preset).unwrap();
            assert_eq!(json, format!("\"{}\"", preset.name()));
        }
        assert_eq!(" Work ".parse::<Preset>().unwrap(), Preset::Work);
        assert!(matches!(
            "home".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(_))
        ));
    }

    #[test]
    fn test_page_presets() {
        let work = Preset::Work.config();
        assert_eq!(work.grid.opacity, 0.15);
        assert_eq!(work.grid.min_gap, 30.0);
        assert_eq!(work.grid.cursor_radius, 200.0);
        assert_eq!(work.grid.hover_opacity, 1.0);
        assert_eq!(work, Preset::Contact.config());

        let not_found = Preset::NotFound.config();
        let stars = not_found.constellation.unwrap();
        assert_eq!(stars.star_count, 30);
        assert_eq!(stars.connect_distance, 0.3);

        let links = Preset::ContactLinks.config().constellation.unwrap();
        assert_eq!(links.compact_connect_distance, Some(0.2));
        assert_eq!(links.avoid_center_radius, 100.0);
    }

    #[test]
    fn test_palette_overrides() {
        let mut config = BackdropConfig::default();
        config
            .palette
            .insert("color-border-color".into(), "#000000".into());
        let palette = config.palette();
        assert_eq!(palette.get("color-border-color"), Some(egui::Color32::BLACK));
        assert!(palette.get("color-timberwolf").is_some());
    }
}
