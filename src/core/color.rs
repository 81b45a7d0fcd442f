//! Color references and theme palette lookup
//!
//! A configured color is either a literal (`#d9d9d9`, `rgba(79, 77, 72, 0.3)`)
//! or a reference to a theme variable (`var(--color-border-color)`). References
//! are resolved against a [`Palette`] at render time.

use std::collections::HashMap;
use std::fmt;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Used when a variable reference cannot be resolved
pub const FALLBACK_COLOR: Color32 = Color32::from_rgb(0xd9, 0xd9, 0xd9);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color")]
    Empty,
    #[error("invalid hex color `{0}`")]
    Hex(String),
    #[error("invalid rgb color `{0}`")]
    Rgb(String),
    #[error("unsupported color syntax `{0}`")]
    Unsupported(String),
}

/// A color as written in configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorRef {
    Literal(Color32),
    /// Theme variable name without the leading `--`
    Var(String),
}

impl ColorRef {
    pub fn var(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::Var(name.trim_start_matches("--").to_string())
    }

    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(inner) = s.strip_prefix("var(").and_then(|r| r.strip_suffix(')')) {
            let name = inner.trim().trim_start_matches("--");
            if name.is_empty() {
                return Err(ColorParseError::Unsupported(s.to_string()));
            }
            return Ok(Self::Var(name.to_string()));
        }
        parse_literal(s).map(Self::Literal)
    }
}

impl Default for ColorRef {
    fn default() -> Self {
        Self::Literal(FALLBACK_COLOR)
    }
}

impl From<Color32> for ColorRef {
    fn from(color: Color32) -> Self {
        Self::Literal(color)
    }
}

impl TryFrom<String> for ColorRef {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorRef> for String {
    fn from(color: ColorRef) -> Self {
        color.to_string()
    }
}

impl fmt::Display for ColorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Var(name) => write!(f, "var(--{name})"),
            Self::Literal(c) => {
                let hex = c.to_hex();
                // Opaque colors print in the short `#rrggbb` form
                match hex.strip_suffix("ff") {
                    Some(rgb) if c.a() == 255 => f.write_str(rgb),
                    _ => f.write_str(&hex),
                }
            }
        }
    }
}

fn parse_literal(s: &str) -> Result<Color32, ColorParseError> {
    if s.starts_with('#') {
        return Color32::from_hex(s).map_err(|_| ColorParseError::Hex(s.to_string()));
    }
    if let Some(body) = s
        .strip_prefix("rgba(")
        .or_else(|| s.strip_prefix("rgb("))
        .and_then(|r| r.strip_suffix(')'))
    {
        return parse_rgb(body).ok_or_else(|| ColorParseError::Rgb(s.to_string()));
    }
    Err(ColorParseError::Unsupported(s.to_string()))
}

/// `r, g, b` or `r, g, b, a` with 0-255 channels and 0-1 alpha
fn parse_rgb(body: &str) -> Option<Color32> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<u8>().ok();
    match *parts.as_slice() {
        [r, g, b] => Some(Color32::from_rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f32>().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            Some(Color32::from_rgba_unmultiplied(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}

/// Named theme colors that variable references resolve against
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Palette {
    vars: HashMap<String, Color32>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// The portfolio site's palette
    pub fn portfolio() -> Self {
        use crate::theme::colors;

        let mut palette = Self::new();
        palette.set("color-background", colors::BACKGROUND);
        palette.set("color-primary-text", colors::PRIMARY_TEXT);
        palette.set("color-secondary-text", colors::SECONDARY_TEXT);
        palette.set("color-timberwolf", colors::TIMBERWOLF);
        palette.set("color-border-color", colors::BORDER);
        palette
    }

    pub fn set(&mut self, name: &str, color: Color32) {
        self.vars
            .insert(name.trim_start_matches("--").to_string(), color);
    }

    pub fn get(&self, name: &str) -> Option<Color32> {
        self.vars.get(name.trim_start_matches("--")).copied()
    }

    /// Apply string overrides (from config). Entries that fail to parse, or
    /// that are themselves variable references, are skipped.
    pub fn extend_from_strings<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (name, value) in overrides {
            match ColorRef::parse(value) {
                Ok(ColorRef::Literal(color)) => self.set(name, color),
                Ok(ColorRef::Var(_)) => {
                    warn!(name = %name, value = %value, "Palette entry cannot reference another variable");
                }
                Err(e) => warn!(name = %name, error = %e, "Skipping invalid palette entry"),
            }
        }
    }

    /// Concrete color for `color`, falling back to [`FALLBACK_COLOR`]
    pub fn resolve(&self, color: &ColorRef) -> Color32 {
        match color {
            ColorRef::Literal(c) => *c,
            ColorRef::Var(name) => self.get(name).unwrap_or_else(|| {
                debug!(name = %name, "Unresolved theme variable, using fallback");
                FALLBACK_COLOR
            }),
        }
    }
}
