//! Dot grid backdrop
//!
//! A full-bleed field of small plus marks laid out on an evenly spaced grid.
//! Marks near the pointer brighten, an optional constellation of pulsing
//! stars can sit on top, and the system cursor can be swapped for a
//! spinning star glyph.
//!
//! The layout, proximity and animation logic in [`core`] is plain data and
//! runs anywhere. The `app` feature adds the eframe host, `native` a desktop
//! preview binary, and `wasm` a `WebHandle` for mounting on a page canvas.

pub mod config;
pub mod core;
pub mod theme;
pub mod time;

#[cfg(feature = "app")]
pub mod app;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::WebHandle;

pub use config::{BackdropConfig, ConfigError, Preset};
