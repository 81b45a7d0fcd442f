//! Native preview of the dot grid backdrop
//!
//! Run with: cargo run --features native --bin dotgrid
//!
//! `DOTGRID_CONFIG` points at a JSON config file, `DOTGRID_PRESET` picks one
//! of the page presets. F1 opens the settings panel, F2 the HUD.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use dotgrid_vis::app::BackdropApp;
    use dotgrid_vis::{BackdropConfig, Preset};
    use eframe::egui;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dotgrid_vis=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let preset = std::env::var("DOTGRID_PRESET")
        .ok()
        .and_then(|name| match name.parse::<Preset>() {
            Ok(preset) => Some(preset),
            Err(e) => {
                warn!(error = %e, "Ignoring DOTGRID_PRESET");
                None
            }
        });

    // A config file wins over a preset
    let (config, preset) = match std::env::var("DOTGRID_CONFIG") {
        Ok(path) => {
            let config = BackdropConfig::from_file(&path).unwrap_or_else(|e| {
                warn!(path = %path, error = %e, "Falling back to defaults");
                BackdropConfig::default()
            });
            (config, None)
        }
        Err(_) => (preset.map(Preset::config).unwrap_or_default(), preset),
    };

    info!(preset = ?preset, "Starting native preview");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("dotgrid"),
        ..Default::default()
    };

    eframe::run_native(
        "dotgrid",
        options,
        Box::new(move |cc| {
            let mut app = BackdropApp::new(cc, config);
            if let Some(preset) = preset {
                app.mark_preset(preset);
            }
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
