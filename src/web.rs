//! Browser entry point
//!
//! Exposes [`WebHandle`] to JavaScript so a page can mount the backdrop on a
//! canvas, pass a config, and tear it down again on navigation:
//!
//! ```js
//! const handle = new WebHandle();
//! await handle.start("backdrop", { grid: { min_gap: 30 } });
//! // later
//! handle.destroy();
//! ```

use std::sync::Once;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use tracing::{info, warn};

use crate::app::BackdropApp;
use crate::config::{BackdropConfig, ConfigError, Preset};

static INIT_LOGGING: Once = Once::new();

#[wasm_bindgen]
pub struct WebHandle {
    runner: eframe::WebRunner,
}

#[wasm_bindgen]
impl WebHandle {
    #[allow(clippy::new_without_default)]
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        INIT_LOGGING.call_once(|| {
            console_error_panic_hook::set_once();
            // Initialize tracing for browser console
            tracing_wasm::set_as_global_default();
        });

        Self {
            runner: eframe::WebRunner::new(),
        }
    }

    /// Mount on the canvas with the given id.
    ///
    /// `config` may be a JSON string, a plain object, or `undefined`. Without
    /// one, the canvas' `data-config` (JSON) or `data-preset` attribute is
    /// used, and failing that the defaults.
    pub async fn start(&self, canvas_id: &str, config: JsValue) -> Result<(), JsValue> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{canvas_id}`")))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("`{canvas_id}` is not a canvas")))?;

        let config = match resolve_config(&canvas, &config) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Bad backdrop config, using defaults");
                BackdropConfig::default()
            }
        };
        info!(canvas = canvas_id, "Starting backdrop");

        self.runner
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(BackdropApp::new(cc, config)))),
            )
            .await
    }

    /// Stop rendering and release the canvas
    pub fn destroy(&self) {
        info!("Destroying backdrop");
        self.runner.destroy();
    }

    pub fn has_panicked(&self) -> bool {
        self.runner.panic_summary().is_some()
    }
}

fn resolve_config(
    canvas: &web_sys::HtmlCanvasElement,
    config: &JsValue,
) -> Result<BackdropConfig, ConfigError> {
    if let Some(json) = config.as_string() {
        return BackdropConfig::from_json(&json);
    }
    if config.is_object() {
        if let Ok(json) = js_sys::JSON::stringify(config) {
            return BackdropConfig::from_json(&String::from(json));
        }
    }
    if let Some(json) = canvas.get_attribute("data-config") {
        return BackdropConfig::from_json(&json);
    }
    if let Some(name) = canvas.get_attribute("data-preset") {
        return Ok(name.parse::<Preset>()?.config());
    }
    Ok(BackdropConfig::default())
}
