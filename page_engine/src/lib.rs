// page_engine: Rust/WASM core for the project page.
// Carousel timing, responsive slide layout, lightbox cropping and scroll reveal live here; JS only boots it.

mod carousel;
mod crop;
mod error;
mod feedback;
mod host;
mod layout;
mod lightbox;
mod reveal;
mod slider;
mod types;
#[cfg(target_arch = "wasm32")]
mod web;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub use carousel::Carousel;
pub use crop::{Alignment, CropPlan, RIGHT_CROP_FRACTION};
pub use error::EngineError;
pub use feedback::{CopyFeedback, ACKNOWLEDGE_DURATION};
pub use host::{
    DrawingSurface, FeedbackHost, LayoutHost, LightboxHost, RevealHost, SliderHost,
};
pub use layout::{LayoutOutcome, LayoutSynchronizer, SlotStyle, StyleProperty};
pub use lightbox::{CropTarget, HostImage, Lightbox, LightboxView, OpenRequest};
pub use reveal::{Intersection, ScrollReveal};
pub use slider::{Advance, SliderEngine};
pub use types::*;
#[cfg(target_arch = "wasm32")]
pub use web::Page;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Input for [`plan_crop`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropRequest {
    pub container: Size,
    pub natural: Size,
    pub alignment: Alignment,
}

/// Plan an aligned crop without touching the DOM.
/// Takes a `CropRequest` as JSON and returns the `CropPlan` as JSON.
#[wasm_bindgen]
pub fn plan_crop(request_json: &str) -> Result<String, JsValue> {
    let request: CropRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop request: {}", e)))?;

    let plan = CropPlan::new(request.container, request.natural, request.alignment)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&plan)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Slot styles applied at `height_px`, as JSON `{ "image": SlotStyle, "crop": SlotStyle }`.
#[wasm_bindgen]
pub fn slot_styles(height_px: f64) -> Result<String, JsValue> {
    let styles = serde_json::json!({
        "image": SlotStyle::image_slot(height_px),
        "crop": SlotStyle::crop_slot(height_px),
    });
    serde_json::to_string(&styles)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Fill in defaults and validate a page configuration. Returns the effective config as JSON.
#[wasm_bindgen]
pub fn resolve_config(config_json: &str) -> Result<String, JsValue> {
    let config = PageConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;

    serde_json::to_string(&config)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
