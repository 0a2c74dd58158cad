// Strong typing over strings. Newtypes for durations and pixel geometry, plus the JSON config shapes.
// Configuration arrives from JS as JSON; every field has a serde default.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Duration in milliseconds. Newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Millis(u32);

impl Millis {
    pub const fn from_millis(ms: u32) -> Self {
        Millis(ms)
    }

    pub fn as_millis(&self) -> u32 {
        self.0
    }

    pub fn zero() -> Self {
        Millis(0)
    }

    pub fn saturating_add(self, other: Millis) -> Self {
        Millis(self.0.saturating_add(other.0))
    }
}

/// Width/height pair in CSS or image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Size { width, height }
    }

    /// Width over height, or `None` for an empty or non-finite box.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height > 0.0 && self.width.is_finite() && self.height.is_finite() {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// Pixel offset. Negative values crop from the left/top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Offset { x, y }
    }

    pub fn origin() -> Self {
        Offset { x: 0.0, y: 0.0 }
    }
}

/// Axis-aligned rectangle on a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Rect::new(0.0, 0.0, size.width, size.height)
    }
}

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 0xFF,
        g: 0xFF,
        b: 0xFF,
    };

    /// CSS hex notation, e.g. `#FFFFFF`.
    pub fn to_css(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Longest delay a browser timer accepts (`setTimeout` takes a signed 32-bit delay).
pub const MAX_TIMER_MS: u32 = i32::MAX as u32;

/// Per-carousel behavior settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Start ticking immediately at mount.
    #[serde(default = "default_true")]
    pub auto_play: bool,
    /// Time a slide stays on screen before auto-advance.
    #[serde(default = "default_slide_duration")]
    pub slide_duration_ms: u32,
    /// Cadence of the progress timer.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u32,
    /// Resuming a slider that has no running timer starts one. When false, a
    /// slider mounted without autoplay only starts ticking after the next
    /// manual navigation.
    #[serde(default = "default_true")]
    pub start_on_resume: bool,
}

impl SliderConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.slide_duration_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "slide_duration_ms must be positive".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.slide_duration_ms > MAX_TIMER_MS || self.tick_interval_ms > MAX_TIMER_MS {
            return Err(EngineError::InvalidConfig(format!(
                "timer durations must not exceed {} ms",
                MAX_TIMER_MS
            )));
        }
        Ok(())
    }

    pub fn slide_duration(&self) -> Millis {
        Millis::from_millis(self.slide_duration_ms)
    }

    pub fn tick_interval(&self) -> Millis {
        Millis::from_millis(self.tick_interval_ms)
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        SliderConfig {
            auto_play: default_true(),
            slide_duration_ms: default_slide_duration(),
            tick_interval_ms: default_tick_interval(),
            start_on_resume: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_slide_duration() -> u32 {
    5000
}

fn default_tick_interval() -> u32 {
    50
}

/// Responsive layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewport widths below this are treated as mobile.
    #[serde(default = "default_breakpoint")]
    pub breakpoint_px: f64,
}

impl LayoutConfig {
    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width < self.breakpoint_px
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            breakpoint_px: default_breakpoint(),
        }
    }
}

fn default_breakpoint() -> f64 {
    768.0
}

/// Which images open in the lightbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightboxConfig {
    #[serde(default = "default_image_selector")]
    pub image_selector: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        LightboxConfig {
            image_selector: default_image_selector(),
        }
    }
}

fn default_image_selector() -> String {
    ".method-image, .teaser-img, .result-item img, .slider-img".to_string()
}

/// Copy-to-clipboard button wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyButtonConfig {
    #[serde(default = "default_copy_button_id")]
    pub button_id: String,
    #[serde(default = "default_copy_source_id")]
    pub source_id: String,
}

impl Default for CopyButtonConfig {
    fn default() -> Self {
        CopyButtonConfig {
            button_id: default_copy_button_id(),
            source_id: default_copy_source_id(),
        }
    }
}

fn default_copy_button_id() -> String {
    "copyBibtexBtn".to_string()
}

fn default_copy_source_id() -> String {
    "bibtexCode".to_string()
}

/// Scroll-reveal wiring: which sections animate in and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_reveal_selector")]
    pub selector: String,
    /// Fraction of a section that must be on screen, 0.0 to 1.0.
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    #[serde(default = "default_visible_class")]
    pub visible_class: String,
}

impl RevealConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(EngineError::InvalidConfig(
                "reveal threshold must be between 0 and 1".to_string(),
            ));
        }
        if self.visible_class.trim().is_empty() {
            return Err(EngineError::InvalidConfig(
                "reveal visible_class must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        RevealConfig {
            selector: default_reveal_selector(),
            threshold: default_reveal_threshold(),
            visible_class: default_visible_class(),
        }
    }
}

fn default_reveal_selector() -> String {
    ".paper-section".to_string()
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_visible_class() -> String {
    "is-visible".to_string()
}

/// A carousel container selector and its settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderMount {
    pub selector: String,
    #[serde(flatten)]
    pub config: SliderConfig,
}

/// Page configuration passed from JS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_sliders")]
    pub sliders: Vec<SliderMount>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub lightbox: LightboxConfig,
    #[serde(default = "default_copy_button")]
    pub copy_button: Option<CopyButtonConfig>,
    #[serde(default = "default_reveal")]
    pub reveal: Option<RevealConfig>,
}

impl PageConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: PageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for mount in &self.sliders {
            mount.config.validate().map_err(|e| {
                EngineError::InvalidConfig(format!("slider {}: {}", mount.selector, e))
            })?;
        }
        if self.layout.breakpoint_px.is_nan() || self.layout.breakpoint_px < 0.0 {
            return Err(EngineError::InvalidConfig(
                "breakpoint_px must be a non-negative number".to_string(),
            ));
        }
        if let Some(reveal) = &self.reveal {
            reveal.validate()?;
        }
        Ok(())
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        PageConfig {
            sliders: default_sliders(),
            layout: LayoutConfig::default(),
            lightbox: LightboxConfig::default(),
            copy_button: default_copy_button(),
            reveal: default_reveal(),
        }
    }
}

fn default_sliders() -> Vec<SliderMount> {
    vec![
        SliderMount {
            selector: "#method-slider".to_string(),
            config: SliderConfig::default(),
        },
        SliderMount {
            selector: "#video-slider".to_string(),
            config: SliderConfig {
                auto_play: false,
                ..SliderConfig::default()
            },
        },
    ]
}

fn default_copy_button() -> Option<CopyButtonConfig> {
    Some(CopyButtonConfig::default())
}

fn default_reveal() -> Option<RevealConfig> {
    Some(RevealConfig::default())
}
