// Host capabilities the engine is embedded into. The browser implements these with web-sys;
// tests implement them with recording fakes.

use crate::layout::SlotStyle;
use crate::types::{Color, Millis, Offset, Rect};

/// Carousel rendering and timer scheduling for one slider container.
pub trait SliderHost {
    /// Handle to a scheduled repeating timer.
    type Timer;

    /// Schedule the engine's `tick` to fire every `interval`.
    fn start_ticks(&mut self, interval: Millis) -> Self::Timer;

    fn cancel_ticks(&mut self, timer: Self::Timer);

    /// Move the slide track to `index` and mark the matching indicator active.
    fn show_slide(&mut self, index: usize, slide_count: usize);

    /// Publish auto-advance progress, 0.0 to 100.0 (may briefly exceed 100).
    fn set_progress(&mut self, percent: f64);

    /// Reflect the pause state on the play/pause control.
    fn set_paused_indicator(&mut self, paused: bool);
}

/// Geometry queries and inline-style writes for the slide images of one slider.
pub trait LayoutHost {
    fn viewport_width(&self) -> f64;

    /// Remove any forced height from the first slide's image and its container.
    fn clear_first_slot_height(&mut self);

    /// Rendered height of the first slide's image, `None` if there is no such image.
    fn first_image_height(&self) -> Option<f64>;

    fn first_image_loaded(&self) -> bool;

    /// Arrange for the owner to be told once when the first image finishes loading.
    fn watch_first_image_load(&mut self);

    /// Apply `style` to every image container (and its image) in the slider.
    fn style_image_slots(&mut self, style: &SlotStyle);

    /// Apply `style` to every aligned-crop container (and its image) in the slider.
    fn style_crop_slots(&mut self, style: &SlotStyle);
}

/// 2D drawing surface (a canvas).
pub trait DrawingSurface {
    /// Source image handle that can be blitted.
    type Image;

    fn set_size(&mut self, width: u32, height: u32);

    fn fill_rect(&mut self, color: Color, rect: Rect);

    /// Draw `image` at its natural size with its top-left corner at `offset`.
    fn draw_image(&mut self, image: &Self::Image, offset: Offset);
}

/// The page-wide zoom overlay.
pub trait LightboxHost {
    type Surface: DrawingSurface;

    fn set_overlay_visible(&mut self, visible: bool);

    fn set_scroll_locked(&mut self, locked: bool);

    /// Hide the canvas and show `image` unscaled in the overlay image slot.
    fn show_plain_image(&mut self, image: &<Self::Surface as DrawingSurface>::Image);

    /// Hide the image slot, show the canvas, and hand it out for drawing.
    fn show_canvas(&mut self) -> &mut Self::Surface;
}

/// Transient acknowledgment on the copy button.
pub trait FeedbackHost {
    fn show_acknowledged(&mut self, acknowledged: bool);

    /// Call back `CopyFeedback::on_revert(generation)` after `delay`.
    fn schedule_revert(&mut self, delay: Millis, generation: u64);
}

/// Scroll-reveal targets watched for visibility.
pub trait RevealHost {
    /// Handle to one watched element.
    type Target;

    /// Add the visible class to `target`, starting its reveal animation.
    fn mark_visible(&mut self, target: &Self::Target);

    /// Stop reporting visibility changes for `target`.
    fn stop_watching(&mut self, target: &Self::Target);
}
