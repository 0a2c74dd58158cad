// Cropped-region rendering for aligned-crop images opened in the lightbox.
// Canvas resolution is pinned to the source image's natural height; width follows the
// on-page container's aspect ratio.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::host::DrawingSurface;
use crate::types::{Color, Offset, Rect, Size};

/// Fraction of the natural width hidden to the left for right-aligned crops.
/// Matches the `translateX(-61%)` used to position those images on the page.
pub const RIGHT_CROP_FRACTION: f64 = 0.61;

/// Horizontal alignment of an aligned-crop image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Right,
}

impl Alignment {
    /// Alignment encoded by a page class name (`img-pos-left` / `img-pos-right`).
    pub fn from_class_name(class: &str) -> Option<Alignment> {
        match class {
            "img-pos-left" => Some(Alignment::Left),
            "img-pos-right" => Some(Alignment::Right),
            _ => None,
        }
    }

    /// First alignment class in a whitespace-separated class list.
    pub fn from_class_list(classes: &str) -> Option<Alignment> {
        classes.split_whitespace().find_map(Alignment::from_class_name)
    }

    fn image_offset(&self, natural: Size) -> Offset {
        match self {
            Alignment::Left => Offset::origin(),
            Alignment::Right => Offset::new(-(natural.width * RIGHT_CROP_FRACTION), 0.0),
        }
    }
}

/// Everything needed to draw one cropped region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropPlan {
    pub alignment: Alignment,
    /// Logical canvas size; width may be fractional.
    pub canvas: Size,
    pub background: Color,
    pub image_offset: Offset,
}

impl CropPlan {
    /// Plan a crop of an image with `natural` size shown in a container of `container` size.
    pub fn new(container: Size, natural: Size, alignment: Alignment) -> Result<Self, EngineError> {
        let ratio = container
            .aspect_ratio()
            .filter(|r| *r > 0.0)
            .ok_or(EngineError::DegenerateGeometry {
                width: container.width,
                height: container.height,
            })?;
        if !(natural.height > 0.0 && natural.width > 0.0) {
            return Err(EngineError::DegenerateGeometry {
                width: natural.width,
                height: natural.height,
            });
        }

        let height = natural.height;
        Ok(CropPlan {
            alignment,
            canvas: Size::new(height * ratio, height),
            background: Color::WHITE,
            image_offset: alignment.image_offset(natural),
        })
    }

    /// Integer backing-store size. Fractions truncate, as canvas dimensions do.
    pub fn canvas_pixels(&self) -> (u32, u32) {
        (self.canvas.width as u32, self.canvas.height as u32)
    }

    /// Size the surface, paint the background, and blit `image` at the crop offset.
    pub fn render<S: DrawingSurface>(&self, surface: &mut S, image: &S::Image) {
        let (width, height) = self.canvas_pixels();
        surface.set_size(width, height);
        surface.fill_rect(self.background, Rect::from_size(self.canvas));
        surface.draw_image(image, self.image_offset);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        SetSize(u32, u32),
        Fill(Color, Rect),
        Image(String, Offset),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl DrawingSurface for RecordingSurface {
        type Image = String;

        fn set_size(&mut self, width: u32, height: u32) {
            self.calls.push(DrawCall::SetSize(width, height));
        }

        fn fill_rect(&mut self, color: Color, rect: Rect) {
            self.calls.push(DrawCall::Fill(color, rect));
        }

        fn draw_image(&mut self, image: &String, offset: Offset) {
            self.calls.push(DrawCall::Image(image.clone(), offset));
        }
    }
}
