// Page-wide zoom overlay. One instance per page; every zoomable image shares it.
// Opening replaces whatever is showing. Disabled below the mobile breakpoint.

use tracing::debug;

use crate::crop::{Alignment, CropPlan};
use crate::host::{DrawingSurface, LightboxHost};
use crate::types::{LayoutConfig, Size};

/// Image type handled by a lightbox host.
pub type HostImage<H> = <<H as LightboxHost>::Surface as DrawingSurface>::Image;

/// Aligned-crop details for an image that lives in a crop container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropTarget {
    pub alignment: Alignment,
    /// Rendered size of the image's container.
    pub container: Size,
}

/// A click on a zoomable image.
#[derive(Debug, Clone)]
pub struct OpenRequest<I> {
    pub image: I,
    pub natural_size: Size,
    pub crop: Option<CropTarget>,
}

/// What the overlay currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum LightboxView {
    Closed,
    Plain,
    Cropped(CropPlan),
}

pub struct Lightbox<H: LightboxHost> {
    host: H,
    layout: LayoutConfig,
    view: LightboxView,
}

impl<H: LightboxHost> Lightbox<H> {
    pub fn new(host: H, layout: LayoutConfig) -> Self {
        Lightbox {
            host,
            layout,
            view: LightboxView::Closed,
        }
    }

    /// Show the clicked image. Returns false when ignored on a mobile viewport.
    pub fn open(&mut self, request: OpenRequest<HostImage<H>>, viewport_width: f64) -> bool {
        if self.layout.is_mobile(viewport_width) {
            debug!(viewport_width, "lightbox disabled on mobile viewport");
            return false;
        }

        self.host.set_overlay_visible(true);
        self.host.set_scroll_locked(true);

        let plan = request.crop.and_then(|target| {
            CropPlan::new(target.container, request.natural_size, target.alignment)
                .map_err(|e| debug!(error = %e, "crop unavailable; showing plain image"))
                .ok()
        });

        match plan {
            Some(plan) => {
                self.open_cropped_region(&request.image, plan);
            }
            None => self.open_image(&request.image),
        }
        true
    }

    /// Show `image` unscaled.
    pub fn open_image(&mut self, image: &HostImage<H>) {
        self.host.show_plain_image(image);
        self.view = LightboxView::Plain;
    }

    /// Draw the region described by `plan` onto the overlay canvas.
    pub fn open_cropped_region(&mut self, image: &HostImage<H>, plan: CropPlan) {
        let surface = self.host.show_canvas();
        plan.render(surface, image);
        self.view = LightboxView::Cropped(plan);
    }

    pub fn close(&mut self) {
        self.host.set_overlay_visible(false);
        self.host.set_scroll_locked(false);
        self.view = LightboxView::Closed;
    }

    /// Escape closes an open lightbox. Returns true when the key closed it.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            true
        } else {
            false
        }
    }

    /// Clicks on the backdrop itself close; clicks on the content do not.
    pub fn on_backdrop_click(&mut self, target_is_backdrop: bool) {
        if target_is_backdrop {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.view != LightboxView::Closed
    }

    pub fn view(&self) -> &LightboxView {
        &self.view
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}
