// One carousel container: slider state machine plus its layout synchronizer.
// The host is shared; navigation, resize and first-image load all funnel through here.

use tracing::debug;

use crate::error::EngineError;
use crate::host::{LayoutHost, SliderHost};
use crate::layout::{LayoutOutcome, LayoutSynchronizer};
use crate::slider::SliderEngine;
use crate::types::{LayoutConfig, SliderConfig};

/// A mounted carousel.
pub struct Carousel<H: SliderHost + LayoutHost> {
    engine: SliderEngine<H>,
    layout: LayoutSynchronizer,
    awaiting_first_load: bool,
}

impl<H: SliderHost + LayoutHost> Carousel<H> {
    /// Mount over `slide_count` slides. `Ok(None)` when there is nothing to drive.
    ///
    /// Shows slide 0, starts ticking when autoplay is on, and synchronizes the
    /// layout once. If the first slide's image is still loading, a single load
    /// watch is registered so layout can be redone when it arrives.
    pub fn mount(
        host: H,
        config: SliderConfig,
        slide_count: usize,
        layout: LayoutConfig,
    ) -> Result<Option<Self>, EngineError> {
        let Some(engine) = SliderEngine::new(host, config, slide_count)? else {
            return Ok(None);
        };
        let mut carousel = Carousel {
            engine,
            layout: LayoutSynchronizer::new(layout),
            awaiting_first_load: false,
        };

        carousel.sync_layout();
        if !carousel.engine.host().first_image_loaded() {
            carousel.awaiting_first_load = true;
            carousel.engine.host_mut().watch_first_image_load();
            debug!("first slide image still loading; layout will resync on load");
        }
        Ok(Some(carousel))
    }

    pub fn next(&mut self) {
        self.engine.next();
        self.sync_layout();
    }

    pub fn prev(&mut self) {
        self.engine.prev();
        self.sync_layout();
    }

    pub fn go_to(&mut self, index: usize) {
        self.engine.go_to(index);
        self.sync_layout();
    }

    pub fn toggle_pause(&mut self) {
        self.engine.toggle_pause();
    }

    pub fn tick(&mut self) {
        self.engine.tick();
    }

    pub fn on_resize(&mut self) -> LayoutOutcome {
        self.sync_layout()
    }

    /// The first slide's image finished loading. Only the first call after mount
    /// resyncs; later ones are ignored.
    pub fn on_first_image_loaded(&mut self) -> Option<LayoutOutcome> {
        if !self.awaiting_first_load {
            return None;
        }
        self.awaiting_first_load = false;
        Some(self.sync_layout())
    }

    pub fn sync_layout(&mut self) -> LayoutOutcome {
        self.layout.sync(self.engine.host_mut())
    }

    pub fn engine(&self) -> &SliderEngine<H> {
        &self.engine
    }

    pub fn is_awaiting_first_load(&self) -> bool {
        self.awaiting_first_load
    }
}
