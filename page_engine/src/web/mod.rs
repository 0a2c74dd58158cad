// Browser host: wires the engine into the live DOM with web-sys.
// Only compiled for wasm32. JS calls `new Page(configJson)` once the DOM is ready.

mod copy;
mod dom;
mod lightbox;
mod reveal;
mod slider;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::carousel::Carousel;
use crate::feedback::CopyFeedback;
use crate::lightbox::Lightbox;
use crate::types::PageConfig;

use self::dom::Listener;

/// All page behavior, mounted once per document.
#[wasm_bindgen]
pub struct Page {
    carousels: Vec<Rc<RefCell<Option<Carousel<slider::DomSlider>>>>>,
    lightbox: Rc<RefCell<Lightbox<lightbox::DomLightbox>>>,
    copy: Option<Rc<RefCell<CopyFeedback<copy::DomCopyButton>>>>,
    reveal: Option<reveal::RevealObserver>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Page {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Page, JsValue> {
        let config = PageConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        mount(config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Number of carousels that found slides and are running.
    pub fn slider_count(&self) -> usize {
        self.carousels.len()
    }

    /// Current slide of the carousel at `slider`, if it exists.
    pub fn current_slide(&self, slider: usize) -> Option<usize> {
        let cell = self.carousels.get(slider)?;
        let slot = cell.borrow();
        slot.as_ref().map(|c| c.engine().current_index())
    }

    pub fn lightbox_open(&self) -> bool {
        self.lightbox.borrow().is_open()
    }

    pub fn close_lightbox(&self) {
        self.lightbox.borrow_mut().close();
    }

    pub fn has_copy_button(&self) -> bool {
        self.copy.is_some()
    }

    /// Sections revealed so far by scrolling.
    pub fn revealed_sections(&self) -> usize {
        self.reveal.as_ref().map_or(0, |r| r.revealed())
    }

    pub fn copy_acknowledged(&self) -> bool {
        self.copy
            .as_ref()
            .map_or(false, |c| c.borrow().is_acknowledged())
    }
}

fn mount(config: PageConfig) -> Result<Page, crate::EngineError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let mut listeners = Vec::new();

    let lightbox = lightbox::mount(
        &window,
        &document,
        &config.lightbox,
        config.layout.clone(),
        &mut listeners,
    )?;

    let mut carousels = Vec::new();
    for entry in &config.sliders {
        let Some(container) = document
            .query_selector(&entry.selector)
            .map_err(|e| dom::host_err(&entry.selector, e))?
        else {
            tracing::debug!(selector = %entry.selector, "slider container not on page");
            continue;
        };
        if let Some(cell) = slider::mount(
            &window,
            container,
            entry.config.clone(),
            config.layout.clone(),
            &mut listeners,
        )? {
            carousels.push(cell);
        }
    }

    let copy = match &config.copy_button {
        Some(button) => copy::mount(&window, &document, button, &mut listeners)?,
        None => None,
    };

    let reveal = match &config.reveal {
        Some(reveal) => reveal::mount(&document, reveal)?,
        None => None,
    };

    Ok(Page {
        carousels,
        lightbox,
        copy,
        reveal,
        _listeners: listeners,
    })
}
