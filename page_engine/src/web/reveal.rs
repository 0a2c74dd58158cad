// DOM host for scroll reveal: one IntersectionObserver over every matching section.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use super::dom::{self, host_err};
use crate::error::EngineError;
use crate::host::RevealHost;
use crate::reveal::{Intersection, ScrollReveal};
use crate::types::RevealConfig;

struct DomReveal<'a> {
    observer: &'a IntersectionObserver,
    visible_class: &'a str,
}

impl RevealHost for DomReveal<'_> {
    type Target = Element;

    fn mark_visible(&mut self, target: &Element) {
        if let Err(e) = target.class_list().add_1(self.visible_class) {
            tracing::warn!(error = ?e, "could not add visible class");
        }
    }

    fn stop_watching(&mut self, target: &Element) {
        self.observer.unobserve(target);
    }
}

/// A live observer and its callback. Disconnects on drop.
pub struct RevealObserver {
    observer: IntersectionObserver,
    state: Rc<RefCell<ScrollReveal>>,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl RevealObserver {
    pub fn revealed(&self) -> usize {
        self.state.borrow().revealed()
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Observe every section matching the configured selector.
/// Returns `Ok(None)` when nothing on the page matches.
pub fn mount(
    document: &Document,
    config: &RevealConfig,
) -> Result<Option<RevealObserver>, EngineError> {
    let sections = dom::query_document_all(document, &config.selector)?;
    if sections.is_empty() {
        tracing::debug!(selector = %config.selector, "no sections to reveal");
        return Ok(None);
    }

    let state = Rc::new(RefCell::new(ScrollReveal::new()));
    let callback = {
        let state = state.clone();
        let visible_class = config.visible_class.clone();
        Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Intersection {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    });
                let mut host = DomReveal {
                    observer: &observer,
                    visible_class: &visible_class,
                };
                state.borrow_mut().on_intersections(&mut host, batch);
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(config.threshold));
    let observer = IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref::<js_sys::Function>(),
        &options,
    )
    .map_err(|e| host_err("IntersectionObserver", e))?;

    for section in &sections {
        observer.observe(section);
    }

    Ok(Some(RevealObserver {
        observer,
        state,
        _callback: callback,
    }))
}
