// Small DOM helpers shared by the browser hosts.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::EngineError;
use crate::layout::StyleProperty;
use crate::types::Millis;

/// Registered event listener. Unregisters itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

pub fn host_err(context: &str, err: JsValue) -> EngineError {
    EngineError::Host(format!("{}: {:?}", context, err))
}

pub fn window() -> Result<Window, EngineError> {
    web_sys::window().ok_or_else(|| EngineError::MissingElement("window".to_string()))
}

pub fn document(window: &Window) -> Result<Document, EngineError> {
    window
        .document()
        .ok_or_else(|| EngineError::MissingElement("document".to_string()))
}

pub fn body(document: &Document) -> Result<HtmlElement, EngineError> {
    document
        .body()
        .ok_or_else(|| EngineError::MissingElement("body".to_string()))
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    match root.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn query_document_all(document: &Document, selector: &str) -> Result<Vec<Element>, EngineError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| host_err(selector, e))?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Write inline styles. Empty values remove the property.
pub fn apply_style(element: &Element, properties: &[StyleProperty]) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = element.style();
    for property in properties {
        let _ = if property.value.is_empty() {
            style.remove_property(property.name).map(|_| ())
        } else {
            style.set_property(property.name, &property.value)
        };
    }
}

/// Delay argument for `setTimeout`/`setInterval`. `None` when it does not fit in an `i32`.
pub fn timer_delay(delay: Millis) -> Option<i32> {
    match i32::try_from(delay.as_millis()) {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!(
                delay_ms = delay.as_millis(),
                "timer delay out of range; not scheduled"
            );
            None
        }
    }
}

pub fn set_style(element: &HtmlElement, name: &str, value: &str) {
    let _ = element.style().set_property(name, value);
}

pub fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, EngineError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| host_err(event, e))?;
    Ok(Listener {
        target: target.clone(),
        event,
        closure,
    })
}
