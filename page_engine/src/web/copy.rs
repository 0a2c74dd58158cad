// DOM host for the copy-to-clipboard button.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Window};

use super::dom::{self, Listener};
use crate::error::EngineError;
use crate::feedback::CopyFeedback;
use crate::host::FeedbackHost;
use crate::types::{CopyButtonConfig, Millis};

const ACKNOWLEDGED_HTML: &str = r#"<i class="fas fa-check"></i> Copied!"#;
const SUCCESS_COLOR: &str = "#10B981";

type FeedbackCell = RefCell<CopyFeedback<DomCopyButton>>;

pub struct DomCopyButton {
    window: Window,
    button: HtmlElement,
    original_html: String,
    cell: Weak<FeedbackCell>,
}

impl FeedbackHost for DomCopyButton {
    fn show_acknowledged(&mut self, acknowledged: bool) {
        if acknowledged {
            self.button.set_inner_html(ACKNOWLEDGED_HTML);
            dom::set_style(
                &self.button,
                "color",
                &format!("var(--visible-success, {})", SUCCESS_COLOR),
            );
            dom::set_style(&self.button, "border-color", SUCCESS_COLOR);
        } else {
            self.button.set_inner_html(&self.original_html);
            let style = self.button.style();
            let _ = style.remove_property("color");
            let _ = style.remove_property("border-color");
        }
    }

    fn schedule_revert(&mut self, delay: Millis, generation: u64) {
        let cell = self.cell.clone();
        let revert = Closure::once_into_js(move || {
            if let Some(cell) = cell.upgrade() {
                cell.borrow_mut().on_revert(generation);
            }
        });
        let Some(delay) = dom::timer_delay(delay) else {
            return;
        };
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                revert.unchecked_ref::<js_sys::Function>(),
                delay,
            )
        {
            tracing::warn!(error = ?e, "setTimeout failed");
        }
    }
}

/// Wire the copy button. Returns `Ok(None)` when either element is absent.
pub fn mount(
    window: &Window,
    document: &Document,
    config: &CopyButtonConfig,
    listeners: &mut Vec<Listener>,
) -> Result<Option<Rc<FeedbackCell>>, EngineError> {
    let button = document
        .get_element_by_id(&config.button_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let source = document
        .get_element_by_id(&config.source_id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let (Some(button), Some(source)) = (button, source) else {
        return Ok(None);
    };

    let cell: Rc<FeedbackCell> = Rc::new_cyclic(|weak| {
        RefCell::new(CopyFeedback::new(DomCopyButton {
            window: window.clone(),
            original_html: button.inner_html(),
            button: button.clone(),
            cell: weak.clone(),
        }))
    });

    let feedback = cell.clone();
    let clipboard = window.navigator().clipboard();
    listeners.push(dom::listen(&button, "click", move |_| {
        let text = source.inner_text();
        let write = clipboard.write_text(&text);
        let feedback = feedback.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(write)
                .await
                .map(|_| ())
                .map_err(|e| format!("{:?}", e));
            if let Err(reason) = &result {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "Failed to copy: {}",
                    reason
                )));
            }
            feedback.borrow_mut().on_copy_result(result);
        });
    })?);

    Ok(Some(cell))
}
