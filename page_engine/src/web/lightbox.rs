// DOM host for the page-wide lightbox: overlay, image slot, canvas slot, close control.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, EventTarget, HtmlCanvasElement, HtmlElement,
    HtmlImageElement, KeyboardEvent, Window,
};

use super::dom::{self, host_err, Listener};
use crate::crop::Alignment;
use crate::error::EngineError;
use crate::host::{DrawingSurface, LightboxHost};
use crate::lightbox::{CropTarget, Lightbox, OpenRequest};
use crate::types::{Color, LayoutConfig, LightboxConfig, Offset, Rect, Size};

/// `<canvas>` with its 2D context.
pub struct CanvasSurface {
    element: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl DrawingSurface for CanvasSurface {
    type Image = HtmlImageElement;

    fn set_size(&mut self, width: u32, height: u32) {
        self.element.set_width(width);
        self.element.set_height(height);
    }

    fn fill_rect(&mut self, color: Color, rect: Rect) {
        self.context.set_fill_style_str(&color.to_css());
        self.context
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, offset: Offset) {
        if let Err(e) = self
            .context
            .draw_image_with_html_image_element(image, offset.x, offset.y)
        {
            tracing::warn!(error = ?e, "drawImage failed");
        }
    }
}

pub struct DomLightbox {
    body: HtmlElement,
    overlay: HtmlElement,
    image_slot: HtmlImageElement,
    canvas: CanvasSurface,
}

impl LightboxHost for DomLightbox {
    type Surface = CanvasSurface;

    fn set_overlay_visible(&mut self, visible: bool) {
        dom::set_style(&self.overlay, "display", if visible { "block" } else { "none" });
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        dom::set_style(&self.body, "overflow", if locked { "hidden" } else { "auto" });
    }

    fn show_plain_image(&mut self, image: &HtmlImageElement) {
        dom::set_style(&self.canvas.element, "display", "none");
        dom::set_style(&self.image_slot, "display", "block");
        self.image_slot.set_src(&image.src());
    }

    fn show_canvas(&mut self) -> &mut CanvasSurface {
        dom::set_style(&self.image_slot, "display", "none");
        dom::set_style(&self.canvas.element, "display", "block");
        &mut self.canvas
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, EngineError> {
    document
        .create_element(tag)
        .map_err(|e| host_err(tag, e))?
        .dyn_into::<T>()
        .map_err(|_| EngineError::Host(format!("<{}> has an unexpected type", tag)))
}

fn build_overlay(document: &Document) -> Result<(DomLightbox, HtmlElement), EngineError> {
    let body = dom::body(document)?;

    let overlay: HtmlElement = create(document, "div")?;
    overlay.set_id("lightbox");
    overlay.set_class_name("lightbox-modal");

    let image_slot: HtmlImageElement = create(document, "img")?;
    image_slot.set_class_name("lightbox-content");
    dom::set_style(&image_slot, "display", "none");

    let canvas: HtmlCanvasElement = create(document, "canvas")?;
    canvas.set_class_name("lightbox-content");
    dom::set_style(&canvas, "display", "none");
    let context = canvas
        .get_context("2d")
        .map_err(|e| host_err("getContext", e))?
        .ok_or_else(|| EngineError::Host("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| EngineError::Host("2d context has an unexpected type".to_string()))?;

    let close: HtmlElement = create(document, "span")?;
    close.set_class_name("lightbox-close");
    close.set_inner_html("&times;");

    let children: [&web_sys::Node; 3] = [&image_slot, &canvas, &close];
    for child in children {
        overlay
            .append_child(child)
            .map_err(|e| host_err("appendChild", e))?;
    }
    body.append_child(&overlay)
        .map_err(|e| host_err("appendChild", e))?;

    let host = DomLightbox {
        body,
        overlay,
        image_slot,
        canvas: CanvasSurface {
            element: canvas,
            context,
        },
    };
    Ok((host, close))
}

fn open_request(image: &HtmlImageElement) -> OpenRequest<HtmlImageElement> {
    let natural_size = Size::new(image.natural_width() as f64, image.natural_height() as f64);
    let crop = Alignment::from_class_list(&image.class_name()).and_then(|alignment| {
        let container = image
            .closest(".slider-image-container")
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(CropTarget {
            alignment,
            container: Size::new(
                container.offset_width() as f64,
                container.offset_height() as f64,
            ),
        })
    });
    OpenRequest {
        image: image.clone(),
        natural_size,
        crop,
    }
}

/// Create the overlay and make every configured image open it.
pub fn mount(
    window: &Window,
    document: &Document,
    config: &LightboxConfig,
    layout: LayoutConfig,
    listeners: &mut Vec<Listener>,
) -> Result<Rc<RefCell<Lightbox<DomLightbox>>>, EngineError> {
    let (host, close) = build_overlay(document)?;
    let overlay: EventTarget = host.overlay.clone().into();
    let lightbox = Rc::new(RefCell::new(Lightbox::new(host, layout)));

    for element in dom::query_document_all(document, &config.image_selector)? {
        let Ok(image) = element.dyn_into::<HtmlImageElement>() else {
            continue;
        };
        dom::set_style(&image, "cursor", "zoom-in");
        let lightbox = lightbox.clone();
        let window = window.clone();
        let clicked = image.clone();
        listeners.push(dom::listen(&image, "click", move |_| {
            let width = dom::viewport_width(&window);
            lightbox.borrow_mut().open(open_request(&clicked), width);
        })?);
    }

    {
        let lightbox = lightbox.clone();
        listeners.push(dom::listen(&close, "click", move |_| {
            lightbox.borrow_mut().close()
        })?);
    }
    {
        let lightbox = lightbox.clone();
        let backdrop = overlay.clone();
        listeners.push(dom::listen(&overlay, "click", move |event| {
            let on_backdrop = event.target().as_ref() == Some(&backdrop);
            lightbox.borrow_mut().on_backdrop_click(on_backdrop);
        })?);
    }
    {
        let lightbox = lightbox.clone();
        listeners.push(dom::listen(document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
                lightbox.borrow_mut().on_key(&key);
            }
        })?);
    }

    Ok(lightbox)
}
