// DOM host for one carousel container: slide track, progress bar, controls, slot styles.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlImageElement, Window};

use super::dom::{self, Listener};
use crate::carousel::Carousel;
use crate::error::EngineError;
use crate::host::{LayoutHost, SliderHost};
use crate::layout::{SlotStyle, StyleProperty};
use crate::types::{LayoutConfig, Millis, SliderConfig};

const PLAY_ICON: &str = r#"<i class="fas fa-play"></i>"#;
const PAUSE_ICON: &str = r#"<i class="fas fa-pause"></i>"#;

/// Shared slot for a mounted carousel. Empty when the container is inert.
pub type CarouselCell = RefCell<Option<Carousel<DomSlider>>>;

fn with_carousel(cell: &Weak<CarouselCell>, f: impl FnOnce(&mut Carousel<DomSlider>)) {
    with_mounted(cell, f);
}

/// Run `f` on the mounted value. Returns false when `f` did not run.
fn with_mounted<T>(cell: &Weak<RefCell<Option<T>>>, f: impl FnOnce(&mut T)) -> bool {
    let Some(cell) = cell.upgrade() else {
        return false;
    };
    // A handler firing while another one is running is dropped rather than nested.
    let Ok(mut slot) = cell.try_borrow_mut() else {
        tracing::debug!("carousel busy; event skipped");
        return false;
    };
    match slot.as_mut() {
        Some(value) => {
            f(value);
            true
        }
        None => false,
    }
}

/// A `setInterval` registration and the callback it invokes. Cleared on drop.
pub struct IntervalTimer {
    window: Window,
    id: Option<i32>,
    _tick: Closure<dyn FnMut()>,
}

impl IntervalTimer {
    fn clear(&mut self) {
        if let Some(id) = self.id.take() {
            self.window.clear_interval_with_handle(id);
        }
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.clear();
    }
}

pub struct DomSlider {
    window: Window,
    container: Element,
    wrapper: HtmlElement,
    first_slide: Element,
    progress_bar: Option<HtmlElement>,
    pause_button: Option<Element>,
    nav_buttons: Vec<Element>,
    cell: Weak<CarouselCell>,
    first_load: Option<(HtmlImageElement, Closure<dyn FnMut()>)>,
}

impl Drop for DomSlider {
    fn drop(&mut self) {
        if let Some((image, _)) = &self.first_load {
            image.set_onload(None);
        }
    }
}

impl DomSlider {
    fn first_image(&self) -> Option<HtmlElement> {
        dom::query(&self.first_slide, ".slider-img").and_then(|el| el.dyn_into().ok())
    }
}

impl SliderHost for DomSlider {
    type Timer = IntervalTimer;

    fn start_ticks(&mut self, interval: Millis) -> IntervalTimer {
        let cell = self.cell.clone();
        let tick = Closure::<dyn FnMut()>::new(move || with_carousel(&cell, |c| c.tick()));
        let id = dom::timer_delay(interval).and_then(|delay| {
            self.window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref::<js_sys::Function>(),
                    delay,
                )
                .map_err(|e| tracing::warn!(error = ?e, "setInterval failed"))
                .ok()
        });
        IntervalTimer {
            window: self.window.clone(),
            id,
            _tick: tick,
        }
    }

    fn cancel_ticks(&mut self, mut timer: IntervalTimer) {
        timer.clear();
    }

    fn show_slide(&mut self, index: usize, _slide_count: usize) {
        dom::set_style(
            &self.wrapper,
            "transform",
            &format!("translateX(-{}%)", index * 100),
        );
        for (i, button) in self.nav_buttons.iter().enumerate() {
            let _ = button.class_list().toggle_with_force("active", i == index);
        }
    }

    fn set_progress(&mut self, percent: f64) {
        if let Some(bar) = &self.progress_bar {
            dom::set_style(bar, "width", &format!("{}%", percent));
        }
    }

    fn set_paused_indicator(&mut self, paused: bool) {
        if let Some(button) = &self.pause_button {
            button.set_inner_html(if paused { PLAY_ICON } else { PAUSE_ICON });
        }
    }
}

impl LayoutHost for DomSlider {
    fn viewport_width(&self) -> f64 {
        dom::viewport_width(&self.window)
    }

    fn clear_first_slot_height(&mut self) {
        let cleared = [StyleProperty::clear("height")];
        if let Some(slot) = dom::query(&self.first_slide, ".slider-image-container") {
            dom::apply_style(&slot, &cleared);
        }
        if let Some(image) = self.first_image() {
            dom::apply_style(&image, &cleared);
        }
    }

    fn first_image_height(&self) -> Option<f64> {
        self.first_image().map(|img| img.offset_height() as f64)
    }

    fn first_image_loaded(&self) -> bool {
        dom::query(&self.first_slide, "img")
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            .map_or(true, |img| img.complete())
    }

    fn watch_first_image_load(&mut self) {
        let Some(image) = dom::query(&self.first_slide, "img")
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        else {
            return;
        };
        let cell = self.cell.clone();
        let on_load = Closure::<dyn FnMut()>::new(move || {
            with_carousel(&cell, |c| {
                c.on_first_image_loaded();
            })
        });
        image.set_onload(Some(on_load.as_ref().unchecked_ref()));
        self.first_load = Some((image, on_load));
    }

    fn style_image_slots(&mut self, style: &SlotStyle) {
        for slot in dom::query_all(&self.container, ".slider-image-container") {
            dom::apply_style(&slot, &style.container);
            if let Some(image) = dom::query(&slot, "img") {
                dom::apply_style(&image, &style.image);
            }
        }
    }

    fn style_crop_slots(&mut self, style: &SlotStyle) {
        for slot in dom::query_all(&self.container, ".img-crop-container") {
            dom::apply_style(&slot, &style.container);
        }
        for image in dom::query_all(&self.container, ".img-pos-left, .img-pos-right") {
            dom::apply_style(&image, &style.image);
        }
    }
}

/// Mount a carousel on `container` and wire its controls.
///
/// Returns `Ok(None)` for containers without a slide track or slides.
pub fn mount(
    window: &Window,
    container: Element,
    config: SliderConfig,
    layout: LayoutConfig,
    listeners: &mut Vec<Listener>,
) -> Result<Option<Rc<CarouselCell>>, EngineError> {
    let Some(wrapper) = dom::query(&container, ".slides-wrapper")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(None);
    };
    let slides = dom::query_all(&container, ".slide");
    let Some(first_slide) = slides.first().cloned() else {
        return Ok(None);
    };

    let progress_bar = dom::query(&container, ".progress-bar")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    let pause_button = dom::query(&container, ".btn-pause");
    let nav_buttons = dom::query_all(&container, ".nav-btn");

    let mut failure = None;
    let cell: Rc<CarouselCell> = Rc::new_cyclic(|weak| {
        let host = DomSlider {
            window: window.clone(),
            container: container.clone(),
            wrapper,
            first_slide,
            progress_bar,
            pause_button: pause_button.clone(),
            nav_buttons: nav_buttons.clone(),
            cell: weak.clone(),
            first_load: None,
        };
        match Carousel::mount(host, config, slides.len(), layout) {
            Ok(carousel) => RefCell::new(carousel),
            Err(e) => {
                failure = Some(e);
                RefCell::new(None)
            }
        }
    });
    if let Some(e) = failure {
        return Err(e);
    }
    if cell.borrow().is_none() {
        return Ok(None);
    }

    let weak = Rc::downgrade(&cell);
    if let Some(button) = dom::query(&container, ".btn-next") {
        let weak = weak.clone();
        listeners.push(dom::listen(&button, "click", move |_| {
            with_carousel(&weak, |c| c.next())
        })?);
    }
    if let Some(button) = dom::query(&container, ".btn-prev") {
        let weak = weak.clone();
        listeners.push(dom::listen(&button, "click", move |_| {
            with_carousel(&weak, |c| c.prev())
        })?);
    }
    if let Some(button) = pause_button {
        let weak = weak.clone();
        listeners.push(dom::listen(&button, "click", move |_| {
            with_carousel(&weak, |c| c.toggle_pause())
        })?);
    }
    for (index, button) in nav_buttons.iter().enumerate() {
        let weak = weak.clone();
        listeners.push(dom::listen(button, "click", move |_| {
            with_carousel(&weak, |c| c.go_to(index))
        })?);
    }
    listeners.push(dom::listen(window, "resize", move |_| {
        with_carousel(&weak, |c| {
            c.on_resize();
        })
    })?);

    Ok(Some(cell))
}
