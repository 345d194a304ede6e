use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement};

use map_core::MapTarget;

use crate::events::Listener;

// Non-deprecated helpers to set canvas styles via property assignment.
pub fn set_fill_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(color),
    );
}

pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

/// Create a canvas filling `container` and return it with its 2D context.
pub fn create_canvas(
    document: &Document,
    container: &Element,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    cv.set_attribute("style", "display:block;width:100%;height:100%;touch-action:none")?;
    cv.set_tab_index(0);
    container.append_child(&cv)?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// The DOM side of a mounted map: the canvas inside its container and the
/// listeners feeding it events.
pub struct CanvasTarget {
    canvas: HtmlCanvasElement,
    listeners: Vec<Listener>,
}

impl CanvasTarget {
    pub fn new(canvas: HtmlCanvasElement, listeners: Vec<Listener>) -> Self {
        CanvasTarget { canvas, listeners }
    }
}

impl MapTarget for CanvasTarget {
    fn detach(&mut self) {
        self.listeners.clear();
        self.canvas.remove();
        log::debug!("canvas detached from container");
    }
}
