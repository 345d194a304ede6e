use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use map_core::{MapConfig, MapViewState};

mod canvas;
mod constants;
mod events;
mod render;
mod state;
mod ui;
mod utils;

use crate::canvas::{CanvasTarget, create_canvas};
use crate::state::{MOUNTED, Mounted, State};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    if document
        .get_element_by_id(constants::MAP_CONTAINER_ID)
        .is_some()
    {
        mount(constants::MAP_CONTAINER_ID)?;
    }
    Ok(())
}

/// Mount the map view into the element with id `container_id`, replacing
/// any view mounted before.
#[wasm_bindgen]
pub fn mount(container_id: &str) -> Result<(), JsValue> {
    unmount();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let config = utils::load_config(&window);
    utils::init_logging(config.log_level());
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("container #{container_id} not found")))?;
    let (canvas, ctx) = create_canvas(&document, &container)?;

    let state = Rc::new(RefCell::new(State {
        window: window.clone(),
        document: document.clone(),
        canvas: canvas.clone(),
        ctx,
        view: MapViewState::new(config),
        drag: None,
        tiles: HashMap::new(),
        on_tile_load: None,
        on_frame: None,
        frame_request: None,
    }));
    render::install_callbacks(&state);
    let listeners = match events::attach_map_events(&state) {
        Ok(l) => l,
        Err(e) => {
            canvas.remove();
            state.borrow_mut().release_callbacks();
            return Err(e);
        }
    };
    {
        let mut s = state.borrow_mut();
        s.view.mount(Box::new(CanvasTarget::new(canvas.clone(), listeners)));
        let size = utils::sync_canvas_size(&window, &canvas);
        if let Some(map) = s.view.map_mut() {
            map.set_size(size);
        }
        ui::update_controls_dom(&s);
    }
    let controls = events::attach_controls(&state, &document)?;
    render::schedule_render(&state);
    MOUNTED.with(|m| m.replace(Some(Mounted { state, controls })));
    Ok(())
}

/// Tear down the mounted view: control listeners, pending callbacks, and the
/// map's hold on its container. Does nothing when nothing is mounted.
#[wasm_bindgen]
pub fn unmount() {
    let Some(mounted) = MOUNTED.with(|m| m.borrow_mut().take()) else {
        return;
    };
    let Mounted { state, controls } = mounted;
    drop(controls);
    let mut s = state.borrow_mut();
    s.release_callbacks();
    s.view.unmount();
}

/// Whether a map view is currently mounted.
#[wasm_bindgen(js_name = isMounted)]
pub fn is_mounted() -> bool {
    MOUNTED.with(|m| m.borrow().is_some())
}

/// Current measurement text, if any.
#[wasm_bindgen(js_name = measurementText)]
pub fn measurement_text() -> Option<String> {
    MOUNTED.with(|m| {
        m.borrow()
            .as_ref()
            .and_then(|v| v.state.borrow().view.measurement().map(str::to_string))
    })
}

/// Default configuration as a JSON string, for hosts building
/// `window.__MAP_CONFIG`.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<String, JsValue> {
    serde_json::to_string(&MapConfig::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}
