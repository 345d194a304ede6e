use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement, Window};

use map_core::{MapViewState, TileCoord};

use crate::events::Listener;

/// Pointer press in progress on the canvas (CSS px).
#[derive(Clone, Copy, Debug)]
pub struct DragState {
    pub start: [f64; 2],
    pub last: [f64; 2],
    pub panning: bool,
}

/// Runtime state of one mounted map view, shared across the WASM callbacks
/// behind an `Rc<RefCell<_>>`.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub view: MapViewState,
    pub drag: Option<DragState>,
    /// Tile images for the tiles currently in view, keyed by wrapped address.
    pub tiles: HashMap<TileCoord, HtmlImageElement>,
    pub on_tile_load: Option<Closure<dyn FnMut()>>,
    pub on_frame: Option<Closure<dyn FnMut(f64)>>,
    pub frame_request: Option<i32>,
}

impl State {
    /// Drop every callback the browser could still invoke.
    pub fn release_callbacks(&mut self) {
        for img in self.tiles.values() {
            img.set_onload(None);
        }
        self.tiles.clear();
        if let Some(id) = self.frame_request.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.on_tile_load = None;
        self.on_frame = None;
    }
}

/// A mounted view: its state plus the control listeners outside the map.
pub struct Mounted {
    pub state: Rc<RefCell<State>>,
    pub controls: Vec<Listener>,
}

thread_local! {
    /// The single mounted view instance, if any.
    pub static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}
