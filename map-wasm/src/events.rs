//! DOM event wiring. Every listener is owned by a [`Listener`] so it can be
//! removed again on unmount.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Event, EventTarget, HtmlElement, HtmlSelectElement, KeyboardEvent, MouseEvent,
    WheelEvent,
};

use map_core::DrawMode;

use crate::constants::{DRAG_THRESHOLD_PX, MEASURE_BUTTON_ID, MODE_SELECT_ID};
use crate::render::schedule_render;
use crate::state::{DragState, State};
use crate::ui::update_controls_dom;
use crate::utils::{event_pixel, sync_canvas_size, wheel_zoom_delta};

/// An event listener registered on a DOM target, removed on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Run `f` on the live state, then request a frame.
fn with_state(weak: &Weak<RefCell<State>>, f: impl FnOnce(&mut State)) {
    let Some(st) = weak.upgrade() else {
        return;
    };
    if let Ok(mut s) = st.try_borrow_mut() {
        f(&mut s);
    }
    schedule_render(&st);
}

/// Pointer, wheel, keyboard and resize handling for the map canvas.
pub fn attach_map_events(state: &Rc<RefCell<State>>) -> Result<Vec<Listener>, JsValue> {
    let (canvas, window) = {
        let s = state.borrow();
        (s.canvas.clone(), s.window.clone())
    };
    let mut out = Vec::new();

    let weak = Rc::downgrade(state);
    out.push(Listener::new(&canvas, "mousedown", move |e: Event| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        if e.button() != 0 {
            return;
        }
        with_state(&weak, |s| {
            let _ = s.canvas.focus();
            let px = event_pixel(e, &s.canvas);
            s.drag = Some(DragState {
                start: px,
                last: px,
                panning: false,
            });
        });
    })?);

    let weak = Rc::downgrade(state);
    out.push(Listener::new(&canvas, "mousemove", move |e: Event| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        with_state(&weak, |s| {
            let px = event_pixel(e, &s.canvas);
            if let Some(drag) = s.drag.as_mut() {
                let moved = (px[0] - drag.start[0]).hypot(px[1] - drag.start[1]);
                if drag.panning || moved > DRAG_THRESHOLD_PX {
                    let (dx, dy) = (px[0] - drag.last[0], px[1] - drag.last[1]);
                    drag.panning = true;
                    drag.last = px;
                    if let Some(map) = s.view.map_mut() {
                        map.pan_by(dx, dy);
                    }
                    return;
                }
            }
            s.view.pointer_move(px);
        });
    })?);

    let weak = Rc::downgrade(state);
    out.push(Listener::new(&canvas, "mouseup", move |e: Event| {
        let Some(e) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        with_state(&weak, |s| {
            let px = event_pixel(e, &s.canvas);
            if let Some(drag) = s.drag.take()
                && !drag.panning
            {
                s.view.click(px);
            }
        });
    })?);

    let weak = Rc::downgrade(state);
    out.push(Listener::new(&canvas, "mouseleave", move |_e: Event| {
        with_state(&weak, |s| s.drag = None);
    })?);

    let weak = Rc::downgrade(state);
    out.push(Listener::new(&canvas, "dblclick", move |e: Event| {
        e.prevent_default();
        with_state(&weak, |s| s.view.double_click());
    })?);

    let weak = Rc::downgrade(state);
    out.push(Listener::new(&canvas, "wheel", move |e: Event| {
        let Some(e) = e.dyn_ref::<WheelEvent>() else {
            return;
        };
        e.prevent_default();
        with_state(&weak, |s| {
            let px = event_pixel(e, &s.canvas);
            if let Some(map) = s.view.map_mut() {
                let delta = wheel_zoom_delta(e.delta_y(), e.delta_mode(), map.size()[1]);
                if delta != 0.0 {
                    map.zoom_at(delta, px);
                }
            }
        });
    })?);

    // keys only act while the canvas has focus, not on the controls
    let weak = Rc::downgrade(state);
    out.push(Listener::new(&canvas, "keydown", move |e: Event| {
        let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = e.key();
        with_state(&weak, |s| {
            let drawing = s.view.map().is_some_and(|m| m.is_drawing());
            match key.as_str() {
                "Escape" => s.view.abort_drawing(),
                "Enter" => s.view.finish_drawing(),
                "Backspace" if drawing => {
                    e.prevent_default();
                    s.view.remove_last_point();
                }
                _ => {}
            }
        });
    })?);

    let weak = Rc::downgrade(state);
    out.push(Listener::new(&window, "resize", move |_e: Event| {
        with_state(&weak, |s| {
            let size = sync_canvas_size(&s.window, &s.canvas);
            if let Some(map) = s.view.map_mut() {
                map.set_size(size);
            }
        });
    })?);

    Ok(out)
}

/// Mode selector and measure button. Missing controls are skipped.
pub fn attach_controls(
    state: &Rc<RefCell<State>>,
    document: &Document,
) -> Result<Vec<Listener>, JsValue> {
    let mut out = Vec::new();

    if let Some(sel) = document.get_element_by_id(MODE_SELECT_ID)
        && let Ok(sel) = sel.dyn_into::<HtmlSelectElement>()
    {
        sel.set_value(state.borrow().view.mode().as_str());
        let weak = Rc::downgrade(state);
        let sel_read = sel.clone();
        out.push(Listener::new(&sel, "change", move |_e: Event| {
            let value = sel_read.value();
            with_state(&weak, |s| match value.parse::<DrawMode>() {
                Ok(mode) => {
                    s.view.set_mode(mode);
                    update_controls_dom(s);
                }
                Err(e) => log::warn!("{e}"),
            });
        })?);
    }

    if let Some(btn) = document.get_element_by_id(MEASURE_BUTTON_ID)
        && let Ok(btn) = btn.dyn_into::<HtmlElement>()
    {
        let weak = Rc::downgrade(state);
        out.push(Listener::new(&btn, "click", move |_e: Event| {
            with_state(&weak, |s| {
                s.view.measure();
                update_controls_dom(s);
            });
        })?);
    }

    Ok(out)
}
