use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::constants::{MEASURE_BUTTON_ID, MEASUREMENT_ID};
use crate::state::State;

fn element(state: &State, id: &str) -> Option<HtmlElement> {
    state
        .document
        .get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

/// Show or hide the measure button and the measurement text to match the
/// current mode and result.
pub fn update_controls_dom(state: &State) {
    if let Some(btn) = element(state, MEASURE_BUTTON_ID) {
        match state.view.measure_label() {
            Some(label) => {
                btn.set_inner_text(label);
                btn.set_hidden(false);
            }
            None => btn.set_hidden(true),
        }
    }
    if let Some(out) = element(state, MEASUREMENT_ID) {
        match state.view.measurement() {
            Some(text) => {
                out.set_inner_text(text);
                out.set_hidden(false);
            }
            None => {
                out.set_inner_text("");
                out.set_hidden(true);
            }
        }
    }
}
