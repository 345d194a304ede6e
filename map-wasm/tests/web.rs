//! Browser tests; run with `wasm-pack test --headless --firefox map-wasm`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Document, Event, HtmlElement, HtmlSelectElement, KeyboardEvent, KeyboardEventInit, MouseEvent,
    MouseEventInit,
};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
}

fn setup(container: &str) -> Document {
    let doc = document();
    let body = doc.body().expect("body");
    body.set_inner_html(&format!(
        r#"<select id="drawMode">
             <option value="Point">Point</option>
             <option value="LineString">LineString</option>
             <option value="Polygon">Polygon</option>
             <option value="None">None</option>
           </select>
           <button id="measure" hidden>Measure</button>
           <div id="measurement" hidden></div>
           <div id="{container}" style="width:400px;height:300px"></div>"#
    ));
    doc
}

fn element(doc: &Document, id: &str) -> HtmlElement {
    doc.get_element_by_id(id)
        .expect(id)
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn map_canvas(doc: &Document, container: &str) -> HtmlElement {
    element(doc, container)
        .first_element_child()
        .expect("canvas")
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn mouse(target: &HtmlElement, kind: &str, at: [f64; 2]) {
    let rect = target.get_bounding_client_rect();
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_button(0);
    init.set_client_x((rect.left() + at[0]).round() as i32);
    init.set_client_y((rect.top() + at[1]).round() as i32);
    let e = MouseEvent::new_with_mouse_event_init_dict(kind, &init).expect("mouse event");
    target.dispatch_event(&e).expect("dispatch");
}

fn click_at(target: &HtmlElement, at: [f64; 2]) {
    mouse(target, "mousedown", at);
    mouse(target, "mouseup", at);
}

fn press(target: &HtmlElement, key: &str) {
    let init = KeyboardEventInit::new();
    init.set_bubbles(true);
    init.set_key(key);
    let e = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("key event");
    target.dispatch_event(&e).expect("dispatch");
}

fn select_mode(doc: &Document, mode: &str) {
    let sel = element(doc, "drawMode")
        .dyn_into::<HtmlSelectElement>()
        .expect("select");
    sel.set_value(mode);
    sel.dispatch_event(&Event::new("change").expect("event"))
        .expect("dispatch");
}

#[wasm_bindgen_test]
fn mount_adds_canvas_and_unmount_removes_it() {
    let doc = setup("viewer");
    map_wasm::mount("viewer").expect("mount");
    assert!(map_wasm::is_mounted());
    assert_eq!(element(&doc, "viewer").child_element_count(), 1);

    map_wasm::unmount();
    assert!(!map_wasm::is_mounted());
    assert_eq!(element(&doc, "viewer").child_element_count(), 0);
    map_wasm::unmount();
}

#[wasm_bindgen_test]
fn mount_into_missing_container_fails() {
    setup("viewer");
    assert!(map_wasm::mount("nowhere").is_err());
    assert!(!map_wasm::is_mounted());
}

#[wasm_bindgen_test]
fn controls_follow_the_mode_selector() {
    let doc = setup("viewer");
    map_wasm::mount("viewer").expect("mount");
    let sel = doc
        .get_element_by_id("drawMode")
        .and_then(|e| e.dyn_into::<HtmlSelectElement>().ok())
        .expect("select");
    assert_eq!(sel.value(), "LineString");
    let btn = element(&doc, "measure");
    assert!(!btn.hidden());
    assert_eq!(btn.inner_text(), "Measure Length");

    sel.set_value("Polygon");
    sel.dispatch_event(&Event::new("change").expect("event"))
        .expect("dispatch");
    assert_eq!(btn.inner_text(), "Measure Area");

    sel.set_value("Point");
    sel.dispatch_event(&Event::new("change").expect("event"))
        .expect("dispatch");
    assert!(btn.hidden());

    btn.click();
    assert!(element(&doc, "measurement").hidden());
    assert_eq!(map_wasm::measurement_text(), None);
    map_wasm::unmount();
}

#[wasm_bindgen_test]
fn drawn_line_is_measured_on_the_page() {
    let doc = setup("viewer");
    map_wasm::mount("viewer").expect("mount");
    let cv = map_canvas(&doc, "viewer");
    let btn = element(&doc, "measure");
    let out = element(&doc, "measurement");

    click_at(&cv, [100.0, 100.0]);
    click_at(&cv, [300.0, 200.0]);
    // clicking the last vertex again ends the line
    click_at(&cv, [300.0, 200.0]);
    btn.click();
    assert!(!out.hidden());
    let text = out.text_content().unwrap_or_default();
    assert!(text.starts_with("Length: "), "{text}");
    assert!(text.ends_with(" meters"), "{text}");
    assert_eq!(map_wasm::measurement_text().as_deref(), Some(text.as_str()));

    select_mode(&doc, "Point");
    click_at(&cv, [200.0, 150.0]);
    select_mode(&doc, "LineString");
    assert!(!btn.hidden());
    btn.click();
    assert!(out.hidden());
    assert_eq!(map_wasm::measurement_text(), None);
    map_wasm::unmount();
}

#[wasm_bindgen_test]
fn drawn_polygon_is_measured_as_area() {
    let doc = setup("viewer");
    map_wasm::mount("viewer").expect("mount");
    let cv = map_canvas(&doc, "viewer");
    select_mode(&doc, "Polygon");

    click_at(&cv, [100.0, 100.0]);
    click_at(&cv, [300.0, 100.0]);
    click_at(&cv, [200.0, 250.0]);
    click_at(&cv, [100.0, 100.0]);
    element(&doc, "measure").click();
    let out = element(&doc, "measurement");
    assert!(!out.hidden());
    let text = out.text_content().unwrap_or_default();
    assert!(text.starts_with("Area: "), "{text}");
    assert!(text.ends_with(" square meters"), "{text}");
    map_wasm::unmount();
}

#[wasm_bindgen_test]
fn keys_pressed_on_controls_leave_the_sketch_alone() {
    let doc = setup("viewer");
    map_wasm::mount("viewer").expect("mount");
    let cv = map_canvas(&doc, "viewer");
    let btn = element(&doc, "measure");

    click_at(&cv, [100.0, 100.0]);
    click_at(&cv, [300.0, 200.0]);
    press(&element(&doc, "drawMode"), "Enter");
    btn.click();
    assert_eq!(map_wasm::measurement_text(), None);

    press(&cv, "Enter");
    btn.click();
    assert!(map_wasm::measurement_text().is_some_and(|t| t.starts_with("Length: ")));
    map_wasm::unmount();
}
