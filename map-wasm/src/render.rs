use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Document, HtmlImageElement};

use map_core::{Coord, Layer, Map, Shape, TileCoord, TileSource};

use crate::canvas::{set_fill_style, set_stroke_style};
use crate::constants::{
    BACKGROUND, FEATURE_FILL, FEATURE_STROKE, LINE_WIDTH, POINT_RADIUS, SKETCH_STROKE,
};
use crate::state::State;

/// Create the frame and tile-load callbacks for a freshly built state.
pub fn install_callbacks(state: &Rc<RefCell<State>>) {
    let weak: Weak<RefCell<State>> = Rc::downgrade(state);
    let on_frame = Closure::<dyn FnMut(f64)>::new(move |_ts: f64| {
        let Some(st) = weak.upgrade() else {
            return;
        };
        if let Ok(mut s) = st.try_borrow_mut() {
            s.frame_request = None;
            render(&mut s);
        };
    });
    let weak: Weak<RefCell<State>> = Rc::downgrade(state);
    let on_tile_load = Closure::<dyn FnMut()>::new(move || {
        if let Some(st) = weak.upgrade() {
            schedule_render(&st);
        }
    });
    let mut s = state.borrow_mut();
    s.on_frame = Some(on_frame);
    s.on_tile_load = Some(on_tile_load);
}

/// Request one animation frame unless a request is already pending.
pub fn schedule_render(state: &Rc<RefCell<State>>) {
    let Ok(mut s) = state.try_borrow_mut() else {
        return;
    };
    if s.frame_request.is_some() {
        return;
    }
    let Some(cb) = s.on_frame.as_ref() else {
        return;
    };
    match s.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => s.frame_request = Some(id),
        Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
    }
}

pub fn render(state: &mut State) {
    let State {
        window,
        document,
        canvas,
        ctx,
        view,
        tiles,
        on_tile_load,
        ..
    } = state;
    let Some(map) = view.map() else {
        return;
    };
    let [w, h] = map.size();
    let dpr = window.device_pixel_ratio();
    let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    set_fill_style(ctx, BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);

    let mut attribution = None;
    for layer in map.layers() {
        match layer {
            Layer::Tile(source) => {
                draw_tiles(ctx, document, map, source, tiles, on_tile_load.as_ref());
                attribution = Some(source.attribution());
            }
            Layer::Vector(source) => {
                for feature in source.borrow().features() {
                    draw_shape(ctx, map, &feature.shape, FEATURE_STROKE, false);
                }
            }
        }
    }
    for draw in map.interactions() {
        if let Some(sketch) = draw.sketch() {
            draw_shape(ctx, map, &sketch, SKETCH_STROKE, true);
        }
    }
    if let Some(text) = attribution
        && !text.is_empty()
    {
        draw_attribution(ctx, text, w, h);
    }
}

fn draw_tiles(
    ctx: &CanvasRenderingContext2d,
    document: &Document,
    map: &Map,
    source: &TileSource,
    tiles: &mut HashMap<TileCoord, HtmlImageElement>,
    on_load: Option<&Closure<dyn FnMut()>>,
) {
    let visible = source.visible_tiles(map.view(), map.size());
    for tile in &visible {
        let key = tile.wrapped();
        if !tiles.contains_key(&key) {
            match load_tile(document, source, &key, on_load) {
                Some(img) => {
                    tiles.insert(key, img);
                }
                None => continue,
            }
        }
        let Some(img) = tiles.get(&key) else {
            continue;
        };
        if !img.complete() || img.natural_width() == 0 {
            continue;
        }
        let [min_x, min_y, max_x, max_y] = tile.extent();
        let tl = map.coord_to_pixel(Coord { x: min_x, y: max_y });
        let br = map.coord_to_pixel(Coord { x: max_x, y: min_y });
        // one extra pixel hides seams between neighbouring tiles
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            tl[0].floor(),
            tl[1].floor(),
            (br[0] - tl[0]).ceil() + 1.0,
            (br[1] - tl[1]).ceil() + 1.0,
        );
    }
    tiles.retain(|key, img| {
        let keep = visible.iter().any(|t| t.wrapped() == *key);
        if !keep {
            img.set_onload(None);
        }
        keep
    });
}

fn load_tile(
    document: &Document,
    source: &TileSource,
    tile: &TileCoord,
    on_load: Option<&Closure<dyn FnMut()>>,
) -> Option<HtmlImageElement> {
    let img = document
        .create_element("img")
        .ok()?
        .dyn_into::<HtmlImageElement>()
        .ok()?;
    img.set_cross_origin(Some("anonymous"));
    if let Some(cb) = on_load {
        img.set_onload(Some(cb.as_ref().unchecked_ref()));
    }
    img.set_src(&source.url(tile));
    Some(img)
}

fn trace_path(ctx: &CanvasRenderingContext2d, map: &Map, shape: &Shape) {
    let coords = shape.coords();
    let Some((first, rest)) = coords.split_first() else {
        return;
    };
    let p = map.coord_to_pixel(*first);
    ctx.begin_path();
    ctx.move_to(p[0], p[1]);
    for c in rest {
        let p = map.coord_to_pixel(*c);
        ctx.line_to(p[0], p[1]);
    }
}

fn draw_shape(ctx: &CanvasRenderingContext2d, map: &Map, shape: &Shape, stroke: &str, sketch: bool) {
    ctx.set_line_width(LINE_WIDTH);
    set_stroke_style(ctx, stroke);
    let dash = if sketch {
        js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(4.0))
    } else {
        js_sys::Array::new()
    };
    let _ = ctx.set_line_dash(&dash);
    match shape {
        Shape::Point(p) => {
            let c = map.coord_to_pixel(p.0);
            ctx.begin_path();
            let _ = ctx.arc(c[0], c[1], POINT_RADIUS, 0.0, TAU);
            set_fill_style(ctx, FEATURE_STROKE);
            ctx.fill();
            set_stroke_style(ctx, "#fff");
            ctx.stroke();
        }
        Shape::LineString(_) => {
            trace_path(ctx, map, shape);
            ctx.stroke();
        }
        Shape::Polygon(_) => {
            trace_path(ctx, map, shape);
            ctx.close_path();
            set_fill_style(ctx, FEATURE_FILL);
            ctx.fill();
            ctx.stroke();
        }
    }
}

fn draw_attribution(ctx: &CanvasRenderingContext2d, text: &str, w: f64, h: f64) {
    let _ = ctx.set_line_dash(&js_sys::Array::new());
    ctx.set_font("11px sans-serif");
    ctx.set_text_align("right");
    ctx.set_text_baseline("bottom");
    ctx.set_line_width(3.0);
    set_stroke_style(ctx, "rgba(255, 255, 255, 0.8)");
    let _ = ctx.stroke_text(text, w - 6.0, h - 4.0);
    set_fill_style(ctx, "#333");
    let _ = ctx.fill_text(text, w - 6.0, h - 4.0);
}
