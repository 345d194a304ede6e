use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use map_core::MapConfig;

use crate::constants::{CONFIG_GLOBAL, WHEEL_LINE_PX, WHEEL_PX_PER_ZOOM};

/// `log` backend writing to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger; later calls only adjust the level.
pub fn init_logging(level: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Ensure the canvas backing store matches the CSS size and device pixel ratio
/// to prevent blurry tiles. Returns the CSS size.
pub fn sync_canvas_size(window: &Window, canvas: &HtmlCanvasElement) -> [f64; 2] {
    let dpr = window.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let (css_w, css_h) = (rect.width().max(1.0), rect.height().max(1.0));
    let target_w = (css_w * dpr).round().clamp(1.0, 16384.0) as u32;
    let target_h = (css_h * dpr).round().clamp(1.0, 16384.0) as u32;
    if canvas.width() != target_w {
        canvas.set_width(target_w);
    }
    if canvas.height() != target_h {
        canvas.set_height(target_h);
    }
    [css_w, css_h]
}

/// Pointer position in CSS pixels relative to the canvas' top-left corner.
pub fn event_pixel(e: &MouseEvent, cv: &HtmlCanvasElement) -> [f64; 2] {
    let rect = cv.get_bounding_client_rect();
    [
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    ]
}

/// Zoom change for one wheel event. Trackpads send many small deltas, so the
/// change is proportional to the scroll distance and capped at one level.
pub fn wheel_zoom_delta(delta_y: f64, delta_mode: u32, page_height: f64) -> f64 {
    let px = match delta_mode {
        1 => delta_y * WHEEL_LINE_PX,
        2 => delta_y * page_height,
        _ => delta_y,
    };
    (-px / WHEEL_PX_PER_ZOOM).clamp(-1.0, 1.0)
}

/// Read the map configuration from `window.__MAP_CONFIG` and the `?mode=`
/// query parameter, falling back to defaults.
pub fn load_config(window: &Window) -> MapConfig {
    let mut cfg = match js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(v) if !v.is_undefined() && !v.is_null() => config_from_js(&v),
        _ => MapConfig::default(),
    };
    if let Ok(search) = window.location().search()
        && let Some(mode) = get_query_param(&search, crate::constants::MODE_QUERY_PARAM)
    {
        match mode.parse() {
            Ok(m) => cfg.initial_mode = m,
            Err(e) => log::warn!("ignoring query parameter: {e}"),
        }
    }
    cfg
}

fn config_from_js(v: &JsValue) -> MapConfig {
    let text = js_sys::JSON::stringify(v)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_default();
    match MapConfig::from_json(&text) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("{e}; using defaults");
            MapConfig::default()
        }
    }
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}
