/// DOM ids and drawing styles used by the browser binding.
pub const MAP_CONTAINER_ID: &str = "map";
pub const MODE_SELECT_ID: &str = "drawMode";
pub const MEASURE_BUTTON_ID: &str = "measure";
pub const MEASUREMENT_ID: &str = "measurement";

/// Global the host page may set to a JSON-compatible config object.
pub const CONFIG_GLOBAL: &str = "__MAP_CONFIG";
/// Query parameter overriding the initial drawing mode.
pub const MODE_QUERY_PARAM: &str = "mode";

/// Pointer travel (CSS px) after which a press becomes a pan.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

/// Wheel travel (CSS px) for one zoom level; larger single events clamp to one.
pub const WHEEL_PX_PER_ZOOM: f64 = 100.0;
/// Pixels per line for wheel events reported in lines (`deltaMode` 1).
pub const WHEEL_LINE_PX: f64 = 16.0;

pub const BACKGROUND: &str = "#aad3df";
pub const FEATURE_FILL: &str = "rgba(255, 255, 255, 0.4)";
pub const FEATURE_STROKE: &str = "#3399cc";
pub const SKETCH_STROKE: &str = "#ffcc33";
pub const LINE_WIDTH: f64 = 2.0;
pub const POINT_RADIUS: f64 = 5.0;
