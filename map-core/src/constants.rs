/// Engine-wide numeric constants.
/// Map coordinates are EPSG:3857 metres unless noted otherwise.
pub const INITIAL_CENTER: [f64; 2] = [-11_000_000.0, 4_600_000.0];
pub const INITIAL_ZOOM: f64 = 4.0;
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 19.0;

/// Sphere radius of the Web-Mercator projection (m).
pub const MERCATOR_RADIUS: f64 = 6_378_137.0;
/// Half the width of the projected world (m).
pub const HALF_WORLD: f64 = std::f64::consts::PI * MERCATOR_RADIUS;
/// Edge length of one raster tile (px).
pub const TILE_SIZE: f64 = 256.0;
/// Metres per pixel at zoom 0.
pub const MAX_RESOLUTION: f64 = 2.0 * HALF_WORLD / TILE_SIZE;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Pixel distance within which a click lands on an existing sketch vertex.
pub const SNAP_TOLERANCE_PX: f64 = 12.0;

pub const DEFAULT_LOG_LEVEL: &str = "info";
