use serde::{Deserialize, Serialize};

use crate::compact::CompactOptions;
use crate::constants::{
    DEFAULT_LOG_LEVEL, INITIAL_CENTER, INITIAL_ZOOM, MAX_ZOOM, MIN_ZOOM, OSM_ATTRIBUTION,
    OSM_TILE_URL,
};
use crate::error::Result;
use crate::mode::DrawMode;
use crate::tiles::TileSource;
use crate::view::View;

/// Map view settings. Every field is optional in the JSON form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub center: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub tile_url: String,
    pub attribution: String,
    pub initial_mode: DrawMode,
    pub number_format: CompactOptions,
    pub log_level: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            tile_url: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
            initial_mode: DrawMode::default(),
            number_format: CompactOptions::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl MapConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn view(&self) -> View {
        View::with_zoom_range(self.center, self.zoom, self.min_zoom, self.max_zoom)
    }

    pub fn tile_source(&self) -> TileSource {
        let max = self.max_zoom.clamp(0.0, MAX_ZOOM) as u8;
        TileSource::new(&self.tile_url, max, &self.attribution)
    }

    /// Parsed `log_level`, falling back to `Info` on unknown names.
    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
