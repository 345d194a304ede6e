//! XYZ tile grid over the Web-Mercator world and the URL-templated raster
//! source that fills it.

use crate::constants::{HALF_WORLD, MAX_ZOOM, OSM_ATTRIBUTION, OSM_TILE_URL};
use crate::view::View;

/// Grid address of one tile. `x` may fall outside `0..2^z` when the view
/// crosses the antimeridian; [`TileCoord::wrapped`] folds it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub fn new(z: u8, x: i64, y: i64) -> Self {
        TileCoord { z, x, y }
    }

    /// Same tile with `x` folded into `0..2^z`.
    pub fn wrapped(&self) -> TileCoord {
        let n = 1i64 << self.z;
        TileCoord {
            x: self.x.rem_euclid(n),
            ..*self
        }
    }

    /// Map extent `[min_x, min_y, max_x, max_y]` of this tile, unwrapped.
    pub fn extent(&self) -> [f64; 4] {
        let span = tile_span(self.z);
        let min_x = -HALF_WORLD + self.x as f64 * span;
        let max_y = HALF_WORLD - self.y as f64 * span;
        [min_x, max_y - span, min_x + span, max_y]
    }
}

/// Edge length of a tile at zoom `z` in map metres.
pub fn tile_span(z: u8) -> f64 {
    2.0 * HALF_WORLD / (1u64 << z) as f64
}

/// Read-only raster tile provider.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSource {
    url_template: String,
    max_zoom: u8,
    attribution: String,
}

impl Default for TileSource {
    fn default() -> Self {
        TileSource::new(OSM_TILE_URL, MAX_ZOOM as u8, OSM_ATTRIBUTION)
    }
}

impl TileSource {
    pub fn new(url_template: &str, max_zoom: u8, attribution: &str) -> Self {
        TileSource {
            url_template: url_template.to_string(),
            max_zoom,
            attribution: attribution.to_string(),
        }
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    pub fn url(&self, tile: &TileCoord) -> String {
        let t = tile.wrapped();
        self.url_template
            .replace("{z}", &t.z.to_string())
            .replace("{x}", &t.x.to_string())
            .replace("{y}", &t.y.to_string())
    }

    /// Integer zoom level whose tiles are drawn for `view`.
    pub fn tile_zoom(&self, view: &View) -> u8 {
        view.zoom().round().clamp(0.0, self.max_zoom as f64) as u8
    }

    /// Every tile intersecting the viewport, rows outside the world dropped.
    pub fn visible_tiles(&self, view: &View, size: [f64; 2]) -> Vec<TileCoord> {
        let z = self.tile_zoom(view);
        let span = tile_span(z);
        let rows = 1i64 << z;
        let [min_x, min_y, max_x, max_y] = view.extent(size);
        let x0 = ((min_x + HALF_WORLD) / span).floor() as i64;
        let x1 = ((max_x + HALF_WORLD) / span).ceil() as i64 - 1;
        let y0 = (((HALF_WORLD - max_y) / span).floor() as i64).max(0);
        let y1 = ((((HALF_WORLD - min_y) / span).ceil() as i64) - 1).min(rows - 1);
        let mut out = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                out.push(TileCoord::new(z, x, y));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn url_substitutes_wrapped_address() {
        let src = TileSource::default();
        let url = src.url(&TileCoord::new(2, -1, 3));
        assert_eq!(url, "https://tile.openstreetmap.org/2/3/3.png");
    }

    #[test]
    fn tile_extent_starts_at_top_left() {
        let e = TileCoord::new(1, 0, 0).extent();
        assert_relative_eq!(e[0], -HALF_WORLD);
        assert_relative_eq!(e[3], HALF_WORLD);
        assert_relative_eq!(e[2], 0.0, epsilon = 1e-6);
        assert_relative_eq!(e[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn whole_world_at_zoom_zero() {
        let src = TileSource::default();
        let view = View::new([0.0, 0.0], 0.0);
        assert_eq!(
            src.visible_tiles(&view, [256.0, 256.0]),
            vec![TileCoord::new(0, 0, 0)]
        );
    }

    #[test]
    fn viewport_of_four_tiles() {
        let src = TileSource::default();
        let view = View::new([0.0, 0.0], 1.0);
        let tiles = src.visible_tiles(&view, [512.0, 512.0]);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.contains(&TileCoord::new(1, 0, 0)));
        assert!(tiles.contains(&TileCoord::new(1, 1, 1)));
    }

    #[test]
    fn rows_beyond_the_poles_are_skipped() {
        let src = TileSource::default();
        let view = View::new([0.0, 0.0], 0.0);
        let tiles = src.visible_tiles(&view, [256.0, 1024.0]);
        assert_eq!(tiles, vec![TileCoord::new(0, 0, 0)]);
    }

    #[test]
    fn tile_zoom_respects_source_limit() {
        let src = TileSource::new("{z}/{x}/{y}", 5, "");
        let view = View::new([0.0, 0.0], 12.3);
        assert_eq!(src.tile_zoom(&view), 5);
    }
}
