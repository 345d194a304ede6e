use geo_types::Coord;

use crate::constants::{HALF_WORLD, MAX_RESOLUTION, MAX_ZOOM, MIN_ZOOM};

/// Center and zoom of the map, plus the zoom range it may move within.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct View {
    center: Coord<f64>,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl View {
    pub fn new(center: [f64; 2], zoom: f64) -> Self {
        Self::with_zoom_range(center, zoom, MIN_ZOOM, MAX_ZOOM)
    }

    pub fn with_zoom_range(center: [f64; 2], zoom: f64, min_zoom: f64, max_zoom: f64) -> Self {
        let (lo, hi) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        View {
            center: Coord {
                x: center[0],
                y: center[1],
            },
            zoom: zoom.clamp(lo, hi),
            min_zoom: lo,
            max_zoom: hi,
        }
    }

    pub fn center(&self) -> Coord<f64> {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Map metres per CSS pixel.
    pub fn resolution(&self) -> f64 {
        MAX_RESOLUTION / 2f64.powf(self.zoom)
    }

    pub fn set_center(&mut self, center: Coord<f64>) {
        self.center = Coord {
            x: center.x,
            y: center.y.clamp(-HALF_WORLD, HALF_WORLD),
        };
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Convert a viewport pixel (origin top-left) into map coordinates.
    pub fn pixel_to_coord(&self, pixel: [f64; 2], size: [f64; 2]) -> Coord<f64> {
        let res = self.resolution();
        Coord {
            x: self.center.x + (pixel[0] - size[0] / 2.0) * res,
            y: self.center.y - (pixel[1] - size[1] / 2.0) * res,
        }
    }

    /// Convert map coordinates into a viewport pixel.
    pub fn coord_to_pixel(&self, c: Coord<f64>, size: [f64; 2]) -> [f64; 2] {
        let res = self.resolution();
        [
            (c.x - self.center.x) / res + size[0] / 2.0,
            (self.center.y - c.y) / res + size[1] / 2.0,
        ]
    }

    /// Map extent covered by a viewport: `[min_x, min_y, max_x, max_y]`.
    pub fn extent(&self, size: [f64; 2]) -> [f64; 4] {
        let half_w = size[0] / 2.0 * self.resolution();
        let half_h = size[1] / 2.0 * self.resolution();
        [
            self.center.x - half_w,
            self.center.y - half_h,
            self.center.x + half_w,
            self.center.y + half_h,
        ]
    }

    /// Change zoom by `delta` levels while keeping the coordinate under
    /// `anchor` fixed on screen.
    pub fn zoom_at(&mut self, delta: f64, anchor: [f64; 2], size: [f64; 2]) {
        let before = self.resolution();
        let fixed = self.pixel_to_coord(anchor, size);
        self.set_zoom(self.zoom + delta);
        let ratio = self.resolution() / before;
        self.set_center(Coord {
            x: fixed.x - (fixed.x - self.center.x) * ratio,
            y: fixed.y - (fixed.y - self.center.y) * ratio,
        });
    }

    /// Move the map along with a pointer drag of `(dx, dy)` pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let res = self.resolution();
        self.set_center(Coord {
            x: self.center.x - dx * res,
            y: self.center.y + dy * res,
        });
    }
}
