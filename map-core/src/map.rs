use geo_types::Coord;

use crate::constants::SNAP_TOLERANCE_PX;
use crate::draw::Draw;
use crate::source::{FeatureId, SharedSource};
use crate::tiles::TileSource;
use crate::view::View;

/// Surface a map is rendered into (a DOM container in the browser).
pub trait MapTarget {
    /// Release the surface. Called at most once per target.
    fn detach(&mut self);
}

#[derive(Debug)]
pub enum Layer {
    /// Basemap raster tiles.
    Tile(TileSource),
    /// Features of a drawing source.
    Vector(SharedSource),
}

/// Token returned when an interaction is attached; needed to remove it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InteractionHandle(u64);

pub struct Map {
    view: View,
    layers: Vec<Layer>,
    interactions: Vec<(InteractionHandle, Draw)>,
    last_handle: u64,
    size: [f64; 2],
    target: Option<Box<dyn MapTarget>>,
}

impl Map {
    pub fn new(view: View, layers: Vec<Layer>, target: Box<dyn MapTarget>) -> Self {
        Map {
            view,
            layers,
            interactions: Vec::new(),
            last_handle: 0,
            size: [0.0, 0.0],
            target: Some(target),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn size(&self) -> [f64; 2] {
        self.size
    }

    pub fn set_size(&mut self, size: [f64; 2]) {
        self.size = size;
    }

    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// Release the render target. Returns whether anything was detached.
    pub fn detach(&mut self) -> bool {
        match self.target.take() {
            Some(mut t) => {
                t.detach();
                true
            }
            None => false,
        }
    }

    pub fn add_interaction(&mut self, draw: Draw) -> InteractionHandle {
        self.last_handle += 1;
        let handle = InteractionHandle(self.last_handle);
        self.interactions.push((handle, draw));
        handle
    }

    pub fn remove_interaction(&mut self, handle: InteractionHandle) -> Option<Draw> {
        let idx = self.interactions.iter().position(|(h, _)| *h == handle)?;
        Some(self.interactions.remove(idx).1)
    }

    pub fn interactions(&self) -> impl Iterator<Item = &Draw> {
        self.interactions.iter().map(|(_, d)| d)
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    pub fn pixel_to_coord(&self, pixel: [f64; 2]) -> Coord<f64> {
        self.view.pixel_to_coord(pixel, self.size)
    }

    pub fn coord_to_pixel(&self, c: Coord<f64>) -> [f64; 2] {
        self.view.coord_to_pixel(c, self.size)
    }

    /// Forward a click; returns the feature completed by it, if any.
    pub fn handle_click(&mut self, pixel: [f64; 2]) -> Option<FeatureId> {
        let coord = self.pixel_to_coord(pixel);
        let tolerance = SNAP_TOLERANCE_PX * self.view.resolution();
        let mut ended = None;
        for (_, draw) in &mut self.interactions {
            if let Some(id) = draw.click(coord, tolerance) {
                ended = Some(id);
            }
        }
        ended
    }

    pub fn handle_pointer_move(&mut self, pixel: [f64; 2]) {
        let coord = self.pixel_to_coord(pixel);
        for (_, draw) in &mut self.interactions {
            draw.pointer_move(coord);
        }
    }

    /// Finish every sketch in progress (double-click, Enter).
    pub fn finish_drawing(&mut self) -> Option<FeatureId> {
        let mut ended = None;
        for (_, draw) in &mut self.interactions {
            if let Some(id) = draw.finish() {
                ended = Some(id);
            }
        }
        ended
    }

    pub fn abort_drawing(&mut self) {
        for (_, draw) in &mut self.interactions {
            draw.abort();
        }
    }

    pub fn remove_last_point(&mut self) {
        for (_, draw) in &mut self.interactions {
            draw.remove_last_point();
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.interactions().any(Draw::is_drawing)
    }

    pub fn zoom_at(&mut self, delta: f64, anchor: [f64; 2]) {
        self.view.zoom_at(delta, anchor, self.size);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.view.pan_by(dx, dy);
    }
}

impl Drop for Map {
    fn drop(&mut self) {
        self.detach();
    }
}
