//! Interactive drawing of one geometry at a time into a shared source.

use geo_types::{Coord, LineString, Point, Polygon};

use crate::geometry::{GeometryKind, Shape};
use crate::source::{FeatureId, SharedSource};

/// Draw interaction configured for a single geometry kind.
///
/// Clicks accumulate sketch vertices; a finished sketch is written into the
/// shared source and its id is returned as the draw-end event.
#[derive(Debug)]
pub struct Draw {
    kind: GeometryKind,
    source: SharedSource,
    sketch: Vec<Coord<f64>>,
    cursor: Option<Coord<f64>>,
}

fn near(a: Coord<f64>, b: Coord<f64>, tolerance: f64) -> bool {
    (a.x - b.x).hypot(a.y - b.y) <= tolerance
}

impl Draw {
    pub fn new(kind: GeometryKind, source: SharedSource) -> Self {
        Draw {
            kind,
            source,
            sketch: Vec::new(),
            cursor: None,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn is_drawing(&self) -> bool {
        !self.sketch.is_empty()
    }

    fn min_points(&self) -> usize {
        match self.kind {
            GeometryKind::Point => 1,
            GeometryKind::LineString => 2,
            GeometryKind::Polygon => 3,
        }
    }

    /// Handle a click at `coord`. `tolerance` is the snap distance in map
    /// units for landing on an existing vertex.
    pub fn click(&mut self, coord: Coord<f64>, tolerance: f64) -> Option<FeatureId> {
        if self.kind == GeometryKind::Point {
            return Some(self.commit(Shape::Point(Point(coord))));
        }
        let can_finish = self.sketch.len() >= self.min_points();
        let on_last = self.sketch.last().is_some_and(|&c| near(c, coord, tolerance));
        let on_first = self.kind == GeometryKind::Polygon
            && self.sketch.first().is_some_and(|&c| near(c, coord, tolerance));
        if can_finish && (on_last || on_first) {
            return self.finish();
        }
        if on_last {
            // repeated click on the newest vertex, nothing to add yet
            return None;
        }
        self.sketch.push(coord);
        self.cursor = Some(coord);
        None
    }

    /// Complete the sketch if it has enough vertices for its kind.
    pub fn finish(&mut self) -> Option<FeatureId> {
        if self.kind == GeometryKind::Point || self.sketch.len() < self.min_points() {
            return None;
        }
        let coords = std::mem::take(&mut self.sketch);
        let shape = match self.kind {
            GeometryKind::Polygon => Shape::Polygon(Polygon::new(LineString(coords), vec![])),
            _ => Shape::LineString(LineString(coords)),
        };
        Some(self.commit(shape))
    }

    pub fn abort(&mut self) {
        self.sketch.clear();
    }

    pub fn remove_last_point(&mut self) {
        self.sketch.pop();
    }

    pub fn pointer_move(&mut self, coord: Coord<f64>) {
        self.cursor = Some(coord);
    }

    /// Geometry of the sketch in progress, following the cursor.
    pub fn sketch(&self) -> Option<Shape> {
        if self.sketch.is_empty() {
            return None;
        }
        let mut coords = self.sketch.clone();
        if let Some(c) = self.cursor {
            coords.push(c);
        }
        match self.kind {
            GeometryKind::Polygon if coords.len() >= 3 => {
                Some(Shape::Polygon(Polygon::new(LineString(coords), vec![])))
            }
            _ => Some(Shape::LineString(LineString(coords))),
        }
    }

    fn commit(&mut self, shape: Shape) -> FeatureId {
        self.cursor = None;
        let id = self.source.borrow_mut().add(shape);
        log::debug!("draw end: {} feature {:?}", self.kind, id);
        id
    }
}
