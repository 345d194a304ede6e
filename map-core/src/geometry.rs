use std::fmt;

use geo_types::{Coord, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

/// Geometry kinds a draw interaction can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        };
        f.write_str(s)
    }
}

/// A drawn geometry in map coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl Shape {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Shape::Point(_) => GeometryKind::Point,
            Shape::LineString(_) => GeometryKind::LineString,
            Shape::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// Vertices in drawing order. Polygon rings include the closing vertex.
    pub fn coords(&self) -> Vec<Coord<f64>> {
        match self {
            Shape::Point(p) => vec![p.0],
            Shape::LineString(l) => l.0.clone(),
            Shape::Polygon(p) => p.exterior().0.clone(),
        }
    }
}
