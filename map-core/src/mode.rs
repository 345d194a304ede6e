use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::geometry::GeometryKind;

/// Drawing mode chosen in the mode selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMode {
    Point,
    #[default]
    LineString,
    Polygon,
    None,
}

impl DrawMode {
    pub const ALL: [DrawMode; 4] = [
        DrawMode::Point,
        DrawMode::LineString,
        DrawMode::Polygon,
        DrawMode::None,
    ];

    /// Geometry kind the draw interaction is configured for, if any.
    pub fn geometry_kind(self) -> Option<GeometryKind> {
        match self {
            DrawMode::Point => Some(GeometryKind::Point),
            DrawMode::LineString => Some(GeometryKind::LineString),
            DrawMode::Polygon => Some(GeometryKind::Polygon),
            DrawMode::None => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DrawMode::Point => "Point",
            DrawMode::LineString => "LineString",
            DrawMode::Polygon => "Polygon",
            DrawMode::None => "None",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownDrawMode(s.to_string()))
    }
}
