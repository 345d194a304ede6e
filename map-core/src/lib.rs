//! Map engine behind the browser viewer: view and tile grid, drawing source,
//! draw interaction, spherical measurement and the map view component.

pub mod compact;
pub mod component;
pub mod config;
pub mod constants;
pub mod draw;
mod error;
pub mod geometry;
pub mod map;
pub mod measure;
pub mod mode;
pub mod projection;
pub mod source;
pub mod tiles;
pub mod view;

pub use geo_types::Coord;

pub use compact::{CompactFormatter, CompactOptions};
pub use component::MapViewState;
pub use config::MapConfig;
pub use draw::Draw;
pub use error::{Error, Result};
pub use geometry::{GeometryKind, Shape};
pub use map::{InteractionHandle, Layer, Map, MapTarget};
pub use measure::{Measurement, measure};
pub use mode::DrawMode;
pub use source::{Feature, FeatureId, FeatureSource, SharedSource};
pub use tiles::{TileCoord, TileSource};
pub use view::View;
