use geo::{ChamberlainDuquetteArea, Haversine, Length, MapCoords};

use crate::compact::CompactFormatter;
use crate::geometry::{GeometryKind, Shape};
use crate::projection::to_lon_lat;

/// Outcome of measuring a drawn shape on the sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measurement {
    /// Square metres.
    Area(f64),
    /// Metres.
    Length(f64),
    /// Neither length nor area is defined for this kind.
    Unsupported(GeometryKind),
}

pub fn measure(shape: &Shape) -> Measurement {
    match shape {
        Shape::Polygon(p) => Measurement::Area(
            p.map_coords(to_lon_lat)
                .chamberlain_duquette_unsigned_area(),
        ),
        Shape::LineString(l) => Measurement::Length(Haversine.length(&l.map_coords(to_lon_lat))),
        Shape::Point(_) => Measurement::Unsupported(GeometryKind::Point),
    }
}

impl Measurement {
    /// Text shown to the user, `None` when there is nothing to show.
    pub fn describe(&self, fmt: &CompactFormatter) -> Option<String> {
        match self {
            Measurement::Area(a) => Some(format!("Area: {} square meters", fmt.format(*a))),
            Measurement::Length(l) => Some(format!("Length: {} meters", fmt.format(*l))),
            Measurement::Unsupported(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::from_lon_lat;
    use approx::assert_relative_eq;
    use geo_types::{Coord, LineString, Point, Polygon};

    fn ll(lon: f64, lat: f64) -> Coord<f64> {
        from_lon_lat(Coord { x: lon, y: lat })
    }

    #[test]
    fn one_degree_along_the_equator() {
        let line = Shape::LineString(LineString(vec![ll(0.0, 0.0), ll(1.0, 0.0)]));
        let Measurement::Length(m) = measure(&line) else {
            panic!("expected a length");
        };
        assert_relative_eq!(m, 111_195.0, max_relative = 1e-3);
        assert_eq!(
            measure(&line).describe(&CompactFormatter::default()).as_deref(),
            Some("Length: 111.2K meters")
        );
    }

    #[test]
    fn one_degree_cell_at_the_equator() {
        let ring = LineString(vec![
            ll(0.0, 0.0),
            ll(1.0, 0.0),
            ll(1.0, 1.0),
            ll(0.0, 1.0),
        ]);
        let poly = Shape::Polygon(Polygon::new(ring, vec![]));
        let Measurement::Area(a) = measure(&poly) else {
            panic!("expected an area");
        };
        assert_relative_eq!(a, 1.236e10, max_relative = 5e-3);
        let text = measure(&poly)
            .describe(&CompactFormatter::default())
            .unwrap_or_default();
        assert_eq!(text, "Area: 12.4B square meters");
    }

    #[test]
    fn points_have_no_measurement() {
        let m = measure(&Shape::Point(Point::new(1.0, 1.0)));
        assert_eq!(m, Measurement::Unsupported(GeometryKind::Point));
        assert_eq!(m.describe(&CompactFormatter::default()), None);
    }
}
