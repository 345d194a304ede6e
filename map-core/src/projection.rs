//! Web-Mercator (EPSG:3857) to WGS84 longitude/latitude, the one conversion
//! the spherical measurement helpers need.

use geo_types::Coord;

use crate::constants::MERCATOR_RADIUS;

/// Convert projected metres into degrees (`x` = longitude, `y` = latitude).
pub fn to_lon_lat(c: Coord<f64>) -> Coord<f64> {
    let lon = (c.x / MERCATOR_RADIUS).to_degrees();
    let lat = (2.0 * (c.y / MERCATOR_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    Coord { x: lon, y: lat }
}

/// Convert degrees into projected metres.
pub fn from_lon_lat(c: Coord<f64>) -> Coord<f64> {
    let x = MERCATOR_RADIUS * c.x.to_radians();
    let y = MERCATOR_RADIUS * (std::f64::consts::FRAC_PI_4 + c.y.to_radians() / 2.0).tan().ln();
    Coord { x, y }
}
