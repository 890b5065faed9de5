//! Great-circle distance between WGS84 coordinates.

use geo::Coord;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two WGS84 coordinates
/// (`x = longitude`, `y = latitude`).
///
/// # Examples
/// ```
/// use geo::Coord;
/// use eventpass_core::haversine_km;
///
/// let kampala = Coord { x: 32.5825, y: 0.3476 };
/// let entebbe = Coord { x: 32.4435, y: 0.0512 };
/// let distance = haversine_km(kampala, entebbe);
/// assert!(distance > 30.0 && distance < 45.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is inherently floating-point trigonometry"
)]
#[must_use]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    EARTH_RADIUS_KM * c
}
