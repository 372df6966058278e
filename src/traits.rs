//! Core domain traits for the trade route model.
//!
//! Coordinate lookup is an external concern. Callers implement
//! [`GeoResolver`] for their own geocoding data and hand it to a
//! [`PointFactory`](crate::point::PointFactory); every point resolves its
//! coordinate through it exactly once.

/// Projected map coordinate as (lat, lng).
pub type Coordinate = (f64, f64);

/// Resolves location references to map coordinates.
///
/// Implementations must be pure: repeated calls with the same input return
/// the same answer.
pub trait GeoResolver {
    /// Coordinate for an ISO country code, if known.
    fn country_point(&self, country_code: &str) -> Option<Coordinate>;

    /// Coordinate for a port code, if known.
    fn port_point(&self, port_code: &str) -> Option<Coordinate>;

    /// Projects a raw longitude/latitude pair onto the map.
    fn lat_long_point(&self, longitude: f64, latitude: f64) -> Coordinate;

    /// Country code of the country containing a port, if known.
    fn port_country(&self, _port_code: &str) -> Option<String> {
        None
    }
}

