//! Test-only helpers shared by unit tests.

use crate::traits::{Coordinate, GeoResolver};

/// Resolves every code and passes raw coordinates through as (lat, lng).
pub struct FlatResolver;

impl GeoResolver for FlatResolver {
    fn country_point(&self, _country_code: &str) -> Option<Coordinate> {
        Some((0.0, 0.0))
    }

    fn port_point(&self, _port_code: &str) -> Option<Coordinate> {
        Some((1.0, 1.0))
    }

    fn lat_long_point(&self, longitude: f64, latitude: f64) -> Coordinate {
        (latitude, longitude)
    }
}
