//! Country centroids and port positions for realistic test fixtures.
//!
//! Coordinates are approximate (lat, lng) in degrees; the fixture resolver
//! passes raw coordinates through unprojected.

#![allow(dead_code)]

use trade_routes::traits::{Coordinate, GeoResolver};

/// A coded location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub code: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(code: &'static str, lat: f64, lng: f64) -> Self {
        Self { code, lat, lng }
    }

    pub fn coords(&self) -> Coordinate {
        (self.lat, self.lng)
    }
}

/// A port and the country it lies in.
#[derive(Debug, Clone)]
pub struct Port {
    pub location: Location,
    pub country: &'static str,
}

impl Port {
    pub const fn new(code: &'static str, country: &'static str, lat: f64, lng: f64) -> Self {
        Self {
            location: Location::new(code, lat, lng),
            country,
        }
    }
}

// ============================================================================
// Countries
// ============================================================================

pub const COUNTRIES: &[Location] = &[
    Location::new("FR", 46.2276, 2.2137),
    Location::new("US", 37.0902, -95.7129),
    Location::new("DE", 51.1657, 10.4515),
    Location::new("CN", 35.8617, 104.1954),
    Location::new("KE", -0.0236, 37.9062),
    Location::new("VN", 14.0583, 108.2772),
    Location::new("TZ", -6.3690, 34.8888),
];

// ============================================================================
// Ports
// ============================================================================

pub const PORTS: &[Port] = &[
    Port::new("USNYC", "US", 40.6840, -74.0440),
    Port::new("FRLEH", "FR", 49.4833, 0.1000),
    Port::new("DEHAM", "DE", 53.5461, 9.9661),
    Port::new("KEMBA", "KE", -4.0435, 39.6682),
    Port::new("CNSHA", "CN", 31.2304, 121.4737),
];

/// Resolver over the fixture tables.
#[derive(Debug, Clone, Default)]
pub struct FixtureResolver;

impl GeoResolver for FixtureResolver {
    fn country_point(&self, country_code: &str) -> Option<Coordinate> {
        COUNTRIES
            .iter()
            .find(|location| location.code == country_code)
            .map(Location::coords)
    }

    fn port_point(&self, port_code: &str) -> Option<Coordinate> {
        PORTS
            .iter()
            .find(|port| port.location.code == port_code)
            .map(|port| port.location.coords())
    }

    fn lat_long_point(&self, longitude: f64, latitude: f64) -> Coordinate {
        (latitude, longitude)
    }

    fn port_country(&self, port_code: &str) -> Option<String> {
        PORTS
            .iter()
            .find(|port| port.location.code == port_code)
            .map(|port| port.country.to_string())
    }
}

/// Resolver that knows coordinates but no port countries.
#[derive(Debug, Clone, Default)]
pub struct NoPortCountryResolver;

impl GeoResolver for NoPortCountryResolver {
    fn country_point(&self, country_code: &str) -> Option<Coordinate> {
        FixtureResolver.country_point(country_code)
    }

    fn port_point(&self, port_code: &str) -> Option<Coordinate> {
        FixtureResolver.port_point(port_code)
    }

    fn lat_long_point(&self, longitude: f64, latitude: f64) -> Coordinate {
        (latitude, longitude)
    }
}
