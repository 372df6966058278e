//! Geographic points as referenced by a single input row.
//!
//! A point is one of four location kinds, from a bare country code up to a
//! named coordinate. Points are built through a [`PointFactory`], which
//! resolves the map coordinate once at construction; the coordinate never
//! changes afterwards and stays `None` when the resolver has no answer.

use std::fmt;

use serde::Serialize;

use crate::roles::RoleSet;
use crate::traits::{Coordinate, GeoResolver};

/// Groups the points of one row that describe the same route slot.
///
/// Assigned from column position at ingestion, so ascending order is also
/// the origin-to-importer pipeline order.
pub type LocationGroupId = u32;

/// The location reference carried by a point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointKind {
    Country {
        code: String,
    },
    Port {
        code: String,
        /// Country containing the port, when the resolver knows it.
        country: Option<String>,
    },
    LatLong {
        latitude: f64,
        longitude: f64,
    },
    NamedLatLong {
        name: String,
        latitude: f64,
        longitude: f64,
    },
}

impl PointKind {
    /// Specificity rank used when collapsing a location group.
    ///
    /// Higher wins: named coordinate > coordinate > port > country.
    pub fn precedence(&self) -> u8 {
        match self {
            PointKind::NamedLatLong { .. } => 3,
            PointKind::LatLong { .. } => 2,
            PointKind::Port { .. } => 1,
            PointKind::Country { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    #[serde(flatten)]
    kind: PointKind,
    roles: RoleSet,
    location_group_id: LocationGroupId,
    coordinate: Option<Coordinate>,
}

impl Point {
    pub fn kind(&self) -> &PointKind {
        &self.kind
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    pub(crate) fn roles_mut(&mut self) -> &mut RoleSet {
        &mut self.roles
    }

    pub fn location_group_id(&self) -> LocationGroupId {
        self.location_group_id
    }

    /// Resolved map coordinate, `None` if the resolver had no answer.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn precedence(&self) -> u8 {
        self.kind.precedence()
    }

    /// Raw (longitude, latitude) for coordinate points.
    pub fn lon_lat(&self) -> Option<(f64, f64)> {
        match &self.kind {
            PointKind::LatLong { latitude, longitude }
            | PointKind::NamedLatLong { latitude, longitude, .. } => Some((*longitude, *latitude)),
            PointKind::Country { .. } | PointKind::Port { .. } => None,
        }
    }

    /// Canonical identity used for equality and route signatures.
    ///
    /// Roles do not take part in identity.
    pub fn identity(&self) -> String {
        self.to_string()
    }

    /// Country code used for choropleth colouring.
    ///
    /// Ports fall back to their own code when the containing country is
    /// unknown. Coordinate points have no country identifier.
    pub fn country_identifier(&self) -> Option<&str> {
        match &self.kind {
            PointKind::Country { code } => Some(code),
            PointKind::Port { code, country } => Some(country.as_deref().unwrap_or(code)),
            PointKind::LatLong { .. } | PointKind::NamedLatLong { .. } => None,
        }
    }

    /// True when both points name the same location.
    pub fn same_location(&self, other: &Point) -> bool {
        self.identity() == other.identity()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PointKind::Country { code } | PointKind::Port { code, .. } => f.write_str(code),
            PointKind::LatLong { latitude, longitude } => write!(f, "{}-{}", longitude, latitude),
            PointKind::NamedLatLong { name, .. } => f.write_str(name),
        }
    }
}

/// Builds points against a coordinate resolver.
///
/// Holding the resolver here means a point can never be built before
/// lookups are available.
#[derive(Debug, Clone, Copy)]
pub struct PointFactory<'r, R: ?Sized> {
    resolver: &'r R,
}

impl<'r, R> PointFactory<'r, R>
where
    R: GeoResolver + ?Sized,
{
    pub fn new(resolver: &'r R) -> Self {
        Self { resolver }
    }

    pub fn country(
        &self,
        code: impl Into<String>,
        roles: impl Into<RoleSet>,
        location_group_id: LocationGroupId,
    ) -> Point {
        let code = code.into();
        let coordinate = self.resolver.country_point(&code);
        Point {
            kind: PointKind::Country { code },
            roles: roles.into(),
            location_group_id,
            coordinate,
        }
    }

    pub fn port(
        &self,
        code: impl Into<String>,
        roles: impl Into<RoleSet>,
        location_group_id: LocationGroupId,
    ) -> Point {
        let code = code.into();
        let coordinate = self.resolver.port_point(&code);
        let country = self.resolver.port_country(&code);
        Point {
            kind: PointKind::Port { code, country },
            roles: roles.into(),
            location_group_id,
            coordinate,
        }
    }

    pub fn lat_long(
        &self,
        latitude: f64,
        longitude: f64,
        roles: impl Into<RoleSet>,
        location_group_id: LocationGroupId,
    ) -> Point {
        Point {
            kind: PointKind::LatLong { latitude, longitude },
            roles: roles.into(),
            location_group_id,
            coordinate: Some(self.resolver.lat_long_point(longitude, latitude)),
        }
    }

    pub fn named_lat_long(
        &self,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        roles: impl Into<RoleSet>,
        location_group_id: LocationGroupId,
    ) -> Point {
        Point {
            kind: PointKind::NamedLatLong {
                name: name.into(),
                latitude,
                longitude,
            },
            roles: roles.into(),
            location_group_id,
            coordinate: Some(self.resolver.lat_long_point(longitude, latitude)),
        }
    }
}
