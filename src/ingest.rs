//! Turns parsed input rows into a frozen route collection.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::collection::{DEFAULT_MIN_ROUTE_LENGTH, RouteCollection, RouteCollectionBuilder};
use crate::error::SkipReason;
use crate::point::{LocationGroupId, Point, PointFactory};
use crate::roles::RoleSet;
use crate::route::{DEFAULT_QUANTITY, Route};
use crate::traits::GeoResolver;

#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Quantity for rows that do not state one.
    pub default_quantity: f64,
    /// Minimum route length counted by [`IngestResult::max_quantity`].
    pub min_route_length: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            default_quantity: DEFAULT_QUANTITY,
            min_route_length: DEFAULT_MIN_ROUTE_LENGTH,
        }
    }
}

/// A role-tagged location reference as produced by the row parser.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LocationDescriptor {
    #[serde(rename_all = "camelCase")]
    Country {
        code: String,
        role: String,
        location_group_id: LocationGroupId,
    },
    #[serde(rename_all = "camelCase")]
    Port {
        code: String,
        role: String,
        location_group_id: LocationGroupId,
    },
    #[serde(rename_all = "camelCase")]
    LatLong {
        latitude: f64,
        longitude: f64,
        role: String,
        location_group_id: LocationGroupId,
    },
    #[serde(rename_all = "camelCase")]
    NamedLatLong {
        name: String,
        latitude: f64,
        longitude: f64,
        role: String,
        location_group_id: LocationGroupId,
    },
}

impl LocationDescriptor {
    /// Resolves the descriptor into a point. Unknown roles are logged and
    /// leave the point without roles.
    pub fn to_point<R>(&self, factory: &PointFactory<'_, R>) -> Point
    where
        R: GeoResolver + ?Sized,
    {
        match self {
            LocationDescriptor::Country { code, role, location_group_id } => {
                factory.country(code.as_str(), RoleSet::from_name(role), *location_group_id)
            }
            LocationDescriptor::Port { code, role, location_group_id } => {
                factory.port(code.as_str(), RoleSet::from_name(role), *location_group_id)
            }
            LocationDescriptor::LatLong { latitude, longitude, role, location_group_id } => {
                factory.lat_long(*latitude, *longitude, RoleSet::from_name(role), *location_group_id)
            }
            LocationDescriptor::NamedLatLong { name, latitude, longitude, role, location_group_id } => {
                factory.named_lat_long(
                    name.as_str(),
                    *latitude,
                    *longitude,
                    RoleSet::from_name(role),
                    *location_group_id,
                )
            }
        }
    }
}

/// One shipment: its locations in column order and its quantity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputRow {
    pub locations: Vec<LocationDescriptor>,
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl InputRow {
    fn validate(&self) -> Result<(), SkipReason> {
        if self.locations.is_empty() {
            return Err(SkipReason::NoLocations);
        }
        match self.quantity {
            Some(quantity) if !quantity.is_finite() || quantity < 0.0 => {
                Err(SkipReason::InvalidQuantity { quantity })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkippedRow {
    /// Position of the row in the input.
    pub row_index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone)]
pub struct IngestResult {
    pub collection: RouteCollection,
    pub skipped: Vec<SkippedRow>,
    min_route_length: usize,
}

impl IngestResult {
    /// Normalisation quantity using the configured minimum route length.
    pub fn max_quantity(&self) -> f64 {
        self.collection.max_quantity(self.min_route_length)
    }
}

/// Builds a route per row and merges them into a collection.
///
/// Invalid rows are skipped and reported; they never stop the batch.
pub fn ingest_rows<R>(rows: &[InputRow], resolver: &R, options: IngestOptions) -> IngestResult
where
    R: GeoResolver + ?Sized,
{
    let factory = PointFactory::new(resolver);
    let mut builder = RouteCollectionBuilder::new();
    let mut skipped = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        if let Err(reason) = row.validate() {
            warn!(row_index, %reason, "skipping row");
            skipped.push(SkippedRow { row_index, reason });
            continue;
        }

        let points = row
            .locations
            .iter()
            .map(|location| location.to_point(&factory))
            .collect();
        let quantity = row.quantity.unwrap_or(options.default_quantity);
        builder.add_route(Route::new(points, Some(quantity)));
    }

    debug!(
        rows = rows.len(),
        routes = builder.route_count(),
        skipped = skipped.len(),
        "ingested rows"
    );

    IngestResult {
        collection: builder.finish(),
        skipped,
        min_route_length: options.min_route_length,
    }
}
