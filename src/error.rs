//! Error types for the route model.

use thiserror::Error;

/// Raised when a role name is outside the fixed role universe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role for point: {name}")]
pub struct UnknownRole {
    pub name: String,
}

/// Why an input row was left out of the route collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    /// The row carried no locations at all.
    #[error("row has no locations")]
    NoLocations,

    /// Quantity was negative, NaN, or infinite.
    #[error("invalid quantity {quantity}")]
    InvalidQuantity { quantity: f64 },
}
