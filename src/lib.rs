//! trade-routes core
//!
//! Route data model and aggregation for trade flow maps: points in several
//! specificity levels, route collapsing and deduplication, and the
//! per-country role and hub/terminal aggregates a renderer consumes.

pub mod traits;
pub mod error;
pub mod roles;
pub mod point;
pub mod route;
pub mod collection;
pub mod aggregate;
pub mod ingest;

#[cfg(test)]
mod test_helpers;
