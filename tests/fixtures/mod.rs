//! Test fixtures for trade-routes.
//!
//! Provides realistic test data including:
//! - Country and port centroids for a handful of trading nations
//! - A resolver backed by those tables

pub mod trade_locations;

pub use trade_locations::*;
