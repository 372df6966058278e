//! Deduplicated route collections.
//!
//! Ingestion goes through [`RouteCollectionBuilder`]; [`RouteCollectionBuilder::finish`]
//! freezes it into a read-only [`RouteCollection`] that answers the
//! aggregation queries used for rendering.

use std::collections::HashMap;

use tracing::debug;

use crate::route::Route;

/// Routes shorter than this are ignored when normalising line widths.
pub const DEFAULT_MIN_ROUTE_LENGTH: usize = 2;

/// Collects routes, merging those that name the same locations in order.
#[derive(Debug, Clone, Default)]
pub struct RouteCollectionBuilder {
    routes: Vec<Route>,
    index: HashMap<Vec<String>, usize>,
}

impl RouteCollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a route, or merges it into the stored route naming the same
    /// locations (quantities summed, roles unioned position by position).
    ///
    /// Routes are keyed on their identity sequence, not the joined
    /// signature, since identities may contain the separator.
    pub fn add_route(&mut self, route: Route) {
        let key = route.identities();
        match self.index.get(&key) {
            Some(&i) => {
                debug!(signature = %route, quantity = route.quantity(), "merging duplicate route");
                self.routes[i].absorb(&route);
            }
            None => {
                self.index.insert(key, self.routes.len());
                self.routes.push(route);
            }
        }
    }

    /// Number of distinct routes seen so far.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Ends ingestion.
    pub fn finish(self) -> RouteCollection {
        RouteCollection {
            routes: self.routes,
            index: self.index,
        }
    }
}

impl Extend<Route> for RouteCollectionBuilder {
    fn extend<I: IntoIterator<Item = Route>>(&mut self, iter: I) {
        for route in iter {
            self.add_route(route);
        }
    }
}

/// A frozen set of distinct routes.
///
/// Routes are kept in first-insertion order, so query output is stable
/// across runs for the same input.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    pub(crate) routes: Vec<Route>,
    index: HashMap<Vec<String>, usize>,
}

impl RouteCollection {
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Looks up a route by the identities of its points, in order.
    pub fn get<S>(&self, identities: &[S]) -> Option<&Route>
    where
        S: AsRef<str>,
    {
        let key = identities
            .iter()
            .map(|identity| identity.as_ref().to_string())
            .collect::<Vec<_>>();
        self.index.get(&key).map(|&i| &self.routes[i])
    }

    /// Largest quantity among routes with at least `min_route_length`
    /// points, or 0 when none qualify.
    pub fn max_quantity(&self, min_route_length: usize) -> f64 {
        self.routes
            .iter()
            .filter(|route| route.len() >= min_route_length)
            .map(Route::quantity)
            .fold(0.0, f64::max)
    }
}

impl FromIterator<Route> for RouteCollection {
    fn from_iter<I: IntoIterator<Item = Route>>(iter: I) -> Self {
        let mut builder = RouteCollectionBuilder::new();
        builder.extend(iter);
        builder.finish()
    }
}
