//! Routes: the collapsed point sequence of one shipment plus its quantity.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::Serialize;

use crate::point::{LocationGroupId, Point};

/// Quantity used when a row does not state one.
pub const DEFAULT_QUANTITY: f64 = 1.0;

/// Separator between point identities in a route signature.
const SIGNATURE_SEPARATOR: &str = ",";

/// A directed route through one point per location group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    points: Vec<Point>,
    quantity: f64,
}

impl Route {
    /// Builds a route from the points of one row, in column order.
    ///
    /// Adjacent points naming the same location are merged (roles unioned),
    /// then each location group is collapsed to its most specific point.
    pub fn new(points: Vec<Point>, quantity: Option<f64>) -> Self {
        let mut route = Self {
            points: merge_adjacent(points),
            quantity: quantity.unwrap_or(DEFAULT_QUANTITY),
        };
        route.collapse();
        route
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Keeps only the highest-precedence point of each location group and
    /// orders the survivors by group id. A no-op on a collapsed route.
    pub fn collapse(&mut self) {
        let points = std::mem::take(&mut self.points);
        self.points = collapse_points(points);
    }

    /// Point identities in order, roles excluded. Two routes are the same
    /// route exactly when these are equal.
    pub fn identities(&self) -> Vec<String> {
        self.points.iter().map(Point::identity).collect()
    }

    /// Readable form of [`Route::identities`] joined with `,`.
    ///
    /// Not injective: identities may themselves contain commas.
    pub fn signature(&self) -> String {
        self.join(SIGNATURE_SEPARATOR)
    }

    /// Point identities joined with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.identities().join(separator)
    }

    /// Lowercase identifier safe for use as a DOM id.
    pub fn html_id(&self) -> String {
        self.join("")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    /// Folds a route naming the same locations into this one.
    ///
    /// # Panics
    ///
    /// Panics if the two routes do not name the same locations in the same
    /// order; equal identity sequences guarantee they do.
    pub(crate) fn absorb(&mut self, other: &Route) {
        assert_eq!(
            self.points.len(),
            other.points.len(),
            "merging routes of different length: {} and {}",
            self,
            other
        );
        for (mine, theirs) in self.points.iter_mut().zip(&other.points) {
            assert!(
                mine.same_location(theirs),
                "merging mismatched points {} and {}",
                mine,
                theirs
            );
            mine.roles_mut().union(theirs.roles());
        }
        self.quantity += other.quantity;
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

/// Merges runs of adjacent points with equal identity into their first point.
fn merge_adjacent(points: Vec<Point>) -> Vec<Point> {
    let mut merged: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        match merged.last_mut() {
            Some(last) if last.same_location(&point) => last.roles_mut().union(point.roles()),
            _ => merged.push(point),
        }
    }
    merged
}

/// One point per location group, most specific wins, ascending by group id.
///
/// On equal precedence the earlier point is kept.
fn collapse_points(points: Vec<Point>) -> Vec<Point> {
    let mut groups: BTreeMap<LocationGroupId, Point> = BTreeMap::new();
    for point in points {
        match groups.entry(point.location_group_id()) {
            Entry::Vacant(slot) => {
                slot.insert(point);
            }
            Entry::Occupied(mut slot) => {
                if point.precedence() > slot.get().precedence() {
                    slot.insert(point);
                }
            }
        }
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointFactory;
    use crate::roles::{Role, RoleSet};
    use crate::test_helpers::FlatResolver;

    #[test]
    fn test_empty_route() {
        let route = Route::new(Vec::new(), None);
        assert!(route.is_empty());
        assert_eq!(route.signature(), "");
        assert_eq!(route.quantity(), DEFAULT_QUANTITY);
    }

    #[test]
    fn test_explicit_zero_quantity_kept() {
        let route = Route::new(Vec::new(), Some(0.0));
        assert_eq!(route.quantity(), 0.0);
    }

    #[test]
    fn test_adjacent_equal_points_merge_roles() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.country("FR", Role::Origin, 0),
                factory.country("FR", Role::Exporter, 0),
                factory.country("US", Role::Importer, 3),
            ],
            Some(5.0),
        );

        assert_eq!(route.len(), 2);
        assert_eq!(route.signature(), "FR,US");
        assert_eq!(
            *route.points()[0].roles(),
            [Role::Origin, Role::Exporter].into_iter().collect::<RoleSet>()
        );
    }

    #[test]
    fn test_non_adjacent_equal_points_stay_separate() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.country("FR", Role::Origin, 0),
                factory.country("DE", Role::Transit, 2),
                factory.country("FR", Role::Importer, 3),
            ],
            None,
        );
        assert_eq!(route.signature(), "FR,DE,FR");
    }

    #[test]
    fn test_collapse_prefers_named_lat_long() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.country("FR", Role::Origin, 0),
                factory.country("US", Role::Importer, 3),
                factory.named_lat_long("New York", 40.7, -74.0, Role::Importer, 3),
            ],
            None,
        );

        assert_eq!(route.signature(), "FR,New York");
        assert_eq!(route.points()[1].coordinate(), Some((40.7, -74.0)));
    }

    #[test]
    fn test_collapse_full_precedence_chain() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.country("US", Role::Origin, 0),
                factory.port("USNYC", Role::Origin, 0),
                factory.lat_long(40.7, -74.0, Role::Origin, 0),
            ],
            None,
        );
        assert_eq!(route.signature(), "-74-40.7");

        let route = Route::new(
            vec![
                factory.port("USNYC", Role::Origin, 0),
                factory.country("US", Role::Origin, 0),
            ],
            None,
        );
        assert_eq!(route.signature(), "USNYC");
    }

    #[test]
    fn test_collapse_tie_keeps_first() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.port("USNYC", Role::Exporter, 1),
                factory.port("USLAX", Role::Exporter, 1),
            ],
            None,
        );
        assert_eq!(route.signature(), "USNYC");
    }

    #[test]
    fn test_collapse_orders_by_group_id() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.country("US", Role::Importer, 10),
                factory.country("FR", Role::Origin, 0),
                factory.country("DE", Role::Transit, 2),
            ],
            None,
        );
        assert_eq!(route.signature(), "FR,DE,US");
    }

    #[test]
    fn test_collapse_idempotent() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.country("FR", Role::Origin, 0),
                factory.port("FRLEH", Role::Exporter, 1),
                factory.country("FR", Role::Exporter, 1),
                factory.country("US", Role::Importer, 3),
            ],
            Some(2.0),
        );

        let mut again = route.clone();
        again.collapse();
        assert_eq!(again, route);
    }

    #[test]
    fn test_identities_keep_commas_apart() {
        let factory = PointFactory::new(&FlatResolver);
        let named = Route::new(
            vec![
                factory.named_lat_long("Washington, DC", 38.9, -77.0, Role::Origin, 0),
                factory.country("US", Role::Importer, 3),
            ],
            None,
        );
        let codes = Route::new(
            vec![
                factory.country("Washington", Role::Origin, 0),
                factory.country(" DC", Role::Exporter, 1),
                factory.country("US", Role::Importer, 3),
            ],
            None,
        );

        assert_eq!(named.signature(), codes.signature());
        assert_ne!(named.identities(), codes.identities());
        assert_eq!(named.identities(), vec!["Washington, DC", "US"]);
    }

    #[test]
    fn test_html_id() {
        let factory = PointFactory::new(&FlatResolver);
        let route = Route::new(
            vec![
                factory.named_lat_long("St. John's", 47.5, -52.7, Role::Origin, 0),
                factory.port("USNYC", Role::Importer, 3),
            ],
            None,
        );
        assert_eq!(route.html_id(), "stjohnsusnyc");
        assert_eq!(route.join(" > "), "St. John's > USNYC");
    }

    #[test]
    fn test_absorb_sums_quantity_and_roles() {
        let factory = PointFactory::new(&FlatResolver);
        let mut a = Route::new(
            vec![factory.country("FR", Role::Origin, 0), factory.country("US", Role::Importer, 3)],
            Some(2.0),
        );
        let b = Route::new(
            vec![factory.country("FR", Role::Exporter, 1), factory.country("US", Role::Transit, 2)],
            Some(3.0),
        );

        a.absorb(&b);
        assert_eq!(a.quantity(), 5.0);
        assert_eq!(a.points()[0].roles().to_string(), "origin,exporter");
        assert_eq!(a.points()[1].roles().to_string(), "transit,importer");
    }

    #[test]
    #[should_panic(expected = "different length")]
    fn test_absorb_rejects_shape_mismatch() {
        let factory = PointFactory::new(&FlatResolver);
        let mut a = Route::new(vec![factory.country("FR", Role::Origin, 0)], None);
        let b = Route::new(
            vec![factory.country("FR", Role::Origin, 0), factory.country("US", Role::Importer, 3)],
            None,
        );
        a.absorb(&b);
    }
}
