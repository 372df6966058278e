//! Aggregation queries feeding the rendering layer.
//!
//! Both queries tolerate missing coordinates: affected entries are logged
//! and left out, the rest of the collection is still aggregated.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::collection::RouteCollection;
use crate::point::Point;
use crate::roles::RoleSet;
use crate::traits::Coordinate;

/// Roles played by everything that maps to one country identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointRoles {
    /// Coordinate of the first point seen for this identifier.
    pub coordinate: Option<Coordinate>,
    pub roles: RoleSet,
}

/// One end of a flow line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEnd<'a> {
    pub lat: f64,
    pub lng: f64,
    pub quantity: f64,
    pub point: &'a Point,
}

/// A source point and the destinations reached directly from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterTerminal<'a> {
    pub center: FlowEnd<'a>,
    pub terminals: Vec<FlowEnd<'a>>,
}

/// Hub-and-spoke summary of a route collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterTerminalSummary<'a> {
    pub center_terminal_list: Vec<CenterTerminal<'a>>,
    pub max_source_quantity: f64,
}

#[derive(Debug)]
struct Tally<'a> {
    point: &'a Point,
    quantity: f64,
}

#[derive(Debug)]
struct CenterTally<'a> {
    source: Tally<'a>,
    terminals: Vec<Tally<'a>>,
    terminal_index: HashMap<String, usize>,
}

impl<'a> CenterTally<'a> {
    fn add_terminal(&mut self, dest: &'a Point, quantity: f64) {
        let key = dest.identity();
        match self.terminal_index.get(&key) {
            Some(&i) => self.terminals[i].quantity += quantity,
            None => {
                self.terminal_index.insert(key, self.terminals.len());
                self.terminals.push(Tally { point: dest, quantity });
            }
        }
    }
}

impl RouteCollection {
    /// Unions the roles of every point per country identifier.
    ///
    /// Coordinate-only points have no country identifier and are left out.
    pub fn point_roles(&self) -> BTreeMap<String, PointRoles> {
        let mut point_roles: BTreeMap<String, PointRoles> = BTreeMap::new();
        for point in self.routes.iter().flat_map(|route| route.points()) {
            let Some(identifier) = point.country_identifier() else {
                continue;
            };
            point_roles
                .entry(identifier.to_string())
                .or_insert_with(|| PointRoles {
                    coordinate: point.coordinate(),
                    roles: RoleSet::new(),
                })
                .roles
                .union(point.roles());
        }
        point_roles
    }

    /// Sums route quantities over every adjacent (source, dest) pair.
    ///
    /// A center is emitted for each source with a coordinate and at least
    /// one terminal with a coordinate; centers come out in first-seen order.
    pub fn center_terminal_list(&self) -> CenterTerminalSummary<'_> {
        let mut centers: Vec<CenterTally<'_>> = Vec::new();
        let mut center_index: HashMap<String, usize> = HashMap::new();

        for route in &self.routes {
            for pair in route.points().windows(2) {
                let (source, dest) = (&pair[0], &pair[1]);
                let key = source.identity();
                let i = match center_index.get(&key) {
                    Some(&i) => i,
                    None => {
                        center_index.insert(key, centers.len());
                        centers.push(CenterTally {
                            source: Tally { point: source, quantity: 0.0 },
                            terminals: Vec::new(),
                            terminal_index: HashMap::new(),
                        });
                        centers.len() - 1
                    }
                };
                centers[i].source.quantity += route.quantity();
                centers[i].add_terminal(dest, route.quantity());
            }
        }

        let mut center_terminal_list = Vec::with_capacity(centers.len());
        let mut max_source_quantity: f64 = 0.0;

        for center in centers {
            let Some(center_end) = flow_end(&center.source) else {
                warn!(point = %center.source.point, "missing point for center");
                continue;
            };

            let terminals = center
                .terminals
                .iter()
                .filter_map(|terminal| {
                    let end = flow_end(terminal);
                    if end.is_none() {
                        warn!(point = %terminal.point, "missing point for terminal");
                    }
                    end
                })
                .collect::<Vec<_>>();

            if terminals.is_empty() {
                debug!(point = %center.source.point, "center has no locatable terminals");
                continue;
            }

            max_source_quantity = max_source_quantity.max(center_end.quantity);
            center_terminal_list.push(CenterTerminal {
                center: center_end,
                terminals,
            });
        }

        CenterTerminalSummary {
            center_terminal_list,
            max_source_quantity,
        }
    }
}

fn flow_end<'a>(tally: &Tally<'a>) -> Option<FlowEnd<'a>> {
    let (lat, lng) = tally.point.coordinate()?;
    Some(FlowEnd {
        lat,
        lng,
        quantity: tally.quantity,
        point: tally.point,
    })
}
