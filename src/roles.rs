//! Location roles and role sets.
//!
//! A shipment names one location per role. Points and aggregated locations
//! carry a [`RoleSet`] recording every role they have played.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, Serializer};
use tracing::warn;

use crate::error::UnknownRole;

/// A role a location plays in a shipment.
///
/// Declaration order is the pipeline order and is relied on for stable
/// rendering of role sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Origin,
    Exporter,
    Transit,
    Importer,
}

impl Role {
    /// All roles in pipeline order.
    pub const ALL: [Role; 4] = [Role::Origin, Role::Exporter, Role::Transit, Role::Importer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Origin => "origin",
            Role::Exporter => "exporter",
            Role::Transit => "transit",
            Role::Importer => "importer",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole { name: s.to_string() })
    }
}

/// Set of roles over the closed [`Role`] universe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet {
    bits: u8,
}

impl RoleSet {
    /// An empty role set.
    pub fn new() -> Self {
        Self::default()
    }

    /// A role set built from a role name.
    ///
    /// Unknown names are logged and leave the set empty.
    pub fn from_name(name: &str) -> Self {
        let mut roles = Self::new();
        roles.add_role_name(name);
        roles
    }

    pub fn add_role(&mut self, role: Role) {
        self.bits |= role.bit();
    }

    /// Adds a role by name, ignoring (and logging) names outside the universe.
    pub fn add_role_name(&mut self, name: &str) {
        match name.parse::<Role>() {
            Ok(role) => self.add_role(role),
            Err(err) => warn!(role = name, "{}", err),
        }
    }

    pub fn add_roles<I>(&mut self, roles: I)
    where
        I: IntoIterator<Item = Role>,
    {
        for role in roles {
            self.add_role(role);
        }
    }

    /// Union with another set.
    pub fn union(&mut self, other: &RoleSet) {
        self.bits |= other.bits;
    }

    pub fn contains(&self, role: Role) -> bool {
        self.bits & role.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Present roles in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }

    pub fn to_ordered_list(&self) -> Vec<Role> {
        self.iter().collect()
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        let mut roles = Self::new();
        roles.add_role(role);
        roles
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut roles = Self::new();
        roles.add_roles(iter);
        roles
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.iter().map(Role::as_str).collect::<Vec<_>>();
        f.write_str(&names.join(","))
    }
}

impl Serialize for RoleSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter().map(Role::as_str))
    }
}
