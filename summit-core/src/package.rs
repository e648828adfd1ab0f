// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::ids::{PackageCode, RuleId};

/// A purchasable admission tier.
///
/// The grant map enumerates every rule of the package's category with an
/// explicit granted/ungranted flag. Keys left behind by deleted rules are
/// tolerated and simply never match during evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub category: Category,
    #[serde(rename = "permissions", default)]
    pub granted: HashMap<RuleId, bool>,
}

impl Package {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            granted: HashMap::new(),
        }
    }

    /// Whether this package grants the given rule. Missing and dangling
    /// keys both count as "not granted".
    pub fn grants(&self, rule: &RuleId) -> bool {
        self.granted.get(rule).copied().unwrap_or(false)
    }

    pub fn set_grant(&mut self, rule: RuleId, granted: bool) {
        self.granted.insert(rule, granted);
    }

    /// Ids of all rules this package grants.
    pub fn granted_rules(&self) -> impl Iterator<Item = &RuleId> {
        self.granted
            .iter()
            .filter_map(|(id, granted)| granted.then_some(id))
    }
}

/// All packages on offer, keyed by package code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageCatalog(HashMap<PackageCode, Package>);

impl PackageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &PackageCode) -> Option<&Package> {
        self.0.get(code)
    }

    pub fn get_mut(&mut self, code: &PackageCode) -> Option<&mut Package> {
        self.0.get_mut(code)
    }

    pub fn insert(&mut self, code: PackageCode, package: Package) -> Option<Package> {
        self.0.insert(code, package)
    }

    pub fn remove(&mut self, code: &PackageCode) -> Option<Package> {
        self.0.remove(code)
    }

    pub fn contains(&self, code: &PackageCode) -> bool {
        self.0.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageCode, &Package)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&PackageCode, &mut Package)> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
