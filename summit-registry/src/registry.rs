// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

use summit_access::{event_grant, Grant};
use summit_core::{
    Category, Delegate, DelegateId, EventId, FlightId, GolfDay, GolfGrouping, Package,
    PackageCatalog, PackageCode, PermissionRule, RuleCatalog, RuleId, ScheduleEvent,
};
use summit_schedule::golf_assignment_for;
use tracing::debug;

use crate::error::RegistryError;

/// The five registry collections portals can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Delegates,
    Events,
    Packages,
    Rules,
    GolfGroupings,
}

/// Handle for cancelling a change subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type SnapshotHandler = Box<dyn FnMut(&Registry)>;

struct Subscription {
    id: SubscriptionId,
    collection: Collection,
    handler: SnapshotHandler,
}

/// In-memory registry store shared by the portals.
///
/// Holds the delegate registry, the itinerary, both permission catalogs and
/// the golf groupings. Every committed mutation notifies the subscribers of
/// the affected collections, mirroring the snapshot listeners of the hosted
/// document store the portals were built against.
///
/// Catalog mutations enforce the cross-collection invariants: rule
/// creation and deletion fan out into every package grant map of the same
/// category, and package renames repoint the delegates referencing the old
/// code. Dangling references in the other direction (a delegate keeping a
/// deleted package code, a rule linking a deleted event) are tolerated and
/// fail closed at evaluation time.
#[derive(Default)]
pub struct Registry {
    delegates: BTreeMap<DelegateId, Delegate>,
    events: BTreeMap<EventId, ScheduleEvent>,
    packages: PackageCatalog,
    rules: RuleCatalog,
    golf_groupings: BTreeMap<FlightId, GolfGrouping>,
    subscriptions: Vec<Subscription>,
    next_subscription_id: u64,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("delegates", &self.delegates.len())
            .field("events", &self.events.len())
            .field("packages", &self.packages.len())
            .field("golf_groupings", &self.golf_groupings.len())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // Read access.

    pub fn delegates(&self) -> impl Iterator<Item = &Delegate> {
        self.delegates.values()
    }

    pub fn delegate(&self, id: &DelegateId) -> Option<&Delegate> {
        self.delegates.get(id)
    }

    pub fn events(&self) -> impl Iterator<Item = &ScheduleEvent> {
        self.events.values()
    }

    pub fn event(&self, id: &EventId) -> Option<&ScheduleEvent> {
        self.events.get(id)
    }

    pub fn packages(&self) -> &PackageCatalog {
        &self.packages
    }

    pub fn rules(&self) -> &RuleCatalog {
        &self.rules
    }

    pub fn golf_groupings(&self) -> impl Iterator<Item = &GolfGrouping> {
        self.golf_groupings.values()
    }

    /// The trivial guest login: case-insensitive name plus the last four
    /// digits of the travel document.
    pub fn find_delegate(&self, name: &str, passport_last4: &str) -> Option<&Delegate> {
        self.delegates
            .values()
            .find(|delegate| {
                delegate.name.eq_ignore_ascii_case(name.trim())
                    && delegate.passport_last4 == passport_last4
            })
    }

    /// How many delegates have checked in to the given event, for the
    /// staff dashboard counters.
    pub fn checked_in_count(&self, event: &EventId) -> usize {
        self.delegates
            .values()
            .filter(|delegate| delegate.checked_in_at(event).is_some())
            .count()
    }

    // Subscriptions.

    /// Subscribe to changes of one collection.
    ///
    /// The handler runs synchronously after every committed mutation of
    /// that collection, with read access to the whole registry. Handlers
    /// cannot mutate the registry or manage subscriptions from within the
    /// callback; they are detached while running.
    pub fn subscribe(
        &mut self,
        collection: Collection,
        handler: impl FnMut(&Registry) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.subscriptions.push(Subscription {
            id,
            collection,
            handler: Box::new(handler),
        });
        id
    }

    /// Cancel a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() < before
    }

    fn notify(&mut self, collection: Collection) {
        let mut subscriptions = std::mem::take(&mut self.subscriptions);
        for subscription in &mut subscriptions {
            if subscription.collection == collection {
                (subscription.handler)(self);
            }
        }
        self.subscriptions = subscriptions;
    }

    // Delegate registry.

    pub fn upsert_delegate(&mut self, delegate: Delegate) {
        debug!(delegate = %delegate.id, "upserting delegate");
        self.delegates.insert(delegate.id.clone(), delegate);
        self.notify(Collection::Delegates);
    }

    /// Remove a delegate record. No cascade: flights keep listing the id
    /// and simply resolve to nobody.
    pub fn remove_delegate(&mut self, id: &DelegateId) -> Option<Delegate> {
        let removed = self.delegates.remove(id);
        if removed.is_some() {
            debug!(delegate = %id, "removed delegate");
            self.notify(Collection::Delegates);
        }
        removed
    }

    // Itinerary.

    pub fn upsert_event(&mut self, event: ScheduleEvent) {
        self.events.insert(event.id.clone(), event);
        self.notify(Collection::Events);
    }

    /// Remove an itinerary event. Rules linking it keep the dangling id,
    /// which never matches anything afterwards.
    pub fn remove_event(&mut self, id: &EventId) -> Option<ScheduleEvent> {
        let removed = self.events.remove(id);
        if removed.is_some() {
            self.notify(Collection::Events);
        }
        removed
    }

    // Package catalog.

    /// Create a package, seeding an ungranted entry for every existing rule
    /// of its category so the grant map enumerates the full rule list.
    pub fn insert_package(
        &mut self,
        code: PackageCode,
        category: Category,
    ) -> Result<(), RegistryError> {
        if self.packages.contains(&code) {
            return Err(RegistryError::PackageExists(code));
        }

        let mut package = Package::new(category);
        for rule in self.rules.rules_for(category) {
            package.set_grant(rule.id.clone(), false);
        }

        debug!(package = %code, %category, "inserted package");
        self.packages.insert(code, package);
        self.notify(Collection::Packages);
        Ok(())
    }

    /// Rename a package, repointing every delegate that references the old
    /// code.
    pub fn rename_package(
        &mut self,
        old: &PackageCode,
        new: PackageCode,
    ) -> Result<(), RegistryError> {
        if self.packages.contains(&new) {
            return Err(RegistryError::PackageExists(new));
        }
        let package = self
            .packages
            .remove(old)
            .ok_or_else(|| RegistryError::UnknownPackage(old.clone()))?;
        self.packages.insert(new.clone(), package);

        let mut delegates_changed = false;
        for delegate in self.delegates.values_mut() {
            if &delegate.package == old {
                delegate.package = new.clone();
                delegates_changed = true;
            }
        }

        debug!(from = %old, to = %new, "renamed package");
        self.notify(Collection::Packages);
        if delegates_changed {
            self.notify(Collection::Delegates);
        }
        Ok(())
    }

    /// Delete a package. Delegates keep the now-dangling code, which the
    /// evaluator treats as "no eligibility".
    pub fn delete_package(&mut self, code: &PackageCode) -> Option<Package> {
        let removed = self.packages.remove(code);
        if removed.is_some() {
            debug!(package = %code, "deleted package");
            self.notify(Collection::Packages);
        }
        removed
    }

    /// Flip one cell of the grant matrix.
    pub fn set_grant(
        &mut self,
        code: &PackageCode,
        rule: &RuleId,
        granted: bool,
    ) -> Result<(), RegistryError> {
        let category = self
            .packages
            .get(code)
            .ok_or_else(|| RegistryError::UnknownPackage(code.clone()))?
            .category;
        if self.rules.find(category, rule).is_none() {
            return Err(RegistryError::UnknownRule {
                category,
                id: rule.clone(),
            });
        }

        if let Some(package) = self.packages.get_mut(code) {
            package.set_grant(rule.clone(), granted);
        }
        self.notify(Collection::Packages);
        Ok(())
    }

    // Rule catalog.

    /// Create a rule, inserting an ungranted entry into every package of
    /// the same category so no package is missing the key.
    pub fn insert_rule(
        &mut self,
        category: Category,
        rule: PermissionRule,
    ) -> Result<(), RegistryError> {
        if self.rules.find(category, &rule.id).is_some() {
            return Err(RegistryError::RuleExists {
                category,
                id: rule.id,
            });
        }

        for (_, package) in self.packages.iter_mut() {
            if package.category == category {
                package.set_grant(rule.id.clone(), false);
            }
        }

        debug!(rule = %rule.id, %category, "inserted rule");
        self.rules.rules_for_mut(category).push(rule);
        self.notify(Collection::Rules);
        self.notify(Collection::Packages);
        Ok(())
    }

    /// Replace an existing rule in place. Grants are keyed by id and stay
    /// untouched.
    pub fn update_rule(
        &mut self,
        category: Category,
        rule: PermissionRule,
    ) -> Result<(), RegistryError> {
        let rules = self.rules.rules_for_mut(category);
        let Some(existing) = rules.iter_mut().find(|existing| existing.id == rule.id) else {
            return Err(RegistryError::UnknownRule {
                category,
                id: rule.id,
            });
        };
        *existing = rule;
        self.notify(Collection::Rules);
        Ok(())
    }

    /// Delete a rule and strip its key from every package of the category,
    /// in one committed step.
    pub fn delete_rule(&mut self, category: Category, id: &RuleId) -> Result<(), RegistryError> {
        let rules = self.rules.rules_for_mut(category);
        let before = rules.len();
        rules.retain(|rule| &rule.id != id);
        if rules.len() == before {
            return Err(RegistryError::UnknownRule {
                category,
                id: id.clone(),
            });
        }

        for (_, package) in self.packages.iter_mut() {
            if package.category == category {
                package.granted.remove(id);
            }
        }

        debug!(rule = %id, %category, "deleted rule");
        self.notify(Collection::Rules);
        self.notify(Collection::Packages);
        Ok(())
    }

    // Golf groupings.

    pub fn upsert_golf_grouping(&mut self, grouping: GolfGrouping) {
        self.golf_groupings.insert(grouping.id.clone(), grouping);
        self.notify(Collection::GolfGroupings);
        self.sync_golf_assignments();
    }

    pub fn remove_golf_grouping(&mut self, id: &FlightId) -> Option<GolfGrouping> {
        let removed = self.golf_groupings.remove(id);
        if removed.is_some() {
            self.notify(Collection::GolfGroupings);
            self.sync_golf_assignments();
        }
        removed
    }

    /// Recompute every delegate's per-day flight summary from the
    /// groupings. Runs after every grouping edit; delegates removed from
    /// all flights lose their summary.
    pub fn sync_golf_assignments(&mut self) {
        let groupings: Vec<GolfGrouping> = self.golf_groupings.values().cloned().collect();

        let mut changed = false;
        for delegate in self.delegates.values_mut() {
            let day1 = golf_assignment_for(&delegate.id, GolfDay::Day1, &groupings);
            let day2 = golf_assignment_for(&delegate.id, GolfDay::Day2, &groupings);
            if delegate.golf_day1 != day1 || delegate.golf_day2 != day2 {
                delegate.golf_day1 = day1;
                delegate.golf_day2 = day2;
                changed = true;
            }
        }

        if changed {
            debug!("synced delegate golf assignments");
            self.notify(Collection::Delegates);
        }
    }

    // Check-in.

    /// Record a delegate's arrival at an event.
    ///
    /// Fails when either record is missing or the delegate already holds a
    /// timestamp for the event; the first arrival time is never
    /// overwritten.
    pub fn check_in(
        &mut self,
        delegate_id: &DelegateId,
        event_id: &EventId,
        timestamp: impl Into<String>,
    ) -> Result<(), RegistryError> {
        if !self.events.contains_key(event_id) {
            return Err(RegistryError::UnknownEvent(event_id.clone()));
        }
        let delegate = self
            .delegates
            .get_mut(delegate_id)
            .ok_or_else(|| RegistryError::UnknownDelegate(delegate_id.clone()))?;

        delegate.check_in(event_id, timestamp)?;
        debug!(delegate = %delegate_id, event = %event_id, "checked in");
        self.notify(Collection::Delegates);
        Ok(())
    }

    /// The staff check-in gate: validate package eligibility, then record
    /// the arrival. Returns the grant that admitted the delegate.
    pub fn verify_and_check_in(
        &mut self,
        delegate_id: &DelegateId,
        event_id: &EventId,
        timestamp: impl Into<String>,
    ) -> Result<Grant, RegistryError> {
        let event = self
            .events
            .get(event_id)
            .ok_or_else(|| RegistryError::UnknownEvent(event_id.clone()))?;
        let delegate = self
            .delegates
            .get(delegate_id)
            .ok_or_else(|| RegistryError::UnknownDelegate(delegate_id.clone()))?;

        let Some(grant) = event_grant(delegate, event, &self.packages, &self.rules) else {
            debug!(
                delegate = %delegate_id,
                event = %event_id,
                package = %delegate.package,
                "access denied"
            );
            return Err(RegistryError::AccessDenied {
                package: delegate.package.clone(),
                event: event.title.clone(),
            });
        };

        self.check_in(delegate_id, event_id, timestamp)?;
        Ok(grant)
    }
}
