// SPDX-License-Identifier: MIT OR Apache-2.0

//! Eligibility evaluation for the summit delegate registry.
//!
//! Decides whether a delegate's purchased package admits them to an
//! itinerary event, and whether they qualify as a golfer for a tournament
//! day. The same functions back the guest itinerary filter, the staff
//! check-in gate and the admin rule editor, so their semantics must not
//! drift between call sites.
//!
//! All evaluation is pure: functions take immutable catalog snapshots and
//! return a decision without touching shared state. They are re-run on
//! every call so an administrator's rule edits take effect immediately.
//! Degraded inputs (dangling package references, unconfigured categories,
//! missing permission ids) always resolve to "no grant", never to an error.

use summit_core::{
    Delegate, GolfDay, PackageCatalog, RuleCatalog, RuleId, ScheduleEvent,
};
use tracing::trace;

/// Why access was granted, carrying the rule that matched.
///
/// Portals surface this to explain a decision ("admitted via All Access Day
/// Pass"); the boolean helpers discard it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Grant {
    /// The package grants the event's own permission id.
    Direct(RuleId),
    /// The package grants a rule whose linked itinerary contains the event.
    Linked(RuleId),
}

impl Grant {
    /// The rule that produced this grant.
    pub fn rule_id(&self) -> &RuleId {
        match self {
            Grant::Direct(id) => id,
            Grant::Linked(id) => id,
        }
    }
}

/// Evaluate whether a delegate's package admits them to an event.
///
/// First match wins:
///
/// 1. A package code not present in the catalog grants nothing.
/// 2. Direct grant: the package's grant map marks the event's permission id
///    as granted.
/// 3. Linked-itinerary grant: some granted rule of the package's category
///    links the event's id.
///
/// An event without a permission id can only be admitted through linkage.
pub fn event_grant(
    delegate: &Delegate,
    event: &ScheduleEvent,
    packages: &PackageCatalog,
    rules: &RuleCatalog,
) -> Option<Grant> {
    let Some(package) = packages.get(&delegate.package) else {
        trace!(
            delegate = %delegate.id,
            package = %delegate.package,
            "unknown package, denying"
        );
        return None;
    };

    if let Some(permission_id) = &event.permission_id {
        if package.grants(permission_id) {
            return Some(Grant::Direct(permission_id.clone()));
        }
    }

    rules
        .rules_for(package.category)
        .iter()
        .find(|rule| package.grants(&rule.id) && rule.linked_events.contains(&event.id))
        .map(|rule| Grant::Linked(rule.id.clone()))
}

/// Boolean form of [`event_grant`].
pub fn is_event_permitted(
    delegate: &Delegate,
    event: &ScheduleEvent,
    packages: &PackageCatalog,
    rules: &RuleCatalog,
) -> bool {
    event_grant(delegate, event, packages, rules).is_some()
}

/// The rule qualifying a delegate as a golfer for the given day, if any.
///
/// Golf eligibility is independent of itinerary linkage: flights are
/// assigned in a separate collection which is not itself an event. A
/// delegate qualifies when they are flagged as a golf participant and their
/// package grants at least one rule tagged with the target day.
pub fn golf_grant(
    delegate: &Delegate,
    day: GolfDay,
    packages: &PackageCatalog,
    rules: &RuleCatalog,
) -> Option<RuleId> {
    if !delegate.is_golf_participant {
        return None;
    }

    let package = packages.get(&delegate.package)?;

    rules
        .rules_for(package.category)
        .iter()
        .find(|rule| rule.golf_day == Some(day) && package.grants(&rule.id))
        .map(|rule| rule.id.clone())
}

/// Boolean form of [`golf_grant`].
pub fn is_golf_eligible(
    delegate: &Delegate,
    day: GolfDay,
    packages: &PackageCatalog,
    rules: &RuleCatalog,
) -> bool {
    golf_grant(delegate, day, packages, rules).is_some()
}
