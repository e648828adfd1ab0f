// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data types for the summit conference delegate registry.
//!
//! The model covers the five registry collections: delegates, itinerary
//! events, admission packages, per-category permission rules and golf
//! tee-time groupings. All types deserialize from the wire shapes of the
//! source registration system, including its legacy quirks (scalar
//! linked-itinerary fields, empty-string permission ids, numeric golf
//! days), so evaluation code downstream operates on one normalized shape.

pub mod category;
pub mod delegate;
pub mod event;
pub mod golf;
pub mod ids;
pub mod package;
pub mod rule;

pub use category::{Category, GolfDay};
pub use delegate::{CheckInError, Delegate, GolfAssignment};
pub use event::ScheduleEvent;
pub use golf::GolfGrouping;
pub use ids::{DelegateId, EventId, FlightId, PackageCode, RuleId};
pub use package::{Package, PackageCatalog};
pub use rule::{LinkedEvents, PermissionRule, RuleCatalog};
