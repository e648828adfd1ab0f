// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory registry store for the summit portals.
//!
//! Owns the five collections (delegates, events, packages, rules, golf
//! groupings), enforces the cross-collection catalog invariants on every
//! mutation and notifies per-collection subscribers afterwards, standing in
//! for the hosted document store's snapshot listeners.

mod error;
mod registry;

pub use error::RegistryError;
pub use registry::{Collection, Registry, SubscriptionId};
