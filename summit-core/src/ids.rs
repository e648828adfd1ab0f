// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opaque string identifiers for registry entities.
//!
//! Ids come from the source registration system (for example `"G3jp-0001-JP"`
//! for a delegate or `"E13"` for an itinerary event) and are never parsed,
//! only compared and used as join keys.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Key of a purchasable admission package (for example `"G3"`).
    PackageCode
);

string_id!(
    /// Identifier of a permission rule within its category's rule list.
    RuleId
);

string_id!(
    /// Identifier of one itinerary event.
    EventId
);

string_id!(
    /// Identifier of a registered delegate.
    DelegateId
);

string_id!(
    /// Identifier of a golf tee-time grouping.
    FlightId
);
