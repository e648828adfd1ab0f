// SPDX-License-Identifier: MIT OR Apache-2.0

use summit_core::{Category, CheckInError, DelegateId, EventId, PackageCode, RuleId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown delegate \"{0}\"")]
    UnknownDelegate(DelegateId),

    #[error("unknown event \"{0}\"")]
    UnknownEvent(EventId),

    #[error("unknown package \"{0}\"")]
    UnknownPackage(PackageCode),

    #[error("package \"{0}\" already exists")]
    PackageExists(PackageCode),

    #[error("unknown rule \"{id}\" in category {category}")]
    UnknownRule { category: Category, id: RuleId },

    #[error("rule \"{id}\" already exists in category {category}")]
    RuleExists { category: Category, id: RuleId },

    #[error("package \"{package}\" does not grant entry to \"{event}\"")]
    AccessDenied {
        package: PackageCode,
        event: String,
    },

    #[error(transparent)]
    CheckIn(#[from] CheckInError),
}
