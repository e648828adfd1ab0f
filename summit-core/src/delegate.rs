// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{DelegateId, EventId, PackageCode};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckInError {
    /// The delegate already holds a timestamp for this event. The first
    /// arrival time is part of the audit trail and is never overwritten.
    #[error("already checked in to this event at {at}")]
    AlreadyCheckedIn { at: String },
}

/// A delegate's flight assignment summary for one tournament day.
///
/// Denormalized from the golf groupings so the guest portal can render the
/// assignment without scanning every flight.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GolfAssignment {
    pub flight: String,
    pub tee_time: String,
    #[serde(default)]
    pub buggy: String,
}

/// A registered conference attendee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegate {
    pub id: DelegateId,
    pub name: String,
    #[serde(default)]
    pub name_on_tag: String,
    /// Key into the package catalog. May dangle after a package is deleted;
    /// a dangling reference grants nothing.
    pub package: PackageCode,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub local_org: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub food_preference: String,
    #[serde(default)]
    pub allergies: String,
    /// Last four digits of the travel document, used by the guest login.
    #[serde(default)]
    pub passport_last4: String,
    #[serde(default)]
    pub is_golf_participant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golf_day1: Option<GolfAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golf_day2: Option<GolfAssignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_dinner_table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gala_dinner_table: Option<String>,
    /// First-arrival timestamps (ISO 8601) per event.
    #[serde(default)]
    pub checked_in_events: BTreeMap<EventId, String>,
    #[serde(default)]
    pub check_in_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_checked_in_event: Option<EventId>,
}

impl Delegate {
    pub fn new(id: impl Into<DelegateId>, name: impl Into<String>, package: impl Into<PackageCode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_on_tag: String::new(),
            package: package.into(),
            country: String::new(),
            local_org: String::new(),
            email: String::new(),
            phone: String::new(),
            food_preference: String::new(),
            allergies: String::new(),
            passport_last4: String::new(),
            is_golf_participant: false,
            golf_day1: None,
            golf_day2: None,
            welcome_dinner_table: None,
            gala_dinner_table: None,
            checked_in_events: BTreeMap::new(),
            check_in_count: 0,
            last_checked_in_event: None,
        }
    }

    /// Record arrival at an event.
    ///
    /// Idempotent in the rejecting sense: a second attempt for the same
    /// event fails with the original timestamp and leaves all check-in
    /// state untouched.
    pub fn check_in(
        &mut self,
        event: &EventId,
        timestamp: impl Into<String>,
    ) -> Result<(), CheckInError> {
        if let Some(at) = self.checked_in_events.get(event) {
            return Err(CheckInError::AlreadyCheckedIn { at: at.clone() });
        }

        self.checked_in_events.insert(event.clone(), timestamp.into());
        self.check_in_count += 1;
        self.last_checked_in_event = Some(event.clone());
        Ok(())
    }

    /// Timestamp of the delegate's arrival at an event, if checked in.
    pub fn checked_in_at(&self, event: &EventId) -> Option<&str> {
        self.checked_in_events.get(event).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use crate::EventId;

    use super::{CheckInError, Delegate};

    #[test]
    fn check_in_records_first_arrival() {
        let mut delegate = Delegate::new("G3jp-0001-JP", "Tanaka Kenji", "G3jp");
        let event = EventId::from("E11");

        delegate.check_in(&event, "2026-03-29T19:02:11Z").unwrap();

        assert_eq!(delegate.checked_in_at(&event), Some("2026-03-29T19:02:11Z"));
        assert_eq!(delegate.check_in_count, 1);
        assert_eq!(delegate.last_checked_in_event, Some(event));
    }

    #[test]
    fn duplicate_check_in_is_rejected() {
        let mut delegate = Delegate::new("G3jp-0001-JP", "Tanaka Kenji", "G3jp");
        let event = EventId::from("E11");

        delegate.check_in(&event, "2026-03-29T19:02:11Z").unwrap();
        let err = delegate.check_in(&event, "2026-03-29T20:15:00Z").unwrap_err();

        assert_eq!(
            err,
            CheckInError::AlreadyCheckedIn {
                at: "2026-03-29T19:02:11Z".to_owned()
            }
        );
        // First timestamp and counter survive the rejected attempt.
        assert_eq!(delegate.checked_in_at(&event), Some("2026-03-29T19:02:11Z"));
        assert_eq!(delegate.check_in_count, 1);
    }

    #[test]
    fn check_ins_to_different_events_accumulate() {
        let mut delegate = Delegate::new("PKG-0002-MY", "Aisyah Rahman", "3 in 1 Events Pass");

        delegate.check_in(&"E5".into(), "2026-03-29T07:10:00Z").unwrap();
        delegate.check_in(&"E11".into(), "2026-03-29T19:00:30Z").unwrap();

        assert_eq!(delegate.check_in_count, 2);
        assert_eq!(delegate.last_checked_in_event, Some("E11".into()));
    }

    #[test]
    fn legacy_record_without_checkin_fields() {
        let delegate: Delegate = serde_json::from_str(
            r#"{
                "id": "PKG-0003-KR",
                "name": "Park Jisoo",
                "package": "G3a",
                "isGolfParticipant": true
            }"#,
        )
        .unwrap();

        assert!(delegate.checked_in_events.is_empty());
        assert_eq!(delegate.check_in_count, 0);
        assert!(delegate.is_golf_participant);
    }
}
