// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::ids::{EventId, RuleId};

/// One itinerary entry.
///
/// `permission_id` is the rule the event is primarily associated with, by
/// convention only. It is not required to exist in any rule catalog and
/// legacy records store the empty string for "none".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEvent {
    pub id: EventId,
    /// Display date in `DD.MM.YYYY` form, for example "30.03.2026".
    pub date: String,
    /// Display time in `H:MM AM|PM` form, or free text like "All Day".
    pub time: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub permission_id: Option<RuleId>,
    /// Free-text display category, for example "Conference" or "Dinner".
    #[serde(default)]
    pub category: String,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<RuleId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let id = Option::<RuleId>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::ScheduleEvent;

    #[test]
    fn empty_permission_id_is_none() {
        let event: ScheduleEvent = serde_json::from_str(
            r#"{
                "id": "E13",
                "date": "30.03.2026",
                "time": "08:00 AM",
                "title": "Golf Tournament Day 1",
                "location": "Templer Park Golf & Country Club",
                "description": "Competitive round 1.",
                "category": "Golf",
                "permissionId": "Golf"
            }"#,
        )
        .unwrap();
        assert_eq!(event.permission_id, Some("Golf".into()));

        let blank: ScheduleEvent = serde_json::from_str(
            r#"{
                "id": "E1",
                "date": "27.03.2026",
                "time": "All Day",
                "title": "Arrival & Registration",
                "location": "Hotel Lobby",
                "permissionId": ""
            }"#,
        )
        .unwrap();
        assert_eq!(blank.permission_id, None);
    }
}
