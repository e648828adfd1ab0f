// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::category::GolfDay;
use crate::ids::{DelegateId, FlightId};

/// A tee-time grouping for one tournament day.
///
/// Within a day every delegate should appear in at most one flight. The
/// registry does not hard-enforce this; lookups resolve duplicates by
/// taking the first flight so delegate-side summaries never double-count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GolfGrouping {
    pub id: FlightId,
    /// Stored as a bare day number (1 or 2) in legacy documents.
    #[serde(with = "day_number")]
    pub day: GolfDay,
    /// Display label, for example "Flight 1".
    pub flight_number: String,
    /// Display time, for example "08:00 AM".
    pub tee_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buggy_number: Option<String>,
    /// Ordered player list.
    #[serde(default)]
    pub players: Vec<DelegateId>,
}

impl GolfGrouping {
    pub fn new(
        id: impl Into<FlightId>,
        day: GolfDay,
        flight_number: impl Into<String>,
        tee_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            day,
            flight_number: flight_number.into(),
            tee_time: tee_time.into(),
            buggy_number: None,
            players: Vec::new(),
        }
    }

    pub fn with_players(mut self, players: Vec<DelegateId>) -> Self {
        self.players = players;
        self
    }

    pub fn has_player(&self, delegate: &DelegateId) -> bool {
        self.players.contains(delegate)
    }
}

mod day_number {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::category::GolfDay;

    pub fn serialize<S>(day: &GolfDay, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(day.number())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<GolfDay, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            1 => Ok(GolfDay::Day1),
            2 => Ok(GolfDay::Day2),
            other => Err(serde::de::Error::custom(format!(
                "invalid golf day number: {other}"
            ))),
        }
    }
}
