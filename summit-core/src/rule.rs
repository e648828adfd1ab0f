// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::{Category, GolfDay};
use crate::ids::{EventId, RuleId};

/// Itinerary events unlocked by a permission rule.
///
/// Historical records stored this field either as a single event id or as a
/// list of ids. Deserialization absorbs both shapes (and a missing field)
/// into a plain list, so downstream code never has to branch on shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LinkedEvents(Vec<EventId>);

impl LinkedEvents {
    pub fn new(events: Vec<EventId>) -> Self {
        Self(events)
    }

    pub fn contains(&self, event: &EventId) -> bool {
        self.0.contains(event)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventId> {
        self.0.iter()
    }
}

impl From<Vec<EventId>> for LinkedEvents {
    fn from(events: Vec<EventId>) -> Self {
        Self(events)
    }
}

impl<'de> Deserialize<'de> for LinkedEvents {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Legacy documents hold either a bare id or a list of ids.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            One(EventId),
            Many(Vec<EventId>),
        }

        let shape = Option::<Shape>::deserialize(deserializer)?;
        Ok(match shape {
            None => Self::default(),
            Some(Shape::One(id)) => Self(vec![id]),
            Some(Shape::Many(ids)) => Self(ids),
        })
    }
}

/// A named entitlement within a category, for example "Welcome Dinner
/// access" on a given date.
///
/// Rules are the unit of grant accounting: every package of the same
/// category enumerates every rule id in its grant map. A rule optionally
/// links the itinerary events it unlocks and may carry a golf-day tag which
/// qualifies golfers for that tournament day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRule {
    pub id: RuleId,
    pub name: String,
    /// Display date, for example "29 Mar 2026". Not parsed.
    pub date: String,
    #[serde(rename = "linkedItinerary", default, skip_serializing_if = "LinkedEvents::is_empty")]
    pub linked_events: LinkedEvents,
    #[serde(rename = "golfType", default, skip_serializing_if = "Option::is_none")]
    pub golf_day: Option<GolfDay>,
}

impl PermissionRule {
    pub fn new(id: impl Into<RuleId>, name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date: date.into(),
            linked_events: LinkedEvents::default(),
            golf_day: None,
        }
    }

    pub fn with_linked_events(mut self, events: Vec<EventId>) -> Self {
        self.linked_events = LinkedEvents::new(events);
        self
    }

    pub fn with_golf_day(mut self, day: GolfDay) -> Self {
        self.golf_day = Some(day);
        self
    }
}

/// Per-category rule lists.
///
/// A category without an entry simply has no rules; lookups return an empty
/// slice rather than an error so that a package pointing at an unconfigured
/// category fails closed during evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleCatalog(HashMap<Category, Vec<PermissionRule>>);

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules_for(&self, category: Category) -> &[PermissionRule] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn rules_for_mut(&mut self, category: Category) -> &mut Vec<PermissionRule> {
        self.0.entry(category).or_default()
    }

    pub fn find(&self, category: Category, id: &RuleId) -> Option<&PermissionRule> {
        self.rules_for(category).iter().find(|rule| &rule.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[PermissionRule])> {
        self.0
            .iter()
            .map(|(category, rules)| (*category, rules.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use crate::category::GolfDay;
    use crate::ids::EventId;

    use super::{LinkedEvents, PermissionRule, RuleCatalog};

    #[test]
    fn linked_events_accepts_scalar_and_list() {
        let scalar: PermissionRule = serde_json::from_str(
            r#"{ "id": "int_pass_30", "name": "All Access Day Pass", "date": "30 Mar 2026", "linkedItinerary": "E13" }"#,
        )
        .unwrap();
        let list: PermissionRule = serde_json::from_str(
            r#"{ "id": "int_pass_30", "name": "All Access Day Pass", "date": "30 Mar 2026", "linkedItinerary": ["E13"] }"#,
        )
        .unwrap();

        assert_eq!(scalar, list);
        assert!(scalar.linked_events.contains(&EventId::from("E13")));
    }

    #[test]
    fn linked_events_defaults_to_empty() {
        let rule: PermissionRule = serde_json::from_str(
            r#"{ "id": "my_welcome", "name": "Welcoming Night", "date": "29 Mar 2026" }"#,
        )
        .unwrap();
        assert!(rule.linked_events.is_empty());

        let null_field: PermissionRule = serde_json::from_str(
            r#"{ "id": "my_welcome", "name": "Welcoming Night", "date": "29 Mar 2026", "linkedItinerary": null }"#,
        )
        .unwrap();
        assert_eq!(rule, null_field);
    }

    #[test]
    fn golf_tag_roundtrip() {
        let rule: PermissionRule = serde_json::from_str(
            r#"{ "id": "my_day1_golf", "name": "Day 1 Golf", "date": "30 Mar 2026", "golfType": "Day1" }"#,
        )
        .unwrap();
        assert_eq!(rule.golf_day, Some(GolfDay::Day1));
    }

    #[test]
    fn missing_category_has_no_rules() {
        let catalog = RuleCatalog::new();
        assert!(catalog.rules_for(crate::Category::Vip).is_empty());
    }

    #[test]
    fn find_by_id() {
        let mut catalog = RuleCatalog::new();
        catalog
            .rules_for_mut(crate::Category::Int)
            .push(PermissionRule::new("int_pass_30", "All Access Day Pass", "30 Mar 2026"));

        assert!(catalog.find(crate::Category::Int, &"int_pass_30".into()).is_some());
        assert!(catalog.find(crate::Category::Jcim, &"int_pass_30".into()).is_none());
    }

    #[test]
    fn empty_linked_events_skipped_on_serialize() {
        let rule = PermissionRule::new("apdc_mar28_hotel", "Hotel", "28 Mar 2026");
        let json = serde_json::to_string(&rule).unwrap();
        assert!(!json.contains("linkedItinerary"));

        let linked = LinkedEvents::new(vec![EventId::from("E1")]);
        assert_eq!(serde_json::to_string(&linked).unwrap(), r#"["E1"]"#);
    }
}
