// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derived views over the itinerary and golf collections.
//!
//! Every portal renders the schedule grouped by date and sorted by
//! time-of-day, and both the guest self-view and the admin editor look up a
//! delegate's current flight. These helpers are the single implementation
//! of that parsing and ordering; the original app re-implemented slightly
//! different time regexes per portal and the copies drifted.
//!
//! Parsing is deliberately forgiving: a record with an unparsable time or
//! date sorts first instead of breaking the whole listing.

use std::collections::BTreeMap;

use summit_core::{Delegate, DelegateId, GolfAssignment, GolfDay, GolfGrouping, ScheduleEvent};

/// Minutes from midnight for a `H:MM AM|PM` display time.
///
/// Case-insensitive, tolerates missing whitespace before the period.
/// Anything unparsable ("All Day", "TBC", empty) sorts as midnight.
pub fn parse_time_of_day(value: &str) -> u32 {
    fn parse(value: &str) -> Option<u32> {
        let upper = value.trim().to_ascii_uppercase();
        let (clock, pm) = if let Some(rest) = upper.strip_suffix("PM") {
            (rest, true)
        } else if let Some(rest) = upper.strip_suffix("AM") {
            (rest, false)
        } else {
            return None;
        };

        let (hours, minutes) = clock.trim().split_once(':')?;
        let mut hours: u32 = hours.trim().parse().ok()?;
        let minutes: u32 = minutes.trim().parse().ok()?;

        // Noon and midnight conventions: 12 PM is 720, 12 AM is 0.
        if pm && hours < 12 {
            hours += 12;
        }
        if !pm && hours == 12 {
            hours = 0;
        }

        Some(hours * 60 + minutes)
    }

    parse(value).unwrap_or(0)
}

/// Sortable ordinal for a `DD.MM.YYYY` display date.
///
/// Unparsable dates sort to the epoch side, before every real date.
pub fn parse_day_month_year(value: &str) -> i64 {
    fn parse(value: &str) -> Option<i64> {
        let mut parts = value.trim().split('.');
        let day: i64 = parts.next()?.trim().parse().ok()?;
        let month: i64 = parts.next()?.trim().parse().ok()?;
        let year: i64 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(year * 10_000 + month * 100 + day)
    }

    parse(value).unwrap_or(i64::MIN)
}

/// Group events by their date string, each group sorted by time-of-day
/// ascending.
///
/// The map is keyed lexicographically; use [`sort_dates_chronologically`]
/// on the keys to render groups in calendar order.
pub fn group_events_by_date(events: &[ScheduleEvent]) -> BTreeMap<String, Vec<ScheduleEvent>> {
    let mut groups: BTreeMap<String, Vec<ScheduleEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.date.clone()).or_default().push(event.clone());
    }
    for group in groups.values_mut() {
        group.sort_by_key(|event| parse_time_of_day(&event.time));
    }
    groups
}

/// Order date keys chronologically. The sort is stable, so equal (or
/// equally unparsable) dates keep their input order.
pub fn sort_dates_chronologically<I>(dates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut dates: Vec<String> = dates.into_iter().collect();
    dates.sort_by_key(|date| parse_day_month_year(date));
    dates
}

/// The flight listing a delegate for the given day, if any.
///
/// Duplicate listings within a day resolve to the first flight; all
/// delegate-facing views go through this lookup so they agree on that
/// resolution.
pub fn flight_roster_for<'a>(
    delegate: &DelegateId,
    day: GolfDay,
    groupings: &'a [GolfGrouping],
) -> Option<&'a GolfGrouping> {
    groupings
        .iter()
        .find(|grouping| grouping.day == day && grouping.has_player(delegate))
}

/// A delegate's denormalized flight summary for the given day, derived
/// from the groupings.
pub fn golf_assignment_for(
    delegate: &DelegateId,
    day: GolfDay,
    groupings: &[GolfGrouping],
) -> Option<GolfAssignment> {
    flight_roster_for(delegate, day, groupings).map(|grouping| GolfAssignment {
        flight: grouping.flight_number.clone(),
        tee_time: grouping.tee_time.clone(),
        buggy: grouping.buggy_number.clone().unwrap_or_default(),
    })
}

/// Delegates involved in any of the given groupings, deduplicated. Used
/// when reconciling delegate-side summaries after a grouping edit.
pub fn involved_delegates(groupings: &[GolfGrouping]) -> Vec<DelegateId> {
    let mut ids: Vec<DelegateId> = Vec::new();
    for grouping in groupings {
        for player in &grouping.players {
            if !ids.contains(player) {
                ids.push(player.clone());
            }
        }
    }
    ids
}

/// Golfers sorted by name, as listed in the flight editor.
pub fn golfers_by_name(delegates: &[Delegate]) -> Vec<&Delegate> {
    let mut golfers: Vec<&Delegate> = delegates
        .iter()
        .filter(|delegate| delegate.is_golf_participant)
        .collect();
    golfers.sort_by(|a, b| a.name.cmp(&b.name));
    golfers
}

#[cfg(test)]
mod tests {
    use summit_core::{Delegate, GolfDay, GolfGrouping, ScheduleEvent};

    use super::{
        flight_roster_for, golf_assignment_for, golfers_by_name, group_events_by_date,
        involved_delegates, parse_day_month_year, parse_time_of_day, sort_dates_chronologically,
    };

    fn event(id: &str, date: &str, time: &str) -> ScheduleEvent {
        ScheduleEvent {
            id: id.into(),
            date: date.to_owned(),
            time: time.to_owned(),
            title: format!("Event {id}"),
            location: "TBC".to_owned(),
            description: String::new(),
            permission_id: None,
            category: String::new(),
        }
    }

    #[test]
    fn minutes_from_midnight() {
        assert_eq!(parse_time_of_day("9:00 AM"), 540);
        assert_eq!(parse_time_of_day("12:00 PM"), 720);
        assert_eq!(parse_time_of_day("7:00 PM"), 1140);
        assert_eq!(parse_time_of_day("12:00 AM"), 0);
        assert_eq!(parse_time_of_day("08:30am"), 510);
    }

    #[test]
    fn unparsable_time_sorts_first() {
        assert_eq!(parse_time_of_day("All Day"), 0);
        assert_eq!(parse_time_of_day(""), 0);
        assert_eq!(parse_time_of_day("25 o'clock"), 0);
    }

    #[test]
    fn dates_sort_chronologically() {
        let sorted = sort_dates_chronologically(
            ["28.03.2026", "27.03.2026", "29.03.2026"]
                .map(String::from),
        );
        assert_eq!(sorted, ["27.03.2026", "28.03.2026", "29.03.2026"]);
    }

    #[test]
    fn year_dominates_month_and_day() {
        assert!(parse_day_month_year("31.12.2025") < parse_day_month_year("01.01.2026"));
        assert!(parse_day_month_year("27.03.2026") < parse_day_month_year("30.03.2026"));
    }

    #[test]
    fn unparsable_date_sorts_to_the_epoch() {
        let sorted = sort_dates_chronologically(
            ["28.03.2026", "sometime later", "27.03.2026"].map(String::from),
        );
        assert_eq!(sorted, ["sometime later", "27.03.2026", "28.03.2026"]);
    }

    #[test]
    fn events_group_by_date_and_sort_by_time() {
        let events = vec![
            event("E11", "29.03.2026", "7:00 PM"),
            event("E5", "29.03.2026", "9:00 AM"),
            event("E13", "30.03.2026", "08:00 AM"),
            event("E7", "29.03.2026", "12:00 PM"),
        ];

        let groups = group_events_by_date(&events);
        assert_eq!(groups.len(), 2);

        let day3: Vec<&str> = groups["29.03.2026"].iter().map(|e| e.id.as_str()).collect();
        assert_eq!(day3, ["E5", "E7", "E11"]);
    }

    #[test]
    fn all_day_events_lead_their_date() {
        let events = vec![
            event("E6", "29.03.2026", "9:00 AM"),
            event("E1", "29.03.2026", "All Day"),
        ];
        let groups = group_events_by_date(&events);
        assert_eq!(groups["29.03.2026"][0].id.as_str(), "E1");
    }

    fn groupings() -> Vec<GolfGrouping> {
        vec![
            GolfGrouping::new("GF1", GolfDay::Day1, "Flight 1", "08:00 AM")
                .with_players(vec!["D1".into(), "D2".into()]),
            GolfGrouping::new("GF2", GolfDay::Day1, "Flight 2", "08:10 AM")
                .with_players(vec!["D2".into(), "D3".into()]),
            GolfGrouping::new("GF3", GolfDay::Day2, "Flight 1", "07:45 AM")
                .with_players(vec!["D1".into()]),
        ]
    }

    #[test]
    fn roster_lookup_is_day_scoped() {
        let groupings = groupings();

        let day1 = flight_roster_for(&"D1".into(), GolfDay::Day1, &groupings).unwrap();
        assert_eq!(day1.id.as_str(), "GF1");

        let day2 = flight_roster_for(&"D1".into(), GolfDay::Day2, &groupings).unwrap();
        assert_eq!(day2.id.as_str(), "GF3");

        assert!(flight_roster_for(&"D3".into(), GolfDay::Day2, &groupings).is_none());
    }

    #[test]
    fn duplicate_listing_resolves_to_first_flight() {
        let groupings = groupings();

        // D2 appears in both Day 1 flights; the first one wins.
        let flight = flight_roster_for(&"D2".into(), GolfDay::Day1, &groupings).unwrap();
        assert_eq!(flight.id.as_str(), "GF1");

        let assignment = golf_assignment_for(&"D2".into(), GolfDay::Day1, &groupings).unwrap();
        assert_eq!(assignment.flight, "Flight 1");
        assert_eq!(assignment.tee_time, "08:00 AM");
        assert_eq!(assignment.buggy, "");
    }

    #[test]
    fn involved_delegates_deduplicates() {
        let ids = involved_delegates(&groupings());
        assert_eq!(ids, vec!["D1".into(), "D2".into(), "D3".into()]);
    }

    #[test]
    fn golfer_listing_sorted_by_name() {
        let mut zainal = Delegate::new("D1", "Zainal Abidin", "G3");
        zainal.is_golf_participant = true;
        let mut aisyah = Delegate::new("D2", "Aisyah Rahman", "G3");
        aisyah.is_golf_participant = true;
        let walker = Delegate::new("D3", "Ben Walker", "G3");

        let delegates = vec![zainal, aisyah, walker];
        let golfers: Vec<&str> = golfers_by_name(&delegates)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(golfers, ["Aisyah Rahman", "Zainal Abidin"]);
    }
}
