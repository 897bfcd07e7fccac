//! Day-membership helpers for calendar cell highlighting.
//!
//! Both forms answer "does day D contain at least one event?", comparing the
//! calendar day of each event's *start* (year/month/day, not time-of-day).

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::event::CalendarEvent;

/// Pure query over a live collection.
pub fn day_has_events(day: NaiveDate, events: &[CalendarEvent]) -> bool {
    events.iter().any(|event| event.start.date_naive() == day)
}

/// Cached snapshot of the set of days with events.
///
/// Rebuild it whenever the underlying collection changes; querying is then
/// O(1) per calendar cell, which matters when a month view probes 30+ days
/// per render.
#[derive(Debug, Default, Clone)]
pub struct DayIndex {
    days: HashSet<NaiveDate>,
}

impl DayIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(events: &[CalendarEvent]) -> Self {
        let mut index = Self::new();
        index.rebuild(events);
        index
    }

    /// Replace the snapshot with the current collection contents.
    pub fn rebuild(&mut self, events: &[CalendarEvent]) {
        self.days = events.iter().map(|e| e.start.date_naive()).collect();
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, EventKind};
    use chrono::{Duration, TimeZone, Utc};
    use vowplan_core::WeddingId;

    fn event_on(day: u32) -> CalendarEvent {
        let start = Utc.with_ymd_and_hms(2026, 10, day, 15, 30, 0).unwrap();
        EventDraft::new(WeddingId::new())
            .title("Event")
            .between(start, start + Duration::hours(1))
            .kind(EventKind::Other)
            .build()
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[test]
    fn query_matches_on_calendar_day_not_time() {
        let events = vec![event_on(1), event_on(2)];
        assert!(day_has_events(date(1), &events));
        assert!(day_has_events(date(2), &events));
        assert!(!day_has_events(date(3), &events));
    }

    #[test]
    fn empty_collection_has_no_event_days() {
        assert!(!day_has_events(date(1), &[]));
        assert!(DayIndex::from_events(&[]).is_empty());
    }

    #[test]
    fn index_agrees_with_pure_query() {
        let events = vec![event_on(5), event_on(5), event_on(20)];
        let index = DayIndex::from_events(&events);

        for day in 1..=28 {
            assert_eq!(index.contains(date(day)), day_has_events(date(day), &events));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// The cached snapshot and the pure query are observably
            /// equivalent for any set of event days.
            #[test]
            fn index_and_query_agree(days in proptest::collection::vec(1u32..=28, 0..12)) {
                let events: Vec<CalendarEvent> = days.iter().map(|d| event_on(*d)).collect();
                let index = DayIndex::from_events(&events);
                for day in 1u32..=28 {
                    prop_assert_eq!(
                        index.contains(date(day)),
                        day_has_events(date(day), &events)
                    );
                }
            }
        }
    }

    #[test]
    fn rebuild_reflects_removals() {
        let mut events = vec![event_on(5), event_on(20)];
        let mut index = DayIndex::from_events(&events);
        assert!(index.contains(date(5)));

        events.remove(0);
        index.rebuild(&events);
        assert!(!index.contains(date(5)));
        assert!(index.contains(date(20)));
    }
}
