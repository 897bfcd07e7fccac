//! Notification center: reminder window, dedup, unread counter.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use vowplan_calendar::{CalendarEvent, EventKind};
use vowplan_core::EventId;

/// How soon ahead of `now` an event must start to trigger a reminder.
const REMINDER_WINDOW_DAYS: i64 = 3;

/// How loudly the UI should surface a notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Urgency {
    /// The event is today: show a toast immediately.
    Today,
    /// The event is within the reminder window: badge only.
    Upcoming,
}

/// A reminder the UI may render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub event_id: EventId,
    pub title: String,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub urgency: Urgency,
}

/// Badge prefix per event kind.
pub fn kind_badge(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Meeting => "👥",
        EventKind::Payment => "💰",
        EventKind::Delivery => "📦",
        EventKind::Ceremony => "💍",
        EventKind::Other => "📅",
    }
}

/// Tracks which events have been notified and how many reminders are unread.
///
/// Each event id is notified at most once for the lifetime of the center;
/// marking everything read clears the counter but keeps the dedup set, so a
/// re-observed event does not re-notify.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    notified: HashSet<EventId>,
    unread: usize,
    feed: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unread(&self) -> usize {
        self.unread
    }

    pub fn feed(&self) -> &[Notification] {
        &self.feed
    }

    /// Consider one event for a reminder.
    ///
    /// Produces a notification when the event starts inside
    /// `[now, now + 3 days)` and has not been notified before. Past events
    /// and far-future events are ignored.
    pub fn observe(&mut self, event: &CalendarEvent, now: DateTime<Utc>) -> Option<Notification> {
        if self.notified.contains(&event.id) {
            return None;
        }
        let window_end = now + Duration::days(REMINDER_WINDOW_DAYS);
        if event.start < now || event.start >= window_end {
            return None;
        }

        let urgency = if event.start.date_naive() == now.date_naive() {
            Urgency::Today
        } else {
            Urgency::Upcoming
        };

        let notification = Notification {
            event_id: event.id,
            title: format!("{} {}", kind_badge(event.kind), event.title),
            location: event.location.clone(),
            starts_at: event.start,
            urgency,
        };

        self.notified.insert(event.id);
        self.unread += 1;
        self.feed.push(notification.clone());
        tracing::debug!(event = %event.id, ?urgency, "reminder queued");
        Some(notification)
    }

    /// Consider a batch (e.g. everything loaded for the active wedding).
    pub fn observe_all(&mut self, events: &[CalendarEvent], now: DateTime<Utc>) -> usize {
        events
            .iter()
            .filter(|event| self.observe(event, now).is_some())
            .count()
    }

    /// Zero the unread counter. The dedup set is kept: reading a reminder
    /// does not make the event eligible again.
    pub fn mark_all_read(&mut self) {
        self.unread = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vowplan_calendar::EventDraft;
    use vowplan_core::WeddingId;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 10, 8, 0, 0).unwrap()
    }

    fn event_starting(start: DateTime<Utc>) -> CalendarEvent {
        EventDraft::new(WeddingId::new())
            .title("Fitting")
            .between(start, start + Duration::hours(1))
            .kind(EventKind::Delivery)
            .build()
            .unwrap()
    }

    #[test]
    fn event_today_is_today_urgency() {
        let mut center = NotificationCenter::new();
        let n = center
            .observe(&event_starting(now() + Duration::hours(3)), now())
            .unwrap();
        assert_eq!(n.urgency, Urgency::Today);
        assert!(n.title.starts_with("📦"));
        assert_eq!(center.unread(), 1);
    }

    #[test]
    fn event_in_two_days_is_upcoming() {
        let mut center = NotificationCenter::new();
        let n = center
            .observe(&event_starting(now() + Duration::days(2)), now())
            .unwrap();
        assert_eq!(n.urgency, Urgency::Upcoming);
    }

    #[test]
    fn past_and_far_future_events_are_ignored() {
        let mut center = NotificationCenter::new();
        assert!(center.observe(&event_starting(now() - Duration::hours(1)), now()).is_none());
        assert!(center.observe(&event_starting(now() + Duration::days(3)), now()).is_none());
        assert_eq!(center.unread(), 0);
    }

    #[test]
    fn each_event_notifies_at_most_once() {
        let mut center = NotificationCenter::new();
        let event = event_starting(now() + Duration::days(1));
        assert!(center.observe(&event, now()).is_some());
        assert!(center.observe(&event, now()).is_none());
        assert_eq!(center.unread(), 1);
    }

    #[test]
    fn mark_all_read_keeps_dedup() {
        let mut center = NotificationCenter::new();
        let event = event_starting(now() + Duration::days(1));
        center.observe(&event, now()).unwrap();
        center.mark_all_read();
        assert_eq!(center.unread(), 0);
        assert!(center.observe(&event, now()).is_none());
        assert_eq!(center.feed().len(), 1);
    }

    #[test]
    fn batch_observation_counts_new_reminders() {
        let mut center = NotificationCenter::new();
        let events = vec![
            event_starting(now() + Duration::hours(2)),
            event_starting(now() + Duration::days(2)),
            event_starting(now() + Duration::days(10)),
        ];
        assert_eq!(center.observe_all(&events, now()), 2);
        assert_eq!(center.unread(), 2);
    }
}
