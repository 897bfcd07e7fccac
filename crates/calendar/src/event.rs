//! Calendar event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vowplan_core::{DomainError, DomainResult, Entity, EventId, WeddingId};

/// What kind of appointment an event is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Meeting,
    Payment,
    Delivery,
    Ceremony,
    Other,
}

/// A scheduled event, owned by exactly one wedding.
///
/// Created, edited and deleted exclusively through the command layer; never
/// shared across weddings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub wedding_id: WeddingId,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub kind: EventKind,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Ordered; order is whatever the form layer supplied.
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl Entity for CalendarEvent {
    type Id = EventId;

    fn id(&self) -> &EventId {
        &self.id
    }
}

/// Step-wise construction of a [`CalendarEvent`], validated at `build`.
///
/// Mirrors what the form layer submits: required title/times/kind, optional
/// free-text fields that are dropped when blank, attendees as a comma list.
#[derive(Debug, Clone)]
pub struct EventDraft {
    id: Option<EventId>,
    wedding_id: WeddingId,
    title: String,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    kind: EventKind,
    location: Option<String>,
    description: Option<String>,
    attendees: Vec<String>,
}

impl EventDraft {
    pub fn new(wedding_id: WeddingId) -> Self {
        Self {
            id: None,
            wedding_id,
            title: String::new(),
            start: None,
            end: None,
            kind: EventKind::Meeting,
            location: None,
            description: None,
            attendees: Vec::new(),
        }
    }

    /// Reuse an existing id (editing an event rather than creating one).
    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn kind(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Blank strings are treated as "not provided".
    pub fn location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        if !location.trim().is_empty() {
            self.location = Some(location);
        }
        self
    }

    /// Blank strings are treated as "not provided".
    pub fn description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.trim().is_empty() {
            self.description = Some(description);
        }
        self
    }

    pub fn attendees<I, T>(mut self, attendees: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.attendees = attendees.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a comma-separated attendee list, trimming and dropping blanks.
    pub fn attendees_from_list(mut self, list: &str) -> Self {
        self.attendees = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        self
    }

    /// Validate and produce the event.
    ///
    /// Requires a non-blank title, both timestamps, and a start strictly
    /// before the end.
    pub fn build(self) -> DomainResult<CalendarEvent> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(DomainError::validation("start and end are required"));
        };
        if start >= end {
            return Err(DomainError::validation("start must be before end"));
        }

        Ok(CalendarEvent {
            id: self.id.unwrap_or_default(),
            wedding_id: self.wedding_id,
            title: self.title,
            start,
            end,
            kind: self.kind,
            location: self.location,
            description: self.description,
            attendees: self.attendees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 12, hour, 0, 0).unwrap()
    }

    #[test]
    fn builds_a_complete_event() {
        let wedding_id = WeddingId::new();
        let event = EventDraft::new(wedding_id)
            .title("Venue walkthrough")
            .between(at(9), at(10))
            .kind(EventKind::Meeting)
            .location("Quinta do Lago")
            .attendees_from_list("Ana, Bruno , ,Carla")
            .build()
            .unwrap();

        assert_eq!(event.wedding_id, wedding_id);
        assert_eq!(event.attendees, vec!["Ana", "Bruno", "Carla"]);
        assert_eq!(event.location.as_deref(), Some("Quinta do Lago"));
        assert!(event.description.is_none());
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = EventDraft::new(WeddingId::new())
            .title("   ")
            .between(at(9), at(10))
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn start_must_precede_end() {
        let err = EventDraft::new(WeddingId::new())
            .title("Cake tasting")
            .between(at(10), at(10))
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn missing_times_are_rejected() {
        let err = EventDraft::new(WeddingId::new())
            .title("Cake tasting")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn blank_optional_fields_are_dropped() {
        let event = EventDraft::new(WeddingId::new())
            .title("Fitting")
            .between(at(14), at(15))
            .location("  ")
            .description("")
            .build()
            .unwrap();
        assert!(event.location.is_none());
        assert!(event.description.is_none());
    }

    #[test]
    fn with_id_preserves_identity_across_edits() {
        let id = EventId::new();
        let event = EventDraft::new(WeddingId::new())
            .with_id(id)
            .title("Rehearsal")
            .between(at(17), at(18))
            .kind(EventKind::Ceremony)
            .build()
            .unwrap();
        assert_eq!(event.id, id);
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&EventKind::Ceremony).unwrap();
        assert_eq!(json, "\"ceremony\"");
    }
}
