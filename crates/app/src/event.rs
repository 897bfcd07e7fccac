//! The closed union of domain notifications.

use vowplan_calendar::CalendarEvent;
use vowplan_core::WeddingId;
use vowplan_events::{EventBus, Message};

/// Everything that can be announced on the bus.
///
/// A closed enum instead of string-keyed topics: adding a notification kind
/// means adding a variant here, and every subscriber match is checked at
/// compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerEvent {
    EventCreated(CalendarEvent),
    EventUpdated(CalendarEvent),
    EventDeleted(CalendarEvent),
    WeddingSelected(WeddingId),
}

/// Routing key for [`PlannerEvent`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PlannerTopic {
    EventCreated,
    EventUpdated,
    EventDeleted,
    WeddingSelected,
}

impl Message for PlannerEvent {
    type Topic = PlannerTopic;

    fn topic(&self) -> PlannerTopic {
        match self {
            PlannerEvent::EventCreated(_) => PlannerTopic::EventCreated,
            PlannerEvent::EventUpdated(_) => PlannerTopic::EventUpdated,
            PlannerEvent::EventDeleted(_) => PlannerTopic::EventDeleted,
            PlannerEvent::WeddingSelected(_) => PlannerTopic::WeddingSelected,
        }
    }
}

/// The planner's bus.
pub type PlannerBus = EventBus<PlannerEvent>;
