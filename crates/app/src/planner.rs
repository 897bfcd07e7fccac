//! Planner facade: command execution + bus publication per wedding.
//!
//! The UI layer calls these flows instead of touching collections directly:
//! every calendar mutation goes through the wedding's command invoker (so
//! history stays complete), and every accepted mutation is announced on the
//! bus for dashboards and notification counters to react to.

use std::collections::HashMap;

use thiserror::Error;

use vowplan_calendar::{
    ADD_EVENT, CalendarEvent, DELETE_EVENT, DayIndex, EventCommands, EventDraft, UPDATE_EVENT,
    event_commands,
};
use vowplan_core::{DomainError, WeddingId};
use vowplan_events::{CommandError, HistoryEntry, UndoOutcome};
use vowplan_payments::Payment;
use vowplan_planning::Wedding;

use crate::event::{PlannerBus, PlannerEvent};

/// Application-level error for planner flows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Command lookup failed. Fatal to the calling operation: the edit did
    /// not happen and the UI must say so.
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("unknown wedding {0}")]
    UnknownWedding(WeddingId),
}

/// Per-wedding calendar state: the event collection, its command invoker and
/// the cached day-membership snapshot.
struct WeddingCalendar {
    invoker: EventCommands,
    events: Vec<CalendarEvent>,
    day_index: DayIndex,
}

impl WeddingCalendar {
    fn new() -> Self {
        Self {
            invoker: event_commands(),
            events: Vec::new(),
            day_index: DayIndex::new(),
        }
    }

    fn run(&mut self, name: &str, payload: CalendarEvent) -> Result<(), CommandError> {
        // Check the registration before taking the collection; `execute`
        // consumes its state argument even on failure.
        if !self.invoker.is_registered(name) {
            return Err(CommandError::NotFound(name.to_string()));
        }
        let events = std::mem::take(&mut self.events);
        self.events = self.invoker.execute(name, events, payload)?;
        self.day_index.rebuild(&self.events);
        Ok(())
    }
}

/// Owns the in-memory planning state and the bus handle.
///
/// Persistence is the caller's concern; nothing here survives the process.
pub struct Planner {
    bus: PlannerBus,
    weddings: HashMap<WeddingId, Wedding>,
    calendars: HashMap<WeddingId, WeddingCalendar>,
    payments: HashMap<WeddingId, Vec<Payment>>,
    active: Option<WeddingId>,
}

impl Planner {
    /// Build a planner around an externally-constructed bus.
    pub fn new(bus: PlannerBus) -> Self {
        Self {
            bus,
            weddings: HashMap::new(),
            calendars: HashMap::new(),
            payments: HashMap::new(),
            active: None,
        }
    }

    pub fn bus(&self) -> &PlannerBus {
        &self.bus
    }

    pub fn add_wedding(&mut self, wedding: Wedding) -> WeddingId {
        let id = *vowplan_core::Entity::id(&wedding);
        self.calendars.entry(id).or_insert_with(WeddingCalendar::new);
        self.payments.entry(id).or_default();
        self.weddings.insert(id, wedding);
        id
    }

    pub fn wedding(&self, id: WeddingId) -> Option<&Wedding> {
        self.weddings.get(&id)
    }

    pub fn weddings(&self) -> impl Iterator<Item = &Wedding> {
        self.weddings.values()
    }

    pub fn active_wedding(&self) -> Option<WeddingId> {
        self.active
    }

    /// Make a wedding the active one and announce the switch.
    pub fn select_wedding(&mut self, id: WeddingId) -> Result<(), PlannerError> {
        if !self.weddings.contains_key(&id) {
            return Err(PlannerError::UnknownWedding(id));
        }
        self.active = Some(id);
        self.bus.publish(&PlannerEvent::WeddingSelected(id));
        Ok(())
    }

    pub fn events(&self, wedding_id: WeddingId) -> &[CalendarEvent] {
        self.calendars
            .get(&wedding_id)
            .map_or(&[], |c| c.events.as_slice())
    }

    /// Calendar-cell highlighting: does this day have at least one event?
    pub fn day_has_events(&self, wedding_id: WeddingId, day: chrono::NaiveDate) -> bool {
        self.calendars
            .get(&wedding_id)
            .is_some_and(|c| c.day_index.contains(day))
    }

    /// Chronological command history for one wedding's calendar.
    pub fn history(&self, wedding_id: WeddingId) -> Vec<HistoryEntry<CalendarEvent>> {
        self.calendars
            .get(&wedding_id)
            .map(|c| c.invoker.history())
            .unwrap_or_default()
    }

    /// Validate and store a new event, then announce it.
    pub fn save_event(&mut self, draft: EventDraft) -> Result<CalendarEvent, PlannerError> {
        let event = draft.build()?;
        let calendar = self.calendar_mut(event.wedding_id)?;
        calendar.run(ADD_EVENT, event.clone())?;
        tracing::info!(event = %event.id, wedding = %event.wedding_id, "event created");
        self.bus.publish(&PlannerEvent::EventCreated(event.clone()));
        Ok(event)
    }

    /// Replace an existing event, then announce the edit.
    pub fn update_event(&mut self, event: CalendarEvent) -> Result<(), PlannerError> {
        let calendar = self.calendar_mut(event.wedding_id)?;
        calendar.run(UPDATE_EVENT, event.clone())?;
        tracing::info!(event = %event.id, wedding = %event.wedding_id, "event updated");
        self.bus.publish(&PlannerEvent::EventUpdated(event));
        Ok(())
    }

    /// Remove an event, then announce the removal.
    pub fn delete_event(&mut self, event: CalendarEvent) -> Result<(), PlannerError> {
        let calendar = self.calendar_mut(event.wedding_id)?;
        calendar.run(DELETE_EVENT, event.clone())?;
        tracing::info!(event = %event.id, wedding = %event.wedding_id, "event deleted");
        self.bus.publish(&PlannerEvent::EventDeleted(event));
        Ok(())
    }

    /// Undo the most recent calendar command for one wedding.
    ///
    /// No bus event is published for undos; consumers treat the next refresh
    /// as authoritative.
    pub fn undo_event_command(&mut self, wedding_id: WeddingId) -> Result<UndoOutcome, PlannerError> {
        let calendar = self.calendar_mut(wedding_id)?;
        let events = std::mem::take(&mut calendar.events);
        let (events, outcome) = calendar.invoker.undo(events);
        calendar.events = events;
        calendar.day_index.rebuild(&calendar.events);
        Ok(outcome)
    }

    pub fn add_payment(&mut self, payment: Payment) -> Result<(), PlannerError> {
        let wedding_id = payment.wedding_id();
        if !self.weddings.contains_key(&wedding_id) {
            return Err(PlannerError::UnknownWedding(wedding_id));
        }
        self.payments.entry(wedding_id).or_default().push(payment);
        Ok(())
    }

    pub fn payments(&self, wedding_id: WeddingId) -> &[Payment] {
        self.payments.get(&wedding_id).map_or(&[], Vec::as_slice)
    }

    fn calendar_mut(&mut self, wedding_id: WeddingId) -> Result<&mut WeddingCalendar, PlannerError> {
        self.calendars
            .get_mut(&wedding_id)
            .ok_or(PlannerError::UnknownWedding(wedding_id))
    }
}
