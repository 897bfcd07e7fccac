//! Command reducers over a wedding's event collection.
//!
//! All calendar mutations go through these three commands via a
//! [`CommandInvoker`], so the UI invokes them by name and the invocation
//! history stays complete.

use vowplan_events::{Command, CommandInvoker, Revert};

use crate::event::CalendarEvent;

/// Registered name of [`AddEvent`].
pub const ADD_EVENT: &str = "add";
/// Registered name of [`UpdateEvent`].
pub const UPDATE_EVENT: &str = "update";
/// Registered name of [`DeleteEvent`].
pub const DELETE_EVENT: &str = "delete";

/// Invoker wired with the three calendar commands.
pub type EventCommands = CommandInvoker<Vec<CalendarEvent>, CalendarEvent>;

/// Build an invoker with `add`, `update` and `delete` registered.
pub fn event_commands() -> EventCommands {
    let mut invoker = CommandInvoker::new();
    invoker.register(ADD_EVENT, Box::new(AddEvent));
    invoker.register(UPDATE_EVENT, Box::new(UpdateEvent));
    invoker.register(DELETE_EVENT, Box::new(DeleteEvent));
    invoker
}

/// Append the event to the collection.
///
/// Grows the collection by exactly one. Deliberately does **not** check for a
/// duplicate id; deduplication is not this layer's concern.
pub struct AddEvent;

impl Command<Vec<CalendarEvent>> for AddEvent {
    type Payload = CalendarEvent;

    fn execute(&self, mut events: Vec<CalendarEvent>, payload: &CalendarEvent) -> Vec<CalendarEvent> {
        events.push(payload.clone());
        events
    }

    fn revert(&self, mut events: Vec<CalendarEvent>, payload: &CalendarEvent) -> Revert<Vec<CalendarEvent>> {
        // Remove the last occurrence so undoing an add after a duplicate-id
        // add still removes exactly one element.
        match events.iter().rposition(|e| e.id == payload.id) {
            Some(index) => {
                events.remove(index);
                Revert::Applied(events)
            }
            None => Revert::Unsupported(events),
        }
    }
}

/// Replace the element whose id matches the payload's id.
///
/// Silent no-op when no element matches; tolerating already-processed
/// duplicate dispatches is intentional here.
pub struct UpdateEvent;

impl Command<Vec<CalendarEvent>> for UpdateEvent {
    type Payload = CalendarEvent;

    fn execute(&self, mut events: Vec<CalendarEvent>, payload: &CalendarEvent) -> Vec<CalendarEvent> {
        for event in &mut events {
            if event.id == payload.id {
                *event = payload.clone();
            }
        }
        events
    }

    // No revert: a pure reducer has no snapshot of the replaced element.
}

/// Remove the element whose id matches the payload's id. No-op if absent.
pub struct DeleteEvent;

impl Command<Vec<CalendarEvent>> for DeleteEvent {
    type Payload = CalendarEvent;

    fn execute(&self, mut events: Vec<CalendarEvent>, payload: &CalendarEvent) -> Vec<CalendarEvent> {
        events.retain(|e| e.id != payload.id);
        events
    }

    fn revert(&self, mut events: Vec<CalendarEvent>, payload: &CalendarEvent) -> Revert<Vec<CalendarEvent>> {
        // Re-appending restores membership but not the original position.
        events.push(payload.clone());
        Revert::Applied(events)
    }
}
