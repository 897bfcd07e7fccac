//! Calendar domain: events scheduled against a wedding.
//!
//! Contains the event model, the three command reducers driving all event
//! mutations, and the day-membership helpers used to highlight calendar
//! cells. No IO, no rendering.

pub mod commands;
pub mod event;
pub mod schedule;

pub use commands::{
    ADD_EVENT, AddEvent, DELETE_EVENT, DeleteEvent, EventCommands, UPDATE_EVENT, UpdateEvent,
    event_commands,
};
pub use event::{CalendarEvent, EventDraft, EventKind};
pub use schedule::{DayIndex, day_has_events};
