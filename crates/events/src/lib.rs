//! In-process coordination mechanisms: event bus + command invoker.
//!
//! Two small collaborating pieces decouple domain mutations from the views
//! that react to them:
//!
//! - [`EventBus`]: synchronous publish/subscribe fan-out of a closed,
//!   strongly-typed event union, keyed by topic. No global instance; buses
//!   are constructed explicitly and handed to consumers.
//! - [`CommandInvoker`]: a named registry of pure-reducer commands over a
//!   caller-owned state, with a linear invocation history and single-step
//!   undo.
//!
//! Neither mechanism persists anything; the calling layer owns the state and
//! is responsible for syncing it to a backing store.

pub mod bus;
pub mod command;

pub use bus::{EventBus, Message, SubscriberId, Subscription};
pub use command::{Command, CommandError, CommandInvoker, HistoryEntry, Revert, UndoOutcome};
