//! Named command registry with invocation history.
//!
//! UI code invokes logical operations ("add", "update", "delete") by name
//! instead of holding mutation closures. Commands are **pure reducers**: they
//! take the current state and a payload and return the next state, so the
//! invoker captures no mutable references — the caller owns the state and
//! threads it through every call.

use std::collections::HashMap;

use thiserror::Error;

/// Command-layer error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// `execute` was asked for a name nothing is registered under. This is
    /// fatal to the calling operation: the caller must not continue as if the
    /// edit succeeded.
    #[error("command {0:?} not found")]
    NotFound(String),
}

/// Outcome of a reducer's attempt to revert a prior execution.
#[derive(Debug)]
pub enum Revert<S> {
    /// The command produced the reverted state.
    Applied(S),
    /// The command has no revert capability; the state passes through
    /// untouched.
    Unsupported(S),
}

/// Result of [`CommandInvoker::undo`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// History was empty; nothing to undo (not an error).
    Nothing,
    /// The most recent entry was reverted.
    Undone,
    /// The most recent entry could not be reverted (command unregistered or
    /// without a revert). The entry has been discarded regardless.
    Unsupported,
}

/// A named, stateless operation over a caller-owned state.
pub trait Command<S>: Send + Sync {
    type Payload: Clone + core::fmt::Debug + Send + Sync;

    /// Produce the next state from the current one.
    fn execute(&self, state: S, payload: &Self::Payload) -> S;

    /// Attempt to invert a prior [`Command::execute`] with the same payload.
    ///
    /// Default: no revert capability.
    fn revert(&self, state: S, _payload: &Self::Payload) -> Revert<S> {
        Revert::Unsupported(state)
    }
}

/// One executed invocation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry<P> {
    pub name: String,
    pub payload: P,
}

/// Registry of named commands plus a linear, append-only invocation history.
pub struct CommandInvoker<S, P>
where
    P: Clone + core::fmt::Debug + Send + Sync,
{
    commands: HashMap<String, Box<dyn Command<S, Payload = P>>>,
    history: Vec<HistoryEntry<P>>,
}

impl<S, P> core::fmt::Debug for CommandInvoker<S, P>
where
    P: Clone + core::fmt::Debug + Send + Sync,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandInvoker")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl<S, P> Default for CommandInvoker<S, P>
where
    P: Clone + core::fmt::Debug + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P> CommandInvoker<S, P>
where
    P: Clone + core::fmt::Debug + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Bind `command` to `name`. Re-registering a name overwrites the
    /// previous binding (last write wins).
    pub fn register(&mut self, name: impl Into<String>, command: Box<dyn Command<S, Payload = P>>) {
        self.commands.insert(name.into(), command);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Execute the command registered under `name` and append one history
    /// entry.
    ///
    /// An unknown name fails with [`CommandError::NotFound`] and appends
    /// nothing.
    pub fn execute(&mut self, name: &str, state: S, payload: P) -> Result<S, CommandError> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))?;

        let next = command.execute(state, &payload);
        self.history.push(HistoryEntry {
            name: name.to_string(),
            payload,
        });
        tracing::debug!(command = name, history_len = self.history.len(), "command executed");
        Ok(next)
    }

    /// Pop the most recent invocation and ask its command to revert it.
    ///
    /// The popped entry is discarded even when the revert is unsupported, so
    /// a failed undo cannot be retried.
    pub fn undo(&mut self, state: S) -> (S, UndoOutcome) {
        let Some(entry) = self.history.pop() else {
            return (state, UndoOutcome::Nothing);
        };

        let Some(command) = self.commands.get(&entry.name) else {
            tracing::warn!(command = %entry.name, "undo target is no longer registered");
            return (state, UndoOutcome::Unsupported);
        };

        match command.revert(state, &entry.payload) {
            Revert::Applied(next) => (next, UndoOutcome::Undone),
            Revert::Unsupported(state) => (state, UndoOutcome::Unsupported),
        }
    }

    /// Defensive copy of the history, in chronological order.
    pub fn history(&self) -> Vec<HistoryEntry<P>> {
        self.history.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test state: a running total; payloads are deltas.
    struct AddDelta;

    impl Command<i64> for AddDelta {
        type Payload = i64;

        fn execute(&self, state: i64, payload: &i64) -> i64 {
            state + payload
        }

        fn revert(&self, state: i64, payload: &i64) -> Revert<i64> {
            Revert::Applied(state - payload)
        }
    }

    /// Doubles the total; irreversible (the reducer has no prior snapshot).
    struct DoubleTotal;

    impl Command<i64> for DoubleTotal {
        type Payload = i64;

        fn execute(&self, state: i64, _payload: &i64) -> i64 {
            state * 2
        }
    }

    fn invoker() -> CommandInvoker<i64, i64> {
        let mut invoker = CommandInvoker::new();
        invoker.register("add", Box::new(AddDelta));
        invoker.register("double", Box::new(DoubleTotal));
        invoker
    }

    #[test]
    fn execute_applies_reducer_and_records_history() {
        let mut invoker = invoker();
        let state = invoker.execute("add", 0, 5).unwrap();
        assert_eq!(state, 5);
        assert_eq!(
            invoker.history(),
            vec![HistoryEntry {
                name: "add".to_string(),
                payload: 5
            }]
        );
    }

    #[test]
    fn unknown_name_fails_and_appends_nothing() {
        let mut invoker = invoker();
        let err = invoker.execute("subtract", 0, 5).unwrap_err();
        assert_eq!(err, CommandError::NotFound("subtract".to_string()));
        assert!(invoker.history().is_empty());
    }

    #[test]
    fn reregistering_a_name_overwrites() {
        let mut invoker = invoker();
        invoker.register("add", Box::new(DoubleTotal));
        let state = invoker.execute("add", 3, 100).unwrap();
        assert_eq!(state, 6);
    }

    #[test]
    fn history_copy_is_defensive() {
        let mut invoker = invoker();
        invoker.execute("add", 0, 1).unwrap();
        let mut copy = invoker.history();
        copy.clear();
        assert_eq!(invoker.history().len(), 1);
    }

    #[test]
    fn undo_with_empty_history_is_a_noop() {
        let mut invoker = invoker();
        let (state, outcome) = invoker.undo(42);
        assert_eq!(state, 42);
        assert_eq!(outcome, UndoOutcome::Nothing);
    }

    #[test]
    fn undo_reverts_the_most_recent_entry() {
        let mut invoker = invoker();
        let state = invoker.execute("add", 0, 5).unwrap();
        let state = invoker.execute("add", state, 7).unwrap();

        let (state, outcome) = invoker.undo(state);
        assert_eq!(outcome, UndoOutcome::Undone);
        assert_eq!(state, 5);
        assert_eq!(invoker.history().len(), 1);
    }

    #[test]
    fn unsupported_undo_discards_the_entry() {
        let mut invoker = invoker();
        let state = invoker.execute("double", 4, 0).unwrap();
        let (state, outcome) = invoker.undo(state);
        assert_eq!(outcome, UndoOutcome::Unsupported);
        assert_eq!(state, 8);
        // The entry is gone: a second undo finds empty history.
        assert_eq!(invoker.undo(state).1, UndoOutcome::Nothing);
    }
}
