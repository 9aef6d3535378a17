//! State transition history tracking.
//!
//! Keeps an ordered, optionally bounded record of the transitions a
//! machine has fired. History lives in memory only.

use super::event::Event;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use bill_acceptor::acceptor::{AcceptorEvent, AcceptorState};
/// use bill_acceptor::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: AcceptorState::Setup,
///     to: AcceptorState::Disabled,
///     event: AcceptorEvent::InitOk,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, AcceptorState::Disabled);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Event> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that fired the transition
    pub event: E,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// An unbounded history keeps every record. A bounded history keeps the
/// most recent `limit` records and evicts the oldest first; the total
/// number of transitions ever recorded is tracked separately.
///
/// # Example
///
/// ```rust
/// use bill_acceptor::acceptor::{AcceptorEvent, AcceptorState};
/// use bill_acceptor::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: AcceptorState::Setup,
///     to: AcceptorState::Disabled,
///     event: AcceptorEvent::InitOk,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: AcceptorState::Disabled,
///     to: AcceptorState::Enabled,
///     event: AcceptorEvent::Enable,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Setup -> Disabled -> Enabled
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Event> {
    transitions: VecDeque<StateTransition<S, E>>,
    limit: Option<usize>,
    total_recorded: u64,
}

impl<S: State, E: Event> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event> StateHistory<S, E> {
    /// Create a new empty, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
            total_recorded: 0,
        }
    }

    /// Create a new empty history that retains at most `limit` records.
    ///
    /// A limit of zero keeps nothing but still counts recorded transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(1024)),
            limit: Some(limit),
            total_recorded: 0,
        }
    }

    /// Record a transition, evicting the oldest record when full.
    pub fn record(&mut self, transition: StateTransition<S, E>) {
        self.total_recorded += 1;
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed by the retained records.
    ///
    /// Returns the `from` state of the oldest retained record followed by
    /// the `to` state of every record, oldest first.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained records.
    ///
    /// Returns `None` if nothing is retained.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Iterate retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S, E>> + '_ {
        self.transitions.iter()
    }

    /// Most recently recorded transition, if retained.
    pub fn last(&self) -> Option<&StateTransition<S, E>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Retention limit, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Number of transitions ever recorded, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }
}
