//! The dispatcher: owns the current state and applies the reaction table.

use super::handler::{ActionHandler, TransitionContext};
use super::model::{AcceptorEvent, AcceptorState, Action, Rejection};
use super::reaction::{react, Reaction};
use crate::config::AcceptorConfig;
use crate::core::{Event, State, StateHistory, StateTransition};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What a single dispatch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Transitioned {
        from: AcceptorState,
        to: AcceptorState,
        action: Action,
    },
    Rejected {
        state: AcceptorState,
        rejection: Rejection,
    },
}

impl Outcome {
    /// State current after the dispatch.
    pub fn state(&self) -> AcceptorState {
        match self {
            Self::Transitioned { to, .. } => *to,
            Self::Rejected { state, .. } => *state,
        }
    }

    /// True when the event was refused.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// A bill acceptor starting in [`AcceptorState::Setup`].
///
/// The current state is private; only [`BillAcceptor::dispatch`] changes it.
/// There is no internal locking: share it across threads behind a `Mutex`
/// around the whole machine.
///
/// # Example
///
/// ```rust
/// use bill_acceptor::acceptor::{AcceptorEvent, AcceptorState, Action, BillAcceptor, Recorder};
///
/// let mut acceptor = BillAcceptor::new(Recorder::new());
/// acceptor.dispatch(AcceptorEvent::InitOk);
/// acceptor.dispatch(AcceptorEvent::Enable);
/// acceptor.dispatch(AcceptorEvent::Enable);
///
/// assert_eq!(acceptor.current_state(), AcceptorState::Enabled);
/// assert_eq!(
///     acceptor.handler().actions(),
///     vec![Action::DisableDevice, Action::EnableDevice]
/// );
/// ```
pub struct BillAcceptor<H: ActionHandler> {
    current: AcceptorState,
    handler: H,
    history: StateHistory<AcceptorState, AcceptorEvent>,
}

impl<H: ActionHandler> BillAcceptor<H> {
    /// Create an acceptor with the default configuration.
    pub fn new(handler: H) -> Self {
        Self::with_config(handler, &AcceptorConfig::default())
    }

    /// Create an acceptor whose history follows `config`.
    pub fn with_config(handler: H, config: &AcceptorConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => StateHistory::with_limit(limit),
            None => StateHistory::new(),
        };
        Self {
            current: AcceptorState::Setup,
            handler,
            history,
        }
    }

    /// Deliver one event.
    ///
    /// Never fails: every state defines a reaction to every event. For a
    /// transition the action runs first, then the state is replaced.
    pub fn dispatch(&mut self, event: AcceptorEvent) -> Outcome {
        let from = self.current;
        match react(from, event) {
            Reaction::Reject(rejection) => {
                tracing::debug!(
                    state = from.name(),
                    event = event.name(),
                    %rejection,
                    "event rejected"
                );
                self.handler.rejected(from, event, rejection);
                Outcome::Rejected {
                    state: from,
                    rejection,
                }
            }
            Reaction::Transition { to, action } => {
                let context = TransitionContext { from, to, event };
                self.handler.perform(action, &context);
                self.current = to;
                self.history.record(StateTransition {
                    from,
                    to,
                    event,
                    timestamp: Utc::now(),
                });
                tracing::info!(
                    from = from.name(),
                    to = to.name(),
                    event = event.name(),
                    action = action.name(),
                    "transition"
                );
                Outcome::Transitioned { from, to, action }
            }
        }
    }

    /// The active state.
    pub fn current_state(&self) -> AcceptorState {
        self.current
    }

    /// Transitions fired so far, oldest first.
    pub fn history(&self) -> &StateHistory<AcceptorState, AcceptorEvent> {
        &self.history
    }

    /// Borrow the injected handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutably borrow the injected handler.
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consume the acceptor and give back its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }
}
