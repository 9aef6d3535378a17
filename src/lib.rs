//! Bill Acceptor: a total Mealy state machine for currency bill acceptors
//!
//! The device moves through five states in response to seven payload-free
//! events. Every (state, event) pair has a defined reaction, checked by the
//! compiler: either a transition that performs exactly one action, or a
//! rejection that leaves the state untouched.
//!
//! # Core Concepts
//!
//! - **State / Event**: closed enums declared with [`state_enum!`] and
//!   [`event_enum!`]
//! - **Reaction table**: the pure function [`acceptor::react`]
//! - **Handler**: an injected [`acceptor::ActionHandler`] performs effects
//! - **History**: bounded in-memory record of fired transitions
//!
//! # Example
//!
//! ```rust
//! use bill_acceptor::acceptor::{AcceptorEvent, AcceptorState, BillAcceptor, Outcome, Recorder, Rejection};
//!
//! let mut acceptor = BillAcceptor::new(Recorder::new());
//!
//! acceptor.dispatch(AcceptorEvent::InitOk);
//! acceptor.dispatch(AcceptorEvent::Enable);
//! acceptor.dispatch(AcceptorEvent::BillIn);
//!
//! let outcome = acceptor.dispatch(AcceptorEvent::BillIn);
//! assert_eq!(
//!     outcome,
//!     Outcome::Rejected { state: AcceptorState::InEscrow, rejection: Rejection::EscrowOccupied }
//! );
//! assert_eq!(acceptor.current_state(), AcceptorState::InEscrow);
//! ```

pub mod acceptor;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
mod macros;

// Re-export commonly used types
pub use acceptor::{AcceptorEvent, AcceptorState, ActionHandler, BillAcceptor, Outcome};
pub use config::AcceptorConfig;
pub use crate::core::{Event, State, StateHistory, StateTransition};
pub use error::{CommandError, ConfigError};
