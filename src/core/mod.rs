//! Core state machine vocabulary.
//!
//! This module contains the domain-independent building blocks:
//! - State definitions via the `State` trait
//! - Signals via the `Event` trait
//! - Bounded in-memory history of fired transitions
//!
//! Nothing in here performs I/O.

mod event;
mod history;
mod state;

pub use event::Event;
pub use history::{StateHistory, StateTransition};
pub use state::State;
