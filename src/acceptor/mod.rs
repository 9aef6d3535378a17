//! The bill acceptor state machine.
//!
//! A Mealy machine over a closed set of states and events:
//!
//! - `model`: states, events, actions and rejection reasons
//! - `reaction`: the total reaction table as a pure function
//! - `handler`: the injected side-effect capability
//! - `machine`: the dispatcher owning the current state
//!
//! ```text
//! Setup --InitOk--> Disabled <--Disable-- Enabled --BillIn--> InEscrow
//!                      |                   ^  ^                 |  |
//!                      +------Enable-------+  +-----Reject------+  |
//!                                             |                    Accept
//!                                             +--Stacked-- Stacking <+
//! ```
//!
//! `InEscrow --Disable--> Disabled` abandons the held bill.

mod handler;
mod machine;
mod model;
mod reaction;

pub use handler::{action_lines, ActionHandler, Call, ConsoleHandler, Recorder, TransitionContext};
pub use machine::{BillAcceptor, Outcome};
pub use model::{AcceptorEvent, AcceptorState, Action, Rejection};
pub use reaction::{react, Reaction};
