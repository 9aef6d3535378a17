//! States, events, actions and rejection reasons of the bill acceptor.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

crate::event_enum! {
    /// Signals the acceptor reacts to.
    pub enum AcceptorEvent {
        /// Power-on self test finished.
        InitOk,
        Enable,
        Disable,
        /// A bill was inserted into the slot.
        BillIn,
        /// Keep the bill held in escrow.
        Accept,
        /// Hand the bill held in escrow back.
        Reject,
        /// The bill reached the cash box.
        Stacked,
    }
}

crate::state_enum! {
    /// Operational modes of the acceptor. Exactly one is active at a time.
    pub enum AcceptorState {
        Setup,
        Enabled,
        Disabled,
        /// Holding a bill pending an accept or reject decision.
        InEscrow,
        /// Moving an accepted bill into the cash box.
        Stacking,
    }
}

impl Default for AcceptorState {
    fn default() -> Self {
        Self::Setup
    }
}

/// Side effect performed exactly once when a transition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    EnableDevice,
    DisableDevice,
    /// Validate the inserted bill and announce its value.
    AnnounceBill,
    AcceptBill,
    RejectBill,
    ConfirmStacked,
}

impl Action {
    pub const ALL: &'static [Self] = &[
        Self::EnableDevice,
        Self::DisableDevice,
        Self::AnnounceBill,
        Self::AcceptBill,
        Self::RejectBill,
        Self::ConfirmStacked,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::EnableDevice => "EnableDevice",
            Self::DisableDevice => "DisableDevice",
            Self::AnnounceBill => "AnnounceBill",
            Self::AcceptBill => "AcceptBill",
            Self::RejectBill => "RejectBill",
            Self::ConfirmStacked => "ConfirmStacked",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why an event was refused in the current state.
///
/// Refusals are ordinary outcomes, never propagated: the display text is
/// the diagnostic shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("The device is initializing, cannot perform it at the moment")]
    Initializing,

    /// A bill arrived before initialization finished and is handed back.
    #[error("Reject the note inside")]
    ReturnNote,

    #[error("Cannot perform it at the moment")]
    NotAllowed,

    #[error("The device is already enabled")]
    AlreadyEnabled,

    #[error("The device is already disabled")]
    AlreadyDisabled,

    #[error("The device is already enabled and has a bill in escrow")]
    BillInEscrow,

    #[error("Cannot perform it at this moment. Already has a bill in escrow")]
    EscrowOccupied,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, State};
    use std::collections::HashSet;

    #[test]
    fn closed_sets_have_expected_sizes() {
        assert_eq!(AcceptorEvent::ALL.len(), 7);
        assert_eq!(AcceptorState::ALL.len(), 5);
        assert_eq!(Action::ALL.len(), 6);
    }

    #[test]
    fn initial_state_is_setup() {
        assert_eq!(AcceptorState::default(), AcceptorState::Setup);
    }

    #[test]
    fn no_state_is_terminal() {
        for state in AcceptorState::ALL {
            assert!(!state.is_final(), "{state} must not be final");
            assert!(!state.is_error(), "{state} must not be an error state");
        }
    }

    #[test]
    fn names_match_variants() {
        assert_eq!(AcceptorEvent::BillIn.name(), "BillIn");
        assert_eq!(AcceptorState::InEscrow.name(), "InEscrow");
        assert_eq!(Action::ConfirmStacked.to_string(), "ConfirmStacked");
    }

    #[test]
    fn rejection_messages_are_distinct() {
        let all = [
            Rejection::Initializing,
            Rejection::ReturnNote,
            Rejection::NotAllowed,
            Rejection::AlreadyEnabled,
            Rejection::AlreadyDisabled,
            Rejection::BillInEscrow,
            Rejection::EscrowOccupied,
        ];
        let messages: HashSet<String> = all.iter().map(ToString::to_string).collect();
        assert_eq!(messages.len(), all.len());
    }

    #[test]
    fn events_serialize_by_name() {
        let json = serde_json::to_string(&AcceptorEvent::Stacked).unwrap();
        assert_eq!(json, "\"Stacked\"");
    }
}
