//! The reaction table.
//!
//! `react` is total over every (state, event) pair. It deliberately has no
//! wildcard arm: adding a state or an event stops compiling until every
//! new cell has an answer.

use super::model::{AcceptorEvent, AcceptorState, Action, Rejection};
use serde::{Deserialize, Serialize};

/// Outcome of one cell of the reaction table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    /// Run `action`, then make `to` the current state.
    Transition { to: AcceptorState, action: Action },

    /// Leave the state untouched and report why.
    Reject(Rejection),
}

impl Reaction {
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transition { .. })
    }

    /// Target state, `None` for a rejection.
    pub fn target(&self) -> Option<AcceptorState> {
        match self {
            Self::Transition { to, .. } => Some(*to),
            Self::Reject(_) => None,
        }
    }
}

const fn go(to: AcceptorState, action: Action) -> Reaction {
    Reaction::Transition { to, action }
}

/// Look up the reaction of `state` to `event`. Pure and deterministic.
///
/// # Example
///
/// ```rust
/// use bill_acceptor::acceptor::{react, AcceptorEvent, AcceptorState, Action, Reaction, Rejection};
///
/// assert_eq!(
///     react(AcceptorState::Setup, AcceptorEvent::InitOk),
///     Reaction::Transition { to: AcceptorState::Disabled, action: Action::DisableDevice },
/// );
/// assert_eq!(
///     react(AcceptorState::Enabled, AcceptorEvent::Enable),
///     Reaction::Reject(Rejection::AlreadyEnabled),
/// );
/// ```
pub const fn react(state: AcceptorState, event: AcceptorEvent) -> Reaction {
    use AcceptorEvent as E;
    use AcceptorState as S;
    use Rejection::*;

    match state {
        S::Setup => match event {
            E::InitOk => go(S::Disabled, Action::DisableDevice),
            E::BillIn => Reaction::Reject(ReturnNote),
            E::Enable | E::Disable | E::Accept | E::Reject | E::Stacked => {
                Reaction::Reject(Initializing)
            }
        },
        S::Disabled => match event {
            E::Enable => go(S::Enabled, Action::EnableDevice),
            E::Disable => Reaction::Reject(AlreadyDisabled),
            E::InitOk | E::BillIn | E::Accept | E::Reject | E::Stacked => {
                Reaction::Reject(NotAllowed)
            }
        },
        S::Enabled => match event {
            E::Disable => go(S::Disabled, Action::DisableDevice),
            E::BillIn => go(S::InEscrow, Action::AnnounceBill),
            E::Enable => Reaction::Reject(AlreadyEnabled),
            E::InitOk | E::Accept | E::Reject | E::Stacked => Reaction::Reject(NotAllowed),
        },
        S::InEscrow => match event {
            // Disabling abandons the held bill.
            E::Disable => go(S::Disabled, Action::DisableDevice),
            E::Accept => go(S::Stacking, Action::AcceptBill),
            E::Reject => go(S::Enabled, Action::RejectBill),
            E::Enable => Reaction::Reject(BillInEscrow),
            E::BillIn => Reaction::Reject(EscrowOccupied),
            E::InitOk | E::Stacked => Reaction::Reject(NotAllowed),
        },
        S::Stacking => match event {
            E::Stacked => go(S::Enabled, Action::ConfirmStacked),
            E::InitOk | E::Enable | E::Disable | E::BillIn | E::Accept | E::Reject => {
                Reaction::Reject(NotAllowed)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AcceptorEvent as E;
    use AcceptorState as S;

    fn transitions() -> Vec<(S, E, S, Action)> {
        vec![
            (S::Setup, E::InitOk, S::Disabled, Action::DisableDevice),
            (S::Disabled, E::Enable, S::Enabled, Action::EnableDevice),
            (S::Enabled, E::Disable, S::Disabled, Action::DisableDevice),
            (S::Enabled, E::BillIn, S::InEscrow, Action::AnnounceBill),
            (S::InEscrow, E::Disable, S::Disabled, Action::DisableDevice),
            (S::InEscrow, E::Accept, S::Stacking, Action::AcceptBill),
            (S::InEscrow, E::Reject, S::Enabled, Action::RejectBill),
            (S::Stacking, E::Stacked, S::Enabled, Action::ConfirmStacked),
        ]
    }

    #[test]
    fn transition_cells_match_table() {
        for (from, event, to, action) in transitions() {
            assert_eq!(
                react(from, event),
                Reaction::Transition { to, action },
                "{from} + {event}"
            );
        }
    }

    #[test]
    fn every_other_cell_rejects() {
        let transitions = transitions();
        let mut rejects = 0;
        for &state in S::ALL {
            for &event in E::ALL {
                let fires = transitions
                    .iter()
                    .any(|(from, ev, _, _)| *from == state && *ev == event);
                assert_eq!(react(state, event).is_transition(), fires, "{state} + {event}");
                if !fires {
                    rejects += 1;
                }
            }
        }
        assert_eq!(rejects, 35 - 8);
    }

    #[test]
    fn specific_rejection_reasons() {
        assert_eq!(react(S::Setup, E::BillIn), Reaction::Reject(Rejection::ReturnNote));
        assert_eq!(react(S::Setup, E::Enable), Reaction::Reject(Rejection::Initializing));
        assert_eq!(
            react(S::Disabled, E::Disable),
            Reaction::Reject(Rejection::AlreadyDisabled)
        );
        assert_eq!(
            react(S::Enabled, E::Enable),
            Reaction::Reject(Rejection::AlreadyEnabled)
        );
        assert_eq!(
            react(S::InEscrow, E::Enable),
            Reaction::Reject(Rejection::BillInEscrow)
        );
        assert_eq!(
            react(S::InEscrow, E::BillIn),
            Reaction::Reject(Rejection::EscrowOccupied)
        );
        assert_eq!(
            react(S::Stacking, E::Accept),
            Reaction::Reject(Rejection::NotAllowed)
        );
    }

    #[test]
    fn init_ok_only_leaves_setup() {
        for &state in S::ALL {
            let reaction = react(state, E::InitOk);
            assert_eq!(reaction.is_transition(), state == S::Setup, "{state}");
        }
    }

    #[test]
    fn stacking_is_only_entered_from_escrow_accept() {
        for &state in S::ALL {
            for &event in E::ALL {
                if react(state, event).target() == Some(S::Stacking) {
                    assert_eq!((state, event), (S::InEscrow, E::Accept));
                }
            }
        }
    }

    #[test]
    fn reaction_is_deterministic() {
        for &state in S::ALL {
            for &event in E::ALL {
                assert_eq!(react(state, event), react(state, event));
            }
        }
    }
}
