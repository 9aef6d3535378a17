//! Side-effect handlers injected into the machine.
//!
//! The machine decides *what* happens; a handler decides *how* it shows up
//! in the world. Swapping the handler is how tests observe the machine
//! without touching a console.

use super::model::{AcceptorEvent, AcceptorState, Action, Rejection};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// What a transition action gets to know about the transition it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionContext {
    pub from: AcceptorState,
    pub to: AcceptorState,
    pub event: AcceptorEvent,
}

impl TransitionContext {
    /// True when the transition leaves escrow without accepting the bill
    /// through the normal accept/reject decision.
    pub fn abandons_escrow(&self) -> bool {
        self.from == AcceptorState::InEscrow && self.event == AcceptorEvent::Disable
    }
}

/// Capability the machine uses to perform effects.
///
/// Implementations must not dispatch further events from inside a
/// callback; the machine hands out no access to itself while calling.
pub trait ActionHandler {
    /// Perform the action of a firing transition. Called exactly once per
    /// transition, before the state changes.
    fn perform(&mut self, action: Action, context: &TransitionContext);

    /// Report an event refused in `state`.
    fn rejected(&mut self, state: AcceptorState, event: AcceptorEvent, rejection: Rejection);
}

impl<H: ActionHandler + ?Sized> ActionHandler for &mut H {
    fn perform(&mut self, action: Action, context: &TransitionContext) {
        (**self).perform(action, context);
    }

    fn rejected(&mut self, state: AcceptorState, event: AcceptorEvent, rejection: Rejection) {
        (**self).rejected(state, event, rejection);
    }
}

impl<H: ActionHandler + ?Sized> ActionHandler for Box<H> {
    fn perform(&mut self, action: Action, context: &TransitionContext) {
        (**self).perform(action, context);
    }

    fn rejected(&mut self, state: AcceptorState, event: AcceptorEvent, rejection: Rejection) {
        (**self).rejected(state, event, rejection);
    }
}

/// Operator-facing text for the device, written line by line.
pub struct ConsoleHandler<W: Write> {
    out: W,
}

impl ConsoleHandler<io::Stdout> {
    /// Console writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleHandler<W> {
    /// Console writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn lines(&mut self, lines: &[&str]) {
        let result = lines
            .iter()
            .try_for_each(|line| writeln!(self.out, "{line}"))
            .and_then(|()| self.out.flush());
        if let Err(error) = result {
            tracing::warn!(%error, "failed to write operator output");
        }
    }
}

/// Text printed for each action.
pub fn action_lines(action: Action) -> &'static [&'static str] {
    match action {
        Action::EnableDevice => &["* Enabling device..."],
        Action::DisableDevice => &["* Disabling device..."],
        Action::AnnounceBill => &[
            "Validating bill...",
            "Bill is valid with value 5€",
            "* You should accept or reject the bill inside",
        ],
        Action::AcceptBill => &["Accepting bill ..."],
        Action::RejectBill => &["Rejecting bill ..."],
        Action::ConfirmStacked => &["Bill stacked"],
    }
}

impl<W: Write> ActionHandler for ConsoleHandler<W> {
    fn perform(&mut self, action: Action, context: &TransitionContext) {
        if context.abandons_escrow() {
            self.lines(&["Reject note"]);
        }
        self.lines(action_lines(action));
    }

    fn rejected(&mut self, _state: AcceptorState, _event: AcceptorEvent, rejection: Rejection) {
        let message = rejection.to_string();
        self.lines(&[message.as_str()]);
    }
}

/// One callback observed by a [`Recorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    Performed {
        action: Action,
        context: TransitionContext,
    },
    Rejected {
        state: AcceptorState,
        event: AcceptorEvent,
        rejection: Rejection,
    },
}

/// Handler that records every callback instead of acting on it.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Vec<Call>,
}

impl Recorder {
    /// Create a recorder with no calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every callback received so far, in order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Actions performed so far, in order.
    pub fn actions(&self) -> Vec<Action> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Performed { action, .. } => Some(*action),
                Call::Rejected { .. } => None,
            })
            .collect()
    }

    /// Rejections reported so far, in order.
    pub fn rejections(&self) -> Vec<Rejection> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Rejected { rejection, .. } => Some(*rejection),
                Call::Performed { .. } => None,
            })
            .collect()
    }

    /// Forget all recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ActionHandler for Recorder {
    fn perform(&mut self, action: Action, context: &TransitionContext) {
        self.calls.push(Call::Performed {
            action,
            context: *context,
        });
    }

    fn rejected(&mut self, state: AcceptorState, event: AcceptorEvent, rejection: Rejection) {
        self.calls.push(Call::Rejected {
            state,
            event,
            rejection,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(from: AcceptorState, to: AcceptorState, event: AcceptorEvent) -> TransitionContext {
        TransitionContext { from, to, event }
    }

    fn output(handler: ConsoleHandler<Vec<u8>>) -> String {
        String::from_utf8(handler.into_inner()).unwrap()
    }

    #[test]
    fn console_prints_action_text() {
        let mut handler = ConsoleHandler::new(Vec::new());
        handler.perform(
            Action::AnnounceBill,
            &ctx(
                AcceptorState::Enabled,
                AcceptorState::InEscrow,
                AcceptorEvent::BillIn,
            ),
        );

        assert_eq!(
            output(handler),
            "Validating bill...\nBill is valid with value 5€\n* You should accept or reject the bill inside\n"
        );
    }

    #[test]
    fn console_announces_abandoned_escrow_before_disabling() {
        let mut handler = ConsoleHandler::new(Vec::new());
        handler.perform(
            Action::DisableDevice,
            &ctx(
                AcceptorState::InEscrow,
                AcceptorState::Disabled,
                AcceptorEvent::Disable,
            ),
        );

        assert_eq!(output(handler), "Reject note\n* Disabling device...\n");
    }

    #[test]
    fn console_plain_disable_has_no_note_line() {
        let mut handler = ConsoleHandler::new(Vec::new());
        handler.perform(
            Action::DisableDevice,
            &ctx(
                AcceptorState::Enabled,
                AcceptorState::Disabled,
                AcceptorEvent::Disable,
            ),
        );

        assert_eq!(output(handler), "* Disabling device...\n");
    }

    #[test]
    fn console_prints_rejection_reason() {
        let mut handler = ConsoleHandler::new(Vec::new());
        handler.rejected(
            AcceptorState::Enabled,
            AcceptorEvent::Enable,
            Rejection::AlreadyEnabled,
        );

        assert_eq!(output(handler), "The device is already enabled\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn console_swallows_write_errors() {
        let mut handler = ConsoleHandler::new(BrokenPipe);
        handler.rejected(
            AcceptorState::Setup,
            AcceptorEvent::Enable,
            Rejection::Initializing,
        );
        handler.perform(
            Action::EnableDevice,
            &ctx(
                AcceptorState::Disabled,
                AcceptorState::Enabled,
                AcceptorEvent::Enable,
            ),
        );
    }

    #[test]
    fn recorder_splits_actions_and_rejections() {
        let mut recorder = Recorder::new();
        recorder.rejected(
            AcceptorState::Setup,
            AcceptorEvent::Accept,
            Rejection::Initializing,
        );
        recorder.perform(
            Action::DisableDevice,
            &ctx(
                AcceptorState::Setup,
                AcceptorState::Disabled,
                AcceptorEvent::InitOk,
            ),
        );

        assert_eq!(recorder.calls().len(), 2);
        assert_eq!(recorder.actions(), vec![Action::DisableDevice]);
        assert_eq!(recorder.rejections(), vec![Rejection::Initializing]);

        recorder.clear();
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn every_action_has_text() {
        for &action in Action::ALL {
            assert!(!action_lines(action).is_empty(), "{action}");
        }
    }
}
