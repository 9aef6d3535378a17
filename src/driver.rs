//! Interactive shell feeding operator keystrokes into the acceptor.
//!
//! Each non-whitespace character of the input is one command. The shell
//! owns everything operator-facing that is not an action or a rejection:
//! the greeting, the key menu, command echo and invalid-input notices.

use crate::acceptor::{AcceptorEvent, ActionHandler, BillAcceptor};
use crate::config::AcceptorConfig;
use crate::error::CommandError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub const GREETING: &str = "> Welcome to Bill Acceptor";
pub const INVALID_INPUT: &str = "> Invalid input";

pub const MENU: &str = "\
i = Init Ok
e = Enable
d = Disable
n = Note is In
a = Accept bill
r = Reject bill
s = Stacked
q = Quit
";

/// One operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Dispatch(AcceptorEvent),
    Quit,
}

impl Command {
    /// Map one operator key to a command.
    pub fn from_key(key: char) -> Result<Self, CommandError> {
        let event = match key {
            'i' => AcceptorEvent::InitOk,
            'e' => AcceptorEvent::Enable,
            'd' => AcceptorEvent::Disable,
            'n' => AcceptorEvent::BillIn,
            'a' => AcceptorEvent::Accept,
            'r' => AcceptorEvent::Reject,
            's' => AcceptorEvent::Stacked,
            'q' => return Ok(Self::Quit),
            other => return Err(CommandError::Unknown(other)),
        };
        Ok(Self::Dispatch(event))
    }
}

/// Echo printed before an event is dispatched.
pub fn echo(event: AcceptorEvent) -> &'static str {
    match event {
        AcceptorEvent::InitOk => "Init ok",
        AcceptorEvent::Enable => "Enabling the bill acceptor",
        AcceptorEvent::Disable => "Disabling the bill acceptor",
        AcceptorEvent::BillIn => "Note is in",
        AcceptorEvent::Accept => "Accepting bill",
        AcceptorEvent::Reject => "Rejecting bill",
        AcceptorEvent::Stacked => "Stack item",
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    EndOfInput,
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub end: SessionEnd,
    pub dispatched: usize,
}

/// Read-dispatch loop over a line-oriented input.
#[derive(Debug, Clone)]
pub struct Driver {
    show_menu: bool,
}

impl Default for Driver {
    fn default() -> Self {
        Self { show_menu: true }
    }
}

impl Driver {
    /// Create a driver honoring the menu setting of `config`.
    pub fn new(config: &AcceptorConfig) -> Self {
        Self {
            show_menu: config.show_menu,
        }
    }

    /// Run until `q` or end of input.
    ///
    /// Only I/O on `input`/`output` can fail; dispatching cannot.
    pub fn run<R, W, H>(
        &self,
        input: R,
        output: &mut W,
        acceptor: &mut BillAcceptor<H>,
    ) -> io::Result<Session>
    where
        R: BufRead,
        W: Write,
        H: ActionHandler,
    {
        let mut keys = Keys::new(input);
        let mut dispatched = 0;

        writeln!(output, "{GREETING}")?;
        loop {
            if self.show_menu {
                write!(output, "\n{MENU}")?;
            }
            output.flush()?;

            let Some(key) = keys.next_key()? else {
                return Ok(Session {
                    end: SessionEnd::EndOfInput,
                    dispatched,
                });
            };

            match Command::from_key(key) {
                Ok(Command::Quit) => {
                    return Ok(Session {
                        end: SessionEnd::Quit,
                        dispatched,
                    });
                }
                Ok(Command::Dispatch(event)) => {
                    writeln!(output, "{}", echo(event))?;
                    output.flush()?;
                    acceptor.dispatch(event);
                    dispatched += 1;
                }
                Err(error) => {
                    tracing::debug!(%error, "ignoring operator input");
                    writeln!(output, "{INVALID_INPUT}")?;
                }
            }
        }
    }
}

/// Non-whitespace characters of a line reader, one at a time.
///
/// Bytes that are not valid UTF-8 decode to `U+FFFD` and surface as an
/// unknown key instead of ending the session.
struct Keys<R> {
    input: R,
    pending: VecDeque<char>,
    line: Vec<u8>,
}

impl<R: BufRead> Keys<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
            line: Vec::new(),
        }
    }

    fn next_key(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(key) = self.pending.pop_front() {
                return Ok(Some(key));
            }
            self.line.clear();
            if self.input.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                String::from_utf8_lossy(&self.line)
                    .chars()
                    .filter(|c| !c.is_whitespace()),
            );
        }
    }
}
