//! Core Event trait for the signals a machine reacts to.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for payload-free signals delivered to a state machine.
///
/// Events carry no data; they are pure tags. The set of events a machine
/// understands is closed and known at compile time.
///
/// # Example
///
/// ```rust
/// use bill_acceptor::core::Event;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum DoorEvent {
///     Push,
///     Pull,
/// }
///
/// impl Event for DoorEvent {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Push => "Push",
///             Self::Pull => "Pull",
///         }
///     }
/// }
///
/// assert_eq!(DoorEvent::Pull.name(), "Pull");
/// ```
pub trait Event:
    Copy + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the event's name for display/logging.
    fn name(&self) -> &'static str;
}
