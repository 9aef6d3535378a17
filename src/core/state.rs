//! Core State trait for state machine states.
//!
//! Every state of a machine implements this trait, which provides pure
//! methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// States are plain identities: they carry no data and are cheap to copy,
/// so a machine can hand its current state out by value without exposing
/// the field that holds it.
///
/// # Required Traits
///
/// - `Copy`: States are identities, never payloads
/// - `Eq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in exported history
///
/// # Example
///
/// ```rust
/// use bill_acceptor::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
/// enum DoorState {
///     Open,
///     Closed,
///     Broken,
/// }
///
/// impl State for DoorState {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
///
/// assert_eq!(DoorState::Open.name(), "Open");
/// assert!(DoorState::Broken.is_final());
/// ```
pub trait State:
    Copy + Eq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &'static str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Busy,
        Halted,
        Faulted,
    }

    impl State for TestState {
        fn name(&self) -> &'static str {
            match self {
                Self::Idle => "Idle",
                Self::Busy => "Busy",
                Self::Halted => "Halted",
                Self::Faulted => "Faulted",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Halted | Self::Faulted)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Faulted)
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
    enum Cyclic {
        On,
        Off,
    }

    impl State for Cyclic {
        fn name(&self) -> &'static str {
            match self {
                Self::On => "On",
                Self::Off => "Off",
            }
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Busy.name(), "Busy");
        assert_eq!(TestState::Halted.name(), "Halted");
        assert_eq!(TestState::Faulted.name(), "Faulted");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Idle.is_final());
        assert!(!TestState::Busy.is_final());
        assert!(TestState::Halted.is_final());
        assert!(TestState::Faulted.is_final());
    }

    #[test]
    fn is_error_identifies_error_states() {
        assert!(!TestState::Idle.is_error());
        assert!(!TestState::Halted.is_error());
        assert!(TestState::Faulted.is_error());
    }

    #[test]
    fn defaults_are_neither_final_nor_error() {
        assert!(!Cyclic::On.is_final());
        assert!(!Cyclic::Off.is_error());
    }

    #[test]
    fn state_serializes_as_variant_name() {
        let json = serde_json::to_string(&TestState::Busy).unwrap();
        assert_eq!(json, "\"Busy\"");
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, TestState::Busy);
    }
}
