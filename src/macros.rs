//! Macros for declaring closed state and event sets.

/// Generate a fieldless state enum together with its `State` impl.
///
/// The generated enum is `Copy`, `Eq`, `Hash`, serde-serializable,
/// implements `Display` via the variant name, and carries an `ALL`
/// constant listing every variant in declaration order.
///
/// # Example
///
/// ```
/// use bill_acceptor::core::State;
/// use bill_acceptor::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Open,
///         Closed,
///         Broken,
///     }
///     final: [Broken]
///     error: [Broken]
/// }
///
/// assert_eq!(Door::ALL.len(), 3);
/// assert!(Door::Broken.is_final());
/// assert_eq!(Door::Closed.to_string(), "Closed");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            $vis const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            #[allow(unreachable_patterns)]
            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

/// Generate a fieldless event enum together with its `Event` impl.
///
/// Same derives and `ALL` constant as [`state_enum!`].
///
/// # Example
///
/// ```
/// use bill_acceptor::core::Event;
/// use bill_acceptor::event_enum;
///
/// event_enum! {
///     pub enum DoorEvent {
///         Push,
///         Pull,
///     }
/// }
///
/// assert_eq!(DoorEvent::ALL, &[DoorEvent::Push, DoorEvent::Pull]);
/// assert_eq!(DoorEvent::Pull.name(), "Pull");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            $vis const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::Event::name(self))
            }
        }
    };
}
