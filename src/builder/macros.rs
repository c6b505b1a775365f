//! Macros for ergonomic state machine construction.

/// Declare a fieldless enum usable as a state or trigger.
///
/// Derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash` and `Debug`, and
/// implements `Display` with the variant name.
///
/// # Example
///
/// ```
/// use substate::state_enum;
///
/// state_enum! {
///     pub enum Phone {
///         OffHook,
///         Ringing,
///         Connected,
///     }
/// }
///
/// assert_eq!(Phone::Ringing.to_string(), "Ringing");
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
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str(stringify!($variant))),*
                }
            }
        }
    };
}

/// Build a `Vec<Argument>` from a list of values.
///
/// # Example
///
/// ```
/// use substate::args;
///
/// let args = args![1_i32, "two", 3.0_f64];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[1].downcast_ref::<&str>(), Some(&"two"));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::core::Argument>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::core::Argument::new($value)),+]
    };
}
