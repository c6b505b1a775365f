//! Typed arguments for parameterized triggers.
//!
//! A trigger may be declared "with parameters": an ordered list of argument
//! types every firing of that trigger must supply. Arguments travel through
//! the machine type-erased as [`Argument`] values and are checked against the
//! trigger's [`ParameterSchema`] before anything else happens. Typed
//! configuration methods recover concrete values through [`Parameters`].

use super::state::Trigger;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

/// Failures raised while checking or unpacking trigger arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("Too many arguments: expected {expected}, got {actual}")]
    TooManyArguments { expected: usize, actual: usize },

    #[error("Argument of type `{expected}` required in position {index}")]
    MissingArgument { expected: &'static str, index: usize },

    #[error("Argument of type `{actual}` is not accepted in position {index}")]
    WrongArgumentType { actual: &'static str, index: usize },

    /// Only raised when a typed selector or action unpacks a null value.
    /// Schema validation itself always accepts null.
    #[error("Argument in position {index} is null but `{expected}` is required")]
    NullArgument { expected: &'static str, index: usize },
}

/// The declared type of one argument slot.
#[derive(Clone, Copy)]
pub struct ArgumentType {
    id: TypeId,
    name: &'static str,
}

impl ArgumentType {
    /// The slot type for values of `A`.
    pub fn of<A: Any>() -> Self {
        Self {
            id: TypeId::of::<A>(),
            name: std::any::type_name::<A>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ArgumentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArgumentType {}

impl fmt::Debug for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-erased argument passed along with a fired trigger.
///
/// An argument is either a value of some `'static` type or null. Null is
/// accepted in any slot by schema validation.
///
/// # Example
///
/// ```rust
/// use substate::core::Argument;
///
/// let arg = Argument::new(42_i32);
/// assert_eq!(arg.downcast_ref::<i32>(), Some(&42));
/// assert!(arg.downcast_ref::<String>().is_none());
///
/// assert!(Argument::null().is_null());
/// ```
pub struct Argument {
    value: Option<Box<dyn Any>>,
    type_name: &'static str,
}

impl Argument {
    pub fn new<A: Any>(value: A) -> Self {
        Self {
            value: Some(Box::new(value)),
            type_name: std::any::type_name::<A>(),
        }
    }

    pub fn null() -> Self {
        Self {
            value: None,
            type_name: "null",
        }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }

    /// Name of the carried value's type, or `"null"`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the carried value if it is an `A`.
    pub fn downcast_ref<A: Any>(&self) -> Option<&A> {
        self.value.as_ref().and_then(|value| value.downcast_ref::<A>())
    }

    /// Whether this argument may fill a slot of the given type.
    pub fn is_compatible_with(&self, expected: &ArgumentType) -> bool {
        match &self.value {
            None => true,
            Some(value) => (**value).type_id() == expected.id,
        }
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argument({})", self.type_name)
    }
}

/// Check an argument list against the expected slot types.
///
/// The argument count must equal the number of slots: surplus arguments fail
/// with [`ParameterError::TooManyArguments`], and a short list fails at the
/// first missing position. Non-null arguments must match their slot's type
/// exactly.
pub fn validate(args: &[Argument], expected: &[ArgumentType]) -> Result<(), ParameterError> {
    if args.len() > expected.len() {
        return Err(ParameterError::TooManyArguments {
            expected: expected.len(),
            actual: args.len(),
        });
    }

    for (index, slot) in expected.iter().enumerate() {
        let Some(arg) = args.get(index) else {
            return Err(ParameterError::MissingArgument {
                expected: slot.name(),
                index,
            });
        };
        if !arg.is_compatible_with(slot) {
            return Err(ParameterError::WrongArgumentType {
                actual: arg.type_name(),
                index,
            });
        }
    }

    Ok(())
}

/// The ordered argument types a parameterized trigger requires.
///
/// Created once when the trigger is declared and immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParameterSchema {
    types: Vec<ArgumentType>,
}

impl ParameterSchema {
    pub fn new(types: Vec<ArgumentType>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &[ArgumentType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn validate(&self, args: &[Argument]) -> Result<(), ParameterError> {
        validate(args, &self.types)
    }
}

/// A tuple of concrete argument types usable with typed triggers.
///
/// Implemented for tuples of one to four `Clone` values.
pub trait Parameters: Sized + 'static {
    /// The slot types, in order.
    fn argument_types() -> Vec<ArgumentType>;

    /// Recover the typed tuple from validated arguments.
    fn unpack(args: &[Argument]) -> Result<Self, ParameterError>;

    /// Erase the tuple into an argument list.
    fn into_arguments(self) -> Vec<Argument>;
}

fn unpack_at<A: Any + Clone>(args: &[Argument], index: usize) -> Result<A, ParameterError> {
    let expected = std::any::type_name::<A>();
    let arg = args
        .get(index)
        .ok_or(ParameterError::MissingArgument { expected, index })?;
    if arg.is_null() {
        return Err(ParameterError::NullArgument { expected, index });
    }
    arg.downcast_ref::<A>()
        .cloned()
        .ok_or(ParameterError::WrongArgumentType {
            actual: arg.type_name(),
            index,
        })
}

macro_rules! impl_parameters {
    ($($name:ident : $index:tt),+) => {
        impl<$($name: Any + Clone),+> Parameters for ($($name,)+) {
            fn argument_types() -> Vec<ArgumentType> {
                vec![$(ArgumentType::of::<$name>()),+]
            }

            fn unpack(args: &[Argument]) -> Result<Self, ParameterError> {
                Ok(($(unpack_at::<$name>(args, $index)?,)+))
            }

            fn into_arguments(self) -> Vec<Argument> {
                vec![$(Argument::new(self.$index)),+]
            }
        }
    };
}

impl_parameters!(A: 0);
impl_parameters!(A: 0, B: 1);
impl_parameters!(A: 0, B: 1, C: 2);
impl_parameters!(A: 0, B: 1, C: 2, D: 3);

/// A trigger value paired with the tuple type its firings carry.
///
/// Obtained from
/// [`StateMachine::set_trigger_parameters`](crate::machine::StateMachine::set_trigger_parameters).
pub struct ParameterizedTrigger<T, P> {
    trigger: T,
    _parameters: PhantomData<fn() -> P>,
}

impl<T: Trigger, P: Parameters> ParameterizedTrigger<T, P> {
    pub(crate) fn new(trigger: T) -> Self {
        Self {
            trigger,
            _parameters: PhantomData,
        }
    }

    /// The underlying trigger value.
    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn schema(&self) -> ParameterSchema {
        ParameterSchema::new(P::argument_types())
    }
}

impl<T: Clone, P> Clone for ParameterizedTrigger<T, P> {
    fn clone(&self) -> Self {
        Self {
            trigger: self.trigger.clone(),
            _parameters: PhantomData,
        }
    }
}

impl<T: fmt::Debug, P> fmt::Debug for ParameterizedTrigger<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterizedTrigger")
            .field("trigger", &self.trigger)
            .field("parameters", &std::any::type_name::<P>())
            .finish()
    }
}
