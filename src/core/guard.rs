//! Guard predicates for controlling trigger behaviors.
//!
//! A guard is a zero-argument predicate evaluated at the moment a trigger is
//! fired. Guards take no arguments: they close over whatever external state
//! the caller wants to test.

use std::fmt;

/// Predicate that decides whether a trigger behavior is currently active.
///
/// # Example
///
/// ```rust
/// use substate::core::Guard;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let door_open = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&door_open);
/// let guard = Guard::new(move || flag.get());
///
/// assert!(!guard.check());
/// door_open.set(true);
/// assert!(guard.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool>,
    unconditional: bool,
}

impl Guard {
    /// Create a guard from a predicate closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            unconditional: false,
        }
    }

    /// A guard that always passes. Used for behaviors declared without one.
    ///
    /// ```rust
    /// use substate::core::Guard;
    ///
    /// let guard = Guard::always();
    /// assert!(guard.check());
    /// assert!(guard.is_unconditional());
    /// ```
    pub fn always() -> Self {
        Guard {
            predicate: Box::new(|| true),
            unconditional: true,
        }
    }

    /// Evaluate the predicate now.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }

    /// Whether this guard was created with [`Guard::always`].
    pub fn is_unconditional(&self) -> bool {
        self.unconditional
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::always()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("unconditional", &self.unconditional)
            .finish_non_exhaustive()
    }
}
