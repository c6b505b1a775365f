//! Whole-machine configuration audit.
//!
//! Some configurations build without error but can never fire cleanly, for
//! example two unguarded permits for the same trigger. [`StateMachine::audit`]
//! walks the configuration and reports every such problem at once using
//! Stillwater's `Validation`, instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use substate::audit::ConfigurationIssue;
//! use substate::machine::StateMachine;
//! use stillwater::validation::Validation;
//!
//! let mut machine = StateMachine::new("idle");
//! machine
//!     .configure("idle")
//!     .permit("go", "left")
//!     .unwrap()
//!     .permit("go", "right")
//!     .unwrap();
//!
//! match machine.audit() {
//!     Validation::Failure(issues) => {
//!         assert!(issues
//!             .iter()
//!             .any(|i| matches!(i, ConfigurationIssue::GuaranteedAmbiguity { .. })));
//!     }
//!     Validation::Success(_) => panic!("expected an ambiguity"),
//! }
//! ```

pub mod issues;
pub mod rules;

pub use issues::ConfigurationIssue;
pub use rules::AuditCheck;

use crate::core::{State, Trigger};
use crate::machine::StateMachine;
use stillwater::validation::Validation;

impl<S: State, T: Trigger> StateMachine<S, T> {
    /// Audit the configuration, accumulating ALL issues.
    ///
    /// Returns `Validation::Success(())` for a clean configuration.
    pub fn audit(&self) -> AuditCheck<S, T> {
        let mut checks: Vec<AuditCheck<S, T>> = Vec::new();

        for node in self.graph().nodes() {
            checks.extend(rules::guard_overlaps(node));
        }

        for (trigger, schema) in self.parameter_schemas() {
            checks.push(rules::parameters_in_use(self.graph(), trigger, schema));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
