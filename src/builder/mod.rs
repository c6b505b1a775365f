//! Builder API for configuring states.
//!
//! [`StateConfiguration`] is the fluent surface application code uses to
//! declare permits, ignores, reentries, dynamic destinations, entry/exit
//! actions and superstates. The macros in this module cut boilerplate for
//! state/trigger enums and argument lists.

pub mod configuration;
pub mod error;
pub mod macros;

pub use configuration::StateConfiguration;
pub use error::ConfigurationError;
