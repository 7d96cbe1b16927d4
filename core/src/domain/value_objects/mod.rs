//! Value objects representing immutable domain concepts.

pub mod registration_form;

// Re-export commonly used types
pub use registration_form::{StaffRegistration, StudentRegistration};
