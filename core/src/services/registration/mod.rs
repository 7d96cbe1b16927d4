//! Registration workflow driving a user from form submission to an active
//! (or approval-pending) account

mod state;
mod workflow;

#[cfg(test)]
mod tests;

pub use state::{RegistrationKind, RegistrationState};
pub use workflow::RegistrationWorkflow;
