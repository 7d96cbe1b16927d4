//! Common utility functions

pub mod email;
pub mod password;
pub mod phone;
pub mod validation;

// Re-export commonly used utilities
pub use email::*;
pub use password::*;
pub use phone::*;
pub use validation::*;
