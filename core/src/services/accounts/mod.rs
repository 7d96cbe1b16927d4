//! Account registry: registration, verification flags, approval and login

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{hash_password, verify_password};
pub use service::AccountRegistry;
