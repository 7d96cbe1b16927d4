//! Repository interfaces and their in-memory implementations.

pub mod account;
pub mod session;
pub mod verification;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use session::{InMemorySessionStore, SessionStore};
pub use verification::{InMemoryVerificationCodeStore, VerificationCodeStore};
