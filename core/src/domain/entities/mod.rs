//! Domain entities representing core business objects.

pub mod account;
pub mod verification_code;

// Re-export commonly used types
pub use account::{Account, PendingVerification, Profile, Role, StudentLevel};
pub use verification_code::{
    Channel, VerificationEntry, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_CODE, MIN_CODE,
};
