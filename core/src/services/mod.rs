//! Business services containing domain logic and use cases.

pub mod accounts;
pub mod clock;
pub mod registration;
pub mod session;
pub mod verification;

// Re-export commonly used types
pub use accounts::AccountRegistry;
pub use clock::{Clock, ManualClock, SystemClock};
pub use registration::{RegistrationKind, RegistrationState, RegistrationWorkflow};
pub use session::SessionHolder;
pub use verification::{
    CodeDelivery, CodeGenerator, FixedCodeGenerator, RandomCodeGenerator, SendCodeResult,
    VerificationService, VerificationServiceConfig,
};
