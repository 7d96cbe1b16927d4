//! Registration workflow state machine

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use gg_shared::email::normalize_email;
use gg_shared::validation::Validate;

use crate::domain::entities::account::Account;
use crate::domain::entities::verification_code::{Channel, CODE_LENGTH};
use crate::domain::value_objects::{StaffRegistration, StudentRegistration};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, SessionStore, VerificationCodeStore};
use crate::services::accounts::AccountRegistry;
use crate::services::clock::Clock;
use crate::services::verification::{CodeDelivery, SendCodeResult, VerificationService};

use super::state::{RegistrationKind, RegistrationState};

/// One user's registration, from form to verified account
///
/// A rejected form or code leaves the state where it was. If delivery of
/// the phone code fails after the email step succeeded, the workflow stays
/// at `MobilePending` and `resend` is available immediately.
pub struct RegistrationWorkflow<R, S, C, D>
where
    R: AccountRepository,
    S: SessionStore,
    C: VerificationCodeStore,
    D: CodeDelivery,
{
    registry: Arc<AccountRegistry<R, S>>,
    verification: Arc<VerificationService<C, D>>,
    state: RegistrationState,
    kind: Option<RegistrationKind>,
    account: Option<Account>,
    /// When the code for the current step was last sent
    last_sent_at: Option<DateTime<Utc>>,
}

impl<R, S, C, D> RegistrationWorkflow<R, S, C, D>
where
    R: AccountRepository,
    S: SessionStore,
    C: VerificationCodeStore,
    D: CodeDelivery,
{
    pub fn new(
        registry: Arc<AccountRegistry<R, S>>,
        verification: Arc<VerificationService<C, D>>,
    ) -> Self {
        Self {
            registry,
            verification,
            state: RegistrationState::Started,
            kind: None,
            account: None,
            last_sent_at: None,
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    pub fn kind(&self) -> Option<RegistrationKind> {
        self.kind
    }

    /// The account created by this workflow, as last seen
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Submit the student form and send the email code
    ///
    /// After a cancel back to `Started`, resubmitting reuses the account
    /// already created instead of registering a second one. The corrected
    /// details replace the stored ones; only the email must stay the same.
    pub async fn submit_student(&mut self, form: &StudentRegistration) -> DomainResult<SendCodeResult> {
        self.expect_state(RegistrationState::Started, "submit the registration form")?;
        form.validate()?;

        if self.account.is_none() {
            let account = self.registry.register_student(form).await?;
            self.kind = Some(RegistrationKind::Student);
            self.account = Some(account);
        } else {
            let id = self.check_resubmission(RegistrationKind::Student, &form.email)?;
            self.account = Some(self.registry.amend_student(id, form).await?);
        }

        self.send_email_code().await
    }

    /// Submit the staff form and send the email code
    pub async fn submit_staff(&mut self, form: &StaffRegistration) -> DomainResult<SendCodeResult> {
        self.expect_state(RegistrationState::Started, "submit the registration form")?;
        form.validate()?;

        if self.account.is_none() {
            let account = self.registry.register_staff(form).await?;
            self.kind = Some(RegistrationKind::Staff);
            self.account = Some(account);
        } else {
            let id = self.check_resubmission(RegistrationKind::Staff, &form.email)?;
            self.account = Some(self.registry.amend_staff(id, form).await?);
        }

        self.send_email_code().await
    }

    /// Confirm the email code, then send the phone code
    pub async fn submit_email_code(&mut self, code: &str) -> DomainResult<SendCodeResult> {
        self.expect_state(RegistrationState::EmailPending, "submit an email code")?;
        check_code_format(code)?;

        let account = self.current_account()?;
        self.verification.verify_code(&account.email, code).await?;
        let account = self.registry.mark_email_verified(account.id).await?;

        let phone = account.phone.clone();
        self.account = Some(account);
        self.enter(RegistrationState::MobilePending);

        self.send(&phone, Channel::Phone).await
    }

    /// Confirm the phone code and finish the registration
    ///
    /// Students end `Complete` and are stored as the current session; staff
    /// end `PendingApproval`.
    pub async fn submit_mobile_code(&mut self, code: &str) -> DomainResult<RegistrationState> {
        self.expect_state(RegistrationState::MobilePending, "submit a mobile code")?;
        check_code_format(code)?;

        let account = self.current_account()?;
        self.verification.verify_code(&account.phone, code).await?;
        let account = self.registry.mark_mobile_verified(account.id).await?;

        let next = match self.kind {
            Some(RegistrationKind::Staff) => RegistrationState::PendingApproval,
            _ => {
                self.registry.session().save(&account).await?;
                RegistrationState::Complete
            }
        };

        tracing::info!(
            account_id = %account.id,
            state = %next,
            event = "registration_finished",
            "Registration finished"
        );
        self.account = Some(account);
        self.enter(next);
        Ok(next)
    }

    /// Send a fresh code for the current step, replacing the old one
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::ResendTooSoon)` - The cool-down since the last send
    ///   has not elapsed
    pub async fn resend(&mut self) -> DomainResult<SendCodeResult> {
        let (destination, channel) = match self.state {
            RegistrationState::EmailPending => (self.current_account()?.email, Channel::Email),
            RegistrationState::MobilePending => (self.current_account()?.phone, Channel::Phone),
            state => return Err(invalid_transition(state, "resend a code")),
        };

        if let Some(sent_at) = self.last_sent_at {
            let ready_at = sent_at + self.verification.config().resend_cooldown();
            let now = self.verification.clock().now();
            if now < ready_at {
                let millis = (ready_at - now).num_milliseconds();
                let seconds = (millis + 999) / 1000;
                tracing::warn!(
                    seconds_remaining = seconds,
                    channel = %channel,
                    event = "resend_too_soon",
                    "Resend requested during cool-down"
                );
                return Err(AuthError::ResendTooSoon { seconds }.into());
            }
        }

        self.send(&destination, channel).await
    }

    /// Step back: `EmailPending` to `Started`, `MobilePending` to `EmailPending`
    ///
    /// The code pending for the abandoned step is discarded.
    pub async fn cancel(&mut self) -> DomainResult<RegistrationState> {
        let (abandoned, previous) = match self.state {
            RegistrationState::EmailPending => {
                (self.current_account()?.email, RegistrationState::Started)
            }
            RegistrationState::MobilePending => {
                (self.current_account()?.phone, RegistrationState::EmailPending)
            }
            state => return Err(invalid_transition(state, "cancel")),
        };

        self.verification.clear(&abandoned).await?;
        tracing::info!(from = %self.state, to = %previous, event = "registration_cancelled", "Stepped back");
        self.enter(previous);
        Ok(previous)
    }

    async fn send_email_code(&mut self) -> DomainResult<SendCodeResult> {
        let email = self.current_account()?.email;
        let result = self.send(&email, Channel::Email).await?;
        self.state = RegistrationState::EmailPending;
        Ok(result)
    }

    async fn send(&mut self, destination: &str, channel: Channel) -> DomainResult<SendCodeResult> {
        let result = self.verification.send_code(destination, channel).await?;
        self.last_sent_at = Some(result.entry.created_at);
        Ok(result)
    }

    fn enter(&mut self, state: RegistrationState) {
        self.state = state;
        self.last_sent_at = None;
    }

    fn current_account(&self) -> DomainResult<Account> {
        self.account.clone().ok_or_else(|| DomainError::Internal {
            message: format!("No account in registration state {}", self.state),
        })
    }

    fn expect_state(&self, expected: RegistrationState, action: &str) -> DomainResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(invalid_transition(self.state, action))
        }
    }

    /// Id of the account a resubmitted form applies to
    fn check_resubmission(&self, kind: RegistrationKind, email: &str) -> DomainResult<Uuid> {
        if self.kind != Some(kind) {
            return Err(invalid_transition(self.state, "switch registration type"));
        }
        let account = self.current_account()?;
        if account.email != normalize_email(email) {
            return Err(DomainError::Validation {
                message: "Registration already started for a different email".to_string(),
            });
        }
        Ok(account.id)
    }
}

fn invalid_transition(state: RegistrationState, action: &str) -> DomainError {
    AuthError::InvalidTransition {
        state: state.to_string(),
        action: action.to_string(),
    }
    .into()
}

/// Codes are exactly six ASCII digits
fn check_code_format(code: &str) -> DomainResult<()> {
    if code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DomainError::Validation {
            message: format!("Verification code must be {} digits", CODE_LENGTH),
        })
    }
}
