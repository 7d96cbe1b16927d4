//! Account registry implementation

use std::sync::Arc;
use uuid::Uuid;

use gg_shared::config::RegistrationConfig;
use gg_shared::email::{mask_email, normalize_email};

use crate::domain::entities::account::{Account, Profile};
use crate::domain::value_objects::{StaffRegistration, StudentRegistration};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, SessionStore};
use crate::services::session::SessionHolder;

use super::password::{hash_password, verify_password};

/// Registry of accounts and the gatekeeper for login
///
/// Form validation is the caller's job; the registry only enforces email
/// uniqueness and the login gates.
pub struct AccountRegistry<R: AccountRepository, S: SessionStore> {
    accounts: Arc<R>,
    session: Arc<SessionHolder<S>>,
    config: RegistrationConfig,
}

impl<R: AccountRepository, S: SessionStore> AccountRegistry<R, S> {
    pub fn new(accounts: Arc<R>, session: Arc<SessionHolder<S>>, config: RegistrationConfig) -> Self {
        Self {
            accounts,
            session,
            config,
        }
    }

    pub fn session(&self) -> &SessionHolder<S> {
        &self.session
    }

    /// Register an unverified student with the next sequential student id
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The new account, pending both verifications
    /// * `Err(AuthError::DuplicateEmail)` - The email is already registered
    pub async fn register_student(&self, form: &StudentRegistration) -> DomainResult<Account> {
        let email = self.ensure_email_available(&form.email).await?;
        let password_hash = hash_password(&form.password, self.config.password_hash_cost)?;

        let sequence = self.accounts.next_student_sequence().await?;
        let student_id = self.config.format_student_id(sequence);

        let account = Account::new_student(
            form.name.trim().to_string(),
            email,
            form.phone.trim().to_string(),
            password_hash,
            student_id,
            form.level,
            form.course_ids.clone(),
        );
        let account = self.accounts.create(account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            student_id = account.student_id().unwrap_or_default(),
            event = "account_registered",
            role = "student",
            "Registered student account"
        );
        Ok(account)
    }

    /// Register an unverified, unapproved staff member
    pub async fn register_staff(&self, form: &StaffRegistration) -> DomainResult<Account> {
        let email = self.ensure_email_available(&form.email).await?;
        let password_hash = hash_password(&form.password, self.config.password_hash_cost)?;

        let qualifications = Some(form.qualifications.trim().to_string()).filter(|q| !q.is_empty());
        let account = Account::new_staff(
            form.full_name(),
            email,
            form.phone.trim().to_string(),
            password_hash,
            form.department.trim().to_string(),
            qualifications,
        );
        let account = self.accounts.create(account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "account_registered",
            role = "staff",
            "Registered staff account"
        );
        Ok(account)
    }

    /// Create an administrator, verified on both channels
    pub async fn register_admin(
        &self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> DomainResult<Account> {
        let email = self.ensure_email_available(email).await?;
        let password_hash = hash_password(password, self.config.password_hash_cost)?;
        let account = Account::new_admin(
            name.trim().to_string(),
            email,
            phone.trim().to_string(),
            password_hash,
        );
        let account = self.accounts.create(account).await?;

        tracing::info!(account_id = %account.id, event = "account_registered", role = "admin", "Registered admin account");
        Ok(account)
    }

    /// Apply a corrected student form to an account still being registered
    ///
    /// The email and student id stay as registered.
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::NotFound)` - Unknown id
    /// * `Err(DomainError::Validation)` - The account is already verified or
    ///   is not a student
    pub async fn amend_student(&self, id: Uuid, form: &StudentRegistration) -> DomainResult<Account> {
        let mut account = self.require_unverified(id).await?;
        match &mut account.profile {
            Profile::Student {
                level,
                enrolled_courses,
                ..
            } => {
                *level = form.level;
                *enrolled_courses = form.course_ids.clone();
            }
            _ => return Err(not_amendable("Account is not a student registration")),
        }

        let password_hash = hash_password(&form.password, self.config.password_hash_cost)?;
        account.revise_details(form.name.trim().to_string(), form.phone.trim().to_string(), password_hash);
        self.save_amendment(account).await
    }

    /// Apply a corrected staff form to an account still being registered
    pub async fn amend_staff(&self, id: Uuid, form: &StaffRegistration) -> DomainResult<Account> {
        let mut account = self.require_unverified(id).await?;
        match &mut account.profile {
            Profile::Staff {
                department,
                qualifications,
                ..
            } => {
                *department = form.department.trim().to_string();
                *qualifications = Some(form.qualifications.trim().to_string()).filter(|q| !q.is_empty());
            }
            _ => return Err(not_amendable("Account is not a staff registration")),
        }

        let password_hash = hash_password(&form.password, self.config.password_hash_cost)?;
        account.revise_details(form.full_name(), form.phone.trim().to_string(), password_hash);
        self.save_amendment(account).await
    }

    /// Confirm the email channel. Repeating the call is harmless.
    pub async fn mark_email_verified(&self, id: Uuid) -> DomainResult<Account> {
        let mut account = self.require(id).await?;
        account.mark_email_verified();
        let account = self.accounts.update(account).await?;

        tracing::info!(
            account_id = %id,
            is_verified = account.is_verified,
            event = "email_verified",
            "Marked email as verified"
        );
        Ok(account)
    }

    /// Confirm the mobile channel. Repeating the call is harmless.
    pub async fn mark_mobile_verified(&self, id: Uuid) -> DomainResult<Account> {
        let mut account = self.require(id).await?;
        account.mark_mobile_verified();
        let account = self.accounts.update(account).await?;

        tracing::info!(
            account_id = %id,
            is_verified = account.is_verified,
            event = "mobile_verified",
            "Marked mobile as verified"
        );
        Ok(account)
    }

    /// Open the approval gate for a staff account
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::NotFound)` - Unknown id
    /// * `Err(AuthError::NotStaff)` - The account is not a staff account
    pub async fn approve_staff(&self, id: Uuid) -> DomainResult<Account> {
        let mut account = self.require(id).await?;
        if !account.approve() {
            return Err(AuthError::NotStaff.into());
        }
        let account = self.accounts.update(account).await?;

        tracing::info!(account_id = %id, event = "staff_approved", "Approved staff account");
        Ok(account)
    }

    /// Log in and store the account as the current session
    ///
    /// Gates are checked in order: unknown email, unverified account,
    /// unapproved staff, then the password.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<Account> {
        let email = normalize_email(email);
        let masked = mask_email(&email);

        let mut account = match self.accounts.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::warn!(email = %masked, event = "login_failed", reason = "not_found", "Login for unknown email");
                return Err(AuthError::account_not_found().into());
            }
        };

        let gate = if !account.is_verified {
            Some(AuthError::NotVerified)
        } else if !account.is_approved() {
            Some(AuthError::PendingApproval)
        } else if !verify_password(password, &account.password_hash) {
            Some(AuthError::InvalidCredentials)
        } else {
            None
        };
        if let Some(err) = gate {
            tracing::warn!(
                email = %masked,
                error_code = err.error_code(),
                event = "login_failed",
                "Login rejected"
            );
            return Err(err.into());
        }

        account.update_last_login();
        let account = self.accounts.update(account).await?;
        self.session.save(&account).await?;

        tracing::info!(account_id = %account.id, role = %account.role(), event = "login_success", "User logged in");
        Ok(account)
    }

    /// Clear the current session
    pub async fn logout(&self) -> DomainResult<()> {
        self.session.clear().await?;
        tracing::info!(event = "logout", "User logged out");
        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Account>> {
        self.accounts.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        self.accounts.find_by_email(&normalize_email(email)).await
    }

    async fn require(&self, id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AuthError::account_not_found().into())
    }

    async fn require_unverified(&self, id: Uuid) -> DomainResult<Account> {
        let account = self.require(id).await?;
        if account.is_verified {
            return Err(not_amendable("Account registration is already complete"));
        }
        Ok(account)
    }

    async fn save_amendment(&self, account: Account) -> DomainResult<Account> {
        let account = self.accounts.update(account).await?;
        tracing::info!(
            account_id = %account.id,
            mobile_verified = account.mobile_verified,
            event = "registration_amended",
            "Updated registration details"
        );
        Ok(account)
    }

    /// Normalizes the email and rejects it if already registered
    async fn ensure_email_available(&self, email: &str) -> DomainResult<String> {
        let email = normalize_email(email);
        if self.accounts.exists_by_email(&email).await? {
            tracing::warn!(
                email = %mask_email(&email),
                event = "duplicate_email",
                "Registration rejected for existing email"
            );
            return Err(AuthError::DuplicateEmail { email }.into());
        }
        Ok(email)
    }
}

fn not_amendable(message: &str) -> DomainError {
    DomainError::Validation {
        message: message.to_string(),
    }
}
