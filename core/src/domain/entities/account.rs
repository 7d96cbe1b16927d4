//! Account entity representing a registered Grammar Gallery user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Staff => write!(f, "staff"),
            Role::Student => write!(f, "student"),
        }
    }
}

/// English level a student enrols at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for StudentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StudentLevel::Beginner => write!(f, "Beginner"),
            StudentLevel::Intermediate => write!(f, "Intermediate"),
            StudentLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl std::str::FromStr for StudentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(StudentLevel::Beginner),
            "intermediate" => Ok(StudentLevel::Intermediate),
            "advanced" => Ok(StudentLevel::Advanced),
            _ => Err(format!("Invalid level: {}", s)),
        }
    }
}

/// Destinations still awaiting confirmation
///
/// A channel is cleared as soon as its verification flag is set, so an empty
/// value serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl PendingVerification {
    /// Both channels pending
    pub fn both(email: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            mobile: Some(mobile.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.mobile.is_none()
    }
}

/// Role-specific account data, tagged by role when serialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Profile {
    Admin,
    #[serde(rename_all = "camelCase")]
    Staff {
        department: String,
        is_approved: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        qualifications: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Student {
        student_id: String,
        level: StudentLevel,
        enrolled_courses: Vec<String>,
    },
}

/// Account entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized email, unique across accounts
    pub email: String,

    /// Phone number as entered at registration
    pub phone: String,

    pub email_verified: bool,

    pub mobile_verified: bool,

    /// `email_verified && mobile_verified`, kept in sync by the mark methods
    pub is_verified: bool,

    pub pending_verification: PendingVerification,

    #[serde(flatten)]
    pub profile: Profile,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,

    /// bcrypt hash; never serialized into the session slot
    #[serde(skip)]
    pub(crate) password_hash: String,
}

impl Account {
    fn new(
        name: String,
        email: String,
        phone: String,
        password_hash: String,
        profile: Profile,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            pending_verification: PendingVerification::both(email.clone(), phone.clone()),
            name,
            email,
            phone,
            email_verified: false,
            mobile_verified: false,
            is_verified: false,
            profile,
            created_at: now,
            updated_at: now,
            last_login_at: None,
            password_hash,
        }
    }

    /// Creates an unverified student account
    pub fn new_student(
        name: String,
        email: String,
        phone: String,
        password_hash: String,
        student_id: String,
        level: StudentLevel,
        enrolled_courses: Vec<String>,
    ) -> Self {
        Self::new(
            name,
            email,
            phone,
            password_hash,
            Profile::Student {
                student_id,
                level,
                enrolled_courses,
            },
        )
    }

    /// Creates an unverified, unapproved staff account
    pub fn new_staff(
        name: String,
        email: String,
        phone: String,
        password_hash: String,
        department: String,
        qualifications: Option<String>,
    ) -> Self {
        Self::new(
            name,
            email,
            phone,
            password_hash,
            Profile::Staff {
                department,
                is_approved: false,
                qualifications,
            },
        )
    }

    /// Creates an administrator account, verified on both channels
    pub fn new_admin(name: String, email: String, phone: String, password_hash: String) -> Self {
        let mut account = Self::new(name, email, phone, password_hash, Profile::Admin);
        account.mark_email_verified();
        account.mark_mobile_verified();
        account
    }

    pub fn role(&self) -> Role {
        match self.profile {
            Profile::Admin => Role::Admin,
            Profile::Staff { .. } => Role::Staff,
            Profile::Student { .. } => Role::Student,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.profile, Profile::Staff { .. })
    }

    pub fn is_student(&self) -> bool {
        matches!(self.profile, Profile::Student { .. })
    }

    pub fn student_id(&self) -> Option<&str> {
        match &self.profile {
            Profile::Student { student_id, .. } => Some(student_id),
            _ => None,
        }
    }

    /// Whether the approval gate is open; only staff can be unapproved
    pub fn is_approved(&self) -> bool {
        match self.profile {
            Profile::Staff { is_approved, .. } => is_approved,
            _ => true,
        }
    }

    /// Marks the email channel as confirmed
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.pending_verification.email = None;
        self.refresh_verified();
    }

    /// Marks the mobile channel as confirmed
    pub fn mark_mobile_verified(&mut self) {
        self.mobile_verified = true;
        self.pending_verification.mobile = None;
        self.refresh_verified();
    }

    /// Approves a staff account. Returns `false` for any other role.
    pub fn approve(&mut self) -> bool {
        match &mut self.profile {
            Profile::Staff { is_approved, .. } => {
                *is_approved = true;
                self.updated_at = Utc::now();
                true
            }
            _ => false,
        }
    }

    /// Replaces the details entered on the registration form
    ///
    /// A changed phone number is unconfirmed and pending again.
    pub fn revise_details(&mut self, name: String, phone: String, password_hash: String) {
        if phone != self.phone {
            self.mobile_verified = false;
            self.pending_verification.mobile = Some(phone.clone());
        }
        self.name = name;
        self.phone = phone;
        self.password_hash = password_hash;
        self.refresh_verified();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    fn refresh_verified(&mut self) {
        self.is_verified = self.email_verified && self.mobile_verified;
        self.updated_at = Utc::now();
    }
}
