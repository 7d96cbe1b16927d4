//! Registration form value objects for students and staff.

use serde::{Deserialize, Serialize};

use gg_shared::email::is_valid_email;
use gg_shared::password::password_policy_violations;
use gg_shared::phone::is_valid_phone;
use gg_shared::validation::{validators::min_trimmed_len, Validate, ValidationErrors};

use crate::domain::entities::account::StudentLevel;

/// Data submitted by a prospective student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub level: StudentLevel,
    pub course_ids: Vec<String>,
}

impl StudentRegistration {
    /// Form with the confirmation already matching `password`
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
        level: StudentLevel,
        course_ids: Vec<String>,
    ) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            confirm_password: password.clone(),
            password,
            level,
            course_ids,
        }
    }
}

impl Validate for StudentRegistration {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            min_trimmed_len(&self.name, 2),
            "name",
            "Name must be at least 2 characters",
        );
        check_contact(&mut errors, &self.email, &self.phone);
        check_password(&mut errors, &self.password, &self.confirm_password);
        errors.check(
            !self.course_ids.is_empty(),
            "course_ids",
            "Please select at least one course",
        );
        errors.into_result()
    }
}

/// Data submitted by a prospective staff member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub qualifications: String,
    pub password: String,
    pub confirm_password: String,
}

impl StaffRegistration {
    /// Form with the confirmation already matching `password`
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        department: impl Into<String>,
        qualifications: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            department: department.into(),
            qualifications: qualifications.into(),
            confirm_password: password.clone(),
            password,
        }
    }

    /// Display name stored on the account
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

impl Validate for StaffRegistration {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            min_trimmed_len(&self.first_name, 2),
            "first_name",
            "First name must be at least 2 characters",
        );
        errors.check(
            min_trimmed_len(&self.last_name, 2),
            "last_name",
            "Last name must be at least 2 characters",
        );
        check_contact(&mut errors, &self.email, &self.phone);
        errors.check(
            min_trimmed_len(&self.department, 2),
            "department",
            "Department is required",
        );
        errors.check(
            min_trimmed_len(&self.qualifications, 10),
            "qualifications",
            "Please provide your qualifications",
        );
        check_password(&mut errors, &self.password, &self.confirm_password);
        errors.into_result()
    }
}

fn check_contact(errors: &mut ValidationErrors, email: &str, phone: &str) {
    errors.check(is_valid_email(email), "email", "Invalid email address");
    errors.check(
        is_valid_phone(phone),
        "phone",
        "Phone number must be at least 10 digits",
    );
}

fn check_password(errors: &mut ValidationErrors, password: &str, confirm: &str) {
    for violation in password_policy_violations(password) {
        errors.add("password", violation);
    }
    errors.check(password == confirm, "confirm_password", "Passwords don't match");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> StudentRegistration {
        StudentRegistration::new(
            "Jane Doe",
            "jane@x.com",
            "5551234567",
            "Abc12345",
            StudentLevel::Beginner,
            vec!["1".to_string()],
        )
    }

    fn sam() -> StaffRegistration {
        StaffRegistration::new(
            "Sam",
            "Teacher",
            "sam@x.com",
            "5559876543",
            "Phonetics",
            "MA Linguistics, 5 years teaching",
            "Teach3rPass",
        )
    }

    #[test]
    fn test_valid_student_form() {
        assert!(jane().validate().is_ok());
    }

    #[test]
    fn test_student_form_collects_all_errors() {
        let mut form = jane();
        form.name = "J".to_string();
        form.email = "not-an-email".to_string();
        form.phone = "12345".to_string();
        form.password = "short".to_string();
        form.course_ids.clear();

        let errors = form.validate().unwrap_err();
        for field in ["name", "email", "phone", "password", "confirm_password", "course_ids"] {
            assert!(errors.has_field(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_password_confirmation_mismatch() {
        let mut form = jane();
        form.confirm_password = "Abc12346".to_string();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 1);
        assert!(errors.has_field("confirm_password"));
    }

    #[test]
    fn test_valid_staff_form() {
        let form = sam();
        assert!(form.validate().is_ok());
        assert_eq!(form.full_name(), "Sam Teacher");
    }

    #[test]
    fn test_staff_form_requires_qualifications() {
        let mut form = sam();
        form.qualifications = "MA".to_string();
        form.department = " ".to_string();

        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("qualifications"));
        assert!(errors.has_field("department"));
    }
}
