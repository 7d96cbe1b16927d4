//! Password policy checks

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Return the list of policy violations for a password (empty when it passes)
pub fn password_policy_violations(password: &str) -> Vec<&'static str> {
    let mut violations = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push("Password must be at least 8 characters");
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        violations.push(
            "Password must contain at least one lowercase letter, one uppercase letter, and one number",
        );
    }
    violations
}

/// Check if a password satisfies the policy
pub fn is_strong_password(password: &str) -> bool {
    password_policy_violations(password).is_empty()
}
