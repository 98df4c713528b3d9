//! Credential policy validation.
//!
//! Policy functions return the complete list of violations rather than the
//! first one, so registration can report everything that is wrong with a
//! submitted credential in a single response.

use validator::ValidationError;

/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// The fixed set of accepted special characters for passwords.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// Minimum and maximum PIN length (digits).
pub const PIN_MIN_LEN: usize = 4;
pub const PIN_MAX_LEN: usize = 6;

/// Validates that an email's domain is on the allow-list.
///
/// The comparison is case-insensitive on both sides. An address without an
/// `@` or with an empty local part fails outright.
pub fn validate_email_domain(email: &str, allowed: &[String]) -> Result<(), ValidationError> {
    let email = email.trim();
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => {
            let mut err = ValidationError::new("email_format");
            err.message = Some("Invalid email address".into());
            return Err(err);
        }
    };

    if local.is_empty() || domain.is_empty() {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Invalid email address".into());
        return Err(err);
    }

    let domain = domain.to_lowercase();
    if allowed.iter().any(|d| d.to_lowercase() == domain) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_domain");
        err.message = Some("Email domain is not allowed".into());
        Err(err)
    }
}

/// Checks a password against the account password policy.
///
/// Returns every violated rule; an empty vector means the password is
/// acceptable. The username comparison is case-insensitive.
pub fn password_policy_violations(password: &str, username: &str) -> Vec<String> {
    let mut violations = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LEN {
        violations.push(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LEN
        ));
    }

    if !username.is_empty() && password.eq_ignore_ascii_case(username) {
        violations.push("Password must not match the username".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push("Password must contain an uppercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push("Password must contain a lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push("Password must contain a digit".to_string());
    }

    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
        violations.push(format!(
            "Password must contain one of {}",
            PASSWORD_SPECIAL_CHARS
        ));
    }

    violations
}

/// Checks a PIN against the account PIN policy: 4-6 digits, not all the
/// same digit.
pub fn pin_policy_violations(pin: &str) -> Vec<String> {
    let mut violations = Vec::new();

    if pin.is_empty() || !pin.chars().all(|c| c.is_ascii_digit()) {
        violations.push("PIN must contain digits only".to_string());
        return violations;
    }

    if pin.len() < PIN_MIN_LEN || pin.len() > PIN_MAX_LEN {
        violations.push(format!(
            "PIN must be {}-{} digits",
            PIN_MIN_LEN, PIN_MAX_LEN
        ));
    }

    let mut chars = pin.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            violations.push("PIN must not be all one digit".to_string());
        }
    }

    violations
}
