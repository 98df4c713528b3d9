//! Authentication service: registration, full login, quick login, and
//! credential changes.
//!
//! There are no sessions or tokens anywhere in this service. Every
//! privileged call re-verifies credentials from scratch; quick login is a
//! reduced-friction re-authentication path gated purely by login recency.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use thiserror::Error;

use domain::models::user::CredentialState;
use domain::models::User;
use persistence::repositories::UserRepository;
use shared::password::{hash_credential, verify_credential, PasswordError};
use shared::validation::{
    password_policy_violations, pin_policy_violations, validate_email_domain,
};

/// Freshness window for quick login. A login older than this forces the
/// caller back through full login.
pub const QUICK_LOGIN_WINDOW_HOURS: i64 = 156;

/// Generic wording for credential failures. Deliberately does not say
/// which check failed.
pub const GENERIC_LOGIN_ERROR: &str = "Unable to log in with the provided credentials";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", GENERIC_LOGIN_ERROR)]
    InvalidCredentials,

    #[error("Password not set for this account")]
    PasswordNotSet,

    #[error("PIN not set for this account")]
    PinNotSet,

    #[error("Credential policy violated")]
    PolicyViolations(Vec<String>),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// True when a recorded login is still within the quick-login window.
///
/// The cutoff is strict: a login exactly `QUICK_LOGIN_WINDOW_HOURS` old has
/// expired.
pub fn within_quick_login_window(
    last_login_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    match last_login_at {
        Some(last) => now.signed_duration_since(last) < Duration::hours(QUICK_LOGIN_WINDOW_HOURS),
        None => false,
    }
}

/// Stateless authentication over the users table.
pub struct AuthService {
    users: UserRepository,
    allowed_email_domains: Vec<String>,
}

impl AuthService {
    pub fn new(pool: PgPool, allowed_email_domains: Vec<String>) -> Self {
        Self {
            users: UserRepository::new(pool),
            allowed_email_domains,
        }
    }

    /// Register (or re-register) an account, upserting by lowercased email.
    ///
    /// All policy violations are collected and reported together.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
        pin: &str,
    ) -> Result<User, AuthError> {
        let mut violations = Vec::new();

        if let Err(e) = validate_email_domain(email, &self.allowed_email_domains) {
            violations.push(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid email address".to_string()),
            );
        }
        if username.trim().is_empty() {
            violations.push("Username is required".to_string());
        }
        violations.extend(password_policy_violations(password, username));
        violations.extend(pin_policy_violations(pin));

        if !violations.is_empty() {
            return Err(AuthError::PolicyViolations(violations));
        }

        let email = email.trim().to_lowercase();
        let password_hash = hash_credential(password)?;
        let pin_hash = hash_credential(pin)?;

        let entity = self
            .users
            .upsert_user(&email, username.trim(), &password_hash, &pin_hash)
            .await?;

        tracing::info!(email = %entity.email, "User registered");
        Ok(entity.into())
    }

    /// Full login: exact username, verified password, verified PIN.
    /// Refreshes last_login_at on success.
    pub async fn full_login(
        &self,
        email: &str,
        username: &str,
        password: &str,
        pin: &str,
    ) -> Result<User, AuthError> {
        let user = self.verify_user(email, username, password, pin).await?;
        self.users.touch_last_login(user.id).await?;
        Ok(user)
    }

    /// Quick login: exact username + password, accepted only while the last
    /// full or quick login is inside the freshness window.
    ///
    /// Every failure is reported identically; the handler adds the
    /// `require_full` flag.
    pub async fn quick_login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user: User = match self.users.find_by_username(username).await? {
            Some(entity) => entity.into(),
            None => return Err(AuthError::InvalidCredentials),
        };

        if user.password_state() != CredentialState::Set {
            return Err(AuthError::InvalidCredentials);
        }
        let hash = user.password_hash.as_deref().unwrap_or_default();
        if !verify_credential(password, hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !within_quick_login_window(user.last_login_at, Utc::now()) {
            return Err(AuthError::InvalidCredentials);
        }

        self.users.touch_last_login(user.id).await?;
        Ok(user)
    }

    /// Change password after a full credential check. The new password must
    /// satisfy the policy against the account's username.
    pub async fn change_password(
        &self,
        email: &str,
        username: &str,
        current_password: &str,
        new_password: &str,
        pin: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .verify_user(email, username, current_password, pin)
            .await?;

        let violations = password_policy_violations(new_password, &user.username);
        if !violations.is_empty() {
            return Err(AuthError::PolicyViolations(violations));
        }

        let new_hash = hash_credential(new_password)?;
        self.users.update_password_hash(&user.email, &new_hash).await?;
        tracing::info!(email = %user.email, "Password changed");
        Ok(())
    }

    /// Change PIN after a full credential check.
    pub async fn change_pin(
        &self,
        email: &str,
        username: &str,
        password: &str,
        current_pin: &str,
        new_pin: &str,
    ) -> Result<(), AuthError> {
        let user = self
            .verify_user(email, username, password, current_pin)
            .await?;

        let violations = pin_policy_violations(new_pin);
        if !violations.is_empty() {
            return Err(AuthError::PolicyViolations(violations));
        }

        let new_hash = hash_credential(new_pin)?;
        self.users.update_pin_hash(&user.email, &new_hash).await?;
        tracing::info!(email = %user.email, "PIN changed");
        Ok(())
    }

    /// The shared verification used by full login and the credential-change
    /// endpoints: lowercased-email lookup, exact case match on the
    /// username, then password and PIN against the stored hashes.
    ///
    /// Unset credentials are surfaced; every mismatch collapses into the
    /// same generic failure.
    async fn verify_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
        pin: &str,
    ) -> Result<User, AuthError> {
        let email = email.trim().to_lowercase();
        let user: User = match self.users.find_by_email(&email).await? {
            Some(entity) => entity.into(),
            None => return Err(AuthError::InvalidCredentials),
        };

        if user.username != username {
            return Err(AuthError::InvalidCredentials);
        }

        if user.password_state() != CredentialState::Set {
            return Err(AuthError::PasswordNotSet);
        }
        let password_hash = user.password_hash.as_deref().unwrap_or_default();
        if !verify_credential(password, password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if user.pin_state() != CredentialState::Set {
            return Err(AuthError::PinNotSet);
        }
        let pin_hash = user.pin_hash.as_deref().unwrap_or_default();
        if !verify_credential(pin, pin_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_rejects_missing_last_login() {
        assert!(!within_quick_login_window(None, Utc::now()));
    }

    #[test]
    fn test_window_accepts_recent_login() {
        let now = Utc::now();
        assert!(within_quick_login_window(
            Some(now - Duration::hours(1)),
            now
        ));
        assert!(within_quick_login_window(
            Some(now - Duration::hours(155)),
            now
        ));
    }

    #[test]
    fn test_window_boundary_is_strict() {
        // Exactly 156 hours old counts as expired
        let now = Utc::now();
        assert!(!within_quick_login_window(
            Some(now - Duration::hours(QUICK_LOGIN_WINDOW_HOURS)),
            now
        ));
        assert!(within_quick_login_window(
            Some(now - Duration::hours(QUICK_LOGIN_WINDOW_HOURS) + Duration::seconds(1)),
            now
        ));
    }

    #[test]
    fn test_window_rejects_old_login() {
        let now = Utc::now();
        assert!(!within_quick_login_window(
            Some(now - Duration::hours(200)),
            now
        ));
        assert!(!within_quick_login_window(
            Some(now - Duration::days(30)),
            now
        ));
    }

    #[test]
    fn test_generic_error_does_not_name_a_field() {
        let message = format!("{}", AuthError::InvalidCredentials);
        assert!(!message.to_lowercase().contains("password"));
        assert!(!message.to_lowercase().contains("pin"));
        assert!(!message.to_lowercase().contains("username"));
        assert!(!message.to_lowercase().contains("email"));
    }

    #[test]
    fn test_not_set_states_are_surfaced() {
        assert!(format!("{}", AuthError::PasswordNotSet).contains("Password not set"));
        assert!(format!("{}", AuthError::PinNotSet).contains("PIN not set"));
    }
}
