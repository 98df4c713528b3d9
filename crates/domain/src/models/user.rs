//! User account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account.
///
/// `email` is the unique key and is stored lowercased; `username` is
/// compared exactly (case-sensitive) at login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)] // Never serialize hashes to API responses
    pub password_hash: Option<String>,
    #[serde(skip_serializing)]
    pub pin_hash: Option<String>,
    pub has_password: Option<bool>,
    pub has_pin: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Readiness of a stored credential.
///
/// The `has_password`/`has_pin` columns are tri-state: `true` (set),
/// `false` (explicitly unset), or NULL on rows predating the flags, where
/// hash presence decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    Set,
    NotSet,
}

impl CredentialState {
    pub fn derive(flag: Option<bool>, hash: Option<&str>) -> Self {
        match (flag, hash) {
            (Some(false), _) => CredentialState::NotSet,
            (_, None) => CredentialState::NotSet,
            (_, Some(h)) if h.is_empty() => CredentialState::NotSet,
            _ => CredentialState::Set,
        }
    }
}

impl User {
    pub fn password_state(&self) -> CredentialState {
        CredentialState::derive(self.has_password, self.password_hash.as_deref())
    }

    pub fn pin_state(&self) -> CredentialState {
        CredentialState::derive(self.has_pin, self.pin_hash.as_deref())
    }
}

/// User fields safe to return from the admin user listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub email: String,
    pub username: String,
    pub has_password: bool,
    pub has_pin: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            has_password: user.password_state() == CredentialState::Set,
            has_pin: user.pin_state() == CredentialState::Set,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(
        has_password: Option<bool>,
        password_hash: Option<&str>,
        has_pin: Option<bool>,
        pin_hash: Option<&str>,
    ) -> User {
        User {
            id: 1,
            email: "jane.doe@storetrack.com".to_string(),
            username: "JaneD".to_string(),
            password_hash: password_hash.map(String::from),
            pin_hash: pin_hash.map(String::from),
            has_password,
            has_pin,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_credential_state_set() {
        assert_eq!(
            CredentialState::derive(Some(true), Some("$2b$12$hash")),
            CredentialState::Set
        );
    }

    #[test]
    fn test_credential_state_explicitly_unset() {
        // A false flag wins even when a stale hash is still stored
        assert_eq!(
            CredentialState::derive(Some(false), Some("$2b$12$hash")),
            CredentialState::NotSet
        );
    }

    #[test]
    fn test_credential_state_missing_hash() {
        assert_eq!(
            CredentialState::derive(Some(true), None),
            CredentialState::NotSet
        );
        assert_eq!(CredentialState::derive(None, None), CredentialState::NotSet);
    }

    #[test]
    fn test_credential_state_legacy_row_uses_hash_presence() {
        assert_eq!(
            CredentialState::derive(None, Some("$2b$12$hash")),
            CredentialState::Set
        );
    }

    #[test]
    fn test_credential_state_empty_hash() {
        assert_eq!(
            CredentialState::derive(Some(true), Some("")),
            CredentialState::NotSet
        );
    }

    #[test]
    fn test_user_states() {
        let user = user_with(Some(true), Some("$2b$12$p"), Some(false), Some("$2b$12$q"));
        assert_eq!(user.password_state(), CredentialState::Set);
        assert_eq!(user.pin_state(), CredentialState::NotSet);
    }

    #[test]
    fn test_user_summary_carries_no_hashes() {
        let user = user_with(Some(true), Some("$2b$12$p"), Some(true), Some("$2b$12$q"));
        let summary = UserSummary::from(&user);
        assert!(summary.has_password);
        assert!(summary.has_pin);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("hash"));
        assert!(json.contains("jane.doe@storetrack.com"));
    }

    #[test]
    fn test_user_serialization_skips_hashes() {
        let user = user_with(Some(true), Some("$2b$12$secret"), Some(true), None);
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password_hash"));
    }
}
