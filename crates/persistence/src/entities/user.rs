//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: Option<String>,
    pub pin_hash: Option<String>,
    pub has_password: Option<bool>,
    pub has_pin: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            username: entity.username,
            password_hash: entity.password_hash,
            pin_hash: entity.pin_hash,
            has_password: entity.has_password,
            has_pin: entity.has_pin,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            last_login_at: entity.last_login_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::user::CredentialState;

    #[test]
    fn test_user_entity_to_domain() {
        let entity = UserEntity {
            id: 3,
            email: "jane.doe@storetrack.com".to_string(),
            username: "JaneD".to_string(),
            password_hash: Some("$2b$12$hash".to_string()),
            pin_hash: Some("$2b$12$pin".to_string()),
            has_password: Some(true),
            has_pin: Some(true),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        };

        let user: domain::models::User = entity.clone().into();
        assert_eq!(user.id, entity.id);
        assert_eq!(user.email, entity.email);
        assert_eq!(user.username, entity.username);
        assert_eq!(user.password_state(), CredentialState::Set);
        assert_eq!(user.pin_state(), CredentialState::Set);
    }
}
