//! User repository for database operations.

use sqlx::PgPool;

use crate::entities::UserEntity;

const USER_COLUMNS: &str = "id, email, username, password_hash, pin_hash, has_password, has_pin, \
     created_at, updated_at, last_login_at";

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email. Callers pass the address already lowercased.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a user by exact, case-sensitive username.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE username = $1
            "#
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert or update an account keyed by email.
    ///
    /// Registration is an upsert: re-registering an existing email replaces
    /// the username and both credential hashes and marks both credentials
    /// set.
    pub async fn upsert_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
        pin_hash: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            INSERT INTO users (email, username, password_hash, pin_hash, has_password, has_pin)
            VALUES ($1, $2, $3, $4, true, true)
            ON CONFLICT (email) DO UPDATE SET
                username = EXCLUDED.username,
                password_hash = EXCLUDED.password_hash,
                pin_hash = EXCLUDED.pin_hash,
                has_password = true,
                has_pin = true,
                updated_at = NOW()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(pin_hash)
        .fetch_one(&self.pool)
        .await
    }

    /// Replace a user's password hash and mark the password set.
    /// Returns the number of rows affected (0 if the user is missing).
    pub async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, has_password = true, updated_at = NOW()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Replace a user's PIN hash and mark the PIN set.
    pub async fn update_pin_hash(&self, email: &str, pin_hash: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET pin_hash = $2, has_pin = true, updated_at = NOW()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(pin_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Refresh last_login_at to now.
    pub async fn touch_last_login(&self, user_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_login_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a user by email. Returns the number of rows affected.
    pub async fn delete_by_email(&self, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// All user accounts, sorted by email.
    pub async fn find_all(&self) -> Result<Vec<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY email
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }
}
