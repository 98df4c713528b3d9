//! Store repository for database operations.

use sqlx::PgPool;

use crate::entities::StoreEntity;

const STORE_COLUMNS: &str = "store_number, store_name, store_type, state, address, city, zip, \
     phone, kiosk_type, num_computers";

/// Repository for store reference data.
#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    /// Creates a new StoreRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All stores, sorted by name.
    pub async fn find_all(&self) -> Result<Vec<StoreEntity>, sqlx::Error> {
        sqlx::query_as::<_, StoreEntity>(&format!(
            r#"
            SELECT {STORE_COLUMNS}
            FROM stores
            ORDER BY store_name
            "#
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Find a store by its number.
    pub async fn find_by_number(
        &self,
        store_number: i32,
    ) -> Result<Option<StoreEntity>, sqlx::Error> {
        sqlx::query_as::<_, StoreEntity>(&format!(
            r#"
            SELECT {STORE_COLUMNS}
            FROM stores
            WHERE store_number = $1
            "#
        ))
        .bind(store_number)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a store by name (case-insensitive exact match).
    pub async fn find_by_name(&self, store_name: &str) -> Result<Option<StoreEntity>, sqlx::Error> {
        sqlx::query_as::<_, StoreEntity>(&format!(
            r#"
            SELECT {STORE_COLUMNS}
            FROM stores
            WHERE store_name ILIKE $1
            "#
        ))
        .bind(store_name)
        .fetch_optional(&self.pool)
        .await
    }
}
