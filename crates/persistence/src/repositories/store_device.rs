//! Store device repository for database operations.

use domain::models::device::StoreDeviceRecord;
use sqlx::PgPool;

use crate::entities::StoreDeviceEntity;

const DEVICE_COLUMNS: &str = "device_uid, store_number, device_type, device_number, manufacturer, \
     model, device_notes, updated_at";

/// Repository for store device metadata.
///
/// Rows are written only by the offline metadata-sync job; the API serves
/// them read-only.
#[derive(Clone)]
pub struct StoreDeviceRepository {
    pool: PgPool,
}

impl StoreDeviceRepository {
    /// Creates a new StoreDeviceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All devices registered at a store.
    pub async fn find_by_store_number(
        &self,
        store_number: i32,
    ) -> Result<Vec<StoreDeviceEntity>, sqlx::Error> {
        sqlx::query_as::<_, StoreDeviceEntity>(&format!(
            r#"
            SELECT {DEVICE_COLUMNS}
            FROM store_devices
            WHERE store_number = $1
            ORDER BY device_type, device_number
            "#
        ))
        .bind(store_number)
        .fetch_all(&self.pool)
        .await
    }

    /// Upsert a device record keyed by device_uid.
    pub async fn upsert_device(
        &self,
        record: &StoreDeviceRecord,
    ) -> Result<StoreDeviceEntity, sqlx::Error> {
        sqlx::query_as::<_, StoreDeviceEntity>(&format!(
            r#"
            INSERT INTO store_devices
                (device_uid, store_number, device_type, device_number, manufacturer, model, device_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (device_uid) DO UPDATE SET
                store_number = EXCLUDED.store_number,
                device_type = EXCLUDED.device_type,
                device_number = EXCLUDED.device_number,
                manufacturer = EXCLUDED.manufacturer,
                model = EXCLUDED.model,
                device_notes = EXCLUDED.device_notes,
                updated_at = NOW()
            RETURNING {DEVICE_COLUMNS}
            "#
        ))
        .bind(&record.device_uid)
        .bind(record.store_number)
        .bind(record.device_type.as_deref())
        .bind(record.device_number.as_deref())
        .bind(record.manufacturer.as_deref())
        .bind(record.model.as_deref())
        .bind(record.device_notes.as_deref())
        .fetch_one(&self.pool)
        .await
    }
}
