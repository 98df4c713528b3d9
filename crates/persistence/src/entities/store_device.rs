//! Store device entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the store_devices table.
#[derive(Debug, Clone, FromRow)]
pub struct StoreDeviceEntity {
    pub device_uid: String,
    pub store_number: i32,
    pub device_type: Option<String>,
    pub device_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub device_notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoreDeviceEntity> for domain::models::StoreDevice {
    fn from(entity: StoreDeviceEntity) -> Self {
        Self {
            device_uid: entity.device_uid,
            store_number: entity.store_number,
            device_type: entity.device_type,
            device_number: entity.device_number,
            manufacturer: entity.manufacturer,
            model: entity.model,
            device_notes: entity.device_notes,
            updated_at: Some(entity.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_device_entity_to_domain() {
        let entity = StoreDeviceEntity {
            device_uid: "612-PC-01".to_string(),
            store_number: 612,
            device_type: Some("Computer".to_string()),
            device_number: Some("1".to_string()),
            manufacturer: Some("Dell".to_string()),
            model: Some("OptiPlex 3090".to_string()),
            device_notes: None,
            updated_at: Utc::now(),
        };

        let device: domain::models::StoreDevice = entity.clone().into();
        assert_eq!(device.device_uid, entity.device_uid);
        assert_eq!(device.store_number, entity.store_number);
        assert_eq!(device.model, entity.model);
        assert!(device.updated_at.is_some());
    }
}
