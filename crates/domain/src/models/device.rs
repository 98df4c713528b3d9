//! Store device metadata models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A device installed at a store.
///
/// Rows are owned by the offline metadata-sync job; clients only read them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDevice {
    pub device_uid: String,
    pub store_number: i32,
    pub device_type: Option<String>,
    pub device_number: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub device_notes: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One record from the metadata-sync input file.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreDeviceRecord {
    pub device_uid: String,
    pub store_number: i32,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub device_number: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub device_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sync_record_minimal() {
        let record: StoreDeviceRecord = serde_json::from_value(json!({
            "device_uid": "612-PC-01",
            "store_number": 612
        }))
        .unwrap();

        assert_eq!(record.device_uid, "612-PC-01");
        assert_eq!(record.store_number, 612);
        assert!(record.manufacturer.is_none());
    }

    #[test]
    fn test_sync_record_full() {
        let record: StoreDeviceRecord = serde_json::from_value(json!({
            "device_uid": "612-RTR-01",
            "store_number": 612,
            "device_type": "Router",
            "device_number": "1",
            "manufacturer": "Cradlepoint",
            "model": "E100",
            "device_notes": "Mounted above back office door"
        }))
        .unwrap();

        assert_eq!(record.device_type.as_deref(), Some("Router"));
        assert_eq!(record.manufacturer.as_deref(), Some("Cradlepoint"));
    }

    #[test]
    fn test_store_device_serializes_snake_case() {
        let device = StoreDevice {
            device_uid: "98-PC-02".to_string(),
            store_number: 98,
            device_type: Some("Computer".to_string()),
            device_number: Some("2".to_string()),
            manufacturer: None,
            model: None,
            device_notes: None,
            updated_at: None,
        };

        let value = serde_json::to_value(&device).unwrap();
        assert_eq!(value["device_uid"], "98-PC-02");
        assert_eq!(value["store_number"], 98);
        assert_eq!(value["device_type"], "Computer");
    }
}
