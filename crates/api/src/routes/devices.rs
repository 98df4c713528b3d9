//! Store device endpoint handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::StoreDevice;
use persistence::repositories::StoreDeviceRepository;

/// Query parameters for GET /devices/by-store.
#[derive(Debug, Deserialize)]
pub struct DevicesByStoreQuery {
    pub store_number: Option<i32>,
}

/// Response for the device listing.
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<StoreDevice>,
}

/// List the devices registered at a store.
///
/// GET /devices/by-store?store_number=
pub async fn devices_by_store(
    State(state): State<AppState>,
    Query(query): Query<DevicesByStoreQuery>,
) -> Result<Json<DevicesResponse>, ApiError> {
    let store_number = query.store_number.ok_or_else(|| {
        ApiError::Validation("store_number query parameter is required".to_string())
    })?;

    let repo = StoreDeviceRepository::new(state.pool.clone());
    let entities = repo.find_by_store_number(store_number).await?;

    Ok(Json(DevicesResponse {
        devices: entities.into_iter().map(StoreDevice::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devices_response_shape() {
        let response = DevicesResponse {
            devices: vec![StoreDevice {
                device_uid: "612-PC-01".to_string(),
                store_number: 612,
                device_type: Some("Computer".to_string()),
                device_number: Some("1".to_string()),
                manufacturer: None,
                model: None,
                device_notes: None,
                updated_at: None,
            }],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["devices"].is_array());
        assert_eq!(json["devices"][0]["device_uid"], "612-PC-01");
    }
}
