//! Store reference data models.

use serde::{Deserialize, Serialize};

/// A store record. Reference data maintained by administrators; never
/// mutated through the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub store_number: i32,
    pub store_name: String,
    pub store_type: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub kiosk_type: Option<String>,
    pub num_computers: Option<i32>,
}

/// Store metadata in the legacy capitalized-key shape returned by
/// `GET /stores` (an object keyed by store name, each value this struct).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(rename = "Store Number")]
    pub store_number: i32,

    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub store_type: Option<String>,

    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(rename = "Address", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "City", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "ZIP", default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    #[serde(rename = "Phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(rename = "Kiosk Type", default, skip_serializing_if = "Option::is_none")]
    pub kiosk_type: Option<String>,

    #[serde(rename = "Computers", default, skip_serializing_if = "Option::is_none")]
    pub num_computers: Option<i32>,
}

impl From<Store> for StoreInfo {
    fn from(store: Store) -> Self {
        Self {
            store_number: store.store_number,
            store_type: store.store_type,
            state: store.state,
            address: store.address,
            city: store.city,
            zip: store.zip,
            phone: store.phone,
            kiosk_type: store.kiosk_type,
            num_computers: store.num_computers,
        }
    }
}
