//! Store entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the stores table.
#[derive(Debug, Clone, FromRow)]
pub struct StoreEntity {
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

impl From<StoreEntity> for domain::models::Store {
    fn from(entity: StoreEntity) -> Self {
        Self {
            store_number: entity.store_number,
            store_name: entity.store_name,
            store_type: entity.store_type,
            state: entity.state,
            address: entity.address,
            city: entity.city,
            zip: entity.zip,
            phone: entity.phone,
            kiosk_type: entity.kiosk_type,
            num_computers: entity.num_computers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_entity_to_domain() {
        let entity = StoreEntity {
            store_number: 4417,
            store_name: "Nashua Walmart".to_string(),
            store_type: Some("Walmart".to_string()),
            state: Some("NH".to_string()),
            address: None,
            city: Some("Nashua".to_string()),
            zip: None,
            phone: None,
            kiosk_type: Some("Kiosk".to_string()),
            num_computers: Some(2),
        };

        let store: domain::models::Store = entity.clone().into();
        assert_eq!(store.store_number, entity.store_number);
        assert_eq!(store.store_name, entity.store_name);
        assert_eq!(store.store_type, entity.store_type);
        assert_eq!(store.num_computers, entity.num_computers);
    }
}
