//! Store directory endpoint handlers.

use axum::{extract::State, Json};
use std::collections::BTreeMap;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::store::StoreInfo;
use domain::models::Store;
use persistence::repositories::StoreRepository;

/// GET /stores
///
/// Returns the store directory as an object keyed by store name, each
/// value the legacy-keyed metadata object the clients expect.
pub async fn list_stores(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, StoreInfo>>, ApiError> {
    let repo = StoreRepository::new(state.pool.clone());
    let entities = repo.find_all().await?;

    let directory = entities
        .into_iter()
        .map(|entity| {
            let store: Store = entity.into();
            (store.store_name.clone(), StoreInfo::from(store))
        })
        .collect();

    Ok(Json(directory))
}
