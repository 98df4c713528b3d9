//! Issue CRUD endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::issue::IssuePayload;
use domain::models::Issue;
use persistence::repositories::{IssueRepository, IssueSearchFilter, StoreRepository};

/// Request body for POST /issues.
#[derive(Debug, Deserialize)]
pub struct AddIssueRequest {
    pub store_name: String,
    pub issue: IssuePayload,
}

/// Request body for POST /issues/update.
#[derive(Debug, Deserialize)]
pub struct UpdateIssueRequest {
    pub issue_id: i64,
    pub updated_issue: IssuePayload,
}

/// Request body for POST /issues/delete.
#[derive(Debug, Deserialize)]
pub struct DeleteIssueRequest {
    pub issue_id: i64,
}

/// Query parameters for GET /issues/by-store.
#[derive(Debug, Deserialize)]
pub struct ByStoreQuery {
    pub store_number: Option<i32>,
    pub store_name: Option<String>,
}

/// Query parameters for GET /issues/search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub store_number: Option<i32>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub device: Option<String>,
    pub name: Option<String>,
    pub global_issue: Option<bool>,
}

/// Report a new issue for a store.
///
/// POST /issues
pub async fn add_issue(
    State(state): State<AppState>,
    Json(request): Json<AddIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), ApiError> {
    if request.store_name.trim().is_empty() {
        return Err(ApiError::Validation("store_name is required".to_string()));
    }
    if request.issue.resolved_name().is_none() {
        return Err(ApiError::Validation("Issue name is required".to_string()));
    }

    let stores = StoreRepository::new(state.pool.clone());
    let store = stores
        .find_by_name(request.store_name.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound("Store not found".to_string()))?;

    // The payload's store number wins when present; the directory entry
    // fills it in otherwise.
    let store_number = request.issue.store_number.unwrap_or(store.store_number);

    let issues = IssueRepository::new(state.pool.clone());
    let created = issues
        .insert_issue(store_number, &store.store_name, &request.issue)
        .await?;

    tracing::info!(issue_id = created.id, store_number, "Issue created");
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List issues for one store, by number or name.
///
/// GET /issues/by-store?store_number=|store_name=
pub async fn issues_by_store(
    State(state): State<AppState>,
    Query(query): Query<ByStoreQuery>,
) -> Result<Json<Vec<Issue>>, ApiError> {
    let repo = IssueRepository::new(state.pool.clone());

    let entities = if let Some(store_number) = query.store_number {
        repo.find_by_store_number(store_number).await?
    } else if let Some(store_name) = query.store_name.filter(|s| !s.trim().is_empty()) {
        repo.find_by_store_name(store_name.trim()).await?
    } else {
        return Err(ApiError::Validation(
            "store_number or store_name is required".to_string(),
        ));
    };

    Ok(Json(entities.into_iter().map(Issue::from).collect()))
}

/// Search issues with a conjunctive filter across the optional parameters.
///
/// GET /issues/search
pub async fn search_issues(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Issue>>, ApiError> {
    let filter = IssueSearchFilter {
        store_number: query.store_number,
        category: query.category.filter(|s| !s.trim().is_empty()),
        status: query.status.filter(|s| !s.trim().is_empty()),
        device: query.device.filter(|s| !s.trim().is_empty()),
        name: query.name.filter(|s| !s.trim().is_empty()),
        global_issue: query.global_issue,
    };

    if !filter.has_any() {
        return Err(ApiError::Validation(
            "At least one search parameter is required".to_string(),
        ));
    }

    let repo = IssueRepository::new(state.pool.clone());
    let entities = repo.search(&filter).await?;
    Ok(Json(entities.into_iter().map(Issue::from).collect()))
}

/// Overwrite an existing issue.
///
/// POST /issues/update
pub async fn update_issue(
    State(state): State<AppState>,
    Json(request): Json<UpdateIssueRequest>,
) -> Result<Json<Issue>, ApiError> {
    let repo = IssueRepository::new(state.pool.clone());
    let updated = repo
        .update_issue(request.issue_id, &request.updated_issue)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    tracing::info!(issue_id = updated.id, "Issue updated");
    Ok(Json(updated.into()))
}

/// Delete an issue, returning the deleted row.
///
/// POST /issues/delete
pub async fn delete_issue(
    State(state): State<AppState>,
    Json(request): Json<DeleteIssueRequest>,
) -> Result<Json<Issue>, ApiError> {
    let repo = IssueRepository::new(state.pool.clone());
    let deleted = repo
        .delete_issue(request.issue_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Issue not found".to_string()))?;

    tracing::info!(issue_id = deleted.id, "Issue deleted");
    Ok(Json(deleted.into()))
}

/// The full issue list.
///
/// GET /issues/all
pub async fn all_issues(State(state): State<AppState>) -> Result<Json<Vec<Issue>>, ApiError> {
    let repo = IssueRepository::new(state.pool.clone());
    let entities = repo.find_all().await?;
    Ok(Json(entities.into_iter().map(Issue::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_issue_request_parses_legacy_payload() {
        let request: AddIssueRequest = serde_json::from_value(json!({
            "store_name": "Worcester",
            "issue": {
                "Issue Name": "Register frozen",
                "Priority": "1",
                "Store Number": "612",
                "Computer Number": "3",
                "Device": "Computer",
                "Category": "Hardware",
                "Description": "Locks up at boot",
                "Narrative": "",
                "Replicable?": "No",
                "Global Issue": false,
                "Global Number": null,
                "Status": "Unresolved",
                "Resolution": ""
            }
        }))
        .unwrap();

        assert_eq!(request.store_name, "Worcester");
        assert_eq!(request.issue.resolved_name(), Some("Register frozen"));
        assert_eq!(request.issue.store_number, Some(612));
    }

    #[test]
    fn test_update_issue_request_with_partial_payload() {
        // Omitted identity fields mean "keep existing"
        let request: UpdateIssueRequest = serde_json::from_value(json!({
            "issue_id": 42,
            "updated_issue": {
                "Issue Name": "Register frozen",
                "Status": "Resolved",
                "Resolution": "Swapped power supply"
            }
        }))
        .unwrap();

        assert_eq!(request.issue_id, 42);
        assert_eq!(request.updated_issue.store_number, None);
        assert_eq!(request.updated_issue.store_name, None);
        assert_eq!(request.updated_issue.status.as_deref(), Some("Resolved"));
    }

    #[test]
    fn test_delete_issue_request() {
        let request: DeleteIssueRequest =
            serde_json::from_value(json!({ "issue_id": 7 })).unwrap();
        assert_eq!(request.issue_id, 7);
    }

    #[test]
    fn test_search_query_filters_blank_values() {
        let query = SearchQuery {
            store_number: None,
            category: Some("  ".to_string()),
            status: None,
            device: None,
            name: None,
            global_issue: None,
        };

        let filter = IssueSearchFilter {
            store_number: query.store_number,
            category: query.category.filter(|s| !s.trim().is_empty()),
            status: None,
            device: None,
            name: None,
            global_issue: None,
        };
        assert!(!filter.has_any());
    }
}
