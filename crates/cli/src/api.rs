//! HTTP client for the StoreTrack API.
//!
//! One method per endpoint, with the per-call timeouts the operation
//! warrants (directory loads and bulk lists get longer ones). No retries:
//! every failure is reported to the operator and the operation ends.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::json;
use thiserror::Error;

use domain::models::issue::IssuePayload;
use domain::models::store::StoreInfo;
use domain::models::{Issue, StoreDevice};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Error contacting server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Api(String),

    #[error("Server returned invalid JSON")]
    InvalidBody,
}

/// Outcome of a quick-login attempt.
#[derive(Debug)]
pub enum QuickLoginOutcome {
    Success,
    /// Rejected; when `require_full` is set the caller falls back to the
    /// full login form.
    Rejected {
        require_full: bool,
        message: String,
    },
}

/// Search parameters for `GET /issues/search`.
#[derive(Debug, Default, Clone)]
pub struct SearchParams {
    pub store_number: Option<i32>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub device: Option<String>,
    pub name: Option<String>,
}

impl SearchParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(n) = self.store_number {
            query.push(("store_number", n.to_string()));
        }
        if let Some(c) = &self.category {
            query.push(("category", c.clone()));
        }
        if let Some(s) = &self.status {
            query.push(("status", s.clone()));
        }
        if let Some(d) = &self.device {
            query.push(("device", d.clone()));
        }
        if let Some(n) = &self.name {
            query.push(("name", n.clone()));
        }
        query
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pulls the error message out of a non-2xx response body.
    async fn api_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => {
                let error = body
                    .get("error")
                    .and_then(|e| e.as_str())
                    .unwrap_or("Server error")
                    .to_string();
                match body.get("details").and_then(|d| d.as_array()) {
                    Some(details) if !details.is_empty() => {
                        let list: Vec<&str> =
                            details.iter().filter_map(|d| d.as_str()).collect();
                        format!("{} ({})", error, list.join("; "))
                    }
                    _ => error,
                }
            }
            Err(_) => format!("Server returned {}", status),
        };
        ClientError::Api(message)
    }

    // ---- stores / devices ----

    /// GET /stores
    pub async fn get_stores(&self) -> Result<BTreeMap<String, StoreInfo>, ClientError> {
        let response = self
            .http
            .get(self.url("/stores"))
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<BTreeMap<String, StoreInfo>>()
            .await
            .map_err(|_| ClientError::InvalidBody)
    }

    /// GET /devices/by-store
    pub async fn devices_by_store(
        &self,
        store_number: i32,
    ) -> Result<Vec<StoreDevice>, ClientError> {
        #[derive(serde::Deserialize)]
        struct DevicesResponse {
            devices: Vec<StoreDevice>,
        }

        let response = self
            .http
            .get(self.url("/devices/by-store"))
            .query(&[("store_number", store_number.to_string())])
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<DevicesResponse>()
            .await
            .map(|r| r.devices)
            .map_err(|_| ClientError::InvalidBody)
    }

    // ---- issues ----

    /// POST /issues
    pub async fn add_issue(
        &self,
        store_name: &str,
        issue: &IssuePayload,
    ) -> Result<Issue, ClientError> {
        let response = self
            .http
            .post(self.url("/issues"))
            .json(&json!({ "store_name": store_name, "issue": issue }))
            .timeout(Duration::from_secs(60))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<Issue>()
            .await
            .map_err(|_| ClientError::InvalidBody)
    }

    /// GET /issues/by-store
    pub async fn issues_by_store(
        &self,
        store_number: Option<i32>,
        store_name: Option<&str>,
    ) -> Result<Vec<Issue>, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(n) = store_number {
            query.push(("store_number", n.to_string()));
        }
        if let Some(name) = store_name {
            query.push(("store_name", name.to_string()));
        }

        let response = self
            .http
            .get(self.url("/issues/by-store"))
            .query(&query)
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<Vec<Issue>>()
            .await
            .map_err(|_| ClientError::InvalidBody)
    }

    /// GET /issues/search
    pub async fn search_issues(&self, params: &SearchParams) -> Result<Vec<Issue>, ClientError> {
        let response = self
            .http
            .get(self.url("/issues/search"))
            .query(&params.to_query())
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<Vec<Issue>>()
            .await
            .map_err(|_| ClientError::InvalidBody)
    }

    /// GET /issues/all
    pub async fn all_issues(&self) -> Result<Vec<Issue>, ClientError> {
        let response = self
            .http
            .get(self.url("/issues/all"))
            .timeout(Duration::from_secs(60))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<Vec<Issue>>()
            .await
            .map_err(|_| ClientError::InvalidBody)
    }

    /// POST /issues/update
    pub async fn update_issue(
        &self,
        issue_id: i64,
        updated_issue: &IssuePayload,
    ) -> Result<Issue, ClientError> {
        let response = self
            .http
            .post(self.url("/issues/update"))
            .json(&json!({ "issue_id": issue_id, "updated_issue": updated_issue }))
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<Issue>()
            .await
            .map_err(|_| ClientError::InvalidBody)
    }

    /// POST /issues/delete
    pub async fn delete_issue(&self, issue_id: i64) -> Result<Issue, ClientError> {
        let response = self
            .http
            .post(self.url("/issues/delete"))
            .json(&json!({ "issue_id": issue_id }))
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        response
            .json::<Issue>()
            .await
            .map_err(|_| ClientError::InvalidBody)
    }

    // ---- auth ----

    /// POST /auth/quick-login
    pub async fn quick_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<QuickLoginOutcome, ClientError> {
        let response = self
            .http
            .post(self.url("/auth/quick-login"))
            .json(&json!({ "username": username, "password": password }))
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(QuickLoginOutcome::Success);
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or_default();
        Ok(QuickLoginOutcome::Rejected {
            require_full: body
                .get("require_full")
                .and_then(|r| r.as_bool())
                .unwrap_or(false),
            message: body
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("Login failed")
                .to_string(),
        })
    }

    /// POST /auth/login
    pub async fn full_login(
        &self,
        email: &str,
        username: &str,
        password: &str,
        pin: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({
                "email": email,
                "username": username,
                "password": password,
                "pin": pin
            }))
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_to_query() {
        let params = SearchParams {
            store_number: Some(612),
            status: Some("Resolved".to_string()),
            ..Default::default()
        };
        let query = params.to_query();
        assert_eq!(query.len(), 2);
        assert!(query.contains(&("store_number", "612".to_string())));
        assert!(query.contains(&("status", "Resolved".to_string())));
    }

    #[test]
    fn test_search_params_empty() {
        assert!(SearchParams::default().is_empty());
        assert!(!SearchParams {
            name: Some("printer".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_client_url_join() {
        let client = ApiClient::new("https://api.example.com".to_string());
        assert_eq!(client.url("/stores"), "https://api.example.com/stores");
    }
}
