//! Admin routes.
//!
//! Every admin request embeds the admin's own credentials in the body and
//! is re-verified from scratch; there is no admin session or token.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::admin::{AdminError, AdminService, GENERIC_ADMIN_ERROR};
use domain::models::user::UserSummary;

/// Request body for POST /admin/verify.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub password: String,
    pub pin: String,
}

/// Admin credentials embedded in every other admin request body.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminCredentials {
    pub admin_email: String,
    pub admin_password: String,
    pub admin_pin: String,
}

/// Request body for POST /admin/users and /admin/restart-api.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminRequest {
    #[serde(flatten)]
    pub admin: AdminCredentials,
}

/// Request body for POST /admin/change-user-password.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeUserPasswordRequest {
    #[serde(flatten)]
    pub admin: AdminCredentials,
    pub target_email: String,
    pub new_password: String,
}

/// Request body for POST /admin/change-user-pin.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeUserPinRequest {
    #[serde(flatten)]
    pub admin: AdminCredentials,
    pub target_email: String,
    pub new_pin: String,
}

/// Request body for POST /admin/delete-user.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(flatten)]
    pub admin: AdminCredentials,
    pub target_email: String,
}

/// Response for POST /admin/verify.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub ok: bool,
    pub message: String,
}

/// Response for POST /admin/users.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}

/// Simple success message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn map_admin_error(error: AdminError) -> ApiError {
    match error {
        AdminError::NotTrusted => ApiError::Forbidden("Not authorized".to_string()),
        AdminError::InvalidCredentials => ApiError::Unauthorized(GENERIC_ADMIN_ERROR.to_string()),
        AdminError::TargetNotFound => ApiError::NotFound("User not found".to_string()),
        AdminError::PolicyViolations(details) => ApiError::ValidationDetailed {
            message: details.join("; "),
            details,
        },
        AdminError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
        AdminError::DatabaseError(e) => ApiError::from(e),
    }
}

fn admin_service(state: &AppState) -> AdminService {
    AdminService::new(state.pool.clone(), state.config.auth.trusted_admins.clone())
}

/// Verify admin credentials without performing any operation.
///
/// POST /admin/verify
pub async fn verify(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    admin_service(&state)
        .verify_admin(&request.email, &request.password, &request.pin)
        .await
        .map_err(map_admin_error)?;

    Ok(Json(VerifyResponse {
        ok: true,
        message: "Admin verified".to_string(),
    }))
}

/// List all user accounts.
///
/// POST /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    Json(request): Json<AdminRequest>,
) -> Result<Json<UsersResponse>, ApiError> {
    let service = admin_service(&state);
    service
        .verify_admin(
            &request.admin.admin_email,
            &request.admin.admin_password,
            &request.admin.admin_pin,
        )
        .await
        .map_err(map_admin_error)?;

    let users = service.list_users().await.map_err(map_admin_error)?;
    Ok(Json(UsersResponse { users }))
}

/// Set a new password on another user's account.
///
/// POST /admin/change-user-password
pub async fn change_user_password(
    State(state): State<AppState>,
    Json(request): Json<ChangeUserPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = admin_service(&state);
    service
        .verify_admin(
            &request.admin.admin_email,
            &request.admin.admin_password,
            &request.admin.admin_pin,
        )
        .await
        .map_err(map_admin_error)?;

    service
        .change_user_password(&request.target_email, &request.new_password)
        .await
        .map_err(map_admin_error)?;

    Ok(Json(MessageResponse {
        message: "User password changed".to_string(),
    }))
}

/// Set a new PIN on another user's account.
///
/// POST /admin/change-user-pin
pub async fn change_user_pin(
    State(state): State<AppState>,
    Json(request): Json<ChangeUserPinRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = admin_service(&state);
    service
        .verify_admin(
            &request.admin.admin_email,
            &request.admin.admin_password,
            &request.admin.admin_pin,
        )
        .await
        .map_err(map_admin_error)?;

    service
        .change_user_pin(&request.target_email, &request.new_pin)
        .await
        .map_err(map_admin_error)?;

    Ok(Json(MessageResponse {
        message: "User PIN changed".to_string(),
    }))
}

/// Delete a user account.
///
/// POST /admin/delete-user
pub async fn delete_user(
    State(state): State<AppState>,
    Json(request): Json<DeleteUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let service = admin_service(&state);
    service
        .verify_admin(
            &request.admin.admin_email,
            &request.admin.admin_password,
            &request.admin.admin_pin,
        )
        .await
        .map_err(map_admin_error)?;

    service
        .delete_user(&request.target_email)
        .await
        .map_err(map_admin_error)?;

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}

/// Ask the deployment platform to restart the API: respond, then exit.
///
/// POST /admin/restart-api
pub async fn restart_api(
    State(state): State<AppState>,
    Json(request): Json<AdminRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    admin_service(&state)
        .verify_admin(
            &request.admin.admin_email,
            &request.admin.admin_password,
            &request.admin.admin_pin,
        )
        .await
        .map_err(map_admin_error)?;

    tracing::warn!(admin = %request.admin.admin_email, "API restart requested");

    // Give the response time to flush before the process exits; the
    // platform supervisor brings the service back up.
    tokio::spawn(async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        std::process::exit(0);
    });

    Ok(Json(MessageResponse {
        message: "API restart requested".to_string(),
    }))
}
