//! Authentication routes: registration, login, quick login, and credential
//! changes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::auth::{AuthError, AuthService, GENERIC_LOGIN_ERROR};
use domain::models::user::UserSummary;

/// Request body for user registration.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, message = "PIN is required"))]
    pub pin: String,
}

/// Request body for full login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub pin: String,
}

/// Request body for quick login.
#[derive(Debug, Clone, Deserialize)]
pub struct QuickLoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for a password change.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub username: String,
    pub current_password: String,
    pub new_password: String,
    pub pin: String,
}

/// Request body for a PIN change.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePinRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub current_pin: String,
    pub new_pin: String,
}

/// Simple success message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response body for successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

/// Failure body for quick login: tells the caller to fall back to full
/// login.
#[derive(Debug, Serialize)]
pub struct QuickLoginFailure {
    pub error: String,
    pub require_full: bool,
}

fn map_auth_error(error: AuthError) -> ApiError {
    match error {
        AuthError::InvalidCredentials => ApiError::Unauthorized(GENERIC_LOGIN_ERROR.to_string()),
        AuthError::PasswordNotSet | AuthError::PinNotSet => {
            ApiError::Unauthorized(error.to_string())
        }
        AuthError::PolicyViolations(details) => ApiError::ValidationDetailed {
            message: details.join("; "),
            details,
        },
        AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
        AuthError::DatabaseError(e) => ApiError::from(e),
    }
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(
        state.pool.clone(),
        state.config.auth.allowed_email_domains.clone(),
    )
}

/// Register a new user (or re-register an existing email).
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let user = auth_service(&state)
        .register(
            &request.email,
            &request.username,
            &request.password,
            &request.pin,
        )
        .await
        .map_err(map_auth_error)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// Full login with email, username, password, and PIN.
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth_service(&state)
        .full_login(
            &request.email,
            &request.username,
            &request.password,
            &request.pin,
        )
        .await
        .map_err(map_auth_error)?;

    Ok(Json(MessageResponse {
        message: "Login successful".to_string(),
    }))
}

/// Quick login with username and password, gated by login recency.
///
/// POST /auth/quick-login
///
/// Failures all look alike and carry `require_full: true` so the client
/// falls back to the full login form.
pub async fn quick_login(
    State(state): State<AppState>,
    Json(request): Json<QuickLoginRequest>,
) -> Response {
    match auth_service(&state)
        .quick_login(&request.username, &request.password)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Quick login successful".to_string(),
            }),
        )
            .into_response(),
        Err(AuthError::DatabaseError(e)) => ApiError::from(e).into_response(),
        Err(AuthError::PasswordError(e)) => {
            ApiError::Internal(format!("Password error: {}", e)).into_response()
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(QuickLoginFailure {
                error: GENERIC_LOGIN_ERROR.to_string(),
                require_full: true,
            }),
        )
            .into_response(),
    }
}

/// Change the caller's password after a full credential check.
///
/// POST /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth_service(&state)
        .change_password(
            &request.email,
            &request.username,
            &request.current_password,
            &request.new_password,
            &request.pin,
        )
        .await
        .map_err(map_auth_error)?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// Change the caller's PIN after a full credential check.
///
/// POST /auth/change-pin
pub async fn change_pin(
    State(state): State<AppState>,
    Json(request): Json<ChangePinRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth_service(&state)
        .change_pin(
            &request.email,
            &request.username,
            &request.password,
            &request.current_pin,
            &request.new_pin,
        )
        .await
        .map_err(map_auth_error)?;

    Ok(Json(MessageResponse {
        message: "PIN changed successfully".to_string(),
    }))
}
