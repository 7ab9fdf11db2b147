//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::request::extract_bearer;

use crate::application::config::AuthConfig;
use crate::application::token::AccessClaims;
use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    UpdateProfileUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, PublicUserResponse, RegisterRequest, UpdateProfileRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /users/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone());

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        display_name: req.name,
        avatar_url: req.avatar,
    };

    let user = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(PublicUserResponse::from(&user))))
}

// ============================================================================
// Login
// ============================================================================

/// POST /users/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
    }))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /users/me
///
/// Returns the authenticated principal's claims as carried by the verified
/// bearer credential.
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<AccessClaims>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let claims = authenticate(&state.config, &headers)?;
    Ok(Json(claims))
}

/// PATCH /users/me
pub async fn update_me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<PublicUserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let claims = authenticate(&state.config, &headers)?;

    // The subject comes from the verified token, never from the body
    let subject = claims.subject_id()?;

    let use_case = UpdateProfileUseCase::new(state.repo.clone());
    let user = use_case.execute(&subject, req.into()).await?;

    Ok(Json(PublicUserResponse::from(&user)))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Extract and verify the bearer credential on a protected request
fn authenticate(config: &Arc<AuthConfig>, headers: &HeaderMap) -> AuthResult<AccessClaims> {
    let token = extract_bearer(headers).ok_or(AuthError::MissingCredential)?;
    CurrentUserUseCase::new(config.clone()).execute(&token)
}
