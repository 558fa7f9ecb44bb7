//! `/auth/register` and `/auth/login`. Neither needs a token.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// `{login, password}`; the same body serves both endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Login must be between 1 and 100 characters"
    ))]
    pub login: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let CredentialsRequest { login, password } = credentials;
    let user = state.auth_service.register(login, password).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    let CredentialsRequest { login, password } = credentials;
    state.auth_service.login(login, password).await.map(Json)
}
