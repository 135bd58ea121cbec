use axum::{extract::State, routing::post, Json, Router};
use newsdesk_core::content::status::Role;
use newsdesk_core::envelope::ApiEnvelope;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::issue_token;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::users::UserError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login))
}

#[derive(Debug, Deserialize)]
struct CredentialsBody {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    token: String,
    user_id: Uuid,
    role: Role,
}

/// Self-service author signup. Admin accounts are seeded from config,
/// never registered through the API.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> ApiResult<Json<ApiEnvelope<TokenResponse>>> {
    if body.username.trim().is_empty() {
        return Err(ApiError::BadRequest("username is required".to_string()));
    }
    if body.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let config = state.config().clone();
    let mut users = state.users().write().await;
    let user_id = users
        .create(&body.username, &body.password, Role::Author)
        .map_err(|err| match err {
            UserError::Taken(_) => ApiError::Conflict(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        })?;
    let user = users
        .get(&body.username)
        .ok_or_else(|| ApiError::Internal("account vanished after creation".to_string()))?;
    let token = issue_token(user, &config.jwt_secret, config.token_ttl_secs)?;

    tracing::info!(username = %body.username, "author account registered");
    Ok(Json(ApiEnvelope::ok(TokenResponse {
        token,
        user_id,
        role: Role::Author,
    })))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> ApiResult<Json<ApiEnvelope<TokenResponse>>> {
    let config = state.config().clone();
    let users = state.users().read().await;
    let user = users
        .authenticate(&body.username, &body.password)
        .map_err(|_| ApiError::Unauthorized)?;
    let token = issue_token(user, &config.jwt_secret, config.token_ttl_secs)?;

    Ok(Json(ApiEnvelope::ok(TokenResponse {
        token,
        user_id: user.id,
        role: user.role,
    })))
}
