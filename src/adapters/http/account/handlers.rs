//! HTTP handlers for account endpoints.

use axum::extract::{Json, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::MultipartForm;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::{
    GetProfileQuery, OAuthUrlQuery, SignInCommand, SignUpCommand, UpdateProfileCommand,
};

use super::dto::{
    LoginRequest, OAuthParams, OAuthUrlResponse, RegisterRequest, RegisterResponse,
};

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .sign_in_handler()
        .handle(SignInCommand {
            email: request.email,
            password: request.password,
        })
        .await?;
    Ok(Json(session))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state
        .sign_up_handler()
        .handle(SignUpCommand {
            email: request.email,
            password: request.password,
            username: request.username,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse::from(outcome))))
}

/// GET /api/auth/oauth/:provider
pub async fn oauth_url(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<OAuthParams>,
) -> Result<impl IntoResponse, ApiError> {
    let url = state.oauth_url_handler().handle(OAuthUrlQuery {
        provider,
        redirect_to: params.redirect_to,
    })?;
    Ok(Json(OAuthUrlResponse { url }))
}

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .get_profile_handler()
        .handle(GetProfileQuery { user_id: user.id })
        .await?;
    Ok(Json(view))
}

/// PUT /api/profile (multipart: `display_name`, `bio`, `avatar`)
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let cmd = UpdateProfileCommand {
        user_id: user.id,
        display_name: form.text("display_name").map(str::to_string),
        bio: form.text("bio").map(str::to_string),
        avatar: form.take_file("avatar"),
    };

    let view = state.update_profile_handler().handle(cmd).await?;
    Ok(Json(view))
}
