use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        cookie::session_cookie,
        dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest},
        extractors::AuthUser,
        services::{self, AuthSession},
    },
    error::{AppError, AppResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

/// Body plus session cookie, so both bearer and cookie checks work.
fn session_response(
    state: &AppState,
    status: StatusCode,
    message: &'static str,
    session: AuthSession,
) -> impl IntoResponse {
    let cookie = session_cookie(&state.config.cookie, &session.token);
    (
        status,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse {
            message,
            token: session.token,
            user: PublicUser::from(session.user),
        }),
    )
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let session = services::register(state.store.as_ref(), &state.keys, payload).await?;
    Ok(session_response(&state, StatusCode::CREATED, "Registration successful", session))
}

#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let session = services::login(state.store.as_ref(), &state.keys, payload).await?;
    Ok(session_response(&state, StatusCode::OK, "Login successful", session))
}

#[instrument(skip_all)]
pub async fn get_me(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(PublicUser::from(user))
}
