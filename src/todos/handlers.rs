use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    CreateTodoRequest, MessageResponse, TodoListResponse, TodoResponse, ToggleTodoRequest,
    UpdateTodoRequest,
};
use super::services;
use crate::{
    auth::extractors::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            axum::routing::put(update_todo)
                .patch(toggle_todo)
                .delete(delete_todo),
        )
}

/// Unparseable ids cannot name an owned todo, so they are NotFound too.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Todo not found".into()))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::Validation(e.body_text()))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<Json<TodoListResponse>> {
    let todos = services::list(state.store.as_ref(), user.id).await?;
    Ok(Json(TodoListResponse { todos }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TodoResponse>)> {
    let body = json_body(payload)?;
    let todo = services::create(state.store.as_ref(), user.id, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(TodoResponse {
            message: "Todo created",
            todo,
        }),
    ))
}

#[instrument(skip_all, fields(user_id = %user.id, todo_id = %id))]
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> AppResult<Json<TodoResponse>> {
    let id = parse_id(&id)?;
    let body = json_body(payload)?;
    let todo = services::update(state.store.as_ref(), user.id, id, body).await?;
    Ok(Json(TodoResponse {
        message: "Todo updated",
        todo,
    }))
}

#[instrument(skip_all, fields(user_id = %user.id, todo_id = %id))]
pub async fn toggle_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<ToggleTodoRequest>, JsonRejection>,
) -> AppResult<Json<TodoResponse>> {
    let id = parse_id(&id)?;
    let body = json_body(payload)?;
    let todo =
        services::toggle_complete(state.store.as_ref(), user.id, id, body.completed).await?;
    Ok(Json(TodoResponse {
        message: "Todo updated",
        todo,
    }))
}

#[instrument(skip_all, fields(user_id = %user.id, todo_id = %id))]
pub async fn delete_todo(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    services::delete(state.store.as_ref(), user.id, id).await?;
    Ok(Json(MessageResponse {
        message: "Todo deleted",
    }))
}
