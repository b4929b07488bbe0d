use tracing::{debug, info};
use uuid::Uuid;

use super::dto::{CreateTodoRequest, UpdateTodoRequest};
use super::repo_types::{NewTodo, Todo, TodoChanges};
use crate::{
    error::{AppError, AppResult},
    store::Store,
};

fn not_found() -> AppError {
    AppError::NotFound("Todo not found".into())
}

fn required_title(title: Option<String>) -> AppResult<String> {
    title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".into()))
}

/// The caller's todos, newest first.
pub async fn list(store: &dyn Store, user_id: Uuid) -> AppResult<Vec<Todo>> {
    let todos = store.list_todos(user_id).await?;
    debug!(%user_id, count = todos.len(), "todos listed");
    Ok(todos)
}

pub async fn create(store: &dyn Store, user_id: Uuid, req: CreateTodoRequest) -> AppResult<Todo> {
    let title = required_title(req.title)?;
    let todo = store
        .create_todo(NewTodo {
            user_id,
            title,
            description: req.description,
        })
        .await?;
    info!(%user_id, todo_id = %todo.id, "todo created");
    Ok(todo)
}

/// Overwrites the title. Omitted `description` and `completed` keep their
/// stored values; an explicit null clears the description. Missing and
/// foreign todos are both NotFound.
pub async fn update(
    store: &dyn Store,
    user_id: Uuid,
    todo_id: Uuid,
    req: UpdateTodoRequest,
) -> AppResult<Todo> {
    let title = required_title(req.title)?;
    let existing = store.find_todo(todo_id, user_id).await?.ok_or_else(not_found)?;

    let changes = TodoChanges {
        title,
        description: req.description.unwrap_or(existing.description),
        completed: req.completed.unwrap_or(existing.completed),
    };
    // Deleted between lookup and write.
    let todo = store
        .update_todo(todo_id, user_id, changes)
        .await?
        .ok_or_else(not_found)?;
    info!(%user_id, %todo_id, completed = todo.completed, "todo updated");
    Ok(todo)
}

/// Update that changes only `completed`.
pub async fn toggle_complete(
    store: &dyn Store,
    user_id: Uuid,
    todo_id: Uuid,
    completed: bool,
) -> AppResult<Todo> {
    let existing = store.find_todo(todo_id, user_id).await?.ok_or_else(not_found)?;
    update(
        store,
        user_id,
        todo_id,
        UpdateTodoRequest {
            title: Some(existing.title),
            description: None,
            completed: Some(completed),
        },
    )
    .await
}

pub async fn delete(store: &dyn Store, user_id: Uuid, todo_id: Uuid) -> AppResult<()> {
    store.find_todo(todo_id, user_id).await?.ok_or_else(not_found)?;
    if !store.delete_todo(todo_id, user_id).await? {
        return Err(not_found());
    }
    info!(%user_id, %todo_id, "todo deleted");
    Ok(())
}
