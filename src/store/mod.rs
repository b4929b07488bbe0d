//! Persistence contract for users and todos.
//!
//! Handlers and services only see [`Store`]. Postgres backs it in production;
//! tests swap in the in-memory implementation.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};
use crate::todos::repo_types::{NewTodo, Todo, TodoChanges};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint on `users.email` rejected the insert.
    #[error("email already in use")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn create_user(&self, new: NewUser) -> StoreResult<User>;

    /// Todos of `user_id`, most recently created first.
    async fn list_todos(&self, user_id: Uuid) -> StoreResult<Vec<Todo>>;
    async fn create_todo(&self, new: NewTodo) -> StoreResult<Todo>;
    /// Ownership-scoped lookup: `None` both when the id is unknown and when
    /// the todo belongs to another user.
    async fn find_todo(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Todo>>;
    async fn update_todo(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: TodoChanges,
    ) -> StoreResult<Option<Todo>>;
    /// Returns whether a row was removed.
    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool>;
}
