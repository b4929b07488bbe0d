//! In-memory [`Store`] for tests. Mirrors the Postgres constraints the
//! services rely on: unique email and owner-scoped todo access.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::auth::repo_types::{NewUser, User};
use crate::todos::repo_types::{NewTodo, Todo, TodoChanges};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    todos: Vec<Todo>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count_users_with_email(&self, email: &str) -> usize {
        let tables = self.tables.lock().await;
        tables.users.iter().filter(|u| u.email == email).count()
    }

    pub async fn todo_count(&self) -> usize {
        self.tables.lock().await.todos.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.email == new.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_todos(&self, user_id: Uuid) -> StoreResult<Vec<Todo>> {
        let tables = self.tables.lock().await;
        // Newest insert first so equal timestamps still come out newest-first
        // after the stable sort.
        let mut todos: Vec<Todo> = tables
            .todos
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    async fn create_todo(&self, new: NewTodo) -> StoreResult<Todo> {
        let mut tables = self.tables.lock().await;
        let now = OffsetDateTime::now_utc();
        let todo = Todo {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            completed: false,
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.todos.push(todo.clone());
        Ok(todo)
    }

    async fn find_todo(&self, id: Uuid, user_id: Uuid) -> StoreResult<Option<Todo>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .todos
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn update_todo(
        &self,
        id: Uuid,
        user_id: Uuid,
        changes: TodoChanges,
    ) -> StoreResult<Option<Todo>> {
        let mut tables = self.tables.lock().await;
        let Some(todo) = tables
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
        else {
            return Ok(None);
        };
        todo.title = changes.title;
        todo.description = changes.description;
        todo.completed = changes.completed;
        todo.updated_at = OffsetDateTime::now_utc();
        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, id: Uuid, user_id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.todos.len();
        tables.todos.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(tables.todos.len() < before)
    }
}
