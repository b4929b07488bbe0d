use tracing::{info, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest},
        jwt::TokenKeys,
        password::{hash_password, verify_password},
        repo_types::{NewUser, User},
    },
    error::{AppError, AppResult},
    store::Store,
};

const CREDENTIALS_REQUIRED: &str = "Email and password are required";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A stored user together with a freshly issued session token.
#[derive(Debug)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

fn present(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

fn credentials(email: Option<String>, password: Option<String>) -> AppResult<(String, String)> {
    match (present(email), present(password)) {
        (Some(e), Some(p)) => Ok((e, p)),
        _ => Err(AppError::Validation(CREDENTIALS_REQUIRED.into())),
    }
}

pub async fn register(
    store: &dyn Store,
    keys: &TokenKeys,
    req: RegisterRequest,
) -> AppResult<AuthSession> {
    let (email, password) = credentials(req.email, req.password)?;

    if store.find_user_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already in use".into()));
    }

    let password_hash = hash_password(&password)?;
    // A concurrent registration can still win the race; the store's unique
    // constraint then surfaces as the same Conflict.
    let user = store
        .create_user(NewUser {
            name: req.name,
            email,
            password_hash,
        })
        .await?;

    let token = keys.issue(user.id, &user.email)?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(AuthSession { user, token })
}

pub async fn login(
    store: &dyn Store,
    keys: &TokenKeys,
    req: LoginRequest,
) -> AppResult<AuthSession> {
    let (email, password) = credentials(req.email, req.password)?;

    let Some(user) = store.find_user_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
    };

    if !verify_password(&password, &user.password_hash) {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
    }

    let token = keys.issue(user.id, &user.email)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthSession { user, token })
}
