//! Edge route gate for page routes.
//!
//! Runs before every handler. It reads only the session cookie and never
//! touches the store, which keeps it independent of the bearer-header check
//! the API handlers do.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::{
    auth::{cookie::extract_cookie, jwt::TokenKeys},
    config::GuardConfig,
    state::AppState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a session cookie.
    Protected,
    /// Login/register pages; pointless once signed in.
    AuthOnly,
    Public,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Continue,
    Redirect(String),
}

pub fn classify(path: &str, cfg: &GuardConfig) -> RouteClass {
    let prefix = cfg.protected_prefix.trim_end_matches('/');
    let under_prefix = path
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));

    if under_prefix {
        RouteClass::Protected
    } else if cfg.auth_pages.iter().any(|p| p == path) {
        RouteClass::AuthOnly
    } else {
        RouteClass::Public
    }
}

/// Protected pages only check that a cookie is present. Auth pages redirect
/// when the cookie carries a token that verifies.
pub fn decide(
    class: RouteClass,
    token: Option<&str>,
    keys: &TokenKeys,
    cfg: &GuardConfig,
) -> GateDecision {
    match (class, token) {
        (RouteClass::Protected, None) => GateDecision::Redirect(cfg.login_path.clone()),
        (RouteClass::AuthOnly, Some(token)) if keys.verify(token).is_some() => {
            GateDecision::Redirect(cfg.dashboard_path.clone())
        }
        _ => GateDecision::Continue,
    }
}

pub async fn route_gate(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let cfg = &state.config.guard;
    let class = classify(req.uri().path(), cfg);
    if class == RouteClass::Public {
        return next.run(req).await;
    }

    let token = extract_cookie(req.headers(), &state.config.cookie.name);
    match decide(class, token.as_deref(), &state.keys, cfg) {
        GateDecision::Continue => next.run(req).await,
        GateDecision::Redirect(to) => {
            debug!(path = %req.uri().path(), ?class, to = %to, "route gate redirect");
            Redirect::temporary(&to).into_response()
        }
    }
}
