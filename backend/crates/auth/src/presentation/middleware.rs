//! Route Guard Middleware
//!
//! Per-request navigation guard, evaluated before any handler:
//!
//! 1. Protected path without a usable credential: redirect to the login
//!    entry point.
//! 2. Public-only path (login/register) with a usable credential: redirect
//!    to the authenticated landing page.
//! 3. Anything else passes through unmodified.
//!
//! "Usable" means the bearer credential's signature verifies and its expiry
//! is in the future; a present-but-invalid token is treated as absent. The
//! guard never consults the Credential Store and has no side effects beyond
//! the redirect decision.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use platform::request::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::token::AccessClaims;

/// Route guard configuration: route sets and redirect targets.
#[derive(Debug, Clone)]
pub struct RouteGuardConfig {
    /// Paths that require an authenticated client
    pub protected: Vec<String>,
    /// Paths that only make sense for unauthenticated clients
    pub public_only: Vec<String>,
    /// Redirect target for rule 1
    pub login_path: String,
    /// Redirect target for rule 2
    pub landing_path: String,
    /// Cookie the client keeps the bearer credential in
    pub token_cookie: String,
}

impl Default for RouteGuardConfig {
    fn default() -> Self {
        Self {
            protected: vec![
                "/".to_string(),
                "/projects".to_string(),
                "/settings".to_string(),
                "/profile".to_string(),
            ],
            public_only: vec!["/login".to_string(), "/register".to_string()],
            login_path: "/login".to_string(),
            landing_path: "/profile".to_string(),
            token_cookie: "token".to_string(),
        }
    }
}

/// Classification of a request path against the configured route sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Protected,
    PublicOnly,
    Open,
}

/// Outcome of the guard rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToLanding,
}

impl RouteGuardConfig {
    /// Classify a path by exact match, protected set first
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.protected.iter().any(|p| p == path) {
            RouteClass::Protected
        } else if self.public_only.iter().any(|p| p == path) {
            RouteClass::PublicOnly
        } else {
            RouteClass::Open
        }
    }
}

/// The guard rules as a pure function of route class and authentication state
pub fn decide(class: RouteClass, authenticated: bool) -> GuardDecision {
    match (class, authenticated) {
        (RouteClass::Protected, false) => GuardDecision::RedirectToLogin,
        (RouteClass::PublicOnly, true) => GuardDecision::RedirectToLanding,
        _ => GuardDecision::Allow,
    }
}

/// Middleware state
#[derive(Clone)]
pub struct RouteGuardState {
    pub guard: Arc<RouteGuardConfig>,
    pub auth: Arc<AuthConfig>,
}

/// Route guard middleware, mounted over the whole navigation surface
pub async fn route_guard(
    State(state): State<RouteGuardState>,
    req: Request,
    next: Next,
) -> Response {
    let authenticated = extract_cookie(req.headers(), &state.guard.token_cookie)
        .map(|token| {
            state
                .auth
                .signer()
                .verify::<AccessClaims>(&token)
                .is_ok()
        })
        .unwrap_or(false);

    let class = state.guard.classify(req.uri().path());

    match decide(class, authenticated) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::RedirectToLogin => {
            tracing::debug!(path = %req.uri().path(), "Unauthenticated access to protected route");
            Redirect::to(&state.guard.login_path).into_response()
        }
        GuardDecision::RedirectToLanding => {
            tracing::debug!(path = %req.uri().path(), "Authenticated access to public-only route");
            Redirect::to(&state.guard.landing_path).into_response()
        }
    }
}
