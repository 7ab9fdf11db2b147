//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Credential store implementations
//! - `presentation/` - HTTP handlers, DTOs, router, route guard
//!
//! ## Features
//! - User registration and login with email + password
//! - Stateless bearer credentials (signed, time-bounded)
//! - Profile read/update for the authenticated principal
//! - Route guard redirecting navigation by authentication state
//! - Client-side session cache with shape validation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, zeroized in memory
//! - Login failures are uniform: unknown accounts and wrong passwords are
//!   indistinguishable by message and by timing
//! - Bearer credentials authorize only with a valid signature and a
//!   future expiry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod session;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryUserRepository;
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{RouteGuardConfig, RouteGuardState, route_guard};
pub use presentation::router::{user_router, user_router_generic};
pub use session::{SessionCache, SessionHandle, SessionUser};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}
