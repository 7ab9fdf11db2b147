//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the route guard middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{GuardDecision, RouteClass, RouteGuardConfig, RouteGuardState, route_guard};
pub use router::{user_router, user_router_generic};
