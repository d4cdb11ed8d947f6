//! HTTP middleware for the management API.
//!
//! Order in the router, bottom to top:
//!
//! 1. Sentry layers (error capture, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authentication is enforced per handler through the extractors in
//! [`auth`], not through a router-wide guard layer.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireSuperAdmin};
pub use session::create_session_layer;
