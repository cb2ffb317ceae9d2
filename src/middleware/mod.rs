//! HTTP middleware

pub mod auth;
pub mod logging;
pub mod rate_limit;
pub mod timeout;

pub use auth::{AuthenticatedUser, OptionalAuth, auth_middleware};
pub use logging::logging_middleware;
pub use rate_limit::rate_limit_middleware;
pub use timeout::timeout_middleware;
