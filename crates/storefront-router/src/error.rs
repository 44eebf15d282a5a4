//! Router error types.

use thiserror::Error;

/// Errors that can occur while resolving or building locations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No route matches the location.
    #[error("Route not found: {0}")]
    NotFound(String),

    /// A dynamic segment was not supplied when building a location.
    #[error("Missing parameter '{param}' for route {route}")]
    MissingParam { route: String, param: String },

    /// Malformed route pattern.
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),
}
