//! Routing error types.

use thiserror::Error;

/// Errors raised while registering or resolving routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// A route with this name is already registered.
    #[error("A route named '{0}' is already in the route collection. Route names must be unique.")]
    DuplicateRouteName(String),

    /// No route with this name is registered.
    #[error("A route named '{0}' could not be found in the route collection.")]
    RouteNotFound(String),

    /// URL generation lacks a value for a placeholder.
    #[error("Route '{route}' requires a value for '{key}'")]
    MissingRouteValue { route: String, key: String },

    /// The URL pattern is malformed.
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl RouteError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}
