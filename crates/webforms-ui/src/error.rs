//! Error type shared by pages and controls.

use thiserror::Error;
use webforms_core::LifecyclePhase;
use webforms_routing::RouteError;

/// Errors raised while a page runs through its lifecycle.
///
/// Errors returned from page or control hooks reach the request adapter
/// unmodified; the driver never wraps or retries them.
#[derive(Error, Debug)]
pub enum PageError {
    /// Route lookup or URL generation failed.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Arbitrary error raised inside a lifecycle hook.
    #[error(transparent)]
    Hook(#[from] anyhow::Error),

    /// A phase was entered out of order.
    #[error("Lifecycle phase out of order: expected {expected}, got {actual}")]
    PhaseOrder {
        expected: LifecyclePhase,
        actual: LifecyclePhase,
    },

    /// Route data was required but the request matched no route.
    #[error("No route data is attached to the page")]
    NoRouteData,
}

impl PageError {
    /// Create a hook error from a message.
    pub fn hook(message: impl std::fmt::Display) -> Self {
        PageError::Hook(anyhow::anyhow!("{}", message))
    }
}

/// Result alias for page and control operations.
pub type PageResult<T = ()> = Result<T, PageError>;
