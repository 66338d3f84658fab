//! Error types for page hosting.

use http::StatusCode;
use thiserror::Error;

pub use webforms_ui::{PageError, PageResult};

/// Errors surfaced by the request adapter.
#[derive(Error, Debug)]
pub enum HostError {
    /// No page is registered for the matched route or request path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The page failed during its lifecycle.
    #[error(transparent)]
    Page(#[from] PageError),
}

impl HostError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HostError::PageNotFound(_) => StatusCode::NOT_FOUND,
            HostError::Page(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
