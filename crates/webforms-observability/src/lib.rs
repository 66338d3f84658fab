//! Per-request logging for the WebForms page engine.
//!
//! A [`StructuredLogger`] is created for each request from an
//! [`ObservabilityConfig`] and tags every entry with the request ID, the
//! page type and the matched route.

mod config;
mod logging;

pub use config::*;
pub use logging::*;

pub use webforms_core::{RequestId, TimingContext};
