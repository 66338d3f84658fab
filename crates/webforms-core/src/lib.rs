//! Core abstractions for the WebForms page engine.
//!
//! This crate provides the fundamental types shared by every other crate:
//! - `RequestId` - Unique request identifier
//! - `RouteValues` / `RouteData` - Matched route values for one request
//! - `LifecyclePhase` - Page lifecycle tracking
//! - `RoutingConfig` - Route registration loaded from TOML or JSON

mod config;
mod context;
mod lifecycle;

pub use config::*;
pub use context::*;
pub use lifecycle::*;
