//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use webforms_routing::prelude::*;
//! ```

pub use crate::{RouteEntry, RouteError, RouteMatch, RoutePattern, RouteTable, VirtualPath};
pub use webforms_core::{route_values, RouteData, RouteValues};
