//! Named page routes for the WebForms page engine.
//!
//! Routes are registered once at startup, in precedence order, and shared
//! read-only across requests:
//!
//! ```text
//! ProductsByCategoryRoute   Category/{categoryName}   -> ~/
//! ProductDetailRoute        Product/{id}              -> ~/product
//! ```
//!
//! # Usage
//!
//! ```rust
//! use webforms_routing::prelude::*;
//!
//! let mut routes = RouteTable::new();
//! routes
//!     .map_page_route("ProductsByCategoryRoute", "Category/{categoryName}", "~/")
//!     .unwrap();
//!
//! // Inbound: first registered match wins
//! let matched = routes.match_path("/category/shoes").unwrap();
//! assert_eq!(matched.values.get("categoryName"), Some("shoes"));
//!
//! // Outbound: reverse URL generation
//! let url = routes
//!     .resolve_url("ProductsByCategoryRoute", &route_values! { "categoryName" => "MyTest" })
//!     .unwrap();
//! assert_eq!(url, "Category/MyTest");
//! ```

pub mod prelude;
mod error;
mod pattern;
mod table;
mod virtual_path;

pub use error::*;
pub use pattern::*;
pub use table::*;
pub use virtual_path::*;
