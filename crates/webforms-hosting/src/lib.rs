//! Page hosting for the WebForms page engine.
//!
//! A request flows through three pieces:
//!
//! - [`PageHost`] matches the request path against the shared route table,
//!   picks the page registered for the route's virtual path and maps the
//!   outcome to an HTTP response.
//! - [`PageLifecycleDriver`] runs one page instance through its phases
//!   (framework initialize, load, pre-render, render, unload) and collects
//!   the markup.
//! - [`Page`] is what applications implement: named hooks with no-op
//!   defaults, each receiving the [`PageContext`] that owns the control tree.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use webforms_hosting::prelude::*;
//!
//! #[derive(Default)]
//! struct CategoryPage;
//!
//! impl Page for CategoryPage {
//!     fn framework_initialize(&mut self, ctx: &mut PageContext) -> PageResult {
//!         let name = ctx.route_value("categoryName").unwrap_or_default().to_string();
//!         ctx.controls_mut().add(Label::new().with_id(name));
//!         Ok(())
//!     }
//! }
//!
//! let mut routes = RouteTable::new();
//! routes.map_page_route("Category", "Category/{categoryName}", "~/").unwrap();
//!
//! let html = run_page::<CategoryPage>("/category/books", &Arc::new(routes)).unwrap();
//! assert_eq!(html, r#"<span id="books"></span>"#);
//! ```

pub mod prelude;
mod config;
mod context;
mod driver;
mod error;
mod host;
mod page;

pub use config::*;
pub use context::*;
pub use driver::*;
pub use error::*;
pub use host::*;
pub use page::*;
