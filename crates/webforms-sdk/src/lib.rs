//! Public SDK for the WebForms page engine.
//!
//! This crate re-exports all engine functionality:
//!
//! ```
//! use std::sync::Arc;
//! use webforms_sdk::prelude::*;
//!
//! #[derive(Default)]
//! struct ProductsPage;
//!
//! impl Page for ProductsPage {
//!     fn framework_initialize(&mut self, ctx: &mut PageContext) -> PageResult {
//!         let url = ctx.get_route_url(
//!             "ProductsByCategoryRoute",
//!             &route_values! { "categoryName" => "MyTest" },
//!         )?;
//!         ctx.controls_mut().add(HyperLink::new("Products").with_navigate_url(url));
//!         Ok(())
//!     }
//! }
//!
//! let mut routes = RouteTable::new();
//! routes.map_page_route("ProductsByCategoryRoute", "Category/{categoryName}", "~/")?;
//!
//! let html = run_page::<ProductsPage>("/", &Arc::new(routes))?;
//! assert_eq!(html, r#"<a href="/Category/MyTest">Products</a>"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use webforms_core;
pub use webforms_extensions;
pub use webforms_hosting;
pub use webforms_observability;
pub use webforms_routing;
pub use webforms_ui;

/// Prelude for convenient imports.
pub mod prelude {
    pub use webforms_core::*;
    pub use webforms_extensions::*;
    pub use webforms_hosting::*;
    pub use webforms_observability::*;
    pub use webforms_routing::prelude::*;
    pub use webforms_ui::*;
}
