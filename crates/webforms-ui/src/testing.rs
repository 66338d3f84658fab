//! Test fixtures for rendering controls outside a page.

use webforms_core::{RouteData, RouteValues};
use webforms_routing::{RouteError, RouteTable, VirtualPath};

use crate::control::{Control, PageServices};
use crate::writer::HtmlTextWriter;

/// Minimal page services over a private route table.
#[derive(Debug)]
pub(crate) struct StaticPage {
    routes: RouteTable,
    route_data: Option<RouteData>,
    path: String,
}

impl Default for StaticPage {
    fn default() -> Self {
        Self {
            routes: RouteTable::new(),
            route_data: None,
            path: "/".to_string(),
        }
    }
}

impl StaticPage {
    pub(crate) fn with_route(name: &str, pattern: &str) -> Self {
        let mut page = Self::default();
        page.routes.map_route(name, pattern, "~/").unwrap();
        page
    }

    pub(crate) fn at_path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }
}

impl PageServices for StaticPage {
    fn get_route_url(&self, route_name: &str, values: &RouteValues) -> Result<String, RouteError> {
        self.routes.route_url(route_name, values)
    }

    fn route_data(&self) -> Option<&RouteData> {
        self.route_data.as_ref()
    }

    fn request_path(&self) -> &str {
        &self.path
    }

    fn resolve_url(&self, path: &str) -> String {
        VirtualPath::resolve(self.routes.application_path(), path)
    }
}

/// Render a single control against [`StaticPage::default`].
pub(crate) fn render_to_string(control: &dyn Control) -> String {
    let mut writer = HtmlTextWriter::new();
    control.render(&StaticPage::default(), &mut writer).unwrap();
    writer.into_string()
}
