//! Per-request page state.

use std::sync::Arc;

use webforms_core::{LifecyclePhase, RequestContext, RouteData, RouteValues};
use webforms_routing::{RouteError, RouteTable};
use webforms_ui::{
    AutoIdCounter, ControlCollection, HtmlTextWriter, PageError, PageResult, PageServices,
};

/// Everything a control may ask of its page: routes, route data, request.
#[derive(Debug)]
pub struct PageEnvironment {
    routes: Arc<RouteTable>,
    route_data: Option<RouteData>,
    request: RequestContext,
}

impl PageEnvironment {
    pub fn new(
        routes: Arc<RouteTable>,
        route_data: Option<RouteData>,
        request: RequestContext,
    ) -> Self {
        Self {
            routes,
            route_data,
            request,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }
}

impl PageServices for PageEnvironment {
    fn get_route_url(&self, route_name: &str, values: &RouteValues) -> Result<String, RouteError> {
        self.routes.route_url(route_name, values)
    }

    fn route_data(&self) -> Option<&RouteData> {
        self.route_data.as_ref()
    }

    fn request_path(&self) -> &str {
        &self.request.path
    }

    fn resolve_url(&self, path: &str) -> String {
        self.routes.resolve_virtual_path(path)
    }
}

/// The page's control tree plus its request environment.
///
/// Handed to every page hook. Control hooks receive the environment half
/// only, as `&dyn PageServices`.
#[derive(Debug)]
pub struct PageContext {
    controls: ControlCollection,
    env: PageEnvironment,
    phase: LifecyclePhase,
}

impl PageContext {
    pub fn new(env: PageEnvironment) -> Self {
        Self {
            controls: ControlCollection::new(),
            env,
            phase: LifecyclePhase::Construct,
        }
    }

    /// Root child sequence.
    pub fn controls(&self) -> &ControlCollection {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlCollection {
        &mut self.controls
    }

    /// Phase currently executing.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn request(&self) -> &RequestContext {
        &self.env.request
    }

    pub fn routes(&self) -> &RouteTable {
        &self.env.routes
    }

    /// Route data captured for this request; `None` when no route matched.
    pub fn route_data(&self) -> Option<&RouteData> {
        self.env.route_data.as_ref()
    }

    /// Like [`route_data`](Self::route_data), failing when no route matched.
    pub fn require_route_data(&self) -> Result<&RouteData, PageError> {
        self.route_data().ok_or(PageError::NoRouteData)
    }

    /// A captured route value; `None` when unmatched or missing.
    pub fn route_value(&self, key: &str) -> Option<&str> {
        self.route_data()?.value(key)
    }

    /// Application-absolute URL for a named route.
    pub fn get_route_url(&self, route_name: &str, values: &RouteValues) -> Result<String, RouteError> {
        self.env.get_route_url(route_name, values)
    }

    /// Resolve an application-relative (`~/`) path.
    pub fn resolve_url(&self, path: &str) -> String {
        self.env.resolve_url(path)
    }

    /// Services view handed to controls.
    pub fn services(&self) -> &dyn PageServices {
        &self.env
    }

    /// Render the root controls in insertion order.
    pub fn render_controls(&self, writer: &mut HtmlTextWriter) -> PageResult {
        self.controls.render(&self.env, writer)
    }

    pub(crate) fn set_phase(&mut self, phase: LifecyclePhase) {
        self.phase = phase;
    }

    pub(crate) fn init_controls(&mut self) -> PageResult {
        self.controls.init_recursive(&self.env)
    }

    pub(crate) fn load_controls(&mut self) -> PageResult {
        self.controls.load_recursive(&self.env)
    }

    pub(crate) fn pre_render_controls(&mut self) -> PageResult {
        self.controls.pre_render_recursive(&self.env)
    }

    pub(crate) fn unload_controls(&mut self) {
        self.controls.unload_recursive();
    }

    /// Assign automatic IDs and report duplicated sibling IDs.
    pub(crate) fn finalize_ids(&mut self) -> Vec<String> {
        self.controls.assign_automatic_ids(&mut AutoIdCounter::new());
        self.controls.duplicate_sibling_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webforms_core::route_values;
    use webforms_ui::Label;

    fn context(path: &str, route_data: Option<RouteData>) -> PageContext {
        let mut routes = RouteTable::new();
        routes
            .map_page_route("ProductsByCategoryRoute", "Category/{categoryName}", "~/")
            .unwrap();
        PageContext::new(PageEnvironment::new(
            Arc::new(routes),
            route_data,
            RequestContext::new(path),
        ))
    }

    #[test]
    fn test_route_value_access() {
        let data = RouteData::new(
            "ProductsByCategoryRoute",
            route_values! { "categoryName" => "books" },
        );
        let ctx = context("/category/books", Some(data));

        assert_eq!(ctx.route_value("categoryname"), Some("books"));
        assert_eq!(ctx.route_value("missing"), None);
        assert_eq!(
            ctx.require_route_data().unwrap().route_name(),
            "ProductsByCategoryRoute"
        );
    }

    #[test]
    fn test_unmatched_request_has_no_route_data() {
        let ctx = context("/", None);

        assert!(ctx.route_data().is_none());
        assert_eq!(ctx.route_value("categoryName"), None);
        assert!(matches!(
            ctx.require_route_data(),
            Err(PageError::NoRouteData)
        ));
    }

    #[test]
    fn test_route_url_without_route_data() {
        let ctx = context("/", None);

        let url = ctx
            .get_route_url(
                "ProductsByCategoryRoute",
                &route_values! { "categoryName" => "MyTest" },
            )
            .unwrap();
        assert_eq!(url, "/Category/MyTest");
        assert!(ctx
            .get_route_url("Missing", &RouteValues::new())
            .is_err());
    }

    #[test]
    fn test_render_controls() {
        let mut ctx = context("/", None);
        ctx.controls_mut().add(Label::new().with_text("a"));
        ctx.controls_mut().add(Label::new().with_text("b"));

        let mut writer = HtmlTextWriter::new();
        ctx.render_controls(&mut writer).unwrap();
        assert_eq!(writer.as_str(), "<span>a</span><span>b</span>");
        assert_eq!(ctx.phase(), LifecyclePhase::Construct);
    }
}
