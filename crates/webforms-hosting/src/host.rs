//! Request adapter: HTTP request in, page markup out.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Request, Response, StatusCode};
use webforms_core::{LifecycleObserver, RequestContext, RequestId, RouteData};
use webforms_observability::{LogOutput, ObservabilityConfig};
use webforms_routing::{RouteError, RouteTable};

use crate::config::EngineConfig;
use crate::driver::{PageLifecycleDriver, RenderedPage};
use crate::error::HostError;
use crate::page::Page;

/// Header carrying the request ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Creates a fresh page instance per request.
pub type PageFactory = Box<dyn Fn() -> Box<dyn Page> + Send + Sync>;

/// Maps requests to registered pages and runs them.
///
/// Pages are registered by virtual path. A request that matches a route
/// runs the page registered for the route's virtual path; otherwise the
/// request path itself selects the page.
pub struct PageHost {
    driver: PageLifecycleDriver,
    pages: HashMap<String, PageFactory>,
    logging: ObservabilityConfig,
    log_output: LogOutput,
}

impl fmt::Debug for PageHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pages: Vec<_> = self.pages.keys().collect();
        pages.sort();
        f.debug_struct("PageHost")
            .field("driver", &self.driver)
            .field("pages", &pages)
            .finish()
    }
}

impl PageHost {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self {
            driver: PageLifecycleDriver::new(routes),
            pages: HashMap::new(),
            logging: ObservabilityConfig::default(),
            log_output: LogOutput::Stderr,
        }
    }

    /// Build a host from an engine configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, RouteError> {
        let routes = Arc::new(config.route_table()?);
        Ok(Self::new(routes).with_logging(config.logging))
    }

    pub fn with_observer(mut self, observer: Arc<dyn LifecycleObserver>) -> Self {
        self.driver = self.driver.with_observer(observer);
        self
    }

    pub fn with_logging(mut self, logging: ObservabilityConfig) -> Self {
        self.driver = self.driver.with_logging(logging);
        self.logging = logging;
        self
    }

    pub fn with_log_output(mut self, output: LogOutput) -> Self {
        self.driver = self.driver.with_log_output(output.clone());
        self.log_output = output;
        self
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        self.driver.routes()
    }

    /// Register a page factory for a virtual path (`~/`, `~/about`, `/x`).
    pub fn register_page<P, F>(&mut self, virtual_path: &str, factory: F)
    where
        P: Page + 'static,
        F: Fn() -> P + Send + Sync + 'static,
    {
        let key = self.page_key(virtual_path);
        self.pages
            .insert(key, Box::new(move || Box::new(factory()) as Box<dyn Page>));
    }

    /// Register a `Default`-constructible page type.
    pub fn register_default<P: Page + Default + 'static>(&mut self, virtual_path: &str) {
        self.register_page(virtual_path, P::default);
    }

    /// Whether a page is registered for the virtual path.
    pub fn has_page(&self, virtual_path: &str) -> bool {
        self.pages.contains_key(&self.page_key(virtual_path))
    }

    /// Run the page for a request target such as `/category/books?x=1`.
    pub fn render_path(&self, target: &str) -> Result<RenderedPage, HostError> {
        self.render_request(RequestContext::new(target))
    }

    /// Run the page selected for a request.
    pub fn render_request(&self, request: RequestContext) -> Result<RenderedPage, HostError> {
        let (factory, route_data) = self.select(&request.path)?;
        let mut page = factory();
        let rendered = self
            .driver
            .run_with_route_data(page.as_mut(), request, route_data)?;
        Ok(rendered)
    }

    /// Serve an HTTP request.
    ///
    /// 200 with the markup on success, 404 when no page is registered for
    /// the request, 500 with the error message when the page fails.
    pub fn handle<B>(&self, request: &Request<B>) -> Response<String> {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(RequestId::from_string)
            .unwrap_or_else(RequestId::generate);

        let context = RequestContext::new(target).with_request_id(request_id.clone());
        let path = context.path.clone();

        let (status, content_type, body) = match self.render_request(context) {
            Ok(rendered) => (StatusCode::OK, HTML_CONTENT_TYPE, rendered.markup),
            Err(err) => (err.status_code(), TEXT_CONTENT_TYPE, err.to_string()),
        };

        self.logging
            .logger(request_id.clone())
            .with_output(self.log_output.clone())
            .info("Request completed")
            .field("method", request.method().as_str())
            .field("path", path)
            .field("status", status.as_u16())
            .emit();

        let mut response = Response::new(body);
        *response.status_mut() = status;
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
        response
    }

    fn select(&self, path: &str) -> Result<(&PageFactory, Option<RouteData>), HostError> {
        let routes = self.driver.routes();
        let (key, route_data) = match routes.match_path(path) {
            Some(matched) => (
                self.page_key(matched.entry.virtual_path()),
                Some(matched.into_route_data()),
            ),
            None => (self.page_key(path), None),
        };

        self.pages
            .get(&key)
            .map(|factory| (factory, route_data))
            .ok_or_else(|| HostError::PageNotFound(path.to_string()))
    }

    /// Absolute, lower-cased, without a trailing slash (except the root).
    fn page_key(&self, path: &str) -> String {
        let resolved = self.driver.routes().resolve_virtual_path(path);
        let trimmed = resolved.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_ascii_lowercase()
        }
    }
}
