//! The route table: registration, inbound matching, URL generation.

use url::form_urlencoded;
use webforms_core::{RouteData, RouteValues, RoutingConfig};

use crate::error::RouteError;
use crate::pattern::{split_path, RoutePattern};
use crate::virtual_path::VirtualPath;

/// A registered page route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    name: String,
    pattern: RoutePattern,
    virtual_path: String,
}

impl RouteEntry {
    /// Route name (unique within a table).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Virtual path of the page the route targets (e.g. `~/`).
    pub fn virtual_path(&self) -> &str {
        &self.virtual_path
    }
}

/// Result of matching an inbound path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// The first registered entry that matched.
    pub entry: &'a RouteEntry,
    /// Captured placeholder values.
    pub values: RouteValues,
}

impl RouteMatch<'_> {
    /// Build the per-request route data for the matched entry.
    pub fn into_route_data(self) -> RouteData {
        RouteData::new(self.entry.name(), self.values)
    }
}

/// Ordered registry of named routes.
///
/// Registration order is precedence order: `match_path` returns the first
/// entry whose pattern matches, so more specific routes must be registered
/// before more general ones. The table is built once at startup and then
/// shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    application_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Create an empty table rooted at `/`.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            application_path: "/".to_string(),
        }
    }

    /// Set the application root used for absolute URLs and `~/` paths.
    pub fn with_application_path(mut self, path: impl AsRef<str>) -> Self {
        self.application_path = VirtualPath::normalize_app_path(path.as_ref());
        self
    }

    /// Build a table from configuration, registering routes in file order.
    pub fn from_config(config: &RoutingConfig) -> Result<Self, RouteError> {
        let mut table = RouteTable::new().with_application_path(&config.application_path);
        for route in &config.routes {
            table.map_route(&route.name, &route.pattern, &route.virtual_path)?;
        }
        Ok(table)
    }

    /// Register a route.
    pub fn map_route(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        default_virtual_path: impl Into<String>,
    ) -> Result<&RouteEntry, RouteError> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(RouteError::DuplicateRouteName(name));
        }

        let pattern = RoutePattern::parse(pattern)?;
        self.entries.push(RouteEntry {
            name,
            pattern,
            virtual_path: default_virtual_path.into(),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Register a page route (legacy spelling of [`RouteTable::map_route`]).
    pub fn map_page_route(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
        physical_file: impl Into<String>,
    ) -> Result<&RouteEntry, RouteError> {
        self.map_route(name, pattern, physical_file)
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Registered routes in precedence order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn application_path(&self) -> &str {
        &self.application_path
    }

    /// Match an inbound request path. The first registered match wins.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
        let segments = split_path(path);
        self.entries.iter().find_map(|entry| {
            entry
                .pattern
                .match_segments(&segments)
                .map(|values| RouteMatch { entry, values })
        })
    }

    /// Generate the relative URL for a named route.
    ///
    /// Placeholders are substituted from `values`, percent-encoded; an empty
    /// value counts as missing. Values that do not name a placeholder are
    /// appended as a query string in insertion order.
    pub fn resolve_url(&self, name: &str, values: &RouteValues) -> Result<String, RouteError> {
        let entry = self
            .get(name)
            .ok_or_else(|| RouteError::RouteNotFound(name.to_string()))?;

        let path = entry
            .pattern
            .expand(values)
            .map_err(|key| RouteError::MissingRouteValue {
                route: entry.name.clone(),
                key,
            })?;

        let mut extra = values
            .iter()
            .filter(|(key, _)| !entry.pattern.has_parameter(key))
            .peekable();
        if extra.peek().is_none() {
            return Ok(path);
        }

        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in extra {
            query.append_pair(key, value);
        }
        Ok(format!("{}?{}", path, query.finish()))
    }

    /// Generate the application-absolute URL for a named route
    /// (`/Category/MyTest` for application path `/`).
    pub fn route_url(&self, name: &str, values: &RouteValues) -> Result<String, RouteError> {
        let relative = self.resolve_url(name, values)?;
        Ok(VirtualPath::join(&self.application_path, &relative))
    }

    /// Resolve a virtual path against this table's application root.
    pub fn resolve_virtual_path(&self, path: &str) -> String {
        VirtualPath::resolve(&self.application_path, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webforms_core::{route_values, RouteConfig};

    fn category_table() -> RouteTable {
        let mut table = RouteTable::new();
        table
            .map_page_route("ProductsByCategoryRoute", "Category/{categoryName}", "~/")
            .unwrap();
        table
    }

    #[test]
    fn test_map_route_duplicate_name() {
        let mut table = category_table();

        let err = table
            .map_route("ProductsByCategoryRoute", "Other/{x}", "~/")
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::DuplicateRouteName("ProductsByCategoryRoute".to_string())
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_map_route_invalid_pattern_not_registered() {
        let mut table = RouteTable::new();

        assert!(table.map_route("Bad", "/Category", "~/").is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_resolve_url() {
        let table = category_table();

        let url = table
            .resolve_url("ProductsByCategoryRoute", &route_values! { "categoryName" => "MyTest" })
            .unwrap();
        assert_eq!(url, "Category/MyTest");
    }

    #[test]
    fn test_route_url_is_application_absolute() {
        let table = category_table();
        let values = route_values! { "categoryName" => "MyTest" };

        assert_eq!(
            table.route_url("ProductsByCategoryRoute", &values).unwrap(),
            "/Category/MyTest"
        );

        let shop = category_table().with_application_path("/shop/");
        assert_eq!(
            shop.route_url("ProductsByCategoryRoute", &values).unwrap(),
            "/shop/Category/MyTest"
        );
    }

    #[test]
    fn test_resolve_url_unknown_route() {
        let table = category_table();

        let err = table.resolve_url("Nope", &RouteValues::new()).unwrap_err();
        assert_eq!(err, RouteError::RouteNotFound("Nope".to_string()));
    }

    #[test]
    fn test_resolve_url_missing_value() {
        let table = category_table();

        let err = table
            .resolve_url("ProductsByCategoryRoute", &route_values! { "other" => "x" })
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingRouteValue {
                route: "ProductsByCategoryRoute".to_string(),
                key: "categoryName".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_url_extra_values_become_query() {
        let table = category_table();

        let url = table
            .resolve_url(
                "ProductsByCategoryRoute",
                &route_values! { "categoryName" => "MyTest", "page" => 2, "q" => "a b&c" },
            )
            .unwrap();
        assert_eq!(url, "Category/MyTest?page=2&q=a+b%26c");
    }

    #[test]
    fn test_resolve_url_empty_value_is_missing() {
        let table = category_table();

        let err = table
            .resolve_url("ProductsByCategoryRoute", &route_values! { "categoryName" => "" })
            .unwrap_err();
        assert!(matches!(err, RouteError::MissingRouteValue { key, .. } if key == "categoryName"));
    }

    #[test]
    fn test_generated_url_with_reserved_characters_matches_back() {
        let table = category_table();

        for value in ["a/b", "a b?c#d", "100%"] {
            let url = table
                .route_url(
                    "ProductsByCategoryRoute",
                    &route_values! { "categoryName" => value },
                )
                .unwrap();
            let matched = table.match_path(&url).unwrap();
            assert_eq!(matched.values.get("categoryName"), Some(value), "{}", url);
        }

        let url = table
            .route_url(
                "ProductsByCategoryRoute",
                &route_values! { "categoryName" => "a/b" },
            )
            .unwrap();
        assert_eq!(url, "/Category/a%2Fb");
    }

    #[test]
    fn test_match_path() {
        let table = category_table();

        let matched = table.match_path("/category/mycategoryname").unwrap();
        assert_eq!(matched.entry.name(), "ProductsByCategoryRoute");
        assert_eq!(matched.values.get("categoryName"), Some("mycategoryname"));

        let data = matched.into_route_data();
        assert_eq!(data.route_name(), "ProductsByCategoryRoute");
    }

    #[test]
    fn test_match_path_no_match() {
        let table = category_table();

        assert!(table.match_path("/").is_none());
        assert!(table.match_path("/products/x").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mut table = RouteTable::new();
        table.map_route("A", "items/{id}", "~/a").unwrap();
        table.map_route("B", "{section}/{id}", "~/b").unwrap();

        assert_eq!(table.match_path("/items/1").unwrap().entry.name(), "A");
        assert_eq!(table.match_path("/other/1").unwrap().entry.name(), "B");
    }

    #[test]
    fn test_general_route_first_shadows_specific() {
        let mut table = RouteTable::new();
        table.map_route("General", "{section}/{id}", "~/b").unwrap();
        table.map_route("Specific", "items/{id}", "~/a").unwrap();

        let matched = table.match_path("/items/1").unwrap();
        assert_eq!(matched.entry.name(), "General");
        assert_eq!(matched.values.get("section"), Some("items"));
    }

    #[test]
    fn test_second_route_does_not_shadow_first() {
        let mut table = category_table();
        table
            .map_page_route("ProductsByCategoryRoute2", "Category2/{categoryName}", "~/extra_route")
            .unwrap();

        let matched = table.match_path("/category/mycategoryname").unwrap();
        assert_eq!(matched.entry.name(), "ProductsByCategoryRoute");
        assert_eq!(matched.entry.virtual_path(), "~/");
    }

    #[test]
    fn test_from_config() {
        let config = RoutingConfig::default()
            .with_application_path("/app")
            .with_route(RouteConfig::new("A", "a/{id}", "~/a"))
            .with_route(RouteConfig::new("B", "b", "~/b"));

        let table = RouteTable::from_config(&config).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.application_path(), "/app");
        assert_eq!(table.entries()[1].name(), "B");
        assert_eq!(table.resolve_virtual_path("~/b"), "/app/b");
    }

    #[test]
    fn test_from_config_duplicate() {
        let config = RoutingConfig::default()
            .with_route(RouteConfig::new("A", "a", "~/"))
            .with_route(RouteConfig::new("A", "b", "~/"));

        assert!(matches!(
            RouteTable::from_config(&config),
            Err(RouteError::DuplicateRouteName(_))
        ));
    }
}
