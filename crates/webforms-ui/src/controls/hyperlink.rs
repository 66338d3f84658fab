//! `<a>` hyperlink.

use webforms_core::RouteValues;

use crate::control::{Control, ControlState, PageServices};
use crate::controls::write_id_attribute;
use crate::error::PageResult;
use crate::writer::HtmlTextWriter;

/// Where a hyperlink points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigateTarget {
    /// No `href` attribute is written.
    #[default]
    None,
    /// Fixed URL; `~/` paths resolve against the application root.
    Url(String),
    /// Named route, resolved through the page's route table at render time.
    Route { name: String, values: RouteValues },
}

/// Renders `<a href="...">text</a>`.
#[derive(Debug, Default)]
pub struct HyperLink {
    state: ControlState,
    text: String,
    target: NavigateTarget,
}

impl HyperLink {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: ControlState::new(),
            text: text.into(),
            target: NavigateTarget::None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id.into());
        self
    }

    /// Point at a fixed URL.
    pub fn with_navigate_url(mut self, url: impl Into<String>) -> Self {
        self.target = NavigateTarget::Url(url.into());
        self
    }

    /// Point at a named route.
    pub fn with_route(mut self, name: impl Into<String>, values: RouteValues) -> Self {
        self.target = NavigateTarget::Route {
            name: name.into(),
            values,
        };
        self
    }

    pub fn target(&self) -> &NavigateTarget {
        &self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn href(&self, page: &dyn PageServices) -> PageResult<Option<String>> {
        match &self.target {
            NavigateTarget::None => Ok(None),
            NavigateTarget::Url(url) if url.is_empty() => Ok(None),
            NavigateTarget::Url(url) if url.starts_with('~') => Ok(Some(page.resolve_url(url))),
            NavigateTarget::Url(url) => Ok(Some(url.clone())),
            NavigateTarget::Route { name, values } => {
                Ok(Some(page.get_route_url(name, values)?))
            }
        }
    }
}

impl Control for HyperLink {
    control_state!();

    fn render(&self, page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        // Resolve before writing so a routing failure leaves no open tag.
        let href = self.href(page)?;

        writer.write_begin_tag("a");
        write_id_attribute(self, writer);
        if let Some(href) = href {
            writer.write_attribute("href", &href);
        }
        writer.write_tag_right_char();
        writer.write(&self.text);
        self.render_children(page, writer)?;
        writer.write_end_tag("a");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;
    use crate::testing::{render_to_string, StaticPage};
    use webforms_core::route_values;
    use webforms_routing::RouteError;

    #[test]
    fn test_hyperlink_without_target() {
        assert_eq!(render_to_string(&HyperLink::new("x")), "<a>x</a>");
    }

    #[test]
    fn test_hyperlink_fixed_url() {
        let link = HyperLink::new("Home").with_navigate_url("https://example.com/?a=1&b=2");
        assert_eq!(
            render_to_string(&link),
            r#"<a href="https://example.com/?a=1&amp;b=2">Home</a>"#
        );
    }

    #[test]
    fn test_hyperlink_app_relative_url() {
        let link = HyperLink::new("Cart").with_navigate_url("~/cart");
        assert_eq!(render_to_string(&link), r#"<a href="/cart">Cart</a>"#);
    }

    #[test]
    fn test_hyperlink_route() {
        let page = StaticPage::with_route("ProductsByCategoryRoute", "Category/{categoryName}");
        let link = HyperLink::new("Shoes")
            .with_id("shoes")
            .with_route("ProductsByCategoryRoute", route_values! { "categoryName" => "shoes" });

        let mut writer = HtmlTextWriter::new();
        link.render(&page, &mut writer).unwrap();
        assert_eq!(
            writer.as_str(),
            r#"<a id="shoes" href="/Category/shoes">Shoes</a>"#
        );
    }

    #[test]
    fn test_hyperlink_unknown_route_fails_without_output() {
        let page = StaticPage::default();
        let link = HyperLink::new("x").with_route("Missing", RouteValues::new());

        let mut writer = HtmlTextWriter::new();
        let err = link.render(&page, &mut writer).unwrap_err();
        assert!(matches!(
            err,
            PageError::Route(RouteError::RouteNotFound(ref name)) if name == "Missing"
        ));
        assert!(writer.is_empty());
    }
}
