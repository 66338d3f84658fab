//! Server-side `<form>`.

use crate::control::{Control, ControlState, PageServices};
use crate::controls::write_id_attribute;
use crate::error::PageResult;
use crate::writer::HtmlTextWriter;

/// Renders a post-back form targeting the current request path.
#[derive(Debug, Default)]
pub struct HtmlForm {
    state: ControlState,
    method: Option<String>,
    action: Option<String>,
}

impl HtmlForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id.into());
        self
    }

    /// Override the `method` attribute (default `post`).
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Override the `action` attribute (default: the request path).
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

impl Control for HtmlForm {
    control_state!();

    fn render(&self, page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        let action = match &self.action {
            Some(action) if action.starts_with('~') => page.resolve_url(action),
            Some(action) => action.clone(),
            None => page.request_path().to_string(),
        };

        writer.write_begin_tag("form");
        writer.write_attribute("method", self.method.as_deref().unwrap_or("post"));
        writer.write_attribute("action", &action);
        write_id_attribute(self, writer);
        writer.write_tag_right_char();
        self.render_children(page, writer)?;
        writer.write_end_tag("form");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{render_to_string, StaticPage};

    #[test]
    fn test_form_posts_to_request_path() {
        let page = StaticPage::default().at_path("/path");
        let mut writer = HtmlTextWriter::new();
        HtmlForm::new().render(&page, &mut writer).unwrap();

        assert_eq!(writer.as_str(), r#"<form method="post" action="/path"></form>"#);
    }

    #[test]
    fn test_form_overrides() {
        let form = HtmlForm::new()
            .with_id("form1")
            .with_method("get")
            .with_action("~/search");

        assert_eq!(
            render_to_string(&form),
            r#"<form method="get" action="/search" id="form1"></form>"#
        );
    }
}
