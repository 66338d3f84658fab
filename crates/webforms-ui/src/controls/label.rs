//! `<span>` label.

use crate::control::{Control, ControlState, PageServices};
use crate::controls::write_id_attribute;
use crate::error::PageResult;
use crate::writer::HtmlTextWriter;

/// Renders `<span id="...">text</span>`.
///
/// The `id` attribute is omitted when no identifier is set. Text is written
/// as-is, followed by any child controls.
#[derive(Debug, Default)]
pub struct Label {
    state: ControlState,
    text: String,
}

impl Label {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Control for Label {
    control_state!();

    fn render(&self, page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        writer.write_begin_tag("span");
        write_id_attribute(self, writer);
        writer.write_tag_right_char();
        writer.write(&self.text);
        self.render_children(page, writer)?;
        writer.write_end_tag("span");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::LiteralControl;
    use crate::testing::render_to_string;

    #[test]
    fn test_label_without_id() {
        assert_eq!(render_to_string(&Label::new()), "<span></span>");
    }

    #[test]
    fn test_label_with_id() {
        let label = Label::new().with_id("/Category/MyTest");
        assert_eq!(render_to_string(&label), r#"<span id="/Category/MyTest"></span>"#);
    }

    #[test]
    fn test_label_id_is_attribute_encoded() {
        let label = Label::new().with_id(r#"a"b"#);
        assert_eq!(render_to_string(&label), r#"<span id="a&quot;b"></span>"#);
    }

    #[test]
    fn test_label_text_and_children() {
        let mut label = Label::new().with_text("<i>Hi</i> ");
        label.controls_mut().add(LiteralControl::new("there"));

        assert_eq!(render_to_string(&label), "<span><i>Hi</i> there</span>");
    }
}
