//! Single-line text input.

use crate::control::{Control, ControlState, PageServices};
use crate::error::PageResult;
use crate::writer::HtmlTextWriter;

/// Renders `<input name="..." type="text" value="..." id="..." />`.
///
/// A text box needs an identifier for its `name`; when none is set the page
/// assigns an automatic one (`ctl00`, `ctl01`, ...) before rendering.
#[derive(Debug, Default)]
pub struct TextBox {
    state: ControlState,
    text: String,
}

impl TextBox {
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

impl Control for TextBox {
    control_state!();

    fn requires_id(&self) -> bool {
        true
    }

    fn render(&self, _page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        writer.write_begin_tag("input");
        if let Some(id) = self.id() {
            writer.write_attribute("name", id);
        }
        writer.write_attribute("type", "text");
        if !self.text.is_empty() {
            writer.write_attribute("value", &self.text);
        }
        if let Some(id) = self.id() {
            writer.write_attribute("id", id);
        }
        writer.write_self_closing_tag_end();
        Ok(())
    }
}
