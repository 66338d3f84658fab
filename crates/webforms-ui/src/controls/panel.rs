//! `<div>` container.

use crate::control::{Control, ControlState, PageServices};
use crate::controls::write_id_attribute;
use crate::error::PageResult;
use crate::writer::HtmlTextWriter;

/// Renders its children inside a `<div>`.
#[derive(Debug, Default)]
pub struct Panel {
    state: ControlState,
    css_class: Option<String>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id.into());
        self
    }

    pub fn with_css_class(mut self, class: impl Into<String>) -> Self {
        self.css_class = Some(class.into());
        self
    }
}

impl Control for Panel {
    control_state!();

    fn render(&self, page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        writer.write_begin_tag("div");
        write_id_attribute(self, writer);
        if let Some(class) = &self.css_class {
            writer.write_attribute("class", class);
        }
        writer.write_tag_right_char();
        self.render_children(page, writer)?;
        writer.write_end_tag("div");
        Ok(())
    }
}
