//! Literal markup.

use crate::control::{Control, ControlState, PageServices};
use crate::error::PageResult;
use crate::writer::HtmlTextWriter;

/// Writes its text verbatim.
///
/// The text is caller-trusted markup and is not encoded. Children are
/// never rendered.
#[derive(Debug, Default)]
pub struct LiteralControl {
    state: ControlState,
    text: String,
}

impl LiteralControl {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: ControlState::new(),
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Control for LiteralControl {
    control_state!();

    fn render(&self, _page: &dyn PageServices, writer: &mut HtmlTextWriter) -> PageResult {
        writer.write(&self.text);
        Ok(())
    }
}
