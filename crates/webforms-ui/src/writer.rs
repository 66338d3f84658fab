//! Linear markup writer.

use crate::encode::{html_attribute_encode, html_encode};

/// State of the writer with respect to an opened begin tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagState {
    /// No begin tag is waiting for its closing `>`.
    Closed,
    /// A begin tag was started with `write_begin_tag`; attributes may follow.
    Open,
}

/// Accumulates markup emitted by the control tree in document order.
///
/// The writer has no structural awareness: callers are responsible for
/// well-formed markup. It is scoped to one request and read out once with
/// [`HtmlTextWriter::into_string`] after rendering completes.
#[derive(Debug)]
pub struct HtmlTextWriter {
    buffer: String,
    state: TagState,
}

impl HtmlTextWriter {
    /// `>`
    pub const TAG_RIGHT_CHAR: char = '>';
    /// ` />`
    pub const SELF_CLOSING_TAG_END: &'static str = " />";

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            state: TagState::Closed,
        }
    }

    /// Append text verbatim.
    pub fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Append a single character verbatim.
    pub fn write_char(&mut self, c: char) {
        self.buffer.push(c);
        if c == Self::TAG_RIGHT_CHAR {
            self.state = TagState::Closed;
        }
    }

    /// Append HTML-encoded text.
    pub fn write_encoded_text(&mut self, text: &str) {
        self.buffer.push_str(&html_encode(text));
    }

    /// Write `<tag` and leave the tag open for attributes.
    pub fn write_begin_tag(&mut self, tag: &str) {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.state = TagState::Open;
    }

    /// Write ` name="value"` with the value attribute-encoded.
    pub fn write_attribute(&mut self, name: &str, value: &str) {
        self.buffer.push(' ');
        self.buffer.push_str(name);
        self.buffer.push_str("=\"");
        self.buffer.push_str(&html_attribute_encode(value));
        self.buffer.push('"');
    }

    /// Close an open begin tag with `>`.
    pub fn write_tag_right_char(&mut self) {
        self.write_char(Self::TAG_RIGHT_CHAR);
    }

    /// Close an open begin tag with ` />`.
    pub fn write_self_closing_tag_end(&mut self) {
        self.buffer.push_str(Self::SELF_CLOSING_TAG_END);
        self.state = TagState::Closed;
    }

    /// Write `<tag>`.
    pub fn write_full_begin_tag(&mut self, tag: &str) {
        self.write_begin_tag(tag);
        self.write_tag_right_char();
    }

    /// Write `</tag>`.
    pub fn write_end_tag(&mut self, tag: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push('>');
    }

    /// Whether a begin tag is still waiting for `>` or ` />`.
    pub fn is_tag_open(&self) -> bool {
        self.state == TagState::Open
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Markup written so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the writer and return the markup.
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for HtmlTextWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Write for HtmlTextWriter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.write(s);
        Ok(())
    }
}
