//! Built-in server controls.
//!
//! A small subset of the legacy control set: enough to build pages out of
//! literal markup, labels, links, forms and text inputs.

use crate::control::Control;
use crate::writer::HtmlTextWriter;

/// Implements the `state`/`state_mut` accessors for a control with a
/// `state: ControlState` field.
macro_rules! control_state {
    () => {
        fn state(&self) -> &$crate::ControlState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut $crate::ControlState {
            &mut self.state
        }
    };
}

mod form;
mod hyperlink;
mod label;
mod literal;
mod panel;
mod textbox;

pub use form::*;
pub use hyperlink::*;
pub use label::*;
pub use literal::*;
pub use panel::*;
pub use textbox::*;

/// Write ` id="..."` when the control has an identifier.
pub(crate) fn write_id_attribute(control: &dyn Control, writer: &mut HtmlTextWriter) {
    if let Some(id) = control.id() {
        writer.write_attribute("id", id);
    }
}
