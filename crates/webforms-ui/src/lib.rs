//! Server controls and the markup writer for the WebForms page engine.
//!
//! This crate provides the renderable tree:
//! - `HtmlTextWriter` - Linear markup accumulator
//! - `Control` - Capability trait with default composite rendering
//! - `ControlCollection` - Ordered, owning child sequence
//! - Built-in controls (`LiteralControl`, `Label`, `HyperLink`, `HtmlForm`, `TextBox`, `Panel`)
//! - `ListItem` / `ListItemCollection` - Items for list controls

mod control;
pub mod controls;
mod encode;
mod error;
mod list_item;
mod tree;
mod writer;

#[cfg(test)]
mod testing;

pub use control::*;
pub use controls::*;
pub use encode::*;
pub use error::*;
pub use list_item::*;
pub use tree::*;
pub use writer::*;
