//! JSON serialization with pluggable converters.
//!
//! `JavaScriptSerializer` serializes through serde unless a
//! [`JavaScriptConverter`] is registered for the value's type, in which case
//! the converter decides the object shape. Nested fields opt in to converter
//! lookup with [`Converted`] or `#[serde(with = "webforms_extensions::converted")]`.
//!
//! ```
//! use webforms_extensions::{JavaScriptSerializer, ListItemCollectionConverter};
//! use webforms_ui::{ListItem, ListItemCollection};
//!
//! let mut serializer = JavaScriptSerializer::new();
//! serializer.register_converters(vec![Box::new(ListItemCollectionConverter)]);
//!
//! let list: ListItemCollection = [ListItem::new("One", "1")].into_iter().collect();
//! let json = serializer.serialize(&list).unwrap();
//! assert_eq!(json, r#"{"List":[{"Text":"One","Value":"1"}]}"#);
//! ```

pub mod converted;
mod converter;
mod error;
mod serializer;

pub use converted::Converted;
pub use converter::*;
pub use error::*;
pub use serializer::*;
