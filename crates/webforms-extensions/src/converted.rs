//! Converter lookup for values nested inside serde types.
//!
//! A field annotated with `#[serde(with = "webforms_extensions::converted")]`,
//! or wrapped in [`Converted`], uses the converter registered on the
//! serializer currently running on this thread. Outside a
//! [`JavaScriptSerializer`] call, or when no converter matches, plain serde
//! is used.

use std::ops::{Deref, DerefMut};

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::serializer::JavaScriptSerializer;

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize + 'static,
    S: Serializer,
{
    match JavaScriptSerializer::active() {
        Some(active) if active.has_converter::<T>() => active
            .to_value(value)
            .map_err(S::Error::custom)?
            .serialize(serializer),
        _ => value.serialize(serializer),
    }
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: DeserializeOwned + 'static,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match JavaScriptSerializer::active() {
        Some(active) => active.convert_to_type(value).map_err(D::Error::custom),
        None => serde_json::from_value(value).map_err(D::Error::custom),
    }
}

/// Wrapper that routes its value through [`serialize`] / [`deserialize`].
///
/// Useful where a `with` attribute cannot be placed, such as the elements of
/// a `Vec`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Converted<T>(pub T);

impl<T> Converted<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Converted<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Converted<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T> From<T> for Converted<T> {
    fn from(value: T) -> Self {
        Converted(value)
    }
}

impl<T: Serialize + 'static> Serialize for Converted<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(&self.0, serializer)
    }
}

impl<'de, T: DeserializeOwned + 'static> Deserialize<'de> for Converted<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(Converted)
    }
}
