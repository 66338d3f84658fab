//! Converter trait and the built-in list item converter.

use std::any::{Any, TypeId};

use serde_json::{Map, Value};
use webforms_ui::{ListItem, ListItemCollection};

use crate::error::{SerializerError, SerializerResult};
use crate::serializer::JavaScriptSerializer;

/// Custom object shape for one or more types.
///
/// A converter owns the JSON representation of every type it lists in
/// [`supported_types`](Self::supported_types). The serializer hands it the
/// value as `&dyn Any` and expects a JSON object back; on the way in it
/// receives that object and must return a box holding the requested type.
pub trait JavaScriptConverter: Send + Sync {
    fn supported_types(&self) -> Vec<TypeId>;

    fn serialize(
        &self,
        value: &dyn Any,
        serializer: &JavaScriptSerializer,
    ) -> SerializerResult<Map<String, Value>>;

    fn deserialize(
        &self,
        dictionary: Map<String, Value>,
        type_id: TypeId,
        serializer: &JavaScriptSerializer,
    ) -> SerializerResult<Box<dyn Any>>;
}

const LIST_KEY: &str = "List";

/// Writes a [`ListItemCollection`] as `{"List":[{"Value":..,"Text":..}]}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListItemCollectionConverter;

impl JavaScriptConverter for ListItemCollectionConverter {
    fn supported_types(&self) -> Vec<TypeId> {
        vec![TypeId::of::<ListItemCollection>()]
    }

    fn serialize(
        &self,
        value: &dyn Any,
        _serializer: &JavaScriptSerializer,
    ) -> SerializerResult<Map<String, Value>> {
        let list = value
            .downcast_ref::<ListItemCollection>()
            .ok_or(SerializerError::TypeMismatch {
                expected: std::any::type_name::<ListItemCollection>(),
            })?;

        let items = list
            .iter()
            .map(|item| {
                let mut entry = Map::new();
                entry.insert("Value".to_string(), Value::String(item.value.clone()));
                entry.insert("Text".to_string(), Value::String(item.text.clone()));
                Value::Object(entry)
            })
            .collect();

        let mut result = Map::new();
        result.insert(LIST_KEY.to_string(), Value::Array(items));
        Ok(result)
    }

    fn deserialize(
        &self,
        mut dictionary: Map<String, Value>,
        type_id: TypeId,
        serializer: &JavaScriptSerializer,
    ) -> SerializerResult<Box<dyn Any>> {
        if type_id != TypeId::of::<ListItemCollection>() {
            return Err(SerializerError::NoConverter("requested type"));
        }

        let items = match dictionary.remove(LIST_KEY) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(SerializerError::invalid_shape::<ListItemCollection>(
                    "\"List\" is not an array",
                ))
            }
            None => {
                return Err(SerializerError::invalid_shape::<ListItemCollection>(
                    "missing \"List\"",
                ))
            }
        };

        let list = items
            .into_iter()
            .map(|item| serializer.convert_to_type::<ListItem>(item))
            .collect::<SerializerResult<ListItemCollection>>()?;

        Ok(Box::new(list))
    }
}
