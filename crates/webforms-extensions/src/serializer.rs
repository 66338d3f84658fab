//! The serializer and its converter registry.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::converter::JavaScriptConverter;
use crate::error::{SerializerError, SerializerResult};

/// Default maximum length of produced or accepted JSON, in characters.
pub const DEFAULT_MAX_JSON_LENGTH: usize = 2_097_152;

/// Default maximum nesting depth of arrays and objects.
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

thread_local! {
    static ACTIVE: RefCell<Vec<JavaScriptSerializer>> = const { RefCell::new(Vec::new()) };
}

/// Pops the active serializer when dropped.
struct ActiveGuard;

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            active.borrow_mut().pop();
        });
    }
}

/// JSON serializer that defers to registered converters for selected types.
///
/// A converter applies automatically only to the top-level value passed to
/// [`serialize`](Self::serialize) or [`deserialize`](Self::deserialize).
/// Nested values, such as the elements of a `Vec<ListItemCollection>` or a
/// struct field, go through serde unless they are wrapped in
/// [`Converted`](crate::Converted) or annotated with
/// `#[serde(with = "webforms_extensions::converted")]`. ASP.NET's serializer
/// looked up converters for nested values without any marking.
///
/// Cloning is cheap; clones share the converter registry until one of them
/// registers more converters.
#[derive(Clone)]
pub struct JavaScriptSerializer {
    converters: Arc<HashMap<TypeId, Arc<dyn JavaScriptConverter>>>,
    max_json_length: usize,
    recursion_limit: usize,
}

impl Default for JavaScriptSerializer {
    fn default() -> Self {
        Self {
            converters: Arc::new(HashMap::new()),
            max_json_length: DEFAULT_MAX_JSON_LENGTH,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl fmt::Debug for JavaScriptSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JavaScriptSerializer")
            .field("converters", &self.converters.len())
            .field("max_json_length", &self.max_json_length)
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}

impl JavaScriptSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register converters. A later converter for the same type replaces
    /// the earlier one.
    pub fn register_converters(&mut self, converters: Vec<Box<dyn JavaScriptConverter>>) {
        let registry = Arc::make_mut(&mut self.converters);
        for converter in converters {
            let converter: Arc<dyn JavaScriptConverter> = Arc::from(converter);
            for type_id in converter.supported_types() {
                registry.insert(type_id, Arc::clone(&converter));
            }
        }
    }

    pub fn with_max_json_length(mut self, max: usize) -> Self {
        self.max_json_length = max;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn max_json_length(&self) -> usize {
        self.max_json_length
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Whether a converter is registered for `T`.
    pub fn has_converter<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Serialize a value to a JSON string.
    pub fn serialize<T: Serialize + 'static>(&self, value: &T) -> SerializerResult<String> {
        let value = self.to_value(value)?;
        self.check_depth(&value)?;
        let json = serde_json::to_string(&value)?;
        self.check_length(&json)?;
        Ok(json)
    }

    /// Deserialize a JSON string.
    pub fn deserialize<T: DeserializeOwned + 'static>(&self, input: &str) -> SerializerResult<T> {
        self.check_length(input)?;
        let value: Value = serde_json::from_str(input)?;
        self.check_depth(&value)?;
        self.convert_to_type(value)
    }

    /// Convert an already parsed JSON value to `T`.
    pub fn convert_to_type<T: DeserializeOwned + 'static>(&self, value: Value) -> SerializerResult<T> {
        let Some(converter) = self.converters.get(&TypeId::of::<T>()) else {
            return self.activate(|| serde_json::from_value(value).map_err(SerializerError::from));
        };

        let Value::Object(dictionary) = value else {
            return Err(SerializerError::invalid_shape::<T>("expected a JSON object"));
        };

        let boxed = converter.deserialize(dictionary, TypeId::of::<T>(), self)?;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| SerializerError::TypeMismatch {
                expected: std::any::type_name::<T>(),
            })
    }

    /// Convert a value to its JSON form without enforcing limits.
    pub fn to_value<T: Serialize + 'static>(&self, value: &T) -> SerializerResult<Value> {
        match self.converters.get(&TypeId::of::<T>()) {
            Some(converter) => Ok(Value::Object(converter.serialize(value as &dyn Any, self)?)),
            None => self.activate(|| serde_json::to_value(value).map_err(SerializerError::from)),
        }
    }

    /// Serializer driving the innermost serde call on this thread, if any.
    pub(crate) fn active() -> Option<JavaScriptSerializer> {
        ACTIVE.with(|active| active.borrow().last().cloned())
    }

    /// Run a serde call with this serializer visible to [`Converted`](crate::Converted) fields.
    fn activate<R>(&self, f: impl FnOnce() -> R) -> R {
        ACTIVE.with(|active| active.borrow_mut().push(self.clone()));
        let _guard = ActiveGuard;
        f()
    }

    fn check_length(&self, json: &str) -> SerializerResult<()> {
        let length = json.chars().count();
        if length > self.max_json_length {
            return Err(SerializerError::MaxLengthExceeded {
                length,
                max: self.max_json_length,
            });
        }
        Ok(())
    }

    fn check_depth(&self, value: &Value) -> SerializerResult<()> {
        let depth = depth(value);
        if depth > self.recursion_limit {
            return Err(SerializerError::RecursionLimitExceeded {
                depth,
                limit: self.recursion_limit,
            });
        }
        Ok(())
    }
}

/// Nesting depth: scalars are 0, each array or object level adds one.
fn depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(depth).max().unwrap_or(0),
        _ => 0,
    }
}
