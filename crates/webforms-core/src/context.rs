//! Request context and route values.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::lifecycle::TimingContext;

/// Unique request identifier for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new request ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Create from an existing ID string.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered map of route placeholder names to values.
///
/// Keys compare ASCII case-insensitively, so `categoryName` and
/// `CATEGORYNAME` address the same entry. The key spelling of the first
/// insertion is kept; values are stored verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues {
    entries: Vec<(String, String)>,
}

impl RouteValues {
    /// Create an empty value map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing value for the same key.
    ///
    /// Returns the previous value if one was replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> Option<String> {
        let key = key.into();
        let value = value.to_string();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value. Absent keys read as `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove a value by key.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RouteValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = RouteValues::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for RouteValues {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl Serialize for RouteValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Keeps entries in document order.
struct RouteValuesVisitor;

impl<'de> Visitor<'de> for RouteValuesVisitor {
    type Value = RouteValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of route value names to strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RouteValues, A::Error> {
        let mut values = RouteValues::new();
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            values.insert(key, value);
        }
        Ok(values)
    }
}

impl<'de> Deserialize<'de> for RouteValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RouteValuesVisitor)
    }
}

/// Build a [`RouteValues`] map inline.
///
/// ```
/// use webforms_core::route_values;
///
/// let values = route_values! { "categoryName" => "MyTest" };
/// assert_eq!(values.get("categoryname"), Some("MyTest"));
/// ```
#[macro_export]
macro_rules! route_values {
    () => {
        $crate::RouteValues::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut values = $crate::RouteValues::new();
        $(values.insert($key, $value);)+
        values
    }};
}

/// Route values captured for the current request, attached to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteData {
    route_name: String,
    values: RouteValues,
}

impl RouteData {
    pub fn new(route_name: impl Into<String>, values: RouteValues) -> Self {
        Self {
            route_name: route_name.into(),
            values,
        }
    }

    /// Name of the route that matched the request.
    pub fn route_name(&self) -> &str {
        &self.route_name
    }

    /// Read-only view of the captured values.
    pub fn values(&self) -> &RouteValues {
        &self.values
    }

    /// Get a captured value by placeholder name.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key)
    }
}

/// Per-request context handed from the request adapter to the engine.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique request identifier.
    pub request_id: RequestId,
    /// Request path, without the query string.
    pub path: String,
    /// Raw query string, if any.
    pub query: Option<String>,
    /// Timing context for observability.
    pub timing: TimingContext,
}

impl RequestContext {
    /// Create a context from a request target such as `/a/b?x=1`.
    pub fn new(target: impl AsRef<str>) -> Self {
        let target = target.as_ref();
        let target = target.split('#').next().unwrap_or_default();
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Self {
            request_id: RequestId::generate(),
            path,
            query,
            timing: TimingContext::new(),
        }
    }

    /// Use an existing request ID (e.g. from an inbound header).
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }
}
