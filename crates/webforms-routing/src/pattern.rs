//! URL pattern parsing and structural matching.

use std::fmt;

use url::form_urlencoded;
use webforms_core::RouteValues;

use crate::error::RouteError;

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text, compared ASCII case-insensitively.
    Literal(String),
    /// `{name}` placeholder, accepts any non-empty segment.
    Parameter(String),
}

/// A parsed route URL pattern such as `Category/{categoryName}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern.
    ///
    /// Patterns are application-relative: they may not start with `/` or `~`
    /// and may not contain `?`. Placeholders must span a whole segment and
    /// their names must be unique within the pattern.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        if pattern.starts_with('/') || pattern.starts_with('~') {
            return Err(RouteError::invalid_pattern(
                pattern,
                "the pattern cannot start with a '/' or '~' character",
            ));
        }
        if pattern.contains('?') {
            return Err(RouteError::invalid_pattern(
                pattern,
                "the pattern cannot contain a '?' character",
            ));
        }

        let mut segments = Vec::new();
        if !pattern.is_empty() {
            for part in pattern.split('/') {
                segments.push(parse_segment(pattern, part)?);
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for segment in &segments {
            if let Segment::Parameter(name) = segment {
                if seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
                    return Err(RouteError::invalid_pattern(
                        pattern,
                        format!("the parameter '{}' appears more than once", name),
                    ));
                }
                seen.push(name);
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern text as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in pattern order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Parameter(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the pattern has a placeholder with this name.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter_names().any(|p| p.eq_ignore_ascii_case(name))
    }

    /// Structurally match already-split path segments.
    ///
    /// Segments are percent-decoded before comparison; captured values are
    /// returned decoded.
    pub fn match_segments(&self, path: &[&str]) -> Option<RouteValues> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut values = RouteValues::new();
        for (segment, part) in self.segments.iter().zip(path) {
            let part = decode_segment(part);
            match segment {
                Segment::Literal(text) => {
                    if !text.eq_ignore_ascii_case(&part) {
                        return None;
                    }
                }
                Segment::Parameter(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    values.insert(name.as_str(), part);
                }
            }
        }
        Some(values)
    }

    /// Match a request path such as `/category/shoes?page=2`.
    pub fn match_path(&self, path: &str) -> Option<RouteValues> {
        self.match_segments(&split_path(path))
    }

    /// Substitute placeholders with percent-encoded values.
    ///
    /// On failure returns the name of the first placeholder whose value is
    /// absent or empty.
    pub fn expand(&self, values: &RouteValues) -> Result<String, String> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => parts.push(text.clone()),
                Segment::Parameter(name) => match values.get(name) {
                    Some(value) if !value.is_empty() => parts.push(encode_segment(value)),
                    _ => return Err(name.clone()),
                },
            }
        }
        Ok(parts.join("/"))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_segment(pattern: &str, part: &str) -> Result<Segment, RouteError> {
    if part.is_empty() {
        return Err(RouteError::invalid_pattern(
            pattern,
            "consecutive separators are not allowed",
        ));
    }

    if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
        if name.is_empty() {
            return Err(RouteError::invalid_pattern(
                pattern,
                "a placeholder must have a name",
            ));
        }
        if name.contains(['{', '}']) {
            return Err(RouteError::invalid_pattern(
                pattern,
                format!("invalid placeholder '{}'", part),
            ));
        }
        return Ok(Segment::Parameter(name.to_string()));
    }

    if part.contains(['{', '}']) {
        return Err(RouteError::invalid_pattern(
            pattern,
            format!("placeholder in '{}' must span the whole segment", part),
        ));
    }

    Ok(Segment::Literal(part.to_string()))
}

/// Percent-encode a value so it occupies exactly one path segment.
pub(crate) fn encode_segment(value: &str) -> String {
    // `byte_serialize` writes a space as `+` and escapes a literal `+`, so
    // every `+` it yields stands for a space.
    form_urlencoded::byte_serialize(value.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

/// Percent-decode one path segment. A `+` is kept as is.
pub(crate) fn decode_segment(segment: &str) -> String {
    if !segment.contains('%') {
        return segment.to_string();
    }
    let escaped = segment
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('=', "%3D");
    form_urlencoded::parse(escaped.as_bytes())
        .next()
        .map(|(decoded, _)| decoded.into_owned())
        .unwrap_or_default()
}

/// Split a request path into segments, ignoring query, fragment and the
/// surrounding slashes. The root path yields no segments.
pub fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_start_matches('/').trim_end_matches('/');
    if path.is_empty() {
        Vec::new()
    } else {
        path.split('/').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webforms_core::route_values;

    #[test]
    fn test_parse_literals_and_parameters() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();

        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("Category".to_string()),
                Segment::Parameter("categoryName".to_string()),
            ]
        );
        assert_eq!(pattern.parameter_names().collect::<Vec<_>>(), vec!["categoryName"]);
        assert!(pattern.has_parameter("CATEGORYNAME"));
    }

    #[test]
    fn test_parse_empty_pattern() {
        let pattern = RoutePattern::parse("").unwrap();
        assert!(pattern.segments().is_empty());
        assert!(pattern.match_path("/").is_some());
    }

    #[test]
    fn test_parse_rejects_leading_slash_and_tilde() {
        assert!(matches!(
            RoutePattern::parse("/Category"),
            Err(RouteError::InvalidPattern { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("~/Category"),
            Err(RouteError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["a//b", "a/{}", "a/x{id}", "a/{id}x", "a/{{id}}", "a?b", "{id}/{ID}"] {
            assert!(RoutePattern::parse(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_match_is_case_insensitive_for_literals() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();

        let values = pattern.match_path("/category/mycategoryname").unwrap();
        assert_eq!(values.get("categoryName"), Some("mycategoryname"));
    }

    #[test]
    fn test_match_preserves_value_case() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();

        let values = pattern.match_path("/Category/MyCategory/").unwrap();
        assert_eq!(values.get("categoryName"), Some("MyCategory"));
    }

    #[test]
    fn test_match_requires_equal_segment_count() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();

        assert!(pattern.match_path("/Category").is_none());
        assert!(pattern.match_path("/Category/a/b").is_none());
        assert!(pattern.match_path("/Products/a").is_none());
    }

    #[test]
    fn test_match_rejects_empty_parameter() {
        let pattern = RoutePattern::parse("a/{x}/b").unwrap();
        assert!(pattern.match_path("/a//b").is_none());
    }

    #[test]
    fn test_match_ignores_query() {
        let pattern = RoutePattern::parse("p/{id}").unwrap();
        let values = pattern.match_path("/p/7?sort=asc").unwrap();
        assert_eq!(values.get("id"), Some("7"));
    }

    #[test]
    fn test_expand() {
        let pattern = RoutePattern::parse("Category/{categoryName}/page/{n}").unwrap();

        let url = pattern
            .expand(&route_values! { "n" => 2, "categoryName" => "MyTest" })
            .unwrap();
        assert_eq!(url, "Category/MyTest/page/2");
    }

    #[test]
    fn test_expand_missing_value() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();
        assert_eq!(pattern.expand(&RouteValues::new()), Err("categoryName".to_string()));
    }

    #[test]
    fn test_expand_rejects_empty_value() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();
        assert_eq!(
            pattern.expand(&route_values! { "categoryName" => "" }),
            Err("categoryName".to_string())
        );
    }

    #[test]
    fn test_expand_encodes_values() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();

        let url = pattern
            .expand(&route_values! { "categoryName" => "a b/c?d#e+f" })
            .unwrap();
        assert_eq!(url, "Category/a%20b%2Fc%3Fd%23e%2Bf");
    }

    #[test]
    fn test_match_decodes_values() {
        let pattern = RoutePattern::parse("Category/{categoryName}").unwrap();

        let values = pattern.match_path("/Category/a%20b%2Fc%3Fd%23e%2Bf").unwrap();
        assert_eq!(values.get("categoryName"), Some("a b/c?d#e+f"));

        let values = pattern.match_path("/Category/a+b").unwrap();
        assert_eq!(values.get("categoryName"), Some("a+b"));

        assert!(pattern.match_path("/%43ategory/x").is_some());
    }

    #[test]
    fn test_segment_encoding_round_trips() {
        for value in ["plain", "with space", "a/b", "50% off", "x=1&y=2", "caf\u{e9}", "~.-_*"] {
            assert_eq!(decode_segment(&encode_segment(value)), value);
            assert_eq!(split_path(&encode_segment(value)).len(), 1);
        }
    }

    #[test]
    fn test_split_path() {
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
        assert_eq!(split_path("/a/b/"), vec!["a", "b"]);
        assert_eq!(split_path("a/b?x=1#f"), vec!["a", "b"]);
    }
}
