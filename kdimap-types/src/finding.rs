use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single finding record as returned by the upstream API.
///
/// The upstream schema is open-ended: fields appear and disappear depending on
/// the issue type, so the record is kept as an ordered JSON object and only
/// interpreted by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFinding(Map<String, Value>);

impl RawFinding {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value, returning `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Look up a field, treating `null` and `false` the same as a missing key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| is_present(v))
    }

    /// Look up a field and render it as text.
    ///
    /// Strings are returned verbatim; other scalars use their JSON rendering.
    pub fn text(&self, key: &str) -> Option<String> {
        self.field(key).map(value_text)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Pretty-printed JSON for the `details` field of a vulnerability.
    pub fn to_pretty_json(&self) -> String {
        // A map of `Value`s always serializes.
        serde_json::to_string_pretty(&self.0).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for RawFinding {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl fmt::Display for RawFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.0) {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str("<unprintable finding>"),
        }
    }
}

/// Whether a value counts as set: anything except `null` and `false`.
pub fn is_present(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

/// Render a JSON scalar as the text an operator would expect to see.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Identifier of an upstream portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioId(pub String);

impl PortfolioId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortfolioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PortfolioId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Issue types fetched in debug mode.
pub const DEBUG_ISSUE_TYPES: &[&str] = &[
    "patching_cadence_high",
    "patching_cadence_low",
    "service_imap",
    "csp_no_policy",
];

/// Restricts which issue types are requested from the upstream API.
///
/// Keeps the order the types were given in, dropping duplicates, so that the
/// fetch order (and therefore the output order) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueTypeFilter {
    types: Vec<String>,
}

impl IssueTypeFilter {
    pub fn debug_subset() -> Self {
        DEBUG_ISSUE_TYPES.iter().copied().collect()
    }

    /// Parse a comma-separated list, ignoring blank items.
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IssueTypeFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut types: Vec<String> = Vec::new();
        for t in iter {
            let t = t.into();
            if !types.contains(&t) {
                types.push(t);
            }
        }
        Self { types }
    }
}

impl fmt::Display for IssueTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.types.join(","))
    }
}
