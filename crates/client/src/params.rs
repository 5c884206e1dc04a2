//! Ordered parameter sets and their canonical encoding.
//!
//! The canonical encoding is the exact byte string that gets signed, and the
//! server rebuilds it independently to verify the signature. Entry order is
//! therefore load-bearing: entries are rendered in insertion order, never
//! sorted, and nested keys use bracket suffix notation (`parent[child]`).

use std::borrow::Cow;

use error_stack::Report;

use crate::error::ApiError;

/// A single parameter value: a scalar, an ordered sequence, or a nested
/// ordered mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(String),
    Sequence(Vec<ParamValue>),
    Mapping(ParameterSet),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

/// Booleans are rendered the way the server expects them: `"1"` for true and
/// the empty string for false.
impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Scalar(if value { "1" } else { "" }.to_string())
    }
}

impl<V: Into<ParamValue>> From<Vec<V>> for ParamValue {
    fn from(values: Vec<V>) -> Self {
        ParamValue::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<serde_json::Value> for ParamValue {
    type Error = Report<ApiError>;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => Err(Report::new(ApiError::Encoding {
                message: "null is not representable in the canonical encoding".to_string(),
            })),
            serde_json::Value::Bool(b) => Ok(b.into()),
            serde_json::Value::Number(n) => Ok(ParamValue::Scalar(n.to_string())),
            serde_json::Value::String(s) => Ok(ParamValue::Scalar(s)),
            serde_json::Value::Array(items) => Ok(ParamValue::Sequence(
                items
                    .into_iter()
                    .map(ParamValue::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            serde_json::Value::Object(map) => {
                let mut set = ParameterSet::new();
                for (key, item) in map {
                    set.push(key, ParamValue::try_from(item)?);
                }
                Ok(ParamValue::Mapping(set))
            }
        }
    }
}

/// An insertion-ordered sequence of `(key, value)` pairs.
///
/// Duplicate keys are legal and all occurrences are emitted; no sorting or
/// deduplication is performed anywhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the canonical `key=value&key=value` encoding.
    ///
    /// Keys and values are percent-encoded, nested entries are flattened
    /// with bracket suffixes, and sequence elements are keyed by their
    /// decimal index.
    pub fn encode(&self) -> String {
        let mut pairs = Vec::new();
        for (key, value) in self.iter() {
            encode_entry(None, key, value, &mut pairs);
        }
        pairs.join("&")
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for (key, value) in iter {
            set.push(key, value);
        }
        set
    }
}

fn encode_entry(prefix: Option<&str>, key: &str, value: &ParamValue, out: &mut Vec<String>) {
    let encoded_key = match prefix {
        None => percent_encode(key).into_owned(),
        Some(prefix) => format!("{prefix}[{}]", percent_encode(key)),
    };

    match value {
        ParamValue::Scalar(scalar) => {
            out.push(format!("{encoded_key}={}", percent_encode(scalar)));
        }
        ParamValue::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                encode_entry(Some(&encoded_key), &index.to_string(), item, out);
            }
        }
        ParamValue::Mapping(set) => {
            for (child_key, child) in set.iter() {
                encode_entry(Some(&encoded_key), child_key, child, out);
            }
        }
    }
}

/// Percent-encode per RFC 3986: only unreserved characters
/// (`A-Z a-z 0-9 - _ . ~`) pass through, space becomes `%20`, and `~` is
/// never escaped.
pub fn percent_encode(input: &str) -> Cow<'_, str> {
    urlencoding::encode(input)
}
