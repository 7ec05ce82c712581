//! The two response shapes the listing endpoints return.
//!
//! A listing endpoint answers either with a bare JSON array of records or
//! with a paginated envelope:
//!
//! ```text
//! {"count": 42, "next": "https://…?page=3", "previous": "https://…?page=1", "results": [ … ]}
//! ```
//!
//! The shape is decided by the presence of an array-valued `results` key.
//! Any other payload is rejected rather than guessed at.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq)]
pub enum ListPayload<T> {
    Bare(Vec<T>),
    Envelope {
        results: Vec<T>,
        count: Option<u64>,
        next: Option<String>,
        previous: Option<String>,
    },
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    results: Vec<T>,
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    previous: Option<String>,
}

/// One page of a collection with its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl<T: DeserializeOwned> ListPayload<T> {
    /// Classifies and decodes a response body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MalformedPayload`] if `value` is neither an array nor
    ///   an object with an array `results`.
    /// - [`ClientError::Deserialize`] if an item does not decode as `T`.
    pub fn from_value(value: Value, context: &str) -> Result<Self, ClientError> {
        let deserialize_err = |source: serde_json::Error| ClientError::Deserialize {
            context: context.to_owned(),
            source,
        };

        if value.is_array() {
            return serde_json::from_value(value)
                .map(Self::Bare)
                .map_err(deserialize_err);
        }

        if value.get("results").is_some_and(Value::is_array) {
            let raw: RawEnvelope<T> = serde_json::from_value(value).map_err(deserialize_err)?;
            return Ok(Self::Envelope {
                results: raw.results,
                count: raw.count,
                next: raw.next,
                previous: raw.previous,
            });
        }

        Err(ClientError::MalformedPayload {
            context: context.to_owned(),
            reason: format!(
                "expected a JSON array or an object with a `results` array, got {}",
                describe(&value)
            ),
        })
    }
}

impl<T> ListPayload<T> {
    /// Flattens either shape into a [`Page`]. A bare list is a single
    /// complete page; an envelope without `count` counts its own results.
    #[must_use]
    pub fn into_page(self) -> Page<T> {
        match self {
            ListPayload::Bare(items) => Page {
                count: items.len() as u64,
                items,
                next: None,
                previous: None,
            },
            ListPayload::Envelope {
                results,
                count,
                next,
                previous,
            } => Page {
                count: count.unwrap_or(results.len() as u64),
                items: results,
                next,
                previous,
            },
        }
    }
}

impl<T> Page<T> {
    /// Applies `f` to every item, keeping server order and pagination.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
            next: self.next,
            previous: self.previous,
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without a `results` array",
    }
}
