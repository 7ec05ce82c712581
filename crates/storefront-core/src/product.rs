//! Product and category records as returned by the catalog API.
//!
//! Both are kept as opaque JSON objects. The only fields this crate
//! interprets are `main_image_url` (source of the display image) and the
//! derived `image` / `isNew` keys it writes back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key the API uses for a product's primary image.
pub const MAIN_IMAGE_URL_KEY: &str = "main_image_url";
/// Derived display image key.
pub const IMAGE_KEY: &str = "image";
/// Derived flag set on items from the new-products listing.
pub const IS_NEW_KEY: &str = "isNew";

/// A product record. Field order and unknown keys are preserved as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product {
    pub fields: Map<String, Value>,
}

impl Product {
    /// Raw `id` value, if the record carries one.
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    #[must_use]
    pub fn main_image_url(&self) -> Option<&str> {
        self.fields.get(MAIN_IMAGE_URL_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.fields.get(IMAGE_KEY).and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.fields
            .get(IS_NEW_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Sets `image` to a copy of `main_image_url`.
    ///
    /// When `main_image_url` is absent the `image` key is removed, so a stale
    /// value from the payload never survives.
    #[must_use]
    pub fn with_display_image(mut self) -> Self {
        match self.fields.get(MAIN_IMAGE_URL_KEY).cloned() {
            Some(url) => {
                self.fields.insert(IMAGE_KEY.to_owned(), url);
            }
            None => {
                self.fields.remove(IMAGE_KEY);
            }
        }
        self
    }

    #[must_use]
    pub fn mark_new(mut self) -> Self {
        self.fields.insert(IS_NEW_KEY.to_owned(), Value::Bool(true));
        self
    }
}

/// An entry from the category directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category {
    pub fields: Map<String, Value>,
}

impl Category {
    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}
