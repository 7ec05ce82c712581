//! HTTP client for the storefront catalog REST API.
//!
//! Wraps `reqwest` with base-URL handling, query encoding and typed errors.
//! All calls are plain GETs; there is no retry layer.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use storefront_core::{AppConfig, Category, Product};

use crate::error::ClientError;
use crate::payload::{ListPayload, Page};
use crate::query::QueryParams;

/// The catalog endpoints, relative to the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Discounted,
    NewProducts,
    TopOrdered,
    CategoryList,
    Search,
}

impl Endpoint {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Discounted => "products/discounted/",
            Endpoint::NewProducts => "products/new-products/",
            Endpoint::TopOrdered => "products/top-ordered/",
            Endpoint::CategoryList => "products/category/list",
            Endpoint::Search => "products/list",
        }
    }
}

/// Client for the catalog API.
///
/// Cloning is cheap and clones share one connection pool, so every store in
/// the application can hold its own handle to the same transport.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so joining a relative endpoint path
        // appends to the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches one page of products from a listing or search endpoint.
    ///
    /// Items are returned as the server sent them; display normalization is
    /// the caller's job.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ClientError::Deserialize`] if the body is not JSON or an item is
    ///   not an object.
    /// - [`ClientError::MalformedPayload`] if the body is neither shape.
    pub async fn fetch_products(
        &self,
        endpoint: Endpoint,
        params: &QueryParams,
    ) -> Result<Page<Product>, ClientError> {
        let url = self.build_url(endpoint, params)?;
        let body = self.request_json(&url).await?;
        let payload = ListPayload::<Product>::from_value(body, url.as_str())?;
        Ok(payload.into_page())
    }

    /// Fetches the full category directory.
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::fetch_products`]; the body must be a bare
    /// JSON array.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        let url = self.build_url(Endpoint::CategoryList, &QueryParams::new())?;
        let body = self.request_json(&url).await?;
        if !body.is_array() {
            return Err(ClientError::MalformedPayload {
                context: url.to_string(),
                reason: "expected a JSON array of categories".to_string(),
            });
        }
        serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Joins the endpoint path onto the base URL and appends percent-encoded
    /// query parameters. An empty mapping leaves the URL without a `?`.
    fn build_url(&self, endpoint: Endpoint, params: &QueryParams) -> Result<Url, ClientError> {
        let mut url =
            self.base_url
                .join(endpoint.path())
                .map_err(|e| ClientError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: format!("cannot join \"{}\": {e}", endpoint.path()),
                })?;

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter() {
                pairs.append_pair(key, &value.to_string());
            }
        }

        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, ClientError> {
        tracing::debug!(%url, "catalog request");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
