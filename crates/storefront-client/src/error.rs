use thiserror::Error;

/// Errors returned by [`crate::CatalogClient`].
///
/// The stores never surface these to their callers; they are logged and
/// collapsed into a fixed per-collection message.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but neither a bare list nor a `results` envelope.
    #[error("malformed payload from {context}: {reason}")]
    MalformedPayload { context: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
