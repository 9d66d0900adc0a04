use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The service answered but the call failed; `message` carries the best
    /// available description (service message, raw body, or a templated
    /// fallback including the status).
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
