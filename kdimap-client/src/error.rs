#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("response from {endpoint} too large ({size} bytes, max {max})")]
    TooLarge {
        endpoint: String,
        size: usize,
        max: usize,
    },
    #[error("invalid JSON from {endpoint}: {source}")]
    Json {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected response from {endpoint}: {reason}")]
    UnexpectedShape { endpoint: String, reason: String },
    #[error("no portfolio is visible to this API key")]
    NoPortfolio,
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}
