use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// Transport failure or a non-success status from the products API
    #[error("Search request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON envelope
    #[error("Search response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },

    /// The search box task is no longer running
    #[error("Search box closed")]
    Closed,
}
