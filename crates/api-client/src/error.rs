use thiserror::Error;

/// Every variant renders as a human-readable reason; the dashboard shows these verbatim.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the analytics service: {0}")]
    Transport(#[from] reqwest::Error),

    /// A non-2xx answer. `message` is the body's `error` field or `HTTP <code>: <reason>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),
}
