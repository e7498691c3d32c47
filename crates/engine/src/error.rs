use api_client::ApiError;
use thiserror::Error;

/// Why a refresh cycle produced no new data.
///
/// Both variants render the bare reason, since it ends up verbatim in `last_error`.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The liveness probe failed, so no data fetch was attempted.
    #[error("{0}")]
    ServiceUnavailable(#[from] ApiError),

    /// At least one fetch failed and the monthly sales series came back empty.
    #[error("{0}")]
    DataUnavailable(String),
}
