// Error type returned by the API client. Front ends wrap it in
// `anyhow::Error`; the variants only exist so the printed message says
// which part of the exchange went wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// `source` already names the URL it was sending to.
    #[error("request failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status. `body` is the raw text it
    /// sent back, possibly empty.
    #[error("{endpoint} failed: {status} - {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {endpoint} response as JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;
