use reqwest::header::InvalidHeaderValue;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppMetaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("Bad response status")]
    BadStatus,

    #[error("Markup parsing error: {0}")]
    MarkupParse(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl AppMetaError {
    /// Status the response is forced to when a fetch gives up.
    ///
    /// Both the timeout and redirect exhaustion report `408 Request Timeout`
    /// while remaining distinct error values.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Timeout | Self::TooManyRedirects => Some(StatusCode::REQUEST_TIMEOUT),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppMetaError>;
