use thiserror::Error;

/// Errors produced while requesting, fetching or summarizing a page
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("no url query string parameter provided")]
    MissingUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("URL not permitted: {0}")]
    Blocked(String),

    #[error("error fetching {url}: upstream responded with status {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("response content type was {0} not text/html")]
    NotHtml(String),

    /// Network level failure; displayed verbatim so users see the underlying message
    #[error("{0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        SummaryError::Transport(error.to_string())
    }
}

impl From<regex::Error> for SummaryError {
    fn from(error: regex::Error) -> Self {
        SummaryError::Config(format!("invalid pattern: {}", error))
    }
}
