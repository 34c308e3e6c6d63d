use crate::config::{ClientConfig, QueryEncoding};
use crate::error::SummaryError;
use url::Url;

/// The URL a user asked to have summarized, captured at submit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryQuery {
    url: String,
}

impl SummaryQuery {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_empty()
    }

    /// Build the summary API request URL for this query
    pub fn request_url(&self, config: &ClientConfig) -> Result<String, SummaryError> {
        match config.query_encoding {
            QueryEncoding::Raw => Ok(format!(
                "{}{}?{}={}",
                config.base_url, config.summary_path, config.query_param, self.url
            )),
            QueryEncoding::Encoded => {
                let mut url = Url::parse(&config.base_url)?.join(&config.summary_path)?;
                url.query_pairs_mut()
                    .clear()
                    .append_pair(&config.query_param, &self.url);
                Ok(url.into())
            }
        }
    }
}

impl From<&str> for SummaryQuery {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for SummaryQuery {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_config() -> ClientConfig {
        ClientConfig::default().with_query_encoding(QueryEncoding::Raw)
    }

    #[test]
    fn test_plain_host_matches_in_both_modes() {
        let query = SummaryQuery::new("example.com");
        let expected = "http://localhost:4000/v1/summary?url=example.com";
        assert_eq!(query.request_url(&ClientConfig::default()).unwrap(), expected);
        assert_eq!(query.request_url(&raw_config()).unwrap(), expected);
    }

    #[test]
    fn test_raw_mode_does_not_escape() {
        let query = SummaryQuery::new("a&b");
        assert_eq!(
            query.request_url(&raw_config()).unwrap(),
            "http://localhost:4000/v1/summary?url=a&b"
        );
    }

    #[test]
    fn test_encoded_mode_escapes_reserved_characters() {
        let query = SummaryQuery::new("a&b");
        assert_eq!(
            query.request_url(&ClientConfig::default()).unwrap(),
            "http://localhost:4000/v1/summary?url=a%26b"
        );

        let query = SummaryQuery::new("https://example.com/a?b=1#top");
        assert_eq!(
            query.request_url(&ClientConfig::default()).unwrap(),
            "http://localhost:4000/v1/summary?url=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1%23top"
        );
    }

    #[test]
    fn test_empty_query_is_still_sent() {
        let query = SummaryQuery::new("");
        assert!(query.is_empty());
        assert_eq!(
            query.request_url(&ClientConfig::default()).unwrap(),
            "http://localhost:4000/v1/summary?url="
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::default().with_base_url("not a url");
        let err = SummaryQuery::new("example.com").request_url(&config).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidUrl(_)));
    }
}
