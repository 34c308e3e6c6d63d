use crate::config::GatewayConfig;
use crate::error::SummaryError;
use crate::parsers::ContentKind;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

/// A fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after following redirects; the base for relative references
    pub url: Url,
    pub html: String,
}

/// Fetches target pages for the summary gateway
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new(config: &GatewayConfig) -> Result<Self, SummaryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `url`, failing if the status is an error (>= 400) or the content is not HTML
    pub async fn fetch_html(&self, url: &Url) -> Result<FetchedPage, SummaryError> {
        ::log::debug!("Fetching {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            ::log::warn!("Fetching {} returned status {}", url, status);
            return Err(SummaryError::UpstreamStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !ContentKind::from_content_type(&content_type).is_html() {
            return Err(SummaryError::NotHtml(content_type));
        }

        let final_url = response.url().clone();
        let html = response.text().await?;
        ::log::debug!("Fetched {} bytes from {}", html.len(), final_url);

        Ok(FetchedPage {
            url: final_url,
            html,
        })
    }
}
