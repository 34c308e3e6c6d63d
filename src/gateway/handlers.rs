use super::GatewayState;
use crate::error::SummaryError;
use crate::parsers::extract_summary;
use crate::results::PageSummary;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

/// Query string of `GET /v1/summary`
#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub url: Option<String>,
}

/// Handles requests for the page summary API.
///
/// Expects a `url` query parameter naming a web page and responds with the
/// JSON-encoded [`PageSummary`] for it.
pub async fn summary(
    State(state): State<Arc<GatewayState>>,
    Query(params): Query<SummaryParams>,
) -> Response {
    match summarize(&state, params.url.as_deref()).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => {
            ::log::warn!("Summary request for {:?} failed: {}", params.url, e);
            e.into_response()
        }
    }
}

/// Allows cross-origin use of every gateway response, including extractor rejections
pub async fn allow_any_origin(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

/// Fetch and summarize the page named by `raw_url`
pub async fn summarize(
    state: &GatewayState,
    raw_url: Option<&str>,
) -> Result<PageSummary, SummaryError> {
    let raw_url = raw_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(SummaryError::MissingUrl)?;

    let target = parse_target(raw_url)?;
    if !state.filter.is_allowed(&target) {
        return Err(SummaryError::Blocked(target.to_string()));
    }

    let page = state.fetcher.fetch_html(&target).await?;
    ::log::info!("Summarizing {}", page.url);
    Ok(extract_summary(&page.html, &page.url))
}

/// Parse a target URL, assuming `http://` when the scheme is missing
fn parse_target(raw_url: &str) -> Result<Url, SummaryError> {
    match Url::parse(raw_url) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Ok(Url::parse(&format!("http://{}", raw_url))?)
        }
        Err(e) => Err(e.into()),
    }
}

impl SummaryError {
    /// HTTP status the gateway answers with for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SummaryError::MissingUrl | SummaryError::InvalidUrl(_) | SummaryError::Blocked(_) => {
                StatusCode::BAD_REQUEST
            }
            SummaryError::UpstreamStatus { .. }
            | SummaryError::NotHtml(_)
            | SummaryError::Transport(_)
            | SummaryError::Decode(_) => StatusCode::BAD_GATEWAY,
            SummaryError::Config(_) | SummaryError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SummaryError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), format!("{}\n", self)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}
