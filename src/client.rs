//! Client side of the summary API.
//!
//! A [`SummaryRequestHandler`] turns one user submission into one GET against the
//! summary endpoint. Failures are surfaced to the user through a [`Notifier`];
//! non-success statuses are returned to the caller without notifying anyone.

use crate::config::ClientConfig;
use crate::error::SummaryError;
use crate::query::SummaryQuery;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Status and body of a settled HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues the outbound GET for a request URL
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<TransportResponse, SummaryError>;
}

/// Surfaces an error message to the user
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, SummaryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, SummaryError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            // Only the status matters for a rejected request; its body may be broken
            return Ok(TransportResponse::new(status, String::new()));
        }
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// [`Notifier`] that writes to standard error
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// What became of one submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// 2xx response with a JSON body
    Summary(Value),
    /// Non-success status; the user is not notified
    Rejected { status: u16 },
    /// Transport or decode failure; the user was notified with this message
    Failed(String),
}

/// Bridges a user submission to one outbound summary request
#[derive(Clone)]
pub struct SummaryRequestHandler {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
}

impl SummaryRequestHandler {
    /// Create a handler using reqwest and notifying on standard error
    pub fn new(config: ClientConfig) -> Result<Self, SummaryError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
            notifier: Arc::new(StderrNotifier),
        })
    }

    /// Replace the transport
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the notifier
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start a request for the submitted value and return without waiting for it.
    ///
    /// Each submission runs on its own task; a later submission never cancels an
    /// earlier one.
    pub fn submit(&self, value: impl Into<String>) -> JoinHandle<SubmitOutcome> {
        let query = SummaryQuery::new(value);
        let handler = self.clone();
        tokio::spawn(async move { handler.dispatch(query).await })
    }

    /// Perform the request for a query and wait for it to settle
    pub async fn dispatch(&self, query: SummaryQuery) -> SubmitOutcome {
        let url = match query.request_url(&self.config) {
            Ok(url) => url,
            Err(e) => return self.fail(e),
        };

        ::log::debug!("Requesting summary: GET {}", url);
        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(e) => return self.fail(e),
        };

        if !response.is_success() {
            ::log::warn!(
                "Summary API answered {} for {:?}",
                response.status,
                query.as_str()
            );
            return SubmitOutcome::Rejected {
                status: response.status,
            };
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(value) => {
                ::log::info!("Received summary for {:?}", query.as_str());
                SubmitOutcome::Summary(value)
            }
            Err(e) => self.fail(SummaryError::Decode(e.to_string())),
        }
    }

    fn fail(&self, error: SummaryError) -> SubmitOutcome {
        let message = error.to_string();
        ::log::error!("Summary request failed: {}", message);
        self.notifier.notify(&message);
        SubmitOutcome::Failed(message)
    }
}
