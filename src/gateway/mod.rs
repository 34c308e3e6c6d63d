//! HTTP gateway serving the page summary API.

pub mod handlers;

use crate::config::GatewayConfig;
use crate::error::SummaryError;
use crate::fetcher::PageFetcher;
use crate::filter::TargetFilter;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Path of the summary endpoint
pub const SUMMARY_PATH: &str = "/v1/summary";

/// Shared state for gateway handlers
#[derive(Debug)]
pub struct GatewayState {
    pub fetcher: PageFetcher,
    pub filter: TargetFilter,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> Result<Self, SummaryError> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            filter: TargetFilter::new(config.filter.clone())?,
        })
    }
}

/// Build the gateway router
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route(SUMMARY_PATH, get(handlers::summary))
        .layer(middleware::map_response(handlers::allow_any_origin))
        .with_state(Arc::new(state))
}

/// Serve the gateway on an already bound listener until the server stops
pub async fn serve_on(listener: TcpListener, state: GatewayState) -> Result<(), SummaryError> {
    if let Ok(addr) = listener.local_addr() {
        ::log::info!("Summary gateway listening on http://{}{}", addr, SUMMARY_PATH);
    }
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Bind the configured address and serve the gateway
pub async fn serve(config: &GatewayConfig) -> Result<(), SummaryError> {
    let state = GatewayState::new(config)?;
    let listener = TcpListener::bind(&config.listen_addr).await?;
    serve_on(listener, state).await
}
