// Re-export modules
pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod gateway;
pub mod parsers;
pub mod query;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use client::{Notifier, SubmitOutcome, SummaryRequestHandler, Transport};
pub use config::{AppConfig, ClientConfig, GatewayConfig, QueryEncoding};
pub use error::SummaryError;
pub use query::SummaryQuery;
pub use results::{PageSummary, PreviewImage};
