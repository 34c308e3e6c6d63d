use clap::Parser;
use page_summary::client::SubmitOutcome;
use page_summary::{AppConfig, ClientConfig, QueryEncoding, SummaryError, SummaryRequestHandler};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

mod args;
use args::{Args, ClientArgs, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration: {}", e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    }
    .apply_env();

    let result = match args.command {
        Command::Serve { listen } => {
            let mut gateway = config.gateway;
            if let Some(listen) = listen {
                gateway = gateway.with_listen_addr(listen);
            }
            page_summary::gateway::serve(&gateway).await.map(|_| true)
        }
        Command::Query { url, client } => run_query(client_config(config.client, client), url).await,
        Command::Prompt { client } => run_prompt(client_config(config.client, client))
            .await
            .map(|_| true),
    };

    match result {
        Ok(true) => {}
        // The outcome was already reported
        Ok(false) => std::process::exit(2),
        Err(e) => {
            ::log::error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// Apply command-line overrides to the client configuration
fn client_config(mut config: ClientConfig, args: ClientArgs) -> ClientConfig {
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if args.raw {
        config = config.with_query_encoding(QueryEncoding::Raw);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    config
}

/// Request one summary; returns whether a summary was received
async fn run_query(config: ClientConfig, url: String) -> Result<bool, SummaryError> {
    let handler = SummaryRequestHandler::new(config)?;
    let outcome = handler
        .submit(url.clone())
        .await
        .map_err(|e| SummaryError::Transport(e.to_string()))?;

    Ok(report(&url, outcome))
}

/// Treat each line of standard input as one submission; requests run concurrently
async fn run_prompt(config: ClientConfig) -> Result<(), SummaryError> {
    let handler = SummaryRequestHandler::new(config)?;
    ::log::info!(
        "Enter URLs to summarize via {} (one per line)",
        handler.config().base_url
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let request = handler.submit(line.clone());
        pending.spawn(async move {
            match request.await {
                Ok(outcome) => {
                    report(&line, outcome);
                }
                Err(e) => ::log::error!("Request for {:?} did not complete: {}", line, e),
            }
        });

        // Reap whatever has already finished
        while pending.try_join_next().is_some() {}
    }

    while pending.join_next().await.is_some() {}
    Ok(())
}

/// Print the outcome of a submission; returns whether a summary was received
fn report(url: &str, outcome: SubmitOutcome) -> bool {
    match outcome {
        SubmitOutcome::Summary(summary) => {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(_) => println!("{}", summary),
            }
            true
        }
        SubmitOutcome::Rejected { status } => {
            ::log::info!("No summary for {:?} (status {})", url, status);
            false
        }
        // Already surfaced through the notifier
        SubmitOutcome::Failed(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_query_without_summary_returns_false() {
        // Bind then drop a listener to get a port nobody is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = ClientConfig::default().with_base_url(format!("http://{}", addr));
        let received = run_query(config, "example.com".to_string()).await.unwrap();

        assert!(!received);
    }

    #[test]
    fn test_report() {
        assert!(report("example.com", SubmitOutcome::Summary(serde_json::json!({"title": "x"}))));
        assert!(!report("example.com", SubmitOutcome::Rejected { status: 500 }));
        assert!(!report("example.com", SubmitOutcome::Failed("boom".to_string())));
    }

    #[test]
    fn test_client_config_overrides() {
        let args = ClientArgs {
            base_url: Some("http://10.0.0.2:4000".to_string()),
            raw: true,
            timeout: Some(5),
        };
        let config = client_config(ClientConfig::default(), args);
        assert_eq!(config.base_url, "http://10.0.0.2:4000");
        assert_eq!(config.query_encoding, QueryEncoding::Raw);
        assert_eq!(config.timeout_secs, Some(5));
    }
}
