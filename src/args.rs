use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-summary")]
#[command(about = "Request and serve web page summaries")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the summary gateway
    Serve {
        /// Address to listen on (e.g. 127.0.0.1:4000)
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Request a summary for one URL and print it
    Query {
        /// URL of the page to summarize
        url: String,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Read URLs from standard input and request a summary for each line
    Prompt {
        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(clap::Args, Debug)]
pub struct ClientArgs {
    /// Base address of the summary API
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Append the URL to the query string without escaping it
    #[arg(long)]
    pub raw: bool,

    /// Request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,
}
