// Command-line driver: run one query against an Azure Data Explorer endpoint

use adx_client::client::headers::identification_headers;
use adx_client::config::ClientConfig;
use adx_client::core::models::{ClientRequestProperties, RequestPayload};
use adx_client::AdxClient;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "adx-query", version, about = "Run a query against Azure Data Explorer")]
struct Cli {
    /// Target database
    #[arg(short, long)]
    database: String,

    /// Query endpoint; overrides ADX_ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,

    /// Provenance tag used in the client request id
    #[arg(long, default_value = "query")]
    source: String,

    /// Server-side timeout as a timespan, e.g. 00:04:00
    #[arg(long)]
    server_timeout: Option<String>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Query-language statement
    query: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.env_file {
        Some(path) => ClientConfig::from_env_file(path, cli.endpoint.as_deref())?,
        None => {
            dotenv::dotenv().ok();
            ClientConfig::from_env_with_endpoint(cli.endpoint.as_deref())?
        }
    };

    init_tracing(&config)?;

    let client = AdxClient::from_config(&config)?;

    let mut payload = RequestPayload::new(&cli.database, &cli.query, &cli.source);
    if let Some(timeout) = &cli.server_timeout {
        payload = payload.with_properties(ClientRequestProperties::with_server_timeout(timeout));
    }
    let headers = identification_headers(&cli.source, config.user_login.as_deref());

    match client.kusto_request(&config.endpoint, &payload, Some(&headers)).await {
        Ok(response) => {
            info!(tables = response.tables.len(), "Query succeeded");
            println!("{}", serde_json::to_string_pretty(&response.tables)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Query failed");
            Err(e.into())
        }
    }
}

/// Initialize tracing subscriber based on configuration
fn init_tracing(config: &ClientConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    let result = if config.log_format == "json" {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}
