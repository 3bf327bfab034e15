use anyhow::{Context, Result};
use arxiv_digest::config::{find_config_file, load_config, Config};
use arxiv_digest::mcp::server::McpServer;
use arxiv_digest::ArxivDigest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// arXiv Digest - greet users and browse today's arXiv postings over MCP
#[derive(Parser, Debug)]
#[command(name = "arxiv-digest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for greeting users and browsing arXiv by category", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server (stdio by default)
    Serve {
        /// Run in streamable HTTP mode instead of stdio
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode
        #[arg(long, short, default_value_t = 3000)]
        port: u16,

        /// Host to bind to for HTTP mode
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Greet like a pirate (overrides configuration)
        #[arg(long)]
        pirate_mode: Option<bool>,

        /// Number of papers returned by search_arxiv (overrides configuration)
        #[arg(long)]
        num_papers: Option<usize>,
    },
}

/// Print all available environment variables
fn print_env_vars() {
    println!("arXiv Digest - Environment Variables");
    println!();
    println!("Session:");
    println!("  ARXIV_DIGEST_SESSION__PIRATE_MODE       Greet like a pirate (default: false)");
    println!("  ARXIV_DIGEST_SESSION__NUM_PAPERS        Papers returned by search_arxiv (default: 5)");
    println!();
    println!("HTTP:");
    println!("  ARXIV_DIGEST_HTTP__TIMEOUT_SECS         Request timeout in seconds (default: 30)");
    println!("  ARXIV_DIGEST_HTTP__CONNECT_TIMEOUT_SECS Connect timeout in seconds (default: 10)");
    println!("  ARXIV_DIGEST_HTTP__USER_AGENT           Custom user agent");
    println!();
    println!("Endpoints:");
    println!("  ARXIV_DIGEST_FEEDS__API_URL             arXiv API (default: https://export.arxiv.org/api/query)");
    println!("  ARXIV_DIGEST_FEEDS__RSS_URL             arXiv RSS base (default: https://rss.arxiv.org/rss)");
    println!();
    println!("Logging:");
    println!("  ARXIV_DIGEST_LOGGING__LEVEL             Log level (default: info)");
    println!("  ARXIV_DIGEST_LOGGING__FORMAT            'json' for structured logs");
    println!("  RUST_LOG                                Overrides all of the above");
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.logging.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("arxiv_digest={}", level)));

    // stdout carries the MCP stdio transport, so logs go to stderr
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format.as_deref() == Some("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref())
        .with_context(|| match &config_path {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        })?;

    init_tracing(&cli, &config);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let Commands::Serve {
        http,
        port,
        host,
        pirate_mode,
        num_papers,
    } = cli.command.unwrap_or(Commands::Serve {
        http: false,
        port: 3000,
        host: "127.0.0.1".to_string(),
        pirate_mode: None,
        num_papers: None,
    });

    if let Some(pirate_mode) = pirate_mode {
        config.session.pirate_mode = pirate_mode;
    }
    if let Some(num_papers) = num_papers {
        config.session.num_papers = num_papers;
    }
    config.validate()?;

    let digest = Arc::new(ArxivDigest::from_config(&config)?);
    let server = McpServer::new(digest, config.session.clone())?;

    if http {
        let addr = format!("{}:{}", host, port);
        let (bound, handle) = server.run_http(&addr).await?;
        tracing::info!("MCP server listening on http://{}", bound);
        handle.await?;
    } else {
        server.run().await?;
    }

    Ok(())
}
