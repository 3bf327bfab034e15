//! Configuration management.
//!
//! Settings are layered: an optional TOML file, then `ARXIV_DIGEST_*`
//! environment variables (`__` separates nested keys), then command line
//! overrides applied by the binary.
//!
//! ```toml
//! [session]
//! pirate_mode = false
//! num_papers = 5
//!
//! [http]
//! timeout_secs = 30
//! connect_timeout_secs = 10
//!
//! [feeds]
//! api_url = "https://export.arxiv.org/api/query"
//! rss_url = "https://rss.arxiv.org/rss"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "ARXIV_DIGEST";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Per-session tool behaviour
    #[serde(default)]
    pub session: SessionConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// arXiv endpoints
    #[serde(default)]
    pub feeds: FeedEndpoints,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.num_papers == 0 {
            return Err(ConfigError::Invalid(
                "session.num_papers must be a positive integer".to_string(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Session configuration handed to every tool call
///
/// Read-only from the tools' point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Speak like a pirate
    #[serde(default)]
    pub pirate_mode: bool,

    /// Number of papers returned by the API search
    #[serde(default = "default_num_papers")]
    pub num_papers: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pirate_mode: false,
            num_papers: default_num_papers(),
        }
    }
}

fn default_num_papers() -> usize {
    crate::models::DEFAULT_MAX_RESULTS
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Overrides the `arxiv-digest/<version>` user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// arXiv endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEndpoints {
    /// Atom search API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base of the per-category RSS feeds; the category is appended as a path segment
    #[serde(default = "default_rss_url")]
    pub rss_url: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            rss_url: default_rss_url(),
        }
    }
}

fn default_api_url() -> String {
    "https://export.arxiv.org/api/query".to_string()
}

fn default_rss_url() -> String {
    "https://rss.arxiv.org/rss".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// "json" for structured output, anything else for human-readable
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Find a configuration file in the default locations
///
/// Checks `./arxiv-digest.toml` first, then `<config dir>/arxiv-digest/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("arxiv-digest.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("arxiv-digest").join("config.toml"))
        .filter(|path| path.is_file())
}
