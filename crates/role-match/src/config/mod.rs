use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
    pub text: TextConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let top_n = match env::var("MATCHER_TOP_N") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidTopN(raw))?,
            Err(_) => DEFAULT_TOP_N,
        };

        let parallel = env::var("MATCHER_PARALLEL")
            .map(|value| !matches!(value.trim(), "0" | "false" | "FALSE" | "no"))
            .unwrap_or(true);

        let tokenizer = match env::var("MATCHER_TOKENIZER") {
            Ok(raw) => TokenizerMode::parse(&raw).ok_or(ConfigError::InvalidTokenizer(raw))?,
            Err(_) => TokenizerMode::Auto,
        };

        let tokenizer_resources = env::var_os("MATCHER_TOKENIZER_RESOURCES").map(PathBuf::from);
        if tokenizer == TokenizerMode::Treebank {
            if let Some(path) = tokenizer_resources.as_ref().filter(|path| !path.is_file()) {
                return Err(ConfigError::MissingTokenizerResources(path.clone()));
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                environment,
            },
            matching: MatchingConfig { top_n, parallel },
            text: TextConfig {
                tokenizer,
                tokenizer_resources,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub environment: AppEnvironment,
}

pub const DEFAULT_TOP_N: usize = 5;

/// Batch matching knobs. Scoring weights are fixed and deliberately absent here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingConfig {
    pub top_n: usize,
    pub parallel: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            parallel: true,
        }
    }
}

/// Which tokenizer the text pipeline should try to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerMode {
    /// Resource-backed when resources can be loaded, whitespace otherwise.
    Auto,
    Treebank,
    Whitespace,
}

impl TokenizerMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Some(Self::Auto),
            "treebank" | "resource" => Some(Self::Treebank),
            "whitespace" | "naive" => Some(Self::Whitespace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextConfig {
    pub tokenizer: TokenizerMode,
    pub tokenizer_resources: Option<PathBuf>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerMode::Auto,
            tokenizer_resources: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTopN(String),
    InvalidTokenizer(String),
    MissingTokenizerResources(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTopN(raw) => {
                write!(f, "MATCHER_TOP_N must be a non-negative integer (got '{raw}')")
            }
            ConfigError::InvalidTokenizer(raw) => write!(
                f,
                "MATCHER_TOKENIZER must be one of auto, treebank, whitespace (got '{raw}')"
            ),
            ConfigError::MissingTokenizerResources(path) => write!(
                f,
                "MATCHER_TOKENIZER=treebank needs MATCHER_TOKENIZER_RESOURCES to name a readable file (got '{}')",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTopN(_)
            | ConfigError::InvalidTokenizer(_)
            | ConfigError::MissingTokenizerResources(_) => None,
        }
    }
}
