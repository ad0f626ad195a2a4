use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_SERVICE_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format `{}`", other)),
        }
    }
}

impl LogFormat {
    /// Read separately from [`Config`] so logging can be set up before the
    /// rest of the configuration is loaded and logged.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Unset or unrecognised values fall back to text.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub extract_url: Url,
    pub analyze_url: Url,
    /// `None` means requests may wait forever.
    pub request_timeout_seconds: Option<u64>,
    pub preview_dir: Option<PathBuf>,
    pub command_queue_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SERVICE_BASE_URL").unwrap_or_else(|| {
            info!(
                "SERVICE_BASE_URL not set, using default: {}",
                DEFAULT_SERVICE_BASE_URL
            );
            DEFAULT_SERVICE_BASE_URL.to_string()
        });

        let extract_url = match lookup("EXTRACT_URL") {
            Some(url) => Url::parse(&url).context("Failed to parse EXTRACT_URL")?,
            None => endpoint(&base_url, "extract")?,
        };
        let analyze_url = match lookup("ANALYZE_URL") {
            Some(url) => Url::parse(&url).context("Failed to parse ANALYZE_URL")?,
            None => endpoint(&base_url, "analyze")?,
        };

        let request_timeout_seconds = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(val) => match val.parse::<u64>() {
                Ok(seconds) => Some(seconds),
                Err(e) => {
                    warn!(
                        "Failed to parse REQUEST_TIMEOUT_SECONDS: {} (requests will not time out)",
                        e
                    );
                    None
                }
            },
            None => {
                info!("REQUEST_TIMEOUT_SECONDS not set, requests will not time out");
                None
            }
        };

        let preview_dir = match lookup("PREVIEW_DIR") {
            Some(dir) if !dir.trim().is_empty() => Some(
                absolute(PathBuf::from(dir)).context("Failed to resolve PREVIEW_DIR")?,
            ),
            _ => None,
        };

        let config = Config {
            extract_url,
            analyze_url,
            request_timeout_seconds,
            preview_dir,
            command_queue_capacity: parse_var(&lookup, "COMMAND_QUEUE_CAPACITY", 32),
        };

        config.validate()?;

        info!("Configuration loaded successfully: {:?}", config);
        Ok(config)
    }

    /// Points both endpoints at `base_url`, replacing any earlier setting.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.extract_url = endpoint(base_url, "extract")?;
        self.analyze_url = endpoint(base_url, "analyze")?;
        Ok(self)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        for url in [&self.extract_url, &self.analyze_url] {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow::anyhow!(
                    "Service URL must use http or https: {}",
                    url
                ));
            }
        }
        if self.request_timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!(
                "REQUEST_TIMEOUT_SECONDS must be greater than 0"
            ));
        }
        if self.command_queue_capacity == 0 {
            return Err(anyhow::anyhow!(
                "COMMAND_QUEUE_CAPACITY must be greater than 0"
            ));
        }
        Ok(())
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let joined = format!("{}/{}", base_url.trim_end_matches('/'), path);
    Url::parse(&joined).with_context(|| format!("Invalid service base URL: {}", base_url))
}

fn absolute(path: PathBuf) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

fn parse_var<T, F>(lookup: &F, var_name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        Some(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(
                    "Failed to parse {}: {} (using default: {:?})",
                    var_name, e, default
                );
                default
            }
        },
        None => {
            info!("{} not set, using default: {:?}", var_name, default);
            default
        }
    }
}
