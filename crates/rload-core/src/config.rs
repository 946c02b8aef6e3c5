use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per fetch (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.25,
            max_delay_secs: 5,
        }
    }
}

/// Loader configuration from `~/.config/rload/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// `Name: value` lines sent after `Host`/`Connection` on every network fetch.
    #[serde(default = "default_headers")]
    pub default_headers: Vec<String>,
    /// TCP connect deadline in seconds (None or 0 = OS default).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Per read/write deadline in seconds (None or 0 = wait indefinitely).
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
    /// Optional retry policy; if missing, each fetch is attempted once.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

fn default_headers() -> Vec<String> {
    vec![
        concat!("User-Agent: rload/", env!("CARGO_PKG_VERSION")).to_string(),
        "Accept: text/html,text/plain;q=0.9,*/*;q=0.8".to_string(),
        "Accept-Language: en-US,en;q=0.5".to_string(),
    ]
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            default_headers: default_headers(),
            connect_timeout_secs: None,
            read_timeout_secs: None,
            retry: None,
        }
    }
}

impl LoaderConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: nonzero_secs(self.connect_timeout_secs),
            read_timeout: nonzero_secs(self.read_timeout_secs),
        }
    }

    /// Backoff delays are capped at `max_delay_secs`, so an unrepresentable base
    /// delay falls back to that cap. [`load_from`] rejects such values up front.
    pub fn retry_policy(&self) -> RetryPolicy {
        match &self.retry {
            Some(r) => {
                let max_delay = Duration::from_secs(r.max_delay_secs);
                RetryPolicy {
                    max_attempts: r.max_attempts.max(1),
                    base_delay: Duration::try_from_secs_f64(r.base_delay_secs.max(0.0))
                        .unwrap_or(max_delay),
                    max_delay,
                }
            }
            None => RetryPolicy::single_attempt(),
        }
    }

    /// Reject values that cannot become a retry policy.
    pub fn validate(&self) -> Result<()> {
        if let Some(r) = &self.retry {
            if !r.base_delay_secs.is_finite() || r.base_delay_secs < 0.0 {
                bail!(
                    "retry.base_delay_secs must be a finite, non-negative number (got {})",
                    r.base_delay_secs
                );
            }
            if Duration::try_from_secs_f64(r.base_delay_secs).is_err() {
                bail!("retry.base_delay_secs is too large (got {})", r.base_delay_secs);
            }
        }
        Ok(())
    }
}

/// A zero deadline means no deadline; sockets refuse a zero timeout.
fn nonzero_secs(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|&s| s > 0).map(Duration::from_secs)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rload")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LoaderConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LoaderConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<LoaderConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LoaderConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
