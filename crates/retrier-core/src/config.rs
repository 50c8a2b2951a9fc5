use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::policy::{
    policy, RetryPolicy, DEFAULT_COEFFICIENT, DEFAULT_INITIAL_INTERVAL, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_INTERVAL,
};

/// Retry policy section of `config.toml`.
///
/// Fields are signed and optional: a missing or zero field takes the built-in
/// default, and a negative `max_interval_ms` / `max_attempts` means
/// unlimited. Values always go through the policy builders, so a config file
/// can never produce an out-of-range policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    Backoff {
        #[serde(default)]
        initial_interval_ms: i64,
        #[serde(default)]
        max_interval_ms: i64,
        #[serde(default)]
        max_attempts: i64,
        #[serde(default)]
        coefficient: f64,
    },
    FixedDelay {
        #[serde(default)]
        interval_ms: i64,
        #[serde(default)]
        max_attempts: i64,
    },
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig::Backoff {
            initial_interval_ms: DEFAULT_INITIAL_INTERVAL.as_millis() as i64,
            max_interval_ms: DEFAULT_MAX_INTERVAL.as_millis() as i64,
            max_attempts: DEFAULT_MAX_ATTEMPTS as i64,
            coefficient: DEFAULT_COEFFICIENT,
        }
    }
}

impl PolicyConfig {
    /// Build the normalized policy described by this section.
    pub fn to_policy(&self) -> RetryPolicy {
        match *self {
            PolicyConfig::Backoff {
                initial_interval_ms,
                max_interval_ms,
                max_attempts,
                coefficient,
            } => {
                let b = policy()
                    .backoff()
                    .with_initial_interval(millis(initial_interval_ms))
                    .with_max_attempts(max_attempts)
                    .with_coefficient(coefficient);
                let b = if max_interval_ms < 0 {
                    b.with_max_interval_unlimited()
                } else {
                    b.with_max_interval(millis(max_interval_ms))
                };
                b.build().into()
            }
            PolicyConfig::FixedDelay {
                interval_ms,
                max_attempts,
            } => policy()
                .fixed_delay()
                .with_interval(millis(interval_ms))
                .with_max_attempts(max_attempts)
                .build()
                .into(),
        }
    }
}

/// Non-positive milliseconds map to zero, which the builders treat as "unset".
fn millis(ms: i64) -> Duration {
    u64::try_from(ms).map(Duration::from_millis).unwrap_or_default()
}

/// Global configuration loaded from `~/.config/retrier/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrierConfig {
    /// Give up after this many milliseconds (None = no deadline).
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl RetrierConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("retrier")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RetrierConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RetrierConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<RetrierConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: RetrierConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
