use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use reqwest::Url;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Shared secret for the trigger endpoints. `None` rejects every trigger.
    pub cron_secret: Option<String>,
    pub tracking_api_url: Url,
    pub tracking_api_key: Option<String>,
    pub tracking_timeout: Option<Duration>,
    pub sweep_interval: Option<Duration>,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = match var("PORT") {
            Some(raw) => parse("PORT", raw)?,
            None => {
                info!("PORT not set, using default: 3000");
                3000
            }
        };

        let raw_url = var("TRACKING_API_URL").ok_or(ConfigError::Missing("TRACKING_API_URL"))?;
        let tracking_api_url: Url = parse("TRACKING_API_URL", raw_url.clone())?;
        if !matches!(tracking_api_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: "TRACKING_API_URL",
                value: raw_url,
                reason: "expected an http(s) url".to_string(),
            });
        }

        let cron_secret = var("CRON_SECRET");
        if cron_secret.is_none() {
            info!("CRON_SECRET not set, trigger endpoints will reject every request");
        }

        let tracking_timeout = var("TRACKING_TIMEOUT_SECS")
            .map(|raw| parse_secs("TRACKING_TIMEOUT_SECS", raw))
            .transpose()?;
        let sweep_interval = var("SWEEP_INTERVAL_SECS")
            .map(|raw| parse_secs("SWEEP_INTERVAL_SECS", raw))
            .transpose()?;

        Ok(Self {
            port,
            cron_secret,
            tracking_api_url,
            tracking_api_key: var("TRACKING_API_KEY"),
            tracking_timeout,
            sweep_interval,
            seed_file: var("SEED_FILE").map(PathBuf::from),
        })
    }
}

fn parse<T: FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
        value: raw,
    })
}

fn parse_secs(key: &'static str, raw: String) -> Result<Duration, ConfigError> {
    let secs: u64 = parse(key, raw.clone())?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: raw,
            reason: "must be at least 1 second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
