use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use err_derive::Error;
use log::*;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "STOREFRONT_";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CheckoutConfig {
    #[serde(default = "CheckoutConfig::default_delay_ms")]
    pub processing_delay_ms: u64,
    #[serde(default)]
    pub failure_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(display = "failure_rate must be within [0, 1]; got {}", _0)]
    InvalidFailureRate(f64),
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    #[serde(default)]
    modules: HashMap<String, LogLevel>,
    #[serde(default)]
    timestamp_nanos: bool,
}

impl CheckoutConfig {
    fn default_delay_ms() -> u64 {
        2000
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err(ConfigError::InvalidFailureRate(self.failure_rate));
        }
        Ok(())
    }

    /// Reads `STOREFRONT_PROCESSING_DELAY_MS` and `STOREFRONT_FAILURE_RATE`,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<CheckoutConfig>()
            .context("read checkout settings from environment")?;
        debug!("Checkout config from env: {:?}", config);
        Ok(config)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            processing_delay_ms: Self::default_delay_ms(),
            failure_rate: 0.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let checkout = CheckoutConfig::from_env()?;
        Ok(Config { checkout })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checkout.validate()
    }
}

/// Reads a TOML file into `T`.
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let buf = fs::read_to_string(path).with_context(|| format!("read {:?}", path))?;
    let val = toml::from_str(&buf).with_context(|| format!("parse {:?}", path))?;
    Ok(val)
}

impl LogLevel {
    fn to_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level.as_ref() {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(&module, level.to_filter());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        b
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Deserialize, Debug)]
    struct File {
        #[serde(flatten)]
        storefront: Config,
        env_logger: EnvLogger,
    }

    #[test]
    fn parses_full_file() {
        let src = r#"
            [checkout]
            processing_delay_ms = 250
            failure_rate = 0.5

            [env_logger]
            level = "info"
            timestamp_nanos = true
            [env_logger.modules]
            storefront = "debug"
        "#;

        let file: File = toml::from_str(src).expect("parse config");

        assert_eq!(file.storefront.checkout.processing_delay_ms, 250);
        assert_eq!(file.storefront.checkout.failure_rate, 0.5);
        assert!(file.env_logger.timestamp_nanos);
        assert_eq!(file.env_logger.modules.len(), 1);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let config: Config = toml::from_str("").expect("parse config");

        assert_eq!(config, Config::default());
        assert_eq!(
            config.checkout.processing_delay(),
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        let config = CheckoutConfig {
            failure_rate: 1.5,
            ..Default::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidFailureRate(1.5))
        );
    }

    #[test]
    fn reads_checkout_settings_from_env_vars() {
        let vars = vec![
            ("STOREFRONT_PROCESSING_DELAY_MS".to_string(), "10".to_string()),
            ("STOREFRONT_FAILURE_RATE".to_string(), "0.25".to_string()),
        ];

        let config: CheckoutConfig = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .expect("from vars");

        assert_eq!(config.processing_delay_ms, 10);
        assert_eq!(config.failure_rate, 0.25);
    }
}
