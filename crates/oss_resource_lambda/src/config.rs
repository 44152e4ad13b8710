//! Environment-driven configuration, read once per cold start.

use oss_resource_core::contract::DEFAULT_CALLBACK_DELAY_SECONDS;
use thiserror::Error;

pub const ENDPOINT_URL_VAR: &str = "OSS_ENDPOINT_URL";
pub const CALLBACK_DELAY_VAR: &str = "OSS_CALLBACK_DELAY_SECONDS";
pub const SDK_MAX_ATTEMPTS_VAR: &str = "OSS_SDK_MAX_ATTEMPTS";
pub const LIST_PAGE_SIZE_VAR: &str = "OSS_LIST_PAGE_SIZE";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub endpoint_url: Option<String>,
    pub callback_delay_seconds: u32,
    pub sdk_max_attempts: Option<u32>,
    pub list_page_size: Option<i32>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            callback_delay_seconds: DEFAULT_CALLBACK_DELAY_SECONDS,
            sdk_max_attempts: None,
            list_page_size: None,
        }
    }
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let callback_delay_seconds = match read(CALLBACK_DELAY_VAR) {
            Some(value) => parse_number(CALLBACK_DELAY_VAR, &value)?,
            None => DEFAULT_CALLBACK_DELAY_SECONDS,
        };

        let sdk_max_attempts = read(SDK_MAX_ATTEMPTS_VAR)
            .map(|value| parse_positive(SDK_MAX_ATTEMPTS_VAR, &value))
            .transpose()?;

        let list_page_size = read(LIST_PAGE_SIZE_VAR)
            .map(|value| parse_positive(LIST_PAGE_SIZE_VAR, &value))
            .transpose()?;

        Ok(Self {
            endpoint_url: read(ENDPOINT_URL_VAR),
            callback_delay_seconds,
            sdk_max_attempts,
            list_page_size,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn parse_positive<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let parsed: T = parse_number(name, value)?;
    if parsed <= T::default() {
        return Err(ConfigError::Zero { name });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = HandlerConfig::from_lookup(lookup(&[])).expect("config should load");
        assert_eq!(config, HandlerConfig::default());
        assert_eq!(config.callback_delay_seconds, DEFAULT_CALLBACK_DELAY_SECONDS);
    }

    #[test]
    fn reads_every_variable() {
        let config = HandlerConfig::from_lookup(lookup(&[
            (ENDPOINT_URL_VAR, "http://localhost:4566"),
            (CALLBACK_DELAY_VAR, "5"),
            (SDK_MAX_ATTEMPTS_VAR, "1"),
            (LIST_PAGE_SIZE_VAR, "50"),
        ]))
        .expect("config should load");

        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.callback_delay_seconds, 5);
        assert_eq!(config.sdk_max_attempts, Some(1));
        assert_eq!(config.list_page_size, Some(50));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = HandlerConfig::from_lookup(lookup(&[
            (ENDPOINT_URL_VAR, "  "),
            (CALLBACK_DELAY_VAR, ""),
        ]))
        .expect("config should load");

        assert!(config.endpoint_url.is_none());
        assert_eq!(config.callback_delay_seconds, DEFAULT_CALLBACK_DELAY_SECONDS);
    }

    #[test]
    fn rejects_malformed_numbers() {
        let error = HandlerConfig::from_lookup(lookup(&[(CALLBACK_DELAY_VAR, "soon")]))
            .expect_err("config should fail");
        assert_eq!(
            error,
            ConfigError::InvalidNumber {
                name: CALLBACK_DELAY_VAR,
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn rejects_zero_page_size() {
        let error = HandlerConfig::from_lookup(lookup(&[(LIST_PAGE_SIZE_VAR, "0")]))
            .expect_err("config should fail");
        assert_eq!(error, ConfigError::Zero { name: LIST_PAGE_SIZE_VAR });
    }
}
