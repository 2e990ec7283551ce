//! Client settings: defaults overridden by `BLOG_*` environment variables.

use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::cache::QueryConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:3000/";
const DEFAULT_STALE_TIME_SECS: u64 = 60;
const DEFAULT_CACHE_TIME_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Root that every API path is resolved against.
    pub base_url: String,
    /// How long a cached read is served without refetching.
    pub stale_time_secs: u64,
    /// How long an entry is retained before garbage collection.
    pub cache_time_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stale_time_secs: DEFAULT_STALE_TIME_SECS,
            cache_time_secs: DEFAULT_CACHE_TIME_SECS,
        }
    }
}

impl ClientConfig {
    /// Load from `BLOG_BASE_URL`, `BLOG_STALE_TIME_SECS` and `BLOG_CACHE_TIME_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix("BLOG").try_parsing(true))
    }

    fn from_source(source: Environment) -> Result<Self, ConfigError> {
        Config::builder().add_source(source).build()?.try_deserialize()
    }

    pub fn query_config(&self) -> QueryConfig {
        QueryConfig::new(
            Duration::from_secs(self.stale_time_secs),
            Duration::from_secs(self.cache_time_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("BLOG")
            .try_parsing(true)
            .source(Some(map))
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let config = ClientConfig::from_source(env(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.query_config().stale_time, Duration::from_secs(60));
        assert_eq!(config.query_config().cache_time, Duration::from_secs(300));
    }

    #[test]
    fn environment_overrides_fields() {
        let config = ClientConfig::from_source(env(&[
            ("BLOG_BASE_URL", "https://dummyjson.com/"),
            ("BLOG_STALE_TIME_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://dummyjson.com/");
        assert_eq!(config.stale_time_secs, 5);
        assert_eq!(config.cache_time_secs, DEFAULT_CACHE_TIME_SECS);
    }
}
