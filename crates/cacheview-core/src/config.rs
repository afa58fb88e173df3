use crate::{CacheViewError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenterConfig {
    /// How long a status message stays before the container is cleared
    pub status_clear_after_ms: u64,
    /// Sent when the `param` input is empty
    pub default_param: String,
    /// Requested when the `user-id` input is empty
    pub default_user_id: u64,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            status_clear_after_ms: 3000,
            default_param: "default".to_string(),
            default_user_id: 1,
        }
    }
}

impl PresenterConfig {
    pub fn status_clear_after(&self) -> Duration {
        Duration::from_millis(self.status_clear_after_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: String,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            static_dir: "./dist".to_string(),
            cache: CacheConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub operation_ttl_secs: u64,
    pub user_ttl_secs: u64,
    /// Simulated cost of computing an operation on a cache miss
    pub operation_delay_ms: u64,
    /// Simulated cost of a database lookup on a cache miss
    pub user_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            operation_ttl_secs: 60,
            user_ttl_secs: 45,
            operation_delay_ms: 3000,
            user_delay_ms: 2000,
        }
    }
}

impl CacheConfig {
    pub fn operation_ttl(&self) -> Duration {
        Duration::from_secs(self.operation_ttl_secs)
    }

    pub fn user_ttl(&self) -> Duration {
        Duration::from_secs(self.user_ttl_secs)
    }

    pub fn operation_delay(&self) -> Duration {
        Duration::from_millis(self.operation_delay_ms)
    }

    pub fn user_delay(&self) -> Duration {
        Duration::from_millis(self.user_delay_ms)
    }
}

impl ServerConfig {
    /// Build from process environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let cache = defaults.cache.clone();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
            cache: CacheConfig {
                operation_ttl_secs: parse_var(&lookup, "OPERATION_TTL_SECS", cache.operation_ttl_secs)?,
                user_ttl_secs: parse_var(&lookup, "USER_TTL_SECS", cache.user_ttl_secs)?,
                operation_delay_ms: parse_var(&lookup, "OPERATION_DELAY_MS", cache.operation_delay_ms)?,
                user_delay_ms: parse_var(&lookup, "USER_DELAY_MS", cache.user_delay_ms)?,
            },
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    raw.trim()
        .parse()
        .map_err(|_| CacheViewError::Config(format!("{key} has an invalid value: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:5000");
        assert_eq!(config.static_dir, "./dist");
        assert_eq!(config.cache.operation_ttl(), Duration::from_secs(60));
        assert_eq!(config.cache.user_ttl(), Duration::from_secs(45));
        assert_eq!(config.cache.operation_delay(), Duration::from_millis(3000));
        assert_eq!(config.cache.user_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("USER_DELAY_MS", "0"),
            ("STATIC_DIR", "/srv/www"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache.user_delay_ms, 0);
        assert_eq!(config.static_dir, "/srv/www");
    }

    #[test]
    fn test_invalid_number_is_config_error() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, CacheViewError::Config(msg) if msg.contains("PORT")));
    }

    #[test]
    fn test_presenter_defaults() {
        let config = PresenterConfig::default();
        assert_eq!(config.status_clear_after(), Duration::from_millis(3000));
        assert_eq!(config.default_param, "default");
        assert_eq!(config.default_user_id, 1);
    }
}
