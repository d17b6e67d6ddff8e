//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::nearest::{DEFAULT_CANDIDATE_COUNT, DEFAULT_WALK_WEIGHT, EntryConfig};
use crate::store::HttpStoreConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

/// An environment variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Where records are loaded from.
#[derive(Debug, Clone)]
pub enum StoreSource {
    /// JSON files in a directory.
    Files(PathBuf),
    /// A REST document service.
    Http(HttpStoreConfig),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreSource,
    /// `None` reads the store on every request.
    pub cache: Option<CacheConfig>,
    pub entry: EntryConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Unset and empty variables
    /// take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr: SocketAddr = parse_var(
            "METRO_BIND_ADDR",
            get("METRO_BIND_ADDR"),
            DEFAULT_BIND_ADDR.parse().ok(),
        )?;

        let store = match get("METRO_STORE_URL") {
            Some(url) => {
                let timeout = parse_var(
                    "METRO_STORE_TIMEOUT_SECS",
                    get("METRO_STORE_TIMEOUT_SECS"),
                    Some(DEFAULT_STORE_TIMEOUT_SECS),
                )?;
                let mut config = HttpStoreConfig::new(url).with_timeout(timeout);
                if let Some(key) = get("METRO_STORE_API_KEY") {
                    config = config.with_api_key(key);
                }
                StoreSource::Http(config)
            }
            None => StoreSource::Files(
                get("METRO_DATA_DIR")
                    .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                    .into(),
            ),
        };

        let ttl_secs: u64 = parse_var("METRO_CACHE_TTL_SECS", get("METRO_CACHE_TTL_SECS"), Some(0))?;
        let cache = (ttl_secs > 0)
            .then(|| CacheConfig::default().with_ttl(Duration::from_secs(ttl_secs)));

        let walk_weight: f64 = parse_var(
            "METRO_WALK_WEIGHT",
            get("METRO_WALK_WEIGHT"),
            Some(DEFAULT_WALK_WEIGHT),
        )?;
        if !walk_weight.is_finite() || walk_weight < 0.0 {
            return Err(ConfigError {
                var: "METRO_WALK_WEIGHT",
                value: walk_weight.to_string(),
                reason: "must be a finite, non-negative number".to_string(),
            });
        }

        let candidate_count: usize = parse_var(
            "METRO_ENTRY_CANDIDATES",
            get("METRO_ENTRY_CANDIDATES"),
            Some(DEFAULT_CANDIDATE_COUNT),
        )?;
        if candidate_count == 0 {
            return Err(ConfigError {
                var: "METRO_ENTRY_CANDIDATES",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            store,
            cache,
            entry: EntryConfig::new(walk_weight, candidate_count),
        })
    }
}

fn parse_var<T>(var: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError {
                var,
                reason: e.to_string(),
                value,
            })
        }
        None => default.ok_or_else(|| ConfigError {
            var,
            value: String::new(),
            reason: "no default available".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3001".parse().unwrap());
        assert!(matches!(config.store, StoreSource::Files(ref dir) if dir == &PathBuf::from("data")));
        assert!(config.cache.is_none());
        assert_eq!(config.entry, EntryConfig::default());
    }

    #[test]
    fn http_store_takes_precedence() {
        let config = config(&[
            ("METRO_DATA_DIR", "/srv/metro"),
            ("METRO_STORE_URL", "http://docs.local/api"),
            ("METRO_STORE_API_KEY", "secret"),
            ("METRO_STORE_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        let StoreSource::Http(http) = config.store else {
            panic!("expected HTTP store");
        };
        assert_eq!(http.base_url, "http://docs.local/api");
        assert_eq!(http.api_key.as_deref(), Some("secret"));
        assert_eq!(http.timeout_secs, 5);
    }

    #[test]
    fn cache_and_entry_tuning() {
        let config = config(&[
            ("METRO_CACHE_TTL_SECS", "120"),
            ("METRO_WALK_WEIGHT", "2.5"),
            ("METRO_ENTRY_CANDIDATES", "5"),
        ])
        .unwrap();

        assert_eq!(config.cache.unwrap().ttl, Duration::from_secs(120));
        assert_eq!(config.entry, EntryConfig::new(2.5, 5));
    }

    #[test]
    fn empty_values_use_defaults() {
        let config = config(&[("METRO_BIND_ADDR", ""), ("METRO_WALK_WEIGHT", "  ")]).unwrap();
        assert_eq!(config.bind_addr.port(), 3001);
        assert_eq!(config.entry.walk_weight, 4.0);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = config(&[("METRO_BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert_eq!(err.var, "METRO_BIND_ADDR");

        let err = config(&[("METRO_WALK_WEIGHT", "-1")]).unwrap_err();
        assert_eq!(err.var, "METRO_WALK_WEIGHT");

        let err = config(&[("METRO_ENTRY_CANDIDATES", "0")]).unwrap_err();
        assert_eq!(err.var, "METRO_ENTRY_CANDIDATES");

        let err = config(&[("METRO_CACHE_TTL_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid METRO_CACHE_TTL_SECS=\"soon\""));
    }
}
