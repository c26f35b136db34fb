use std::{collections::HashSet, time::Duration};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_CACHE_PREFIX: &str = "folio";
const DEFAULT_BUNDLE_DISCOUNT_PERCENT: i32 = 20;
const DEFAULT_PURCHASE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 1024;

pub struct Config {
    pub database_url: String,
    /// Absent means VIP status and the purchased-chapter cache live in process memory.
    pub redis_url: Option<String>,
    pub cache_prefix: String,
    pub bind_address: String,

    pub bundle_discount_percent: i32,
    pub purchase_timeout: Duration,
    pub admin_user_ids: HashSet<i64>,
    pub event_channel_capacity: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bundle_discount_percent =
            parse_or("BUNDLE_DISCOUNT_PERCENT", var("BUNDLE_DISCOUNT_PERCENT"), DEFAULT_BUNDLE_DISCOUNT_PERCENT)?;
        if !(0..=100).contains(&bundle_discount_percent) {
            return Err(ConfigError::InvalidEnvVar {
                name: "BUNDLE_DISCOUNT_PERCENT".to_string(),
                reason: format!("{} is outside 0-100", bundle_discount_percent),
            }
            .into());
        }

        let purchase_timeout_secs: u64 =
            parse_or("PURCHASE_TIMEOUT_SECS", var("PURCHASE_TIMEOUT_SECS"), DEFAULT_PURCHASE_TIMEOUT_SECS)?;
        if purchase_timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                name: "PURCHASE_TIMEOUT_SECS".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let admin_user_ids = match var("ADMIN_USER_IDS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| {
                    id.parse::<i64>().map_err(|_| ConfigError::InvalidEnvVar {
                        name: "ADMIN_USER_IDS".to_string(),
                        reason: format!("'{}' is not a user ID", id),
                    })
                })
                .collect::<Result<HashSet<_>, _>>()?,
            None => HashSet::new(),
        };

        Ok(Self {
            database_url: var("DATABASE_URL")
                .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            redis_url: var("REDIS_URL"),
            cache_prefix: var("CACHE_PREFIX").unwrap_or_else(|| DEFAULT_CACHE_PREFIX.to_string()),
            bind_address: var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            bundle_discount_percent,
            purchase_timeout: Duration::from_secs(purchase_timeout_secs),
            admin_user_ids,
            event_channel_capacity: parse_or(
                "EVENT_CHANNEL_CAPACITY",
                var("EVENT_CHANNEL_CAPACITY"),
                DEFAULT_EVENT_CHANNEL_CAPACITY,
            )?,
        })
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn applies_defaults() {
        let config = config(&[("DATABASE_URL", "sqlite::memory:")]).unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert!(config.redis_url.is_none());
        assert_eq!(config.cache_prefix, "folio");
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.bundle_discount_percent, 20);
        assert_eq!(config.purchase_timeout, Duration::from_secs(10));
        assert!(config.admin_user_ids.is_empty());
        assert_eq!(config.event_channel_capacity, 1024);
    }

    #[test]
    fn requires_database_url() {
        assert!(matches!(
            config(&[]),
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DATABASE_URL"
        ));
    }

    #[test]
    fn parses_admin_ids() {
        let config = config(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("ADMIN_USER_IDS", "1, 42,,7"),
        ])
        .unwrap();

        assert_eq!(config.admin_user_ids, [1, 42, 7].into_iter().collect());
    }

    #[test]
    fn rejects_invalid_values() {
        for (name, value) in [
            ("BUNDLE_DISCOUNT_PERCENT", "101"),
            ("BUNDLE_DISCOUNT_PERCENT", "-1"),
            ("BUNDLE_DISCOUNT_PERCENT", "ten"),
            ("PURCHASE_TIMEOUT_SECS", "0"),
            ("ADMIN_USER_IDS", "1,admin"),
            ("EVENT_CHANNEL_CAPACITY", "lots"),
        ] {
            let result = config(&[("DATABASE_URL", "sqlite::memory:"), (name, value)]);
            assert!(
                matches!(result, Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))),
                "accepted {name}={value}"
            );
        }
    }
}
