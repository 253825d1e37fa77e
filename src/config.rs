use log::{info, warn};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "minilog-development-secret";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub seed_users: usize,
    pub seed_articles: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("MINILOG_JWT_SECRET").unwrap_or_else(|| {
            warn!("MINILOG_JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_owned()
        });

        Ok(Self {
            host: lookup("MINILOG_HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
            port: parse(&lookup, "MINILOG_PORT", 8080)?,
            workers: parse(&lookup, "MINILOG_WORKERS", num_cpus::get())?,
            jwt_secret,
            token_ttl_secs: parse(&lookup, "MINILOG_TOKEN_TTL_SECS", 3600)?,
            bcrypt_cost: parse(&lookup, "MINILOG_BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            seed_users: parse(&lookup, "MINILOG_SEED_USERS", 0)?,
            seed_articles: parse(&lookup, "MINILOG_SEED_ARTICLES", 3)?,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address(), ("127.0.0.1".to_owned(), 8080));
        assert_eq!(config.token_ttl_secs, 3600);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.seed_users, 0);
        assert!(config.workers >= 1);
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_lookup(lookup(&[
            ("MINILOG_HOST", "0.0.0.0"),
            ("MINILOG_PORT", " 9000 "),
            ("MINILOG_WORKERS", "2"),
            ("MINILOG_JWT_SECRET", "s3cret"),
            ("MINILOG_SEED_USERS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), ("0.0.0.0".to_owned(), 9000));
        assert_eq!(config.workers, 2);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.seed_users, 10);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = Config::from_lookup(lookup(&[("MINILOG_PORT", "eighty")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "MINILOG_PORT",
                ..
            }
        ));
    }
}
