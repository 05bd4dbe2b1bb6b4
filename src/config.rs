//! Service configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `NOTION_WEBHOOK_SECRET` | unset | HMAC secret; unset or empty disables signature checks |
//! | `NOTION_WEBHOOKS_BIND_ADDR` | `0.0.0.0:8000` | Listen address |
//! | `NOTION_WEBHOOKS_MAX_QUERY_LIMIT` | `1000` | Upper bound for `limit` on `/webhooks/events` |
//!
//! The binary loads a `.env` file (if present) before reading these.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

use crate::webhooks::WebhookSecret;

pub const ENV_WEBHOOK_SECRET: &str = "NOTION_WEBHOOK_SECRET";
pub const ENV_BIND_ADDR: &str = "NOTION_WEBHOOKS_BIND_ADDR";
pub const ENV_MAX_QUERY_LIMIT: &str = "NOTION_WEBHOOKS_MAX_QUERY_LIMIT";

pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000);
pub const DEFAULT_MAX_QUERY_LIMIT: usize = 1000;

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,

    /// `None` disables signature verification.
    pub webhook_secret: Option<WebhookSecret>,

    pub max_query_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR,
            webhook_secret: None,
            max_query_limit: DEFAULT_MAX_QUERY_LIMIT,
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let webhook_secret = lookup(ENV_WEBHOOK_SECRET).and_then(WebhookSecret::new);

        let bind_addr = match lookup(ENV_BIND_ADDR) {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: ENV_BIND_ADDR,
                    reason: e.to_string(),
                    value,
                }
            })?,
            None => DEFAULT_BIND_ADDR,
        };

        let max_query_limit = match lookup(ENV_MAX_QUERY_LIMIT) {
            Some(value) => match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_MAX_QUERY_LIMIT,
                        value,
                        reason: "must be at least 1".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: ENV_MAX_QUERY_LIMIT,
                        reason: e.to_string(),
                        value,
                    });
                }
            },
            None => DEFAULT_MAX_QUERY_LIMIT,
        };

        Ok(Config {
            bind_addr,
            webhook_secret,
            max_query_limit,
        })
    }
}
