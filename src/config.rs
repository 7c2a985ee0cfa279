// src/config.rs

use std::env;
use std::net::SocketAddr;

use anyhow::Context;

pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Fill the store with demo employees and metrics at startup.
    pub seed_sample_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            seed_sample_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };
        let seed_sample_data = match lookup("SEED_SAMPLE_DATA") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("SEED_SAMPLE_DATA must be true/false, got {raw:?}"))?,
            None => defaults.seed_sample_data,
        };

        Ok(Self { host, port, seed_sample_data })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
