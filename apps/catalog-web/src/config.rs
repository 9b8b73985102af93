//! Configuration for the catalog web server

use domain_catalog::UpstreamConfig;
use std::env;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub upstream: UpstreamConfig,
    /// Directory served as the static site root
    pub static_dir: String,
}

fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    env_or_default(key, default)
        .parse()
        .map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: format!("{e}"),
        })
}

impl Config {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0 (all interfaces)
    /// - PORT: defaults to 8080
    /// - APP_ENV: "production" for JSON logs, anything else is development
    /// - CATALOG_API_URL: base URL of the remote catalog API
    /// - CATALOG_API_TIMEOUT_SECS / CATALOG_UPLOAD_TIMEOUT_SECS: request timeouts
    /// - CATALOG_ACCEPT_INVALID_CERTS: "true" to skip upstream TLS verification
    /// - STATIC_DIR: static site root, defaults to "wwwroot"
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = UpstreamConfig::default();

        let upstream = UpstreamConfig {
            base_url: env_or_default("CATALOG_API_URL", &defaults.base_url),
            timeout_secs: parse_env(
                "CATALOG_API_TIMEOUT_SECS",
                &defaults.timeout_secs.to_string(),
            )?,
            upload_timeout_secs: parse_env(
                "CATALOG_UPLOAD_TIMEOUT_SECS",
                &defaults.upload_timeout_secs.to_string(),
            )?,
            accept_invalid_certs: parse_env("CATALOG_ACCEPT_INVALID_CERTS", "false")?,
        };

        Ok(Self {
            host: env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string()),
            port: parse_env("PORT", "8080")?,
            environment: Environment::from_env(),
            upstream,
            static_dir: env_or_default("STATIC_DIR", "wwwroot"),
        })
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
