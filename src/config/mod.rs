//! Environment-backed configuration.
//!
//! Server settings have defaults and are overridden with `RERANK_*` variables.
//! Workers AI credentials come from the standard `CLOUDFLARE_*` variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::constants::{DEFAULT_API_BASE, DEFAULT_PORT, DEFAULT_RERANK_MODEL};
use crate::reranker::WorkersAiConfig;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults, then
/// [`Config::validate`] before building the backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Cloudflare account that owns the Workers AI model.
    pub account_id: Option<String>,

    /// API token with Workers AI read access.
    pub api_token: Option<String>,

    /// Workers AI model identifier. Default: `@cf/baai/bge-reranker-base`.
    pub model: String,

    /// Cloudflare REST API root. Default: `https://api.cloudflare.com/client/v4`.
    pub api_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            account_id: None,
            api_token: None,
            model: DEFAULT_RERANK_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "RERANK_PORT";
    const ENV_BIND_ADDR: &'static str = "RERANK_BIND_ADDR";
    const ENV_ACCOUNT_ID: &'static str = "CLOUDFLARE_ACCOUNT_ID";
    const ENV_API_TOKEN: &'static str = "CLOUDFLARE_API_TOKEN";
    const ENV_MODEL: &'static str = "RERANK_MODEL";
    const ENV_API_BASE: &'static str = "RERANK_API_BASE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let account_id = Self::parse_optional_string_from_env(Self::ENV_ACCOUNT_ID);
        let api_token = Self::parse_optional_string_from_env(Self::ENV_API_TOKEN);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let api_base = Self::parse_string_from_env(Self::ENV_API_BASE, defaults.api_base);

        Ok(Self {
            port,
            bind_addr,
            account_id,
            api_token,
            model,
            api_base,
        })
    }

    /// Checks that the backend can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account_id.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_ACCOUNT_ID,
            });
        }

        if self.api_token.is_none() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_API_TOKEN,
            });
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MODEL,
                reason: "model cannot be empty".to_string(),
            });
        }

        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_API_BASE,
                reason: format!("expected an http(s) URL, got '{}'", self.api_base),
            });
        }

        Ok(())
    }

    /// Address to bind the listener to. IPv6 addresses display bracketed.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Builds the Workers AI backend settings.
    pub fn workers_ai_config(&self) -> Result<WorkersAiConfig, ConfigError> {
        let account_id = self
            .account_id
            .clone()
            .ok_or(ConfigError::MissingEnvVar {
                name: Self::ENV_ACCOUNT_ID,
            })?;
        let api_token = self.api_token.clone().ok_or(ConfigError::MissingEnvVar {
            name: Self::ENV_API_TOKEN,
        })?;

        Ok(WorkersAiConfig::new(account_id, api_token)
            .with_model(self.model.clone())
            .with_api_base(self.api_base.clone()))
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }
}
