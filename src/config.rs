//! Host configuration from command-line flags with environment fallbacks.

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
    #[error("{name} must be greater than zero")]
    ZeroTimeout { name: &'static str },
}

#[derive(Debug, Parser)]
#[command(name = "portal", about = "Headless canvas session against a Portal element service")]
pub struct Cli {
    /// Element service root, without the `/api` suffix.
    #[arg(long, env = "PORTAL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Slug of the project to open. The first project is used when absent.
    #[arg(long = "project", env = "PORTAL_PROJECT_SLUG")]
    pub project_slug: Option<String>,

    #[arg(long, env = "PORTAL_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    #[arg(long, env = "PORTAL_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Normalized: no trailing slash.
    pub base_url: String,
    pub project_slug: Option<String>,
    pub timeouts: Timeouts,
}

impl Cli {
    /// Validate the raw flags into a [`PortalConfig`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-HTTP base URL or a zero timeout.
    pub fn into_config(self) -> Result<PortalConfig, ConfigError> {
        let base_url = normalize_base_url(&self.base_url)?;
        let project_slug = self.project_slug.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let timeouts = Timeouts {
            request_secs: nonzero("request timeout", self.request_timeout_secs)?,
            connect_secs: nonzero("connect timeout", self.connect_timeout_secs)?,
        };
        Ok(PortalConfig { base_url, project_slug, timeouts })
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidBaseUrl(raw.to_string()))?;
    if host.is_empty() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

fn nonzero(name: &'static str, value: u64) -> Result<u64, ConfigError> {
    if value == 0 { Err(ConfigError::ZeroTimeout { name }) } else { Ok(value) }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
