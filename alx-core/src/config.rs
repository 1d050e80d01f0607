// SPDX-License-Identifier: AGPL-3.0-or-later
//! Proxy endpoint configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AlxError, AlxResult};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 39999;
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Where the REST proxy listens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxyConfig {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            scheme: "http".into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            api_prefix: DEFAULT_API_PREFIX.into(),
        }
    }
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn from_toml_str(s: &str) -> AlxResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> AlxResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading proxy config");
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> AlxResult<()> {
        if self.host.trim().is_empty() {
            return Err(AlxError::Config("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(AlxError::Config("port must not be 0".into()));
        }
        if !matches!(self.scheme.as_str(), "http" | "https") {
            return Err(AlxError::Config(format!("unsupported scheme: {}", self.scheme)));
        }
        Ok(())
    }

    /// e.g. `http://localhost:39999/api/v1`
    pub fn base_url(&self) -> String {
        let prefix = self.api_prefix.trim_end_matches('/');
        let prefix = if prefix.is_empty() || prefix.starts_with('/') {
            prefix.to_string()
        } else {
            format!("/{prefix}")
        };
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, prefix)
    }
}
