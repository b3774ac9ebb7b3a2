// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Runtime configuration for the gRPC server

use dotauth_core::PermissionVocabulary;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "DOTAUTH_BIND_ADDR";
pub const REFLECTION_VAR: &str = "DOTAUTH_ENABLE_REFLECTION";
pub const PERMISSIONS_VAR: &str = "DOTAUTH_PERMISSIONS";
pub const LOG_VAR: &str = "DOTAUTH_LOG";
pub const LOG_FORMAT_VAR: &str = "DOTAUTH_LOG_FORMAT";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 50051);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue { var: &'static str, value: String, reason: String },
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}', expected 'text' or 'json'", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => f.write_str("text"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_address: SocketAddr,
    pub enable_reflection: bool,
    /// Permission names the API accepts
    pub vocabulary: PermissionVocabulary,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDR,
            enable_reflection: true,
            vocabulary: PermissionVocabulary::default(),
            log_filter: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(BIND_ADDR_VAR) {
            config.bind_address = parse_var(BIND_ADDR_VAR, value)?;
        }

        if let Some(value) = lookup(REFLECTION_VAR) {
            config.enable_reflection = parse_var(REFLECTION_VAR, value)?;
        }

        if let Some(value) = lookup(PERMISSIONS_VAR) {
            config.vocabulary = parse_var(PERMISSIONS_VAR, value)?;
        }

        if let Some(value) = lookup(LOG_VAR) {
            config.log_filter = value;
        }

        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            config.log_format = parse_var(LOG_FORMAT_VAR, value)?;
        }

        Ok(config)
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|err| ConfigError::InvalidValue {
        var,
        reason: err.to_string(),
        value,
    })
}
