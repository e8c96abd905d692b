// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! [`HeraldConfig`] is the hosting configuration loaded once at startup.
//! [`ConnectionConfig`] is the per-request store descriptor built by the
//! resolver from environment variables and never persisted.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Driver identifier used when `DB_DRIVER` is unset.
pub const DEFAULT_DRIVER: &str = "SQLCipher";

/// Connect timeout requested in every descriptor.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Top-level hosting configuration.
///
/// Loaded from TOML files and `HERALD_*` environment variables. Database
/// credentials are deliberately absent: they are resolved per request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HeraldConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7071
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Level for herald crates (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Connection descriptor for the message store.
///
/// `Debug` and `Display` never print the password.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Directory holding the database files.
    pub server: String,
    /// Database name; the file is `<server>/<database>.db`.
    pub database: String,
    pub user: String,
    pub password: SecretString,
    pub driver: String,
    /// Always requested on; the password keys the store encryption.
    pub encrypt: bool,
    /// Always requested off.
    pub trust_server_certificate: bool,
    pub connect_timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(server: String, database: String, user: String, password: SecretString) -> Self {
        Self {
            server,
            database,
            user,
            password,
            driver: DEFAULT_DRIVER.to_string(),
            encrypt: true,
            trust_server_certificate: false,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

impl fmt::Display for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DRIVER={{{}}};SERVER={};DATABASE={};UID={};PWD=[redacted];Encrypt={};TrustServerCertificate={};Connection Timeout={};",
            self.driver,
            self.server,
            self.database,
            self.user,
            yes_no(self.encrypt),
            yes_no(self.trust_server_certificate),
            self.connect_timeout.as_secs(),
        )
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .field("driver", &self.driver)
            .field("encrypt", &self.encrypt)
            .field("trust_server_certificate", &self.trust_server_certificate)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}
