// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Herald message service.

use thiserror::Error;

/// The error type shared by every Herald operation.
///
/// Store failures carry a rendered `detail` string rather than the driver
/// error object, so nothing driver-specific crosses the storage boundary.
/// Mapping to HTTP status codes happens in `herald-gateway::response` only.
#[derive(Debug, Error)]
pub enum HeraldError {
    /// One or more required environment variables are unset or empty.
    #[error("DB connection settings missing: {}", missing.join(", "))]
    ConfigIncomplete { missing: Vec<String> },

    /// The caller did not present a valid admin key.
    #[error("Unauthorized")]
    Unauthorized,

    /// The store refused, rejected, or timed out the connection.
    #[error("could not connect to database: {detail}")]
    Connection { detail: String },

    /// The initialization script failed; the transaction was rolled back.
    #[error("database initialization failed: {detail}")]
    SchemaInit { detail: String },

    /// The read query failed.
    #[error("could not retrieve data from database: {detail}")]
    Read { detail: String },

    /// Listener bind or serve failures in the hosting binary.
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl HeraldError {
    pub fn connection(err: impl std::fmt::Display) -> Self {
        Self::Connection {
            detail: err.to_string(),
        }
    }

    pub fn schema_init(err: impl std::fmt::Display) -> Self {
        Self::SchemaInit {
            detail: err.to_string(),
        }
    }

    pub fn read(err: impl std::fmt::Display) -> Self {
        Self::Read {
            detail: err.to_string(),
        }
    }

    /// Whether the failure originated in the data store (connect, init, or read).
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. } | Self::SchemaInit { .. } | Self::Read { .. }
        )
    }
}
