// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection provider seam and scoped store operations.
//!
//! A [`ConnectionProvider`] hands out one [`StoreConnection`] per request.
//! The scoped functions below are the only way handlers touch the store:
//! each acquires, runs exactly one operation, and closes the connection
//! exactly once whatever the outcome.

use async_trait::async_trait;
use tracing::{debug, warn};

use herald_config::ConnectionConfig;
use herald_core::{HeraldError, Message};

/// A single open connection to the message store.
#[async_trait]
pub trait StoreConnection: Send + Sync {
    /// Ensure `messages_table` and both seed rows exist, in one transaction.
    async fn initialize_schema(&self) -> Result<(), HeraldError>;

    /// All rows, most recent `created_at` first.
    async fn read_messages(&self) -> Result<Vec<Message>, HeraldError>;

    /// Round-trip a trivial statement.
    async fn ping(&self) -> Result<(), HeraldError>;

    /// Release the connection.
    async fn close(self: Box<Self>) -> Result<(), HeraldError>;
}

/// Whether `acquire` may bring a store into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// The store must already exist; a missing one is a connection error.
    Existing,
    /// Create an empty store when none exists. Only schema setup uses this.
    CreateIfMissing,
}

/// Opens connections from a per-request descriptor. No pooling.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    async fn acquire(
        &self,
        config: &ConnectionConfig,
        mode: AccessMode,
    ) -> Result<Box<dyn StoreConnection>, HeraldError>;
}

/// Close the connection; a close failure is logged and never masks the
/// operation's own result.
async fn release(conn: Box<dyn StoreConnection>) {
    match conn.close().await {
        Ok(()) => debug!("database connection closed"),
        Err(e) => warn!(error = %e, "closing database connection failed"),
    }
}

/// Acquire, run the schema initializer, release.
pub async fn initialize_database(
    provider: &dyn ConnectionProvider,
    config: &ConnectionConfig,
) -> Result<(), HeraldError> {
    let conn = provider
        .acquire(config, AccessMode::CreateIfMissing)
        .await?;
    let result = conn.initialize_schema().await;
    release(conn).await;
    result
}

/// Acquire, read every message, release.
pub async fn read_all_messages(
    provider: &dyn ConnectionProvider,
    config: &ConnectionConfig,
) -> Result<Vec<Message>, HeraldError> {
    let conn = provider.acquire(config, AccessMode::Existing).await?;
    let result = conn.read_messages().await;
    release(conn).await;
    result
}

/// Acquire, ping, release.
pub async fn check_connectivity(
    provider: &dyn ConnectionProvider,
    config: &ConnectionConfig,
) -> Result<(), HeraldError> {
    let conn = provider.acquire(config, AccessMode::Existing).await?;
    let result = conn.ping().await;
    release(conn).await;
    result
}
