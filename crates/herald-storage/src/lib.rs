// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message store for the Herald service.
//!
//! SQLite built against SQLCipher and driven through `tokio-rusqlite`, so
//! every statement runs on the connection's own background thread. Handlers
//! reach the store only through the scoped operations in [`provider`], which
//! acquire one connection per request and always release it.

pub mod provider;
pub mod queries;
pub mod sqlite;

pub use provider::{
    AccessMode, ConnectionProvider, StoreConnection, check_connectivity, initialize_database,
    read_all_messages,
};
pub use queries::schema::SEED_MESSAGES;
pub use sqlite::{SqliteProvider, database_path};
