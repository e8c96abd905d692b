// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Idempotent schema and seed initialization.

use rusqlite::{TransactionBehavior, params};
use tracing::info;

use herald_core::HeraldError;

/// Seed rows, inserted at most once each, in this order.
pub const SEED_MESSAGES: [&str; 2] = [
    "Hello from Azure SQL Database!",
    "This data is served by Azure Function!",
];

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS messages_table (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT NOT NULL CHECK (length(message) <= 255),
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
)";

const INSERT_SEED: &str = "INSERT INTO messages_table (message)
     SELECT ?1 WHERE NOT EXISTS (SELECT 1 FROM messages_table WHERE message = ?1)";

/// Create `messages_table` if absent and insert each missing seed row.
///
/// Runs in one IMMEDIATE transaction: the write lock is taken up front, so
/// concurrent initializers queue on the busy timeout and each sees the
/// previous one's committed state. Any error rolls everything back.
pub async fn initialize(conn: &tokio_rusqlite::Connection) -> Result<(), HeraldError> {
    let inserted = conn
        .call(|conn| -> Result<usize, rusqlite::Error> {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            tx.execute_batch(CREATE_TABLE)?;
            let mut inserted = 0;
            for seed in SEED_MESSAGES {
                inserted += tx.execute(INSERT_SEED, params![seed])?;
            }
            tx.commit()?;
            Ok(inserted)
        })
        .await
        .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| HeraldError::schema_init(e))?;

    info!(seed_rows_inserted = inserted, "messages_table initialized");
    Ok(())
}
