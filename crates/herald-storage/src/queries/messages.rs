// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message read operations.

use herald_core::{HeraldError, Message};

// `created_at` may be stored with either a space or a `T` between date and
// time. Sorting the raw text would put every `T` row first on a given day.
const SELECT_ALL: &str = "SELECT id, message, created_at FROM messages_table
     ORDER BY replace(created_at, 'T', ' ') DESC, id DESC";

/// Get every message, most recent first. An empty table yields an empty vec.
pub async fn read_all(conn: &tokio_rusqlite::Connection) -> Result<Vec<Message>, HeraldError> {
    let messages = conn
        .call(|conn| -> Result<Vec<Message>, rusqlite::Error> {
            let mut stmt = conn.prepare(SELECT_ALL)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Message {
                        id: row.get(0)?,
                        message: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
        .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| HeraldError::read(e))?;

    tracing::info!(count = messages.len(), "retrieved rows from messages_table");
    Ok(messages)
}
