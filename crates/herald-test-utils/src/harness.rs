// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Throwaway encrypted database for integration tests.
//!
//! `TestDatabase` owns a temp directory and knows the settings that point a
//! `SqliteProvider` at it. Fixture rows are written through a plain
//! synchronous `rusqlite` connection so tests control `created_at` exactly.

use std::collections::HashMap;
use std::path::PathBuf;

use rusqlite::params;
use secrecy::SecretString;
use tempfile::TempDir;

use herald_config::ConnectionConfig;
use herald_config::resolver::{ADMIN_API_KEY, DB_NAME, DB_PASSWORD, DB_SERVER, DB_USER};
use herald_storage::database_path;

pub const TEST_DATABASE: &str = "herald_test";
pub const TEST_USER: &str = "herald_app";
pub const TEST_PASSWORD: &str = "test-db-passphrase";
pub const TEST_ADMIN_KEY: &str = "test-admin-key";

/// A temp directory holding one SQLCipher database file.
pub struct TestDatabase {
    dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    /// Descriptor that opens this database.
    pub fn config(&self) -> ConnectionConfig {
        ConnectionConfig::new(
            self.dir.path().to_string_lossy().into_owned(),
            TEST_DATABASE.to_string(),
            TEST_USER.to_string(),
            SecretString::from(TEST_PASSWORD.to_string()),
        )
    }

    /// Complete `DB_*` and `ADMIN_API_KEY` variables for this database.
    pub fn vars(&self) -> HashMap<String, String> {
        [
            (DB_SERVER, self.dir.path().to_string_lossy().into_owned()),
            (DB_NAME, TEST_DATABASE.to_string()),
            (DB_USER, TEST_USER.to_string()),
            (DB_PASSWORD, TEST_PASSWORD.to_string()),
            (ADMIN_API_KEY, TEST_ADMIN_KEY.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }

    pub fn path(&self) -> PathBuf {
        database_path(&self.config())
    }

    fn open(&self) -> rusqlite::Result<rusqlite::Connection> {
        let conn = rusqlite::Connection::open(self.path())?;
        conn.pragma_update(None, "key", TEST_PASSWORD)?;
        Ok(conn)
    }

    /// Insert a row with an explicit `created_at` (`YYYY-MM-DD HH:MM:SS[.fff]`).
    ///
    /// The table must already exist.
    pub fn insert_at(&self, message: &str, created_at: &str) -> rusqlite::Result<i64> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO messages_table (message, created_at) VALUES (?1, ?2)",
            params![message, created_at],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Number of rows in `messages_table`.
    pub fn count(&self) -> rusqlite::Result<i64> {
        self.open()?
            .query_row("SELECT count(*) FROM messages_table", [], |row| row.get(0))
    }

    /// Delete every row whose text equals `message`.
    pub fn delete_message(&self, message: &str) -> rusqlite::Result<usize> {
        self.open()?.execute(
            "DELETE FROM messages_table WHERE message = ?1",
            params![message],
        )
    }
}
