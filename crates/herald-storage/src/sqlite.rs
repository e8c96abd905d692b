// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLCipher implementation of the connection provider.
//!
//! Each acquired connection owns one `tokio-rusqlite` background thread;
//! dropping or closing it shuts that thread down and closes the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::OpenFlags;
use secrecy::ExposeSecret;
use tracing::{debug, info};

use herald_config::ConnectionConfig;
use herald_core::{HeraldError, Message};

use crate::provider::{AccessMode, ConnectionProvider, StoreConnection};
use crate::queries;

/// The only driver identifier this provider accepts (case-insensitive).
pub const SQLCIPHER_DRIVER: &str = "SQLCipher";

/// Location of the database file for a descriptor: `<server>/<database>.db`.
pub fn database_path(config: &ConnectionConfig) -> PathBuf {
    let file = if Path::new(&config.database).extension().is_some() {
        config.database.clone()
    } else {
        format!("{}.db", config.database)
    };
    Path::new(&config.server).join(file)
}

fn open_flags(mode: AccessMode) -> OpenFlags {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    match mode {
        AccessMode::Existing => flags,
        AccessMode::CreateIfMissing => flags | OpenFlags::SQLITE_OPEN_CREATE,
    }
}

/// Open `path`, apply the SQLCipher key, and prove the key decrypts the file.
///
/// With [`AccessMode::Existing`] a missing file fails to open instead of
/// being created. The busy timeout matches the connect timeout so concurrent
/// initializers wait for each other instead of failing.
pub(crate) async fn open_keyed(
    path: &Path,
    key: String,
    busy_timeout: Duration,
    mode: AccessMode,
) -> Result<tokio_rusqlite::Connection, HeraldError> {
    let conn = tokio_rusqlite::Connection::open_with_flags(path, open_flags(mode))
        .await
        .map_err(HeraldError::connection)?;

    conn.call(move |conn| -> Result<(), rusqlite::Error> {
        conn.pragma_update(None, "key", &key)?;
        conn.busy_timeout(busy_timeout)?;
        // Fails with "file is not a database" when the key is wrong.
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        Ok(())
    })
    .await
    .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| HeraldError::connection(e))?;

    Ok(conn)
}

/// Opens SQLCipher-encrypted SQLite files named by the connection descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteProvider;

impl SqliteProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ConnectionProvider for SqliteProvider {
    async fn acquire(
        &self,
        config: &ConnectionConfig,
        mode: AccessMode,
    ) -> Result<Box<dyn StoreConnection>, HeraldError> {
        if !config.driver.eq_ignore_ascii_case(SQLCIPHER_DRIVER) {
            return Err(HeraldError::Connection {
                detail: format!(
                    "unsupported driver `{}` (expected {SQLCIPHER_DRIVER})",
                    config.driver
                ),
            });
        }
        if !config.encrypt {
            return Err(HeraldError::Connection {
                detail: "unencrypted connections are not supported".to_string(),
            });
        }

        let path = database_path(config);
        info!(
            server = %config.server,
            database = %config.database,
            user = %config.user,
            "connecting to database"
        );

        let timeout = config.connect_timeout;
        let key = config.password.expose_secret().to_string();
        let conn = tokio::time::timeout(timeout, open_keyed(&path, key, timeout, mode))
            .await
            .map_err(|_| HeraldError::Connection {
                detail: format!("connection timed out after {}s", timeout.as_secs()),
            })??;

        debug!(path = %path.display(), "database connection established");
        Ok(Box::new(SqliteConnection { conn }))
    }
}

/// An open, keyed connection to one database file.
pub struct SqliteConnection {
    conn: tokio_rusqlite::Connection,
}

#[async_trait]
impl StoreConnection for SqliteConnection {
    async fn initialize_schema(&self) -> Result<(), HeraldError> {
        queries::schema::initialize(&self.conn).await
    }

    async fn read_messages(&self) -> Result<Vec<Message>, HeraldError> {
        queries::messages::read_all(&self.conn).await
    }

    async fn ping(&self) -> Result<(), HeraldError> {
        self.conn
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row("SELECT 1", [], |row| row.get(0))
            })
            .await
            .map(|_| ())
            .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| HeraldError::connection(e))
    }

    async fn close(self: Box<Self>) -> Result<(), HeraldError> {
        self.conn.close().await.map_err(HeraldError::connection)
    }
}
