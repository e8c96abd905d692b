// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `herald init-db`: run the schema initializer once from the command line.

use herald_config::resolver::{ADMIN_API_KEY, DB_PASSWORD};
use herald_config::{VarSource, resolve_connection};
use herald_core::HeraldError;
use herald_security::redact;
use herald_storage::{SqliteProvider, initialize_database};
use tracing::info;

/// Error text with configured credentials removed.
pub fn redacted(err: &HeraldError, vars: &dyn VarSource) -> String {
    let secrets: Vec<String> = [DB_PASSWORD, ADMIN_API_KEY]
        .into_iter()
        .filter_map(|name| vars.var(name))
        .filter(|v| !v.is_empty())
        .collect();
    redact(&err.to_string(), &secrets)
}

pub async fn run_init_db(vars: &dyn VarSource) -> Result<(), HeraldError> {
    let config = resolve_connection(vars)?;
    initialize_database(&SqliteProvider::new(), &config).await?;
    info!(database = %config.database, "database initialized");
    println!("Database initialized successfully");
    Ok(())
}
