// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `herald serve` implementation.

use std::sync::Arc;

use herald_config::{HeraldConfig, ProcessEnv, resolve_connection};
use herald_core::HeraldError;
use herald_gateway::{GatewayState, start_server};
use herald_storage::{SqliteProvider, check_connectivity};
use tracing::{info, warn};

use crate::init::redacted;

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("herald={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// Probe the store once so operators see a bad setup in the startup log.
/// Never fatal: settings are re-read on every request.
async fn startup_probe(provider: &SqliteProvider) {
    let result = match resolve_connection(&ProcessEnv) {
        Ok(config) => check_connectivity(provider, &config).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => info!("database reachable"),
        Err(e) => warn!(error = %redacted(&e, &ProcessEnv), "database not reachable at startup"),
    }
}

pub async fn run_serve(config: HeraldConfig) -> Result<(), HeraldError> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.server.socket_addr(),
        "starting herald"
    );

    let provider = SqliteProvider::new();
    startup_probe(&provider).await;

    let state = GatewayState::new(Arc::new(provider), Arc::new(ProcessEnv));
    start_server(&config.server, state).await
}
