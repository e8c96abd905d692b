// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway API.
//!
//! Every handler re-reads `DB_*` settings through the state's [`VarSource`]
//! and opens at most one store connection.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderValue, header::ORIGIN},
    response::Response,
};
use secrecy::ExposeSecret;
use serde::Deserialize;

use herald_config::resolver::{ADMIN_API_KEY, DB_PASSWORD};
use herald_config::{VarSource, admin_key, resolve_connection};
use herald_storage::{check_connectivity, initialize_database, read_all_messages};

use crate::auth::authenticate;
use crate::response;
use crate::server::GatewayState;

/// Query string of `/init-db`.
#[derive(Debug, Default, Deserialize)]
pub struct InitQuery {
    pub key: Option<String>,
}

/// Exact secret values to scrub from anything sent back to a caller.
fn secret_values(vars: &dyn VarSource) -> Vec<String> {
    [DB_PASSWORD, ADMIN_API_KEY]
        .into_iter()
        .filter_map(|name| vars.var(name))
        .filter(|v| !v.is_empty())
        .collect()
}

fn origin(headers: &HeaderMap) -> Option<&HeaderValue> {
    headers.get(ORIGIN)
}

/// GET /getdata
pub async fn get_data(State(state): State<GatewayState>, headers: HeaderMap) -> Response {
    let origin = origin(&headers);
    let vars = state.vars.as_ref();

    let config = match resolve_connection(vars) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "getdata: configuration incomplete");
            return response::with_cors(response::error(&e, &[]), origin);
        }
    };

    match read_all_messages(state.provider.as_ref(), &config).await {
        Ok(messages) => {
            tracing::debug!(count = messages.len(), "getdata: returning messages");
            response::with_cors(response::messages(&messages), origin)
        }
        Err(e) => {
            let secrets = secret_values(vars);
            tracing::error!(
                error = %response::sanitized_detail(&e, &secrets),
                "getdata: read failed"
            );
            response::with_cors(response::error(&e, &secrets), origin)
        }
    }
}

/// OPTIONS /getdata
pub async fn preflight(headers: HeaderMap) -> Response {
    response::preflight(origin(&headers))
}

/// GET|POST /init-db?key=...
///
/// The key is checked before any database setting is read, so an
/// unauthorized caller learns nothing about the configuration. A query
/// string that does not parse (e.g. `key` given twice) carries no key.
pub async fn init_db(
    State(state): State<GatewayState>,
    query: Result<Query<InitQuery>, QueryRejection>,
) -> Response {
    let vars = state.vars.as_ref();
    let query = query.map(|Query(q)| q).unwrap_or_default();

    let expected = admin_key(vars);
    let outcome = authenticate(
        query.key.as_deref(),
        expected.as_ref().map(|k| k.expose_secret()),
    );
    if !outcome.is_authorized() {
        tracing::warn!(
            key_supplied = query.key.is_some(),
            "init-db: rejected unauthorized request"
        );
        return response::unauthorized();
    }

    let config = match resolve_connection(vars) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "init-db: configuration incomplete");
            return response::error(&e, &[]);
        }
    };

    match initialize_database(state.provider.as_ref(), &config).await {
        Ok(()) => {
            tracing::info!(database = %config.database, "init-db: schema ready");
            response::initialized()
        }
        Err(e) => {
            let secrets = secret_values(vars);
            tracing::error!(
                error = %response::sanitized_detail(&e, &secrets),
                "init-db: initialization failed"
            );
            response::error(&e, &secrets)
        }
    }
}

/// GET /db-status
pub async fn db_status(State(state): State<GatewayState>) -> Response {
    let vars = state.vars.as_ref();
    let secrets = secret_values(vars);

    let result = match resolve_connection(vars) {
        Ok(config) => check_connectivity(state.provider.as_ref(), &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => response::db_status_ok(),
        Err(e) => {
            tracing::warn!(
                error = %response::sanitized_detail(&e, &secrets),
                "db-status: probe failed"
            );
            response::db_status_failed(&e, &secrets)
        }
    }
}

/// GET /health
pub async fn health() -> Response {
    response::health()
}
