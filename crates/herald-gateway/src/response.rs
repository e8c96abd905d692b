// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps handler outcomes to HTTP responses.
//!
//! This is the only place a [`HeraldError`] becomes a status code. Store
//! error details are redacted here before they reach the caller.

use axum::{
    Json,
    http::{
        HeaderValue, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, VARY,
        },
    },
    response::{IntoResponse, Response},
};
use serde::Serialize;

use herald_core::{HeraldError, Message};
use herald_security::redact;

/// Header carrying the hosting platform's function key; allowed in preflight.
pub const FUNCTIONS_KEY_HEADER: &str = "x-functions-key";

/// How long browsers may cache a preflight answer, in seconds.
pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86_400;

pub const INIT_SUCCESS_BODY: &str = "Database initialized successfully";
pub const UNAUTHORIZED_BODY: &str = "Unauthorized";

/// Body of `GET /db-status`.
#[derive(Debug, Serialize)]
pub struct DbStatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response()
}

/// Text rendering of an error with credentials removed.
pub fn sanitized_detail(err: &HeraldError, secrets: &[String]) -> String {
    redact(&err.to_string(), secrets)
}

/// Plain-text error response.
///
/// `secrets` are the exact values (password, admin key) resolved for this
/// request; they are scrubbed from the body along with credential patterns.
pub fn error(err: &HeraldError, secrets: &[String]) -> Response {
    match err {
        HeraldError::Unauthorized => unauthorized(),
        err if err.is_store_failure() => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {}", sanitized_detail(err, secrets)),
        )
            .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

pub fn initialized() -> Response {
    (StatusCode::OK, INIT_SUCCESS_BODY).into_response()
}

/// 200 with a JSON array; `Json` sets `Content-Type: application/json`.
pub fn messages(messages: &[Message]) -> Response {
    (StatusCode::OK, Json(messages)).into_response()
}

pub fn db_status_ok() -> Response {
    (
        StatusCode::OK,
        Json(DbStatusResponse {
            status: "DB connected successfully",
            error: None,
        }),
    )
        .into_response()
}

pub fn db_status_failed(err: &HeraldError, secrets: &[String]) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(DbStatusResponse {
            status: "DB connection failed",
            error: Some(sanitized_detail(err, secrets)),
        }),
    )
        .into_response()
}

pub fn health() -> Response {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
    .into_response()
}

/// 204 answer to a CORS preflight, echoing the request's `Origin`.
pub fn preflight(origin: Option<&HeaderValue>) -> Response {
    let mut response = with_cors(StatusCode::NO_CONTENT.into_response(), origin);
    let headers = response.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, x-functions-key"),
    );
    headers.insert(
        ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from(PREFLIGHT_MAX_AGE_SECS),
    );
    response
}

/// Echo `origin` (when present) so browsers accept the response.
pub fn with_cors(mut response: Response, origin: Option<&HeaderValue>) -> Response {
    if let Some(origin) = origin {
        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
        headers.insert(VARY, HeaderValue::from_static("Origin"));
    }
    response
}
