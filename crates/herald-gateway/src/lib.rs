// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Herald message service.
//!
//! Exposes `/getdata` (public read with CORS), `/init-db` (admin-key
//! protected schema setup), `/db-status`, and `/health` over axum.

pub mod auth;
pub mod handlers;
pub mod response;
pub mod server;

pub use auth::{AuthOutcome, authenticate};
pub use server::{GatewayState, router, start_server};
