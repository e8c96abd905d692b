// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Herald message service.
//!
//! Holds the error taxonomy and the `Message` entity shared by the storage,
//! gateway, and binary crates.

pub mod error;
pub mod types;

pub use error::HeraldError;
pub use types::{Message, format_iso8601};
