// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret handling for the Herald message service.
//!
//! Everything that leaves the process as text (log lines, HTTP error
//! bodies) passes through [`redact`] first.

pub mod redact;

pub use redact::{REDACTED, redact};
