// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Herald integration tests.
//!
//! # Components
//!
//! - [`MockConnectionProvider`] - In-memory provider with call counting and failure injection
//! - [`TestDatabase`] - Temp-dir SQLCipher database with fixture helpers

pub mod harness;
pub mod mock_provider;

pub use harness::{TEST_ADMIN_KEY, TEST_PASSWORD, TestDatabase};
pub use mock_provider::{CallCounts, Failure, MockConnectionProvider, message};
