// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL operations against `messages_table`.

pub mod messages;
pub mod schema;
