// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Herald workspace.

use chrono::{NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// A row of `messages_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Store-assigned surrogate key.
    pub id: i64,
    /// Message text.
    pub message: String,
    /// Insert time as stored, serialized as ISO-8601.
    #[serde(serialize_with = "serialize_iso8601")]
    pub created_at: NaiveDateTime,
}

/// Format a timestamp as `YYYY-MM-DDTHH:MM:SS[.ffffff]` without dropping precision.
///
/// Whole seconds carry no fraction. Sub-second values use six digits unless
/// the stored value has sub-microsecond precision, in which case nine.
pub fn format_iso8601(ts: &NaiveDateTime) -> String {
    let nanos = ts.nanosecond() % 1_000_000_000;
    let pattern = if nanos == 0 {
        "%Y-%m-%dT%H:%M:%S"
    } else if nanos % 1_000 == 0 {
        "%Y-%m-%dT%H:%M:%S%.6f"
    } else {
        "%Y-%m-%dT%H:%M:%S%.9f"
    };
    ts.format(pattern).to_string()
}

fn serialize_iso8601<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso8601(ts))
}
