// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Pattern-based**: credential fields inside connection strings
//!    (`PWD=...;`, `password=...`).
//! 2. **Exact-match**: the password and admin key resolved for the request.

use std::sync::LazyLock;

use regex::Regex;

/// Credential assignments as they appear in connection strings and driver errors.
static CREDENTIAL_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(pwd|password|passwd|key)\s*=\s*[^;\s]+").expect("static regex is valid")
});

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Redact credential patterns and the given exact values from `input`.
pub fn redact(input: &str, secret_values: &[String]) -> String {
    let mut result = CREDENTIAL_PATTERNS
        .replace_all(input, |caps: &regex::Captures<'_>| {
            format!("{}={REDACTED}", &caps[1])
        })
        .into_owned();

    // Longest first so a secret that contains another is not partially replaced.
    let mut sorted: Vec<&String> = secret_values.iter().filter(|v| !v.is_empty()).collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted {
        result = result.replace(value.as_str(), REDACTED);
    }

    result
}
