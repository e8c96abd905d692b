// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Admin key check for the init endpoint.
//!
//! The comparison is constant-time so response timing does not reveal how
//! much of a guessed key matched. Neither key is ever logged.

use subtle::ConstantTimeEq;

/// Result of checking a caller-supplied admin key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Authorized,
    Unauthorized,
}

impl AuthOutcome {
    pub fn is_authorized(self) -> bool {
        self == Self::Authorized
    }
}

/// Exact, case- and whitespace-sensitive match of `provided` against `expected`.
///
/// Unauthorized when either side is absent or empty.
pub fn authenticate(provided: Option<&str>, expected: Option<&str>) -> AuthOutcome {
    let (Some(provided), Some(expected)) = (provided, expected) else {
        return AuthOutcome::Unauthorized;
    };
    if provided.is_empty() || expected.is_empty() {
        return AuthOutcome::Unauthorized;
    }

    // Slices of different length compare unequal without an early exit.
    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        AuthOutcome::Authorized
    } else {
        AuthOutcome::Unauthorized
    }
}
