// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-request resolution of database and admin settings.
//!
//! Handlers call [`resolve_connection`] and [`admin_key`] on every request
//! through a [`VarSource`], so an operator fixing the environment takes
//! effect without a restart and tests never touch the process environment.

use std::collections::HashMap;

use herald_core::HeraldError;
use secrecy::SecretString;

use crate::model::ConnectionConfig;

pub const DB_SERVER: &str = "DB_SERVER";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_DRIVER: &str = "DB_DRIVER";
pub const ADMIN_API_KEY: &str = "ADMIN_API_KEY";

/// Required variables, in the order they are reported when missing.
pub const REQUIRED_VARS: [&str; 4] = [DB_SERVER, DB_NAME, DB_USER, DB_PASSWORD];

/// A source of named string variables.
pub trait VarSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the live process environment at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VarSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl VarSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Unset, empty, and whitespace-only values all count as absent.
fn present(source: &dyn VarSource, name: &str) -> Option<String> {
    source.var(name).filter(|v| !v.trim().is_empty())
}

/// Build a [`ConnectionConfig`] or report every missing required variable.
pub fn resolve_connection(source: &dyn VarSource) -> Result<ConnectionConfig, HeraldError> {
    let mut missing = Vec::new();
    let mut require = |name: &str| {
        let value = present(source, name);
        if value.is_none() {
            missing.push(name.to_string());
        }
        value.unwrap_or_default()
    };
    let server = require(DB_SERVER);
    let database = require(DB_NAME);
    let user = require(DB_USER);
    let password = require(DB_PASSWORD);

    if !missing.is_empty() {
        return Err(HeraldError::ConfigIncomplete { missing });
    }

    let config = ConnectionConfig::new(server, database, user, SecretString::from(password));
    Ok(match present(source, DB_DRIVER) {
        Some(driver) => config.with_driver(driver),
        None => config,
    })
}

/// The configured admin secret, if set and non-empty.
pub fn admin_key(source: &dyn VarSource) -> Option<SecretString> {
    source
        .var(ADMIN_API_KEY)
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_DRIVER;
    use secrecy::ExposeSecret;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn complete() -> HashMap<String, String> {
        vars(&[
            (DB_SERVER, "/data"),
            (DB_NAME, "messages"),
            (DB_USER, "app"),
            (DB_PASSWORD, "pw"),
        ])
    }

    #[test]
    fn complete_environment_resolves_with_default_driver() {
        let config = resolve_connection(&complete()).unwrap();
        assert_eq!(config.server, "/data");
        assert_eq!(config.database, "messages");
        assert_eq!(config.user, "app");
        assert_eq!(config.password.expose_secret(), "pw");
        assert_eq!(config.driver, DEFAULT_DRIVER);
        assert!(config.encrypt);
        assert!(!config.trust_server_certificate);
    }

    #[test]
    fn explicit_driver_overrides_default() {
        let mut env = complete();
        env.insert(DB_DRIVER.into(), "sqlcipher".into());
        assert_eq!(resolve_connection(&env).unwrap().driver, "sqlcipher");
    }

    #[test]
    fn reports_exactly_the_missing_names() {
        let env = vars(&[(DB_NAME, "messages"), (DB_USER, "app")]);
        match resolve_connection(&env) {
            Err(HeraldError::ConfigIncomplete { missing }) => {
                assert_eq!(missing, vec!["DB_SERVER", "DB_PASSWORD"]);
            }
            other => panic!("expected ConfigIncomplete, got {other:?}"),
        }
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut env = complete();
        env.insert(DB_USER.into(), "".into());
        env.insert(DB_PASSWORD.into(), "   ".into());
        match resolve_connection(&env) {
            Err(HeraldError::ConfigIncomplete { missing }) => {
                assert_eq!(missing, vec!["DB_USER", "DB_PASSWORD"]);
            }
            other => panic!("expected ConfigIncomplete, got {other:?}"),
        }
    }

    #[test]
    fn empty_environment_lists_all_four() {
        let err = resolve_connection(&HashMap::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "DB connection settings missing: DB_SERVER, DB_NAME, DB_USER, DB_PASSWORD"
        );
    }

    #[test]
    fn admin_key_absent_when_empty() {
        assert!(admin_key(&vars(&[(ADMIN_API_KEY, "")])).is_none());
        assert!(admin_key(&HashMap::new()).is_none());
        let key = admin_key(&vars(&[(ADMIN_API_KEY, " s3cret ")])).unwrap();
        assert_eq!(key.expose_secret(), " s3cret ");
    }
}
