// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Herald message service.
//!
//! Two layers live here:
//! - [`resolver`]: per-request database and admin settings read from
//!   `DB_*` / `ADMIN_API_KEY` variables, reporting every missing name.
//! - [`loader`]: hosting settings (listener, log level) merged by Figment
//!   from TOML files and `HERALD_*` variables, validated at startup.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_str};
pub use model::{ConnectionConfig, HeraldConfig, ServerConfig};
pub use resolver::{ProcessEnv, VarSource, admin_key, resolve_connection};

/// Load hosting configuration from the file hierarchy and validate it.
pub fn load_and_validate() -> Result<HeraldConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}

/// Load hosting configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<HeraldConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err)),
    }
}
