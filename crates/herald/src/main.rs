// SPDX-FileCopyrightText: 2026 Herald Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Herald - message service with a protected schema initializer and a public
//! read endpoint.
//!
//! This is the binary entry point.

mod init;
mod serve;

use clap::{Parser, Subcommand};

/// Herald - serve messages from an encrypted store over HTTP.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Create the messages table and seed rows using DB_* settings.
    InitDb,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match herald_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            herald_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.log.level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::InitDb) => init::run_init_db(&herald_config::ProcessEnv).await,
        None => {
            println!("herald: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!(
            "error: {}",
            init::redacted(&e, &herald_config::ProcessEnv)
        );
        std::process::exit(1);
    }
}
