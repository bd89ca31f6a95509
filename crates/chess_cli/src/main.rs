//! Console chess
//!
//! Play a two-player game in the terminal against the chess_core rules engine.
//! The game in progress is saved after every move and picked up on the next start.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p chess_cli -- --config chess.toml
//! cargo run -p chess_cli -- --new
//! ```

mod config;
mod session;
mod shell;

use anyhow::Result;
use clap::{arg, command};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::{DEFAULT_CONFIG_PATH, ShellConfig};
use shell::Shell;

fn main() -> Result<()> {
    let matches = command!()
        .arg(
            arg!(-c --config <FILE> "Settings file")
                .default_value(DEFAULT_CONFIG_PATH)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--new "Ignore the saved game and start over"))
        .get_matches();

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = ShellConfig::load(&config_path)?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut shell = Shell::new(config, matches.get_flag("new"))?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    shell.run(stdin.lock(), &mut stdout)
}
