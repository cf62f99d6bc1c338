//! nutriauth library root.
//! Exposes the CLI parser, the high-level run() function and the account
//! flow modules (stores, validation, navigation).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::{AppError, AppResult};

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli).await,
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Signup { .. } => cli::commands::signup::handle(&cli.command, cfg).await,
        Commands::Login { .. } => cli::commands::login::handle(&cli.command, cfg).await,
        Commands::Recover { .. } => cli::commands::recover::handle(&cli.command, cfg).await,
        Commands::Logout => cli::commands::logout::handle(cfg).await,
        Commands::Status => cli::commands::status::handle(cfg, cli.test).await,
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once, then apply command-line overrides
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_path(custom_db).to_string_lossy().to_string();
    }
    if let Some(custom_session) = &cli.session {
        cfg.session_file = Config::resolve_path(custom_session)
            .to_string_lossy()
            .to_string();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(AppError::Io)?;

    runtime.block_on(dispatch(&cli, &cfg))
}
