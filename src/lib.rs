//! ProTip365 library root.
//! Exposes the CLI parser, the high-level run() function and the internal
//! modules (models, calculators, stores and workflows).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod remote;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Diagnostics go to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // a second init (tests driving run() twice) is not an error
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    // commands that work on files only
    match &cli.command {
        Commands::Init => return cli::commands::init::handle(cli),
        Commands::Config { .. } => return cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => return cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => return cli::commands::log::handle(&cli.command, cfg),
        Commands::Backup { .. } => return cli::commands::backup::handle(&cli.command, cfg),
        Commands::Calc { .. } => return cli::commands::calc::handle(&cli.command, cfg),
        _ => {}
    }

    let store = store::open(cfg)?;
    let store = store.as_ref();
    tracing::debug!(backend = store.backend_name(), user = %store.user_id(), "store opened");

    match &cli.command {
        Commands::Employer { .. } => cli::commands::employer::handle(&cli.command, cfg, store),
        Commands::Shift { .. } => cli::commands::shift::handle(&cli.command, cfg, store),
        Commands::Entry { .. } => cli::commands::entry::handle(&cli.command, cfg, store),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg, store),
        Commands::Targets { .. } => cli::commands::targets::handle(&cli.command, cfg, store),
        Commands::Profile { .. } => cli::commands::profile::handle(&cli.command, cfg, store),
        Commands::Pin { .. } => cli::commands::pin::handle(&cli.command, store),
        Commands::Alerts { .. } => cli::commands::alerts::handle(&cli.command, store),
        Commands::Achievements { .. } => cli::commands::achievements::handle(&cli.command, store),
        Commands::Subscription { .. } => cli::commands::subscription::handle(&cli.command, store),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, store),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, store),
        Commands::Init
        | Commands::Config { .. }
        | Commands::Db { .. }
        | Commands::Log { .. }
        | Commands::Backup { .. }
        | Commands::Calc { .. } => Ok(()),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_database(custom_db)
            .to_string_lossy()
            .to_string();
    }

    init_tracing(&cfg);

    dispatch(&cli, &cfg)
}
