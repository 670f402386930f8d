//! flightdesk library root.
//! Exposes the CLI parser, the run() entry point and the scheduling core.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Aircraft { .. } => cli::commands::aircraft::handle(&cli.command, cfg),
        Commands::Lesson { .. } => cli::commands::lesson::handle(&cli.command, cfg),
        Commands::Enroll { .. } | Commands::Enrollments => {
            cli::commands::enroll::handle(&cli.command, cfg)
        }
        Commands::Blocks { .. } => cli::commands::blocks::handle(&cli.command, cfg),
        Commands::Progress { .. } => cli::commands::progress::handle(&cli.command, cfg),
        Commands::Schedule { .. } => cli::commands::schedule::handle(&cli.command, cfg),
        Commands::Express { .. } => cli::commands::express::handle(&cli.command, cfg),
        Commands::Missions { .. } => cli::commands::missions::handle(&cli.command, cfg),
        Commands::Mission { .. } => cli::commands::mission::handle(&cli.command, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; --db wins over the configured path
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
