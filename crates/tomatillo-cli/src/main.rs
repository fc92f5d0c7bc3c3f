use clap::Parser;
use owo_colors::OwoColorize;
use tomatillo_core::db;
use tomatillo_core::error::CoreError;
use tomatillo_core::repository::SqliteRepository;

use crate::util::Palette;

mod cli;
mod commands;
mod config;
mod logging;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    logging::init();

    let cli = cli::Cli::parse();

    let mut config = config::Config::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid configuration, using defaults");
        config::Config::default()
    });
    if cli.no_color {
        config.color = false;
    }
    let palette = Palette::new(config.color);

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".style(palette.error), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&repository, command, &palette).await,
        cli::Commands::List(command) => commands::list::list_tasks(&repository, command, &config).await,
        cli::Commands::Update(command) => {
            commands::update::update_task(&repository, command, &palette).await
        }
        cli::Commands::Done(command) => commands::done::done_task(&repository, command, &palette).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command, &palette).await,
        cli::Commands::Delete(command) => {
            commands::delete::delete_task(&repository, command, &palette).await
        }
        cli::Commands::Activate(command) => {
            commands::activate::activate_task(&repository, command, &palette).await
        }
        cli::Commands::Backfill(command) => {
            commands::activate::backfill_task(&repository, command, &palette).await
        }
        cli::Commands::Today => {
            commands::report::today_report(&repository, util::today(), &config).await
        }
        cli::Commands::Report(command) => {
            commands::report::show_report(&repository, command, &config).await
        }
        cli::Commands::Load(command) => commands::load::load_tasks(&repository, command, &palette).await,
    };

    if let Err(e) = result {
        handle_error(e, &palette);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error, palette: &Palette) {
    let label = "Error:".style(palette.error);

    match err.chain().find_map(|cause| cause.downcast_ref::<CoreError>()) {
        Some(CoreError::NotFound(s)) => eprintln!("{} {}", label, s),
        Some(CoreError::InvalidInput(s)) => eprintln!("{} Invalid input: {}", label, s),
        _ => eprintln!("{} {:#}", label, err),
    }
}
