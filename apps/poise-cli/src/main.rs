//! Poise CLI - interactive project tracker

use anyhow::Context;
use clap::Parser;
use poise_cli::{logging::init_logging, run_menu, Cli};
use poise_core::{ProjectDatabase, Prompter};
use std::io;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_options()).context("Failed to initialise logging")?;

    let config = cli.config();
    let db = ProjectDatabase::open(&config).with_context(|| {
        format!(
            "Failed to open project store at {}",
            config.database_path.display()
        )
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    prompter.say("Connected to PoisePMS database.")?;

    run_menu(&db, &mut prompter)?;

    info!("Session ended");
    Ok(())
}
