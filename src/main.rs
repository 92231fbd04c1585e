mod adapters;
mod app;
mod cli_args;
mod core;
mod global_constants;
mod utils;

use clap::Parser;

use crate::app::SolverApp;
use crate::cli_args::Cli;
use crate::core::models::UserSettings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!("[MAIN] Starting {}", global_constants::APPLICATION_NAME);

    let cli = Cli::parse();

    let settings = UserSettings::load().unwrap_or_else(|e| {
        log::warn!("[MAIN] Failed to load settings: {}, using defaults", e);
        let mut settings = UserSettings::default();
        settings.apply_overrides(|name| std::env::var(name).ok());
        settings
    });

    let app = SolverApp::build(&settings);

    app.run(cli.command).await
}
