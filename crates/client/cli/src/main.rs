//! Terminal combat client entry point.
mod app;
mod config;
mod input;
mod logging;
mod presentation;
mod state;

use anyhow::Result;
use app::CliApp;
use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();

    // Kept alive for the whole run so buffered log lines are flushed on exit.
    let _log_guard = logging::init(config.log_dir.as_deref())?;

    match CliApp::new(config).run().await? {
        Some(summary) => {
            println!("{}", summary.results);
            println!(
                "Rounds: {} | Damage dealt: {} | Damage taken: {}",
                summary.stats.rounds, summary.stats.damage_dealt, summary.stats.damage_taken
            );
        }
        None => println!("Combat abandoned."),
    }

    Ok(())
}
