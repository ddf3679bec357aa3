//! Glue code tying the runtime, the character data and the terminal UI
//! together.
use anyhow::Result;
use combat_core::{CombatSessionBuilder, CombatSummary};
use combat_runtime::{PlayerIntent, Runtime};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::input::CliActionProvider;
use crate::presentation::{EventLoop, terminal};
use crate::state::AppState;

pub struct CliApp {
    config: CliConfig,
}

impl CliApp {
    pub fn new(config: CliConfig) -> Self {
        Self { config }
    }

    /// Run one encounter. Returns the summary when the player returns to the
    /// narrative, `None` when they quit early.
    pub async fn run(self) -> Result<Option<CombatSummary>> {
        info!("combat client starting");

        let player = self.config.load_player()?;
        let opponent = self.config.load_opponent()?;
        let resume = self.config.load_resume()?;

        let session = CombatSessionBuilder::from_snapshots(&player, opponent.as_ref())
            .resume(resume)
            .on_combat_end(|winner, text| info!(%winner, text, "combat ended"));

        let (tx_intent, rx_intent) = mpsc::channel::<PlayerIntent>(self.config.input_buffer);

        let mut runtime = Runtime::builder()
            .config(self.config.runtime.clone())
            .session(session)
            .player_provider(CliActionProvider::new(rx_intent))
            .build()
            .await?;

        let handle = runtime.handle();
        let app_state = AppState::new(&self.config.runtime.combat);
        let event_loop = EventLoop::new(handle, tx_intent, app_state).await?;

        let runtime_task = tokio::spawn(async move {
            if let Err(e) = runtime.run().await {
                warn!("Runtime stopped: {}", e);
            }
        });

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let outcome = event_loop.run(&mut terminal).await;

        runtime_task.abort();
        let _ = runtime_task.await;

        terminal::restore()?;
        info!("combat client exiting");

        outcome
    }
}
