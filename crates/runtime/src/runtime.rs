//! High-level runtime orchestrator.
//!
//! The runtime owns the combat worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive an encounter.

use std::env;
use std::str::FromStr;

use combat_core::{
    CombatConfig, CombatSessionBuilder, CombatSummary, DiceRoller, PcgDice,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{ActionProvider, PlayerIntent, Result, RuntimeError, RuntimeHandle};
use crate::clock::TokioClock;
use crate::events::{BusDispatcher, EventBus};
use crate::workers::{CombatWorker, Command};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub combat: CombatConfig,
    /// Seed for the session dice.
    pub seed: u64,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const OPPONENT_DELAY_ENV: &'static str = "COMBAT_OPPONENT_DELAY_MS";
    pub const SEED_ENV: &'static str = "COMBAT_SEED";

    /// Defaults overridden by `COMBAT_OPPONENT_DELAY_MS` and `COMBAT_SEED`.
    ///
    /// Without a seed the dice are seeded randomly.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(delay_ms) = read_env::<u64>(Self::OPPONENT_DELAY_ENV) {
            config.combat = config.combat.with_opponent_delay_ms(delay_ms);
        }

        config.seed = read_env::<u64>(Self::SEED_ENV).unwrap_or_else(rand::random);

        config
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            combat: CombatConfig::default(),
            seed: 0,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates a combat encounter
///
/// Runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade for
/// clients.
pub struct Runtime {
    handle: RuntimeHandle,
    player_provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Ask the player provider for one intent and apply it.
    ///
    /// Rejected intents are reported on the combat topic and do not stop the
    /// runtime. Returns the summary once the player leaves a finished combat.
    pub async fn step(&mut self) -> Result<Option<CombatSummary>> {
        let provider = self
            .player_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet)?;

        let snapshot = self.handle.inspect().await?;
        let intent = provider.provide_intent(&snapshot).await?;
        debug!(?intent, "player intent received");

        let outcome = match intent {
            PlayerIntent::SelectCombatType(combat_type) => self
                .handle
                .select_combat_type(combat_type)
                .await
                .map(|()| None),
            PlayerIntent::Act(action) => self.handle.submit(action).await.map(|_| None),
            PlayerIntent::ReturnToNarrative => self.handle.return_to_narrative().await.map(Some),
        };

        match outcome {
            Err(error) if error.is_rejection() => Ok(None),
            other => other,
        }
    }

    /// Drive the encounter until the player returns to the narrative.
    pub async fn run(&mut self) -> Result<CombatSummary> {
        loop {
            if let Some(summary) = self.step().await? {
                info!(winner = %summary.winner, "returning to narrative");
                return Ok(summary);
            }
        }
    }

    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker, so every cloned handle must be dropped first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    session: Option<CombatSessionBuilder>,
    dice: Option<Box<dyn DiceRoller>>,
    player_provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session: None,
            dice: None,
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Combatants for the encounter.
    ///
    /// The runtime supplies the clock, dispatcher and configuration. A resume
    /// state or end callback set on the session builder is kept.
    pub fn session(mut self, session: CombatSessionBuilder) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace the seeded dice.
    pub fn dice(mut self, dice: impl DiceRoller + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<Runtime> {
        let session = self.session.ok_or(RuntimeError::MissingCombatants)?;

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let clock = TokioClock::new();
        let dice = self
            .dice
            .unwrap_or_else(|| Box::new(PcgDice::new(self.config.seed)));

        let session = session
            .config(self.config.combat.clone())
            .clock(clock)
            .dice(dice)
            .dispatcher(BusDispatcher::new(event_bus.clone()))
            .build()
            .ok_or(RuntimeError::MissingOpponent)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let worker = CombatWorker::new(session, clock, command_rx, event_bus);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            player_provider: self.player_provider,
            worker_handle,
        })
    }
}
