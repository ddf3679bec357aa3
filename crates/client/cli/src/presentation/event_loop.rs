//! Event loop orchestrating runtime events, keyboard input, and rendering.
use anyhow::Result;
use combat_core::{CombatSnapshot, CombatSummary};
use combat_runtime::{CombatEvent, Event as RuntimeEvent, PlayerIntent, RuntimeHandle, Topic};
use crossterm::event::{self as term_event, Event as TermEvent, KeyEvent, KeyEventKind};
use tokio::{
    sync::{broadcast, broadcast::error::RecvError, mpsc},
    time::{self, Duration},
};
use tracing::{debug, warn};

use super::{RatatuiTheme, terminal::Tui, ui};
use crate::{
    input::{InputContext, InputHandler, KeyAction},
    state::AppState,
};

const FRAME_INTERVAL_MS: u64 = 16;

/// How a loop iteration wants the loop to continue.
enum Flow {
    Continue,
    Quit,
    Returned(CombatSummary),
}

pub struct EventLoop {
    handle: RuntimeHandle,
    store_rx: broadcast::Receiver<RuntimeEvent>,
    combat_rx: broadcast::Receiver<RuntimeEvent>,
    tx_intent: mpsc::Sender<PlayerIntent>,
    input: InputHandler,
    theme: RatatuiTheme,
    app_state: AppState,
    snapshot: CombatSnapshot,
}

impl EventLoop {
    pub async fn new(
        handle: RuntimeHandle,
        tx_intent: mpsc::Sender<PlayerIntent>,
        app_state: AppState,
    ) -> Result<Self> {
        let store_rx = handle.subscribe(Topic::Store);
        let combat_rx = handle.subscribe(Topic::Combat);
        let snapshot = handle.inspect().await?;

        Ok(Self {
            handle,
            store_rx,
            combat_rx,
            tx_intent,
            input: InputHandler::new(),
            theme: RatatuiTheme::new(),
            app_state,
            snapshot,
        })
    }

    /// Run until the player quits (`None`) or leaves a finished combat.
    pub async fn run(mut self, terminal: &mut Tui) -> Result<Option<CombatSummary>> {
        self.app_state.sync(&self.snapshot);
        self.render(terminal)?;

        loop {
            let flow = tokio::select! {
                result = self.combat_rx.recv() => self.handle_runtime_event(result, terminal).await?,
                result = self.store_rx.recv() => self.handle_runtime_event(result, terminal).await?,
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    self.handle_input_tick(terminal).await?
                }
            };

            match flow {
                Flow::Continue => {}
                Flow::Quit => return Ok(None),
                Flow::Returned(summary) => return Ok(Some(summary)),
            }
        }
    }

    async fn handle_runtime_event(
        &mut self,
        result: Result<RuntimeEvent, RecvError>,
        terminal: &mut Tui,
    ) -> Result<Flow> {
        match result {
            Ok(RuntimeEvent::Combat(CombatEvent::ReturnedToNarrative { summary })) => {
                Ok(Flow::Returned(summary))
            }
            Ok(RuntimeEvent::Combat(CombatEvent::ActionRejected { reason, .. })) => {
                self.app_state.notice = Some(reason);
                self.render(terminal)?;
                Ok(Flow::Continue)
            }
            Ok(event) => {
                debug!(topic = ?event.topic(), "runtime event");
                self.refresh_view(terminal).await?;
                Ok(Flow::Continue)
            }
            Err(RecvError::Closed) => {
                warn!("Event stream closed");
                Ok(Flow::Quit)
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Dropped {} stale events", skipped);
                self.refresh_view(terminal).await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<Flow> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(Flow::Continue);
        }

        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_press(key, terminal).await
            }
            TermEvent::Resize(_, _) => {
                self.render(terminal)?;
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    async fn handle_key_press(&mut self, key: KeyEvent, terminal: &mut Tui) -> Result<Flow> {
        let context = InputContext::new(&self.snapshot, self.app_state.range.value);

        match self.input.handle_key(key, &context) {
            KeyAction::Quit => Ok(Flow::Quit),
            KeyAction::Submit(intent) => {
                self.app_state.notice = None;
                if self.tx_intent.send(intent).await.is_err() {
                    tracing::error!("Intent channel closed");
                    return Ok(Flow::Quit);
                }
                Ok(Flow::Continue)
            }
            KeyAction::NudgeRange(delta) => {
                self.app_state.range.nudge(delta);
                self.render(terminal)?;
                Ok(Flow::Continue)
            }
            KeyAction::None => Ok(Flow::Continue),
        }
    }

    async fn refresh_view(&mut self, terminal: &mut Tui) -> Result<()> {
        self.snapshot = self.handle.inspect().await?;
        self.app_state.sync(&self.snapshot);
        self.render(terminal)
    }

    fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        ui::render(terminal, &self.snapshot, &self.app_state, &self.theme)
    }
}
