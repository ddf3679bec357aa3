//! Combat worker that owns the authoritative [`CombatSession`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), resolves
//! them against the session, and fires the opponent's counter-turn when its
//! due time arrives. Dropping every handle stops the worker and abandons any
//! pending opponent turn.

use std::future;

use combat_core::{
    CombatError, CombatFault, CombatSession, CombatSnapshot, CombatSummary, CombatType, HalfTurn,
    PlayerAction,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::clock::TokioClock;
use crate::events::{CombatEvent, Event, EventBus};

/// Commands that can be sent to the combat worker
pub enum Command {
    SelectCombatType {
        combat_type: CombatType,
        reply: oneshot::Sender<Result<(), CombatError>>,
    },
    Submit {
        action: PlayerAction,
        reply: oneshot::Sender<Result<HalfTurn, CombatError>>,
    },
    Inspect {
        reply: oneshot::Sender<CombatSnapshot>,
    },
    ReturnToNarrative {
        reply: oneshot::Sender<Result<CombatSummary, CombatError>>,
    },
    CancelPending {
        reply: oneshot::Sender<bool>,
    },
}

pub struct CombatWorker {
    session: CombatSession,
    clock: TokioClock,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl CombatWorker {
    pub fn new(
        session: CombatSession,
        clock: TokioClock,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            player = %session.player().name,
            opponent = %session.opponent().name,
            "CombatWorker initialized"
        );

        Self {
            session,
            clock,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            let deadline = self.session.next_due().map(|due| self.clock.instant_at(due));

            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                () = wait_for(deadline) => self.handle_opponent_due(),
            }
        }

        if self.session.cancel_pending() {
            debug!("pending opponent turn abandoned on shutdown");
        }
        info!("CombatWorker stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SelectCombatType { combat_type, reply } => {
                let result = self.session.select_combat_type(combat_type);
                match &result {
                    Ok(()) => self.publish(CombatEvent::TypeSelected { combat_type }),
                    Err(error) => self.reject(combat_type.as_ref(), error),
                }
                if reply.send(result).is_err() {
                    debug!("SelectCombatType reply channel closed (caller dropped)");
                }
            }
            Command::Submit { action, reply } => {
                let result = self.session.submit(action);
                match &result {
                    Ok(turn) => {
                        self.publish(CombatEvent::turn_resolved(turn));
                        if let Some(due_at) = self.session.next_due() {
                            self.publish(CombatEvent::OpponentScheduled { due_at });
                        }
                    }
                    Err(error) => self.reject(action.name(), error),
                }
                if reply.send(result).is_err() {
                    debug!("Submit reply channel closed (caller dropped)");
                }
            }
            Command::Inspect { reply } => {
                if reply.send(self.session.inspect()).is_err() {
                    debug!("Inspect reply channel closed (caller dropped)");
                }
            }
            Command::ReturnToNarrative { reply } => {
                let result = self.session.return_to_narrative();
                match &result {
                    Ok(summary) => self.publish(CombatEvent::ReturnedToNarrative {
                        summary: summary.clone(),
                    }),
                    Err(error) => self.reject("return to narrative", error),
                }
                if reply.send(result).is_err() {
                    debug!("ReturnToNarrative reply channel closed (caller dropped)");
                }
            }
            Command::CancelPending { reply } => {
                let cancelled = self.session.cancel_pending();
                if cancelled {
                    self.publish(CombatEvent::OpponentCancelled);
                }
                if reply.send(cancelled).is_err() {
                    debug!("CancelPending reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_opponent_due(&mut self) {
        match self.session.poll() {
            Some(turn) => self.publish(CombatEvent::turn_resolved(&turn)),
            None => debug!("opponent timer fired before the session clock caught up"),
        }
    }

    fn reject(&self, request: &str, error: &CombatError) {
        warn!(request, code = error.error_code(), %error, "combat request rejected");
        self.publish(CombatEvent::ActionRejected {
            request: request.to_string(),
            code: error.error_code().to_string(),
            reason: error.to_string(),
        });
    }

    fn publish(&self, event: CombatEvent) {
        self.event_bus.publish(Event::Combat(event));
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}
