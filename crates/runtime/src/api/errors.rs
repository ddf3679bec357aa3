//! Unified error type surfaced by the runtime API.
//!
//! Rejected combat requests keep their [`CombatError`] so callers can tell a
//! refused action apart from a broken worker.
use combat_core::CombatError;
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("combat worker command channel closed")]
    CommandChannelClosed,

    #[error("combat worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("combat worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires combatants before building")]
    MissingCombatants,

    #[error("combat cannot start without an opponent")]
    MissingOpponent,

    #[error("player action provider not set")]
    ProviderNotSet,

    #[error("action provider channel closed")]
    ActionProviderChannelClosed,
}

impl RuntimeError {
    /// The engine refused the request; the session is unchanged.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Combat(_))
    }
}
