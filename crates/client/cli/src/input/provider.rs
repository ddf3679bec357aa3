use async_trait::async_trait;
use combat_core::CombatSnapshot;
use combat_runtime::{ActionProvider, PlayerIntent, RuntimeError};
use tokio::sync::{Mutex, mpsc};

/// Action provider that waits for player input from the terminal
pub struct CliActionProvider {
    rx_intent: Mutex<mpsc::Receiver<PlayerIntent>>,
}

impl CliActionProvider {
    pub fn new(rx_intent: mpsc::Receiver<PlayerIntent>) -> Self {
        Self {
            rx_intent: Mutex::new(rx_intent),
        }
    }
}

#[async_trait]
impl ActionProvider for CliActionProvider {
    async fn provide_intent(
        &self,
        _snapshot: &CombatSnapshot,
    ) -> combat_runtime::Result<PlayerIntent> {
        let mut rx = self.rx_intent.lock().await;
        rx.recv()
            .await
            .ok_or(RuntimeError::ActionProviderChannelClosed)
    }
}
