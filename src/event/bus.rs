use tokio::sync::broadcast;
use tracing::debug;

use super::events::ProgressEvent;

/// Event bus for distributing progress events throughout the application.
///
/// Single-user core, so one broadcast channel is enough; the sender is held
/// directly (it is already `Sync` and cheap to clone) and subscribers (UI
/// toasts, widget refreshers) each get their own receiver.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ProgressEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Emits an event to all current subscribers.
    pub fn emit(&self, event: ProgressEvent) {
        match self.sender.send(event.clone()) {
            Ok(receiver_count) => {
                debug!(
                    event_type = event.event_type(),
                    receivers = receiver_count,
                    "Progress event emitted"
                );
            }
            Err(_) => {
                debug!(
                    event_type = event.event_type(),
                    "Progress event emitted with no receivers"
                );
            }
        }
    }

    /// Subscribe to progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
