//! "Cart changed" notifications.

use tokio::sync::broadcast;
use tracing::debug;

/// Buffered signals per subscriber before the oldest are dropped.
const CHANNEL_CAPACITY: usize = 16;

/// Emitted after the persisted cart was changed. Carries no payload;
/// subscribers re-read the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChanged;

/// Broadcast channel for [`CartChanged`].
///
/// Clones share the same channel.
#[derive(Debug, Clone)]
pub struct CartEvents {
    sender: broadcast::Sender<CartChanged>,
}

impl CartEvents {
    /// Create a channel with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Receive every signal sent from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartChanged> {
        self.sender.subscribe()
    }

    /// Signal subscribers. Having none is fine.
    pub fn notify(&self) {
        let receivers = self.sender.send(CartChanged).unwrap_or(0);
        debug!(receivers, "Cart changed");
    }
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new()
    }
}
