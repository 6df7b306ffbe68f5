// Peer networking
//
// Byte-level transport seam plus the JSON codec used for peer messages.
// Delivery is best effort: no ordering, no acknowledgement, no retry.

mod codec;
mod loopback;
mod transport;

pub use codec::{decode, encode};
#[allow(unused_imports)]
pub use loopback::{LinkSettings, LoopbackEnd, LoopbackLink};
pub use transport::Transport;

/// Networking errors
#[derive(Debug, thiserror::Error)]
pub enum NetError {
    #[error("Failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Invalid {kind} message: {reason}")]
    InvalidMessage { kind: &'static str, reason: String },

    #[error("Peer disconnected")]
    Disconnected,
}

impl NetError {
    /// Whether the session cannot continue after this error
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Disconnected)
    }
}
