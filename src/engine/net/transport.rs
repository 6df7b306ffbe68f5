// Transport seam

use super::NetError;

/// A one-way, fire-and-forget byte channel to the remote peer
///
/// Implementations give no ordering or delivery guarantee. Returning
/// `NetError::Disconnected` from either call ends the session.
pub trait Transport {
    /// Queue a payload for the remote peer
    fn send(&mut self, payload: Vec<u8>) -> Result<(), NetError>;

    /// Take the next payload that has arrived, if any
    fn poll(&mut self) -> Result<Option<Vec<u8>>, NetError>;
}
