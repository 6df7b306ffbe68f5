// Peer message catalog and the typed link that carries it
//
// Messages are one-way and unordered. Gauge-style messages carry absolute
// values so the receiver simply keeps the last one it saw.

use serde::{Deserialize, Serialize};

use super::score::RoundOutcome;
use crate::engine::net::{self, NetError, Transport};

/// Longest character name accepted from a peer
const MAX_NAME_LEN: usize = 64;

/// Everything one client can tell the other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PeerMessage {
    /// "This is the character I play"
    AssignOpponentIdentity { character_name: String },
    /// Sender's own special gauge, for the receiver's opponent bar
    SetOpponentSpecialGauge { value: f32 },
    /// Receiver's health after the sender's attack
    SetOwnHealthFromPeer { value: f32 },
    /// Receiver's special gauge after the sender's attack
    SetOwnSpecialFromPeer { value: f32 },
    /// Sender's outcome for `round`
    ReportRoundResult { outcome: RoundOutcome, round: u32 },
    /// Sender fired its special move
    TriggerOpponentSpecialMove,
}

/// Discriminant of a [`PeerMessage`], used for logging and dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    AssignOpponentIdentity,
    SetOpponentSpecialGauge,
    SetOwnHealthFromPeer,
    SetOwnSpecialFromPeer,
    ReportRoundResult,
    TriggerOpponentSpecialMove,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssignOpponentIdentity => "assignOpponentIdentity",
            Self::SetOpponentSpecialGauge => "setOpponentSpecialGauge",
            Self::SetOwnHealthFromPeer => "setOwnHealthFromPeer",
            Self::SetOwnSpecialFromPeer => "setOwnSpecialFromPeer",
            Self::ReportRoundResult => "reportRoundResult",
            Self::TriggerOpponentSpecialMove => "triggerOpponentSpecialMove",
        }
    }
}

impl PeerMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::AssignOpponentIdentity { .. } => MessageKind::AssignOpponentIdentity,
            Self::SetOpponentSpecialGauge { .. } => MessageKind::SetOpponentSpecialGauge,
            Self::SetOwnHealthFromPeer { .. } => MessageKind::SetOwnHealthFromPeer,
            Self::SetOwnSpecialFromPeer { .. } => MessageKind::SetOwnSpecialFromPeer,
            Self::ReportRoundResult { .. } => MessageKind::ReportRoundResult,
            Self::TriggerOpponentSpecialMove => MessageKind::TriggerOpponentSpecialMove,
        }
    }

    /// Check argument shape before the message is applied
    ///
    /// Range problems on gauge values are left to the receiver's clamping;
    /// only values that cannot be clamped meaningfully are rejected.
    pub fn validate(&self) -> Result<(), NetError> {
        let kind = self.kind().as_str();
        let invalid = |reason: &str| NetError::InvalidMessage {
            kind,
            reason: reason.to_string(),
        };

        match self {
            Self::AssignOpponentIdentity { character_name } => {
                if character_name.trim().is_empty() {
                    return Err(invalid("character name is empty"));
                }
                if character_name.len() > MAX_NAME_LEN {
                    return Err(invalid("character name is too long"));
                }
            }
            Self::SetOpponentSpecialGauge { value }
            | Self::SetOwnHealthFromPeer { value }
            | Self::SetOwnSpecialFromPeer { value } => {
                if !value.is_finite() {
                    return Err(invalid("value is not finite"));
                }
            }
            Self::ReportRoundResult { round, .. } => {
                if *round == 0 {
                    return Err(invalid("rounds are numbered from 1"));
                }
            }
            Self::TriggerOpponentSpecialMove => {}
        }
        Ok(())
    }
}

/// Typed, validating wrapper around a byte transport
pub struct PeerLink {
    transport: Box<dyn Transport>,
    sent: u64,
    received: u64,
}

impl PeerLink {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            sent: 0,
            received: 0,
        }
    }

    /// Fire-and-forget send
    pub fn send(&mut self, message: &PeerMessage) -> Result<(), NetError> {
        let payload = net::encode(message)?;
        self.transport.send(payload)?;
        self.sent += 1;
        log::debug!("-> {:?}", message);
        Ok(())
    }

    /// Next decoded and validated message, if one has arrived
    ///
    /// A payload that fails to decode or validate is consumed and reported
    /// as an error; the caller may keep polling.
    pub fn poll(&mut self) -> Result<Option<PeerMessage>, NetError> {
        let Some(payload) = self.transport.poll()? else {
            return Ok(None);
        };
        let message: PeerMessage = net::decode(&payload)?;
        message.validate()?;
        self.received += 1;
        log::debug!("<- {:?}", message);
        Ok(Some(message))
    }

    pub fn sent_count(&self) -> u64 {
        self.sent
    }

    pub fn received_count(&self) -> u64 {
        self.received
    }
}
