// In-process peer link with simulated latency, reordering and loss

use super::{NetError, Transport};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::cell::RefCell;
use std::rc::Rc;

/// Link behaviour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSettings {
    /// Minimum one-way latency (seconds)
    pub min_latency: f32,
    /// Maximum one-way latency (seconds); each message samples its own delay,
    /// so messages overtake each other whenever the range is non-empty
    pub max_latency: f32,
    /// Probability that a message silently vanishes
    pub drop_rate: f32,
}

impl LinkSettings {
    #[cfg(test)]
    /// Zero latency, nothing lost
    pub fn instant() -> Self {
        Self {
            min_latency: 0.0,
            max_latency: 0.0,
            drop_rate: 0.0,
        }
    }
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            min_latency: 0.03,
            max_latency: 0.12,
            drop_rate: 0.0,
        }
    }
}

#[derive(Debug)]
struct InFlight {
    deliver_at: f32,
    sequence: u64,
    payload: Vec<u8>,
}

#[derive(Debug)]
struct Wire {
    settings: LinkSettings,
    rng: Pcg32,
    now: f32,
    next_sequence: u64,
    /// Inbound queue per side
    inbound: [Vec<InFlight>; 2],
    connected: bool,
    dropped: u64,
}

impl Wire {
    fn sample_latency(&mut self) -> f32 {
        let min = self.settings.min_latency.max(0.0);
        let max = self.settings.max_latency.max(min);
        if max > min {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    fn should_drop(&mut self) -> bool {
        let p = self.settings.drop_rate.clamp(0.0, 1.0) as f64;
        p > 0.0 && self.rng.random_bool(p)
    }
}

/// Shared simulated wire between two [`LoopbackEnd`]s
#[derive(Debug, Clone)]
pub struct LoopbackLink {
    wire: Rc<RefCell<Wire>>,
}

impl LoopbackLink {
    /// Create a link, seeding its latency/loss RNG
    pub fn new(settings: LinkSettings, seed: u64) -> Self {
        Self {
            wire: Rc::new(RefCell::new(Wire {
                settings,
                rng: Pcg32::seed_from_u64(seed),
                now: 0.0,
                next_sequence: 0,
                inbound: [Vec::new(), Vec::new()],
                connected: true,
                dropped: 0,
            })),
        }
    }

    #[cfg(test)]
    /// Zero-latency lossless link
    pub fn instant() -> Self {
        Self::new(LinkSettings::instant(), 0)
    }

    /// The two ends of the link
    pub fn ends(&self) -> (LoopbackEnd, LoopbackEnd) {
        (
            LoopbackEnd {
                wire: Rc::clone(&self.wire),
                side: 0,
            },
            LoopbackEnd {
                wire: Rc::clone(&self.wire),
                side: 1,
            },
        )
    }

    /// Advance link time by `dt` seconds
    pub fn advance(&self, dt: f32) {
        self.wire.borrow_mut().now += dt;
    }

    #[cfg(test)]
    /// Sever the link; both ends report `Disconnected` from now on
    pub fn disconnect(&self) {
        let mut wire = self.wire.borrow_mut();
        if wire.connected {
            wire.connected = false;
            log::info!("Loopback link disconnected");
        }
    }

    #[cfg(test)]
    /// Messages sent but not yet taken by the receiver
    pub fn in_flight(&self) -> usize {
        let wire = self.wire.borrow();
        wire.inbound.iter().map(Vec::len).sum()
    }

    /// Messages lost to the simulated drop rate
    pub fn dropped(&self) -> u64 {
        self.wire.borrow().dropped
    }
}

/// One side of a [`LoopbackLink`]
#[derive(Debug)]
pub struct LoopbackEnd {
    wire: Rc<RefCell<Wire>>,
    side: usize,
}

impl Transport for LoopbackEnd {
    fn send(&mut self, payload: Vec<u8>) -> Result<(), NetError> {
        let mut wire = self.wire.borrow_mut();
        if !wire.connected {
            return Err(NetError::Disconnected);
        }

        if wire.should_drop() {
            wire.dropped += 1;
            log::debug!("Loopback dropped a {} byte message", payload.len());
            return Ok(());
        }

        let deliver_at = wire.now + wire.sample_latency();
        let sequence = wire.next_sequence;
        wire.next_sequence += 1;
        wire.inbound[1 - self.side].push(InFlight {
            deliver_at,
            sequence,
            payload,
        });
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<Vec<u8>>, NetError> {
        let mut wire = self.wire.borrow_mut();
        if !wire.connected {
            return Err(NetError::Disconnected);
        }

        let now = wire.now;
        let queue = &mut wire.inbound[self.side];
        let next = queue
            .iter()
            .enumerate()
            .filter(|(_, m)| m.deliver_at <= now)
            .min_by(|(_, a), (_, b)| {
                a.deliver_at
                    .total_cmp(&b.deliver_at)
                    .then(a.sequence.cmp(&b.sequence))
            })
            .map(|(i, _)| i);

        Ok(next.map(|i| queue.remove(i).payload))
    }
}
