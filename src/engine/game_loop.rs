/// Battle tick timing
///
/// Implements a fixed timestep loop: wall-clock frame time is accumulated and
/// drained in whole ticks so combo timers, bar animation and scheduled round
/// transitions advance identically no matter how fast frames arrive.
use std::time::Duration;

/// Target battle update rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Fixed timestep accumulator
pub struct GameLoop {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Current frame number
    frame_count: u64,

    /// Total ticks handed out
    tick_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Feed an explicit frame duration, returns the number of fixed ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop the backlog we refused to simulate
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Dropping {:?} of tick backlog",
                self.accumulator - self.accumulator.min(FIXED_TIMESTEP_DURATION)
            );
            self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get the fixed timestep (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get total number of frames seen
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks handed out
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
    }

    #[test]
    fn test_fixed_timestep() {
        let game_loop = GameLoop::new();
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_exact_ticks_from_duration() {
        let mut game_loop = GameLoop::new();
        let ticks = game_loop.advance(FIXED_TIMESTEP_DURATION * 3);
        assert_eq!(ticks, 3);
        assert_eq!(game_loop.tick_count(), 3);
    }

    #[test]
    fn test_partial_frames_accumulate() {
        let mut game_loop = GameLoop::new();
        let half = FIXED_TIMESTEP_DURATION / 2;
        assert_eq!(game_loop.advance(half), 0);
        assert_eq!(game_loop.advance(half), 1);
    }

    #[test]
    fn test_max_ticks_limit() {
        let mut game_loop = GameLoop::new();

        // 300ms would allow 18 ticks
        let ticks = game_loop.advance(Duration::from_millis(300));
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);

        // Backlog is dropped rather than replayed next frame
        assert!(game_loop.advance(Duration::ZERO) <= 1);
    }
}
