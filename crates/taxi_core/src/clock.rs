//! Simulation clocks. [`TickClock`] accumulates elapsed simulation time
//! across ticks; [`GameClock`] tracks the in-game hour-of-day used by the
//! fare calculator. Both are plain resources advanced by the runner --
//! there are no wall-clock deadlines anywhere in the core.

use bevy_ecs::prelude::Resource;

pub const ONE_SEC_MS: u64 = 1000;

/// In-game hours that pass per real second (0.0001 per frame at 60 fps).
pub const GAME_HOURS_PER_SECOND: f64 = 0.006;

/// Monotonic simulation time, advanced once per tick by the runner.
#[derive(Debug, Default, Clone, Copy, Resource)]
pub struct TickClock {
    now_ms: u64,
    ticks: u64,
}

impl TickClock {
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn advance(&mut self, delta_secs: f32) {
        self.now_ms += (delta_secs as f64 * ONE_SEC_MS as f64).round() as u64;
        self.ticks += 1;
    }
}

/// Seconds elapsed in the current tick; inserted by the runner before
/// the schedule runs.
#[derive(Debug, Default, Clone, Copy, Resource)]
pub struct TickDelta(pub f32);

/// Fractional hour-of-day, wrapping at 24.
#[derive(Debug, Clone, Copy, Resource)]
pub struct GameClock {
    pub hours: f64,
}

impl GameClock {
    pub fn new(start_hour: f64) -> Self {
        Self {
            hours: start_hour.rem_euclid(24.0),
        }
    }

    pub fn hour(&self) -> u32 {
        self.hours as u32
    }

    pub fn advance(&mut self, delta_secs: f32) {
        self.hours += delta_secs as f64 * GAME_HOURS_PER_SECOND;
        if self.hours >= 24.0 {
            self.hours -= 24.0;
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_clock_accumulates_ms() {
        let mut clock = TickClock::default();
        clock.advance(0.016);
        clock.advance(0.016);
        assert_eq!(clock.now_ms(), 32);
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn game_clock_wraps_at_midnight() {
        let mut clock = GameClock::new(23.999);
        // 0.001 in-game hours is 1/6 s of real time.
        clock.advance(1.0);
        assert!(clock.hours < 1.0);
        assert_eq!(clock.hour(), 0);
    }

    #[test]
    fn game_clock_hour_truncates() {
        let clock = GameClock::new(17.75);
        assert_eq!(clock.hour(), 17);
    }
}
