#![allow(dead_code)]

use bevy_ecs::prelude::{Schedule, World};
use taxi_core::config::SessionParams;
use taxi_core::ecs::{InputSignals, SimEvent};
use taxi_core::runner::{run_tick, tick_schedule};
use taxi_core::session::build_session;

/// Builds a deterministic session world for the given seed with the
/// default parameters.
pub fn seeded_session(seed: u64) -> World {
    let params = SessionParams {
        seed,
        ..SessionParams::default()
    };
    build_session(&params).expect("default params build")
}

/// Owns a reusable tick schedule so tests can step the session without
/// rebuilding the system graph each tick.
pub struct TickRunner {
    schedule: Schedule,
}

impl Default for TickRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TickRunner {
    pub fn new() -> Self {
        Self {
            schedule: tick_schedule(),
        }
    }

    /// Runs one tick and returns the events it produced.
    pub fn tick(&mut self, world: &mut World, input: InputSignals, delta_secs: f32) -> Vec<SimEvent> {
        run_tick(world, &mut self.schedule, input, delta_secs)
    }

    /// Runs `count` identical ticks, collecting every event.
    pub fn tick_many(
        &mut self,
        world: &mut World,
        input: InputSignals,
        delta_secs: f32,
        count: usize,
    ) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..count {
            events.extend(self.tick(world, input, delta_secs));
        }
        events
    }
}

/// Input held down for driving straight ahead.
pub fn throttle() -> InputSignals {
    InputSignals {
        accelerate: true,
        ..Default::default()
    }
}
