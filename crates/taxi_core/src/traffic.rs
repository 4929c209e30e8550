//! Traffic light scheduler. Each light owns an independent elapsed
//! timer; the phase is a pure projection of `timer mod cycle`, never
//! stored, so replaying or fast-forwarding a timer reproduces the same
//! phase. Red-light violations share one global cooldown across lights.

use bevy_ecs::prelude::{Res, ResMut, Resource};
use glam::Vec3;
use rand::Rng;

use crate::clock::{TickClock, TickDelta};
use crate::config::TrafficConfig;
use crate::ecs::{Outbox, SimEvent, TaxiState, Wallet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightPhase {
    Green,
    Yellow,
    Red,
}

/// One intersection light. Created at generation time, never destroyed.
#[derive(Debug, Clone)]
pub struct TrafficLight {
    pub position: Vec3,
    /// Elapsed seconds, monotonically increasing.
    pub timer: f32,
    pub green_secs: f32,
    pub yellow_secs: f32,
    pub red_secs: f32,
}

impl TrafficLight {
    pub fn new(position: Vec3, config: &TrafficConfig, initial_timer: f32) -> Self {
        Self {
            position,
            timer: initial_timer,
            green_secs: config.green_secs,
            yellow_secs: config.yellow_secs,
            red_secs: config.red_secs,
        }
    }

    pub fn cycle_secs(&self) -> f32 {
        self.green_secs + self.yellow_secs + self.red_secs
    }

    /// Phase derived from the timer; `[0, green)` is green,
    /// `[green, green+yellow)` yellow, the rest red.
    pub fn phase(&self) -> LightPhase {
        let at = self.timer.rem_euclid(self.cycle_secs());
        if at < self.green_secs {
            LightPhase::Green
        } else if at < self.green_secs + self.yellow_secs {
            LightPhase::Yellow
        } else {
            LightPhase::Red
        }
    }
}

/// All intersection lights, one per (col, row) street crossing.
#[derive(Debug, Default, Resource)]
pub struct TrafficLights(pub Vec<TrafficLight>);

impl TrafficLights {
    /// Builds one light per intersection with a randomized timer offset
    /// so the city does not blink in unison.
    pub fn from_intersections<R: Rng>(
        intersections: &[Vec3],
        config: &TrafficConfig,
        rng: &mut R,
    ) -> Self {
        Self(
            intersections
                .iter()
                .map(|&p| TrafficLight::new(p, config, rng.gen_range(0.0..config.green_secs)))
                .collect(),
        )
    }
}

/// Sim time of the last red-light charge; one window for all lights.
#[derive(Debug, Default, Clone, Copy, Resource)]
pub struct ViolationCooldown {
    pub last_charged_ms: Option<u64>,
}

/// Advances every light timer and charges red-light violations: the
/// light is red, the taxi is close, on-road, still moving, and the
/// global cooldown has elapsed.
pub fn traffic_light_system(
    delta: Res<TickDelta>,
    clock: Res<TickClock>,
    config: Res<TrafficConfig>,
    taxi: Res<TaxiState>,
    mut lights: ResMut<TrafficLights>,
    mut cooldown: ResMut<ViolationCooldown>,
    mut wallet: ResMut<Wallet>,
    mut outbox: ResMut<Outbox>,
) {
    let now_ms = clock.now_ms();
    for light in &mut lights.0 {
        light.timer += delta.0;

        if light.phase() != LightPhase::Red {
            continue;
        }
        if !taxi.on_road
            || taxi.position.distance(light.position) >= config.violation_radius
            || taxi.speed.abs() <= config.violation_min_speed
        {
            continue;
        }
        let off_cooldown = cooldown
            .last_charged_ms
            .map(|t| now_ms.saturating_sub(t) > config.violation_cooldown_ms)
            .unwrap_or(true);
        if !off_cooldown {
            continue;
        }

        wallet.money -= config.violation_fine;
        cooldown.last_charged_ms = Some(now_ms);
        log::debug!("red light violation at {:?}, fine {}", light.position, config.violation_fine);
        outbox.push(SimEvent::RedLightViolation {
            fine: config.violation_fine,
            light_position: light.position,
        });
    }
}
