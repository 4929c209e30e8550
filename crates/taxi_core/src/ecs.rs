use bevy_ecs::prelude::{Component, Entity, Resource};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::pricing::FareBreakdown;

/// Passenger archetypes with their fare and tip multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassengerKind {
    Businessman,
    Tourist,
    Student,
}

impl PassengerKind {
    pub const ALL: [PassengerKind; 3] = [
        PassengerKind::Businessman,
        PassengerKind::Tourist,
        PassengerKind::Student,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PassengerKind::Businessman => "Businessman",
            PassengerKind::Tourist => "Tourist",
            PassengerKind::Student => "Student",
        }
    }

    /// Multiplier applied to the base fare.
    pub fn fare_multiplier(&self) -> f64 {
        match self {
            PassengerKind::Businessman => 1.5,
            PassengerKind::Tourist => 1.0,
            PassengerKind::Student => 0.8,
        }
    }

    /// Multiplier applied to the tip fraction.
    pub fn tip_multiplier(&self) -> f64 {
        match self {
            PassengerKind::Businessman => 1.8,
            PassengerKind::Tourist => 1.2,
            PassengerKind::Student => 0.6,
        }
    }
}

/// One waiting (or riding) passenger. Spawned at world-generation time
/// and despawned on successful dropoff.
#[derive(Debug, Clone, Component)]
pub struct Passenger {
    pub id: u32,
    pub name: &'static str,
    pub kind: PassengerKind,
    pub base_fare: i64,
    /// Curbside pickup point (y = 0).
    pub pickup: Vec3,
    /// Destination point (y = 0).
    pub dropoff: Vec3,
    /// Sim time when the passenger boarded; `None` until picked up.
    pub picked_up_at_ms: Option<u64>,
}

/// The single player vehicle. Mutated only by the kinematics system.
#[derive(Debug, Clone, Copy, Resource)]
pub struct TaxiState {
    pub position: Vec3,
    /// Signed forward speed; the 3D displacement is derived from it and
    /// the heading each tick.
    pub speed: f32,
    /// Heading angle around +Y, radians. Zero faces +Z.
    pub heading: f32,
    pub on_road: bool,
}

impl TaxiState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            speed: 0.0,
            heading: 0.0,
            on_road: true,
        }
    }

    /// Displacement the vehicle would cover this tick.
    pub fn displacement(&self) -> Vec3 {
        Vec3::new(
            self.heading.sin() * self.speed,
            0.0,
            self.heading.cos() * self.speed,
        )
    }
}

/// Trip lifecycle. The engaged variants carry the passenger entity, so
/// a current passenger exists exactly when the phase is not `FreeRoam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Resource)]
pub enum TripPhase {
    #[default]
    FreeRoam,
    GoingToPickup(Entity),
    GoingToDropoff(Entity),
}

impl TripPhase {
    pub fn current_passenger(&self) -> Option<Entity> {
        match self {
            TripPhase::FreeRoam => None,
            TripPhase::GoingToPickup(e) | TripPhase::GoingToDropoff(e) => Some(*e),
        }
    }
}

/// Session bank balance. Fines can push it negative.
#[derive(Debug, Clone, Copy, Resource)]
pub struct Wallet {
    pub money: i64,
}

/// Named boolean input signals for one tick, as provided by the host's
/// input layer. The core never polls devices.
#[derive(Debug, Default, Clone, Copy, Resource)]
pub struct InputSignals {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub handbrake: bool,
}

/// Structured events for the host UI (notifications, markers, HUD).
/// The core only emits these; rendering them is a collaborator concern.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    PassengerSelected {
        id: u32,
        name: &'static str,
        kind: PassengerKind,
        pickup: Vec3,
    },
    PassengerPickedUp {
        id: u32,
        name: &'static str,
        kind: PassengerKind,
        dropoff: Vec3,
    },
    PassengerDroppedOff {
        id: u32,
        name: &'static str,
        fare: FareBreakdown,
    },
    RedLightViolation {
        fine: i64,
        light_position: Vec3,
    },
}

/// Outbound event queue; the host drains it after each tick.
#[derive(Debug, Default, Resource)]
pub struct Outbox(pub Vec<SimEvent>);

impl Outbox {
    pub fn push(&mut self, event: SimEvent) {
        self.0.push(event);
    }

    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.0)
    }
}
