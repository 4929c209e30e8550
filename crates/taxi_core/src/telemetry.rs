//! Session telemetry: a record per completed trip, kept for the whole
//! session so hosts can dump or inspect earnings after the run.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::ecs::PassengerKind;
use crate::pricing::FareBreakdown;

#[derive(Debug, Clone, Serialize)]
pub struct CompletedTripRecord {
    pub passenger_id: u32,
    pub passenger_name: &'static str,
    pub passenger_kind: PassengerKind,
    pub picked_up_at_ms: u64,
    pub dropped_off_at_ms: u64,
    pub fare: FareBreakdown,
}

impl CompletedTripRecord {
    pub fn trip_secs(&self) -> f64 {
        self.dropped_off_at_ms.saturating_sub(self.picked_up_at_ms) as f64 / 1000.0
    }
}

#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub completed_trips: Vec<CompletedTripRecord>,
}

impl SimTelemetry {
    pub fn record_trip(&mut self, record: CompletedTripRecord) {
        self.completed_trips.push(record);
    }

    pub fn total_earned(&self) -> i64 {
        self.completed_trips.iter().map(|r| r.fare.total).sum()
    }
}
