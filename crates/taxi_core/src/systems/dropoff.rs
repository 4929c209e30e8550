//! Dropoff check: settles the fare, credits the wallet and despawns the
//! passenger once the taxi stops inside the dropoff radius. Runs only in
//! the going-to-dropoff phase.

use bevy_ecs::prelude::{Commands, Query, Res, ResMut};

use crate::clock::{GameClock, TickClock};
use crate::config::FareConfig;
use crate::ecs::{Outbox, Passenger, SimEvent, TaxiState, TripPhase, Wallet};
use crate::pricing::fare_for_passenger;
use crate::telemetry::{CompletedTripRecord, SimTelemetry};

use super::{ENGAGEMENT_RADIUS, STOP_SPEED};

#[allow(clippy::too_many_arguments)]
pub fn dropoff_system(
    mut commands: Commands,
    clock: Res<TickClock>,
    game_clock: Res<GameClock>,
    fare_config: Res<FareConfig>,
    taxi: Res<TaxiState>,
    mut phase: ResMut<TripPhase>,
    mut wallet: ResMut<Wallet>,
    mut telemetry: ResMut<SimTelemetry>,
    mut outbox: ResMut<Outbox>,
    passengers: Query<&Passenger>,
) {
    let TripPhase::GoingToDropoff(entity) = *phase else {
        return;
    };
    let Ok(passenger) = passengers.get(entity) else {
        *phase = TripPhase::FreeRoam;
        return;
    };

    if taxi.position.distance(passenger.dropoff) >= ENGAGEMENT_RADIUS
        || taxi.speed.abs() >= STOP_SPEED
    {
        return;
    }

    let fare = fare_for_passenger(&fare_config, passenger, clock.now_ms(), game_clock.hour());
    wallet.money += fare.total;

    log::info!(
        "dropped off {} (#{}): fare ${} -> balance ${}",
        passenger.name,
        passenger.id,
        fare.total,
        wallet.money
    );

    telemetry.record_trip(CompletedTripRecord {
        passenger_id: passenger.id,
        passenger_name: passenger.name,
        passenger_kind: passenger.kind,
        picked_up_at_ms: passenger.picked_up_at_ms.unwrap_or(0),
        dropped_off_at_ms: clock.now_ms(),
        fare,
    });
    outbox.push(SimEvent::PassengerDroppedOff {
        id: passenger.id,
        name: passenger.name,
        fare,
    });

    commands.entity(entity).despawn();
    *phase = TripPhase::FreeRoam;
}
