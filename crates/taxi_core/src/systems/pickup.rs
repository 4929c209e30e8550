//! Pickup check: fires when the taxi is inside the pickup radius and
//! near-stationary while a passenger is selected. Any other trip phase
//! is a no-op.

use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::TickClock;
use crate::ecs::{Outbox, Passenger, SimEvent, TaxiState, TripPhase};

use super::{ENGAGEMENT_RADIUS, STOP_SPEED};

pub fn pickup_system(
    clock: Res<TickClock>,
    taxi: Res<TaxiState>,
    mut phase: ResMut<TripPhase>,
    mut passengers: Query<&mut Passenger>,
    mut outbox: ResMut<Outbox>,
) {
    let TripPhase::GoingToPickup(entity) = *phase else {
        return;
    };
    let Ok(mut passenger) = passengers.get_mut(entity) else {
        // Selected passenger no longer exists; drop back to free roam.
        *phase = TripPhase::FreeRoam;
        return;
    };

    if taxi.position.distance(passenger.pickup) >= ENGAGEMENT_RADIUS
        || taxi.speed.abs() >= STOP_SPEED
    {
        return;
    }

    passenger.picked_up_at_ms = Some(clock.now_ms());
    *phase = TripPhase::GoingToDropoff(entity);
    outbox.push(SimEvent::PassengerPickedUp {
        id: passenger.id,
        name: passenger.name,
        kind: passenger.kind,
        dropoff: passenger.dropoff,
    });
}
