//! Session runner: advances the clocks and drives the per-tick schedule.
//!
//! Hosts call [`run_tick`] once per frame with the current input state and
//! the elapsed real seconds, then drain [`Outbox`] for anything that
//! happened during the tick.

use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{TickClock, TickDelta};
use crate::ecs::{InputSignals, Outbox, Passenger, SimEvent, TripPhase};
use crate::systems::{
    dropoff::dropoff_system, game_time::game_time_system, kinematics::kinematics_system,
    pickup::pickup_system,
};
use crate::traffic::traffic_light_system;

/// Builds the per-tick schedule. Kinematics settle the taxi before the
/// traffic and trip systems read its position; deferred despawns from the
/// dropoff system apply when the schedule finishes.
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            kinematics_system,
            traffic_light_system,
            game_time_system,
            pickup_system,
            dropoff_system,
        )
            .chain(),
    );
    schedule
}

/// Runs one simulation tick: inserts the input and delta, advances the
/// tick clock, then runs the schedule. Returns the events the tick
/// produced, drained from the outbox.
pub fn run_tick(
    world: &mut World,
    schedule: &mut Schedule,
    input: InputSignals,
    delta_secs: f32,
) -> Vec<SimEvent> {
    world.insert_resource(input);
    world.insert_resource(TickDelta(delta_secs));
    world.resource_mut::<TickClock>().advance(delta_secs);
    schedule.run(world);
    world.resource_mut::<Outbox>().drain()
}

/// Selects the waiting passenger with the given id as the active trip.
/// Only valid while free-roaming; returns `false` if another trip is in
/// progress or no such passenger exists.
pub fn select_passenger(world: &mut World, id: u32) -> bool {
    if *world.resource::<TripPhase>() != TripPhase::FreeRoam {
        return false;
    }

    let mut query = world.query::<(bevy_ecs::prelude::Entity, &Passenger)>();
    let found = query
        .iter(world)
        .find(|(_, p)| p.id == id)
        .map(|(entity, p)| (entity, p.name, p.kind, p.pickup));

    let Some((entity, name, kind, pickup)) = found else {
        return false;
    };

    world.insert_resource(TripPhase::GoingToPickup(entity));
    world.resource_mut::<Outbox>().push(SimEvent::PassengerSelected {
        id,
        name,
        kind,
        pickup,
    });
    log::debug!("selected passenger {} (#{})", name, id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    use crate::config::SessionParams;
    use crate::ecs::TaxiState;
    use crate::session::build_session;

    #[test]
    fn idle_ticks_advance_both_clocks() {
        let mut world = build_session(&SessionParams::default()).expect("session");
        let mut schedule = tick_schedule();

        for _ in 0..10 {
            let events = run_tick(&mut world, &mut schedule, InputSignals::default(), 0.1);
            assert!(events.is_empty());
        }

        assert_eq!(world.resource::<TickClock>().now_ms(), 1000);
        let hours = world.resource::<crate::clock::GameClock>().hours;
        assert!((hours - 6.006).abs() < 1e-9);
    }

    #[test]
    fn select_passenger_only_from_free_roam() {
        let mut world = build_session(&SessionParams::default()).expect("session");

        assert!(!select_passenger(&mut world, 9999));
        assert!(select_passenger(&mut world, 0));
        // Already en route; a second selection is refused.
        assert!(!select_passenger(&mut world, 1));

        let events = world.resource_mut::<Outbox>().drain();
        assert!(matches!(
            events.as_slice(),
            [SimEvent::PassengerSelected { id: 0, .. }]
        ));
    }

    #[test]
    fn full_trip_teleport_walkthrough() {
        let mut world = build_session(&SessionParams::default()).expect("session");
        let mut schedule = tick_schedule();

        assert!(select_passenger(&mut world, 0));
        world.resource_mut::<Outbox>().drain();

        let entity = match *world.resource::<TripPhase>() {
            TripPhase::GoingToPickup(e) => e,
            _ => unreachable!(),
        };
        let (pickup, dropoff) = {
            let p = world.entity(entity).get::<Passenger>().expect("passenger");
            (p.pickup, p.dropoff)
        };

        // Park the taxi at the pickup; off the road grid is fine here
        // since the trip systems only gate on distance and speed.
        let park = |world: &mut World, spot: Vec3| {
            let mut taxi = world.resource_mut::<TaxiState>();
            taxi.position = spot + Vec3::new(0.0, 8.0, 0.0);
            taxi.speed = 0.0;
        };

        park(&mut world, pickup);
        let events = run_tick(&mut world, &mut schedule, InputSignals::default(), 0.1);
        assert!(matches!(
            events.as_slice(),
            [SimEvent::PassengerPickedUp { id: 0, .. }]
        ));

        park(&mut world, dropoff);
        let events = run_tick(&mut world, &mut schedule, InputSignals::default(), 0.1);
        assert!(matches!(
            events.as_slice(),
            [SimEvent::PassengerDroppedOff { id: 0, .. }]
        ));
        assert_eq!(*world.resource::<TripPhase>(), TripPhase::FreeRoam);
    }
}
