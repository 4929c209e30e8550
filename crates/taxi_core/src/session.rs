//! Session assembly: validates [`SessionParams`], generates the city,
//! spawns the passenger roster and the taxi, and inserts every resource
//! the tick schedule reads.

use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::city::generate_city;
use crate::clock::{GameClock, TickClock, TickDelta};
use crate::config::SessionParams;
use crate::ecs::{InputSignals, Outbox, TaxiState, TripPhase, Wallet};
use crate::error::SessionError;
use crate::spawner::{self, PASSENGER_ROSTER_CAP};
use crate::telemetry::SimTelemetry;
use crate::traffic::{TrafficLights, ViolationCooldown};

fn validate(params: &SessionParams) -> Result<(), SessionError> {
    if params.city.grid_size < 2 {
        return Err(SessionError::GridTooSmall(params.city.grid_size));
    }
    if params.spawn.max_passengers > PASSENGER_ROSTER_CAP {
        return Err(SessionError::TooManyPassengers(params.spawn.max_passengers));
    }
    if params.traffic.green_secs <= 0.0
        || params.traffic.yellow_secs < 0.0
        || params.traffic.red_secs < 0.0
    {
        return Err(SessionError::InvalidLightPhases);
    }
    if params.city.min_building_height >= params.city.max_building_height {
        return Err(SessionError::EmptyHeightRange);
    }
    Ok(())
}

/// Builds a fresh session world from the given parameters. All
/// randomness comes from one seeded rng, so equal params always produce
/// an identical world.
pub fn build_session(params: &SessionParams) -> Result<World, SessionError> {
    validate(params)?;

    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut world = World::new();

    let (city, collision, bounds) = generate_city(&params.city, &mut rng);

    let lights = TrafficLights::from_intersections(
        &city.roads.intersections,
        &params.traffic,
        &mut rng,
    );

    let passengers = spawner::spawn_passengers(
        &city.roads,
        &collision,
        &bounds,
        &params.spawn,
        &params.fare,
        &mut rng,
    );
    let start = spawner::place_taxi(
        &city.roads,
        &collision,
        &bounds,
        &passengers,
        &params.physics,
        &params.spawn,
    );

    log::info!(
        "session seed {}: {} passengers, {} lights, taxi at ({:.0}, {:.0})",
        params.seed,
        passengers.len(),
        lights.0.len(),
        start.x,
        start.z
    );

    for passenger in passengers {
        world.spawn(passenger);
    }

    world.insert_resource(params.city.clone());
    world.insert_resource(params.physics.clone());
    world.insert_resource(params.traffic.clone());
    world.insert_resource(params.fare.clone());
    world.insert_resource(params.spawn.clone());

    world.insert_resource(city);
    world.insert_resource(collision);
    world.insert_resource(bounds);
    world.insert_resource(lights);
    world.insert_resource(ViolationCooldown::default());

    world.insert_resource(TickClock::default());
    world.insert_resource(TickDelta::default());
    world.insert_resource(GameClock::new(params.start_hour));
    world.insert_resource(InputSignals::default());

    world.insert_resource(TaxiState::at(start));
    world.insert_resource(TripPhase::default());
    world.insert_resource(Wallet {
        money: params.starting_money,
    });
    world.insert_resource(Outbox::default());
    world.insert_resource(SimTelemetry::default());

    Ok(world)
}
