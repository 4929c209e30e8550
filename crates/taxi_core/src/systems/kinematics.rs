//! Vehicle kinematics: one state-machine step per tick. Order matters
//! and mirrors the update loop contract: velocity from input, heading,
//! displacement, building collision resolution, ground projection, map
//! bounds clamp.

use bevy_ecs::prelude::{Res, ResMut};
use glam::Vec3;

use crate::city::MapBounds;
use crate::config::PhysicsConfig;
use crate::ecs::{InputSignals, TaxiState};
use crate::spatial::{Aabb, CollisionIndex};

fn vehicle_box(position: Vec3, physics: &PhysicsConfig) -> Aabb {
    Aabb::from_center_half_extents(position, Vec3::from_array(physics.half_extents))
}

/// Velocity update: throttle or friction, speed clamps, handbrake.
fn update_speed(taxi: &mut TaxiState, input: &InputSignals, physics: &PhysicsConfig) {
    let throttle = match (input.accelerate, input.brake) {
        (_, true) => -1.0,
        (true, false) => 1.0,
        _ => 0.0,
    };
    if throttle != 0.0 {
        taxi.speed += throttle * physics.acceleration;
    } else {
        taxi.speed *= physics.friction;
        if taxi.speed.abs() < physics.stop_epsilon {
            taxi.speed = 0.0;
        }
    }

    let max_reverse = physics.max_speed * physics.reverse_fraction;
    taxi.speed = taxi.speed.clamp(-max_reverse, physics.max_speed);

    if input.handbrake {
        taxi.speed *= physics.handbrake_factor;
    }
}

/// Heading update: steering engages above the turn threshold and flips
/// with the direction of travel, like a real car in reverse.
fn update_heading(taxi: &mut TaxiState, input: &InputSignals, physics: &PhysicsConfig) {
    if taxi.speed.abs() <= physics.turn_threshold {
        return;
    }
    let direction = taxi.speed.signum();
    if input.steer_left {
        taxi.heading += physics.turn_rate * direction;
    }
    if input.steer_right {
        taxi.heading -= physics.turn_rate * direction;
    }
}

/// Tests the displaced vehicle box against every building; on a hit the
/// velocity is zeroed and the vehicle backs off along the reversed
/// displacement instead of moving.
fn resolve_collision(
    taxi: &mut TaxiState,
    displacement: Vec3,
    collision: &CollisionIndex,
    physics: &PhysicsConfig,
) -> bool {
    if displacement.length() < 1e-4 {
        return false;
    }
    let next_box = vehicle_box(taxi.position, physics)
        .expanded(physics.collision_margin)
        .translated(displacement);
    if collision.box_intersects_building(&next_box) {
        taxi.speed = 0.0;
        taxi.position -= displacement.normalize() * physics.collision_backoff;
        return true;
    }
    false
}

/// Reprojects onto the ground and updates the on-road flag. With no
/// ground under the vehicle, hold it at ride height and mark it
/// off-road; this is a recoverable degraded state, not an error.
fn settle_on_ground(taxi: &mut TaxiState, collision: &CollisionIndex, physics: &PhysicsConfig) {
    match collision.project_to_ground(taxi.position) {
        Some(hit) => {
            taxi.position.y = hit.height + physics.ride_height;
            taxi.on_road = collision.is_on_road(taxi.position);
        }
        None => {
            taxi.position.y = taxi.position.y.max(physics.ride_height);
            taxi.on_road = false;
        }
    }
}

/// Clamps into the map bounds minus the buffer; any clamped axis also
/// kills the forward velocity.
fn enforce_bounds(taxi: &mut TaxiState, bounds: &MapBounds, physics: &PhysicsConfig) -> bool {
    let buffer = physics.bounds_buffer;
    let mut hit = false;
    if taxi.position.x < bounds.min_x + buffer {
        taxi.position.x = bounds.min_x + buffer;
        hit = true;
    } else if taxi.position.x > bounds.max_x - buffer {
        taxi.position.x = bounds.max_x - buffer;
        hit = true;
    }
    if taxi.position.z < bounds.min_z + buffer {
        taxi.position.z = bounds.min_z + buffer;
        hit = true;
    } else if taxi.position.z > bounds.max_z - buffer {
        taxi.position.z = bounds.max_z - buffer;
        hit = true;
    }
    if hit {
        taxi.speed = 0.0;
    }
    hit
}

pub fn kinematics_system(
    input: Res<InputSignals>,
    physics: Res<PhysicsConfig>,
    collision: Res<CollisionIndex>,
    bounds: Res<MapBounds>,
    mut taxi: ResMut<TaxiState>,
) {
    update_speed(&mut taxi, &input, &physics);
    update_heading(&mut taxi, &input, &physics);

    let displacement = taxi.displacement();
    if !resolve_collision(&mut taxi, displacement, &collision, &physics) {
        taxi.position += displacement;
    }

    settle_on_ground(&mut taxi, &collision, &physics);
    enforce_bounds(&mut taxi, &bounds, &physics);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn physics() -> PhysicsConfig {
        PhysicsConfig::default()
    }

    fn accelerate() -> InputSignals {
        InputSignals {
            accelerate: true,
            ..Default::default()
        }
    }

    #[test]
    fn speed_accumulates_and_clamps_forward() {
        let mut taxi = TaxiState::at(Vec3::ZERO);
        let physics = physics();
        for _ in 0..200 {
            update_speed(&mut taxi, &accelerate(), &physics);
        }
        assert_eq!(taxi.speed, physics.max_speed);
    }

    #[test]
    fn reverse_speed_clamps_to_half() {
        let mut taxi = TaxiState::at(Vec3::ZERO);
        let physics = physics();
        let reverse = InputSignals {
            brake: true,
            ..Default::default()
        };
        for _ in 0..200 {
            update_speed(&mut taxi, &reverse, &physics);
        }
        assert_eq!(taxi.speed, -physics.max_speed * physics.reverse_fraction);
    }

    #[test]
    fn coasting_decays_to_exact_zero() {
        let mut taxi = TaxiState::at(Vec3::ZERO);
        taxi.speed = 1.0;
        let physics = physics();
        let coast = InputSignals::default();
        for _ in 0..5000 {
            update_speed(&mut taxi, &coast, &physics);
        }
        assert_eq!(taxi.speed, 0.0);
    }

    #[test]
    fn steering_is_ignored_below_the_threshold() {
        let mut taxi = TaxiState::at(Vec3::ZERO);
        taxi.speed = 0.01;
        let physics = physics();
        let steer = InputSignals {
            steer_left: true,
            ..Default::default()
        };
        update_heading(&mut taxi, &steer, &physics);
        assert_eq!(taxi.heading, 0.0);
    }

    #[test]
    fn steering_reverses_with_travel_direction() {
        let physics = physics();
        let steer = InputSignals {
            steer_left: true,
            ..Default::default()
        };

        let mut forward = TaxiState::at(Vec3::ZERO);
        forward.speed = 1.0;
        update_heading(&mut forward, &steer, &physics);
        assert!(forward.heading > 0.0);

        let mut backward = TaxiState::at(Vec3::ZERO);
        backward.speed = -1.0;
        update_heading(&mut backward, &steer, &physics);
        assert!(backward.heading < 0.0);
    }

    #[test]
    fn collision_blocks_the_move_and_zeroes_speed() {
        let physics = physics();
        let collision = CollisionIndex {
            buildings: vec![Aabb::new(
                Vec3::new(14.0, 0.0, -50.0),
                Vec3::new(100.0, 60.0, 50.0),
            )],
            surfaces: vec![],
        };
        let mut taxi = TaxiState::at(Vec3::new(0.0, 8.0, 0.0));
        taxi.speed = 5.0;
        taxi.heading = std::f32::consts::FRAC_PI_2; // facing +x

        let displacement = taxi.displacement();
        let blocked = resolve_collision(&mut taxi, displacement, &collision, &physics);
        assert!(blocked);
        assert_eq!(taxi.speed, 0.0);
        // Backed off along the reversed displacement.
        assert!(taxi.position.x < 0.0);

        let settled = vehicle_box(taxi.position, &physics).expanded(physics.collision_margin);
        assert!(!collision.box_intersects_building(&settled));
    }

    #[test]
    fn bounds_clamp_pins_position_and_velocity() {
        let physics = physics();
        let bounds = MapBounds {
            min_x: -200.0,
            max_x: 1400.0,
            min_z: -200.0,
            max_z: 1400.0,
        };
        let mut taxi = TaxiState::at(Vec3::new(-500.0, 8.0, 0.0));
        taxi.speed = -2.5;
        assert!(enforce_bounds(&mut taxi, &bounds, &physics));
        assert_eq!(taxi.position.x, bounds.min_x + physics.bounds_buffer);
        assert_eq!(taxi.speed, 0.0);
    }

    #[test]
    fn missing_ground_holds_ride_height_and_flags_off_road() {
        let physics = physics();
        let collision = CollisionIndex::default();
        let mut taxi = TaxiState::at(Vec3::new(0.0, 2.0, 0.0));
        taxi.on_road = true;
        settle_on_ground(&mut taxi, &collision, &physics);
        assert_eq!(taxi.position.y, physics.ride_height);
        assert!(!taxi.on_road);
    }
}
