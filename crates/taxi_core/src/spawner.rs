//! Passenger spawn placement and the taxi start position. Candidate
//! points come from road surfaces, filtered away from buildings and from
//! each other; each passenger is paired with the farthest available
//! point as their dropoff, so trips cross the city.

use glam::Vec3;
use rand::Rng;

use crate::city::roads::RoadAxis;
use crate::city::{MapBounds, RoadNetwork, RoadSegment};
use crate::config::{FareConfig, PhysicsConfig, SpawnConfig};
use crate::ecs::{Passenger, PassengerKind};
use crate::spatial::CollisionIndex;

/// Hard cap on the passenger roster.
pub const PASSENGER_ROSTER_CAP: usize = 12;

/// Display names, cycled by passenger id.
const PASSENGER_NAMES: [&str; 15] = [
    "John", "Emma", "Michael", "Sarah", "David", "Lisa", "James", "Anna", "Robert", "Maria",
    "Tom", "Sophie", "Chris", "Laura", "Kevin",
];

/// Candidate pickup height used for the building-interior test.
const CANDIDATE_PROBE_Y: f32 = 5.0;

fn segment_extent(segment: &RoadSegment) -> f32 {
    segment.length.max(segment.width)
}

/// Curbside candidate points along one road segment: three longitudinal
/// offsets, both sidewalk sides.
fn candidate_points(segment: &RoadSegment, config: &SpawnConfig) -> Vec<Vec3> {
    let c = segment.center;
    let (size_x, size_z) = match segment.axis {
        RoadAxis::Horizontal => (segment.length, segment.width),
        RoadAxis::Vertical => (segment.width, segment.length),
    };
    let mut points = Vec::with_capacity(6);
    for j in 0..3 {
        let offset = (j as f32 - 1.0) * config.lane_offset;
        if size_x > size_z {
            points.push(Vec3::new(c.x + offset, 0.0, c.z + config.sidewalk_offset));
            points.push(Vec3::new(c.x + offset, 0.0, c.z - config.sidewalk_offset));
        } else {
            points.push(Vec3::new(c.x + config.sidewalk_offset, 0.0, c.z + offset));
            points.push(Vec3::new(c.x - config.sidewalk_offset, 0.0, c.z + offset));
        }
    }
    points
}

/// Eligible spawn points: on a long-enough road, well inside the map,
/// clear of (expanded) building boxes, and pairwise separated.
fn eligible_points(
    roads: &RoadNetwork,
    collision: &CollisionIndex,
    bounds: &MapBounds,
    config: &SpawnConfig,
) -> Vec<Vec3> {
    let mut candidates = Vec::new();
    for segment in &roads.segments {
        if segment_extent(segment) < config.min_road_extent {
            continue;
        }
        let c = segment.center;
        let margin = config.bounds_margin;
        if c.x < bounds.min_x + margin
            || c.x > bounds.max_x - margin
            || c.z < bounds.min_z + margin
            || c.z > bounds.max_z - margin
        {
            continue;
        }
        candidates.extend(candidate_points(segment, config));
    }

    candidates.retain(|p| {
        let probe = Vec3::new(p.x, CANDIDATE_PROBE_Y, p.z);
        !collision.is_inside_any_building(probe, config.building_margin)
    });

    // Greedy pairwise separation filter.
    let mut separated: Vec<Vec3> = Vec::new();
    for point in candidates {
        let too_close = separated
            .iter()
            .any(|other| point.distance(*other) < config.min_separation);
        if !too_close {
            separated.push(point);
        }
    }
    separated
}

/// Spawns up to `config.max_passengers` passengers (never more than
/// [`PASSENGER_ROSTER_CAP`]) on eligible road points. Degrades to fewer
/// when the city yields too few points, and to none when fewer than two
/// points exist, since a dropoff must differ from its pickup.
pub fn spawn_passengers<R: Rng>(
    roads: &RoadNetwork,
    collision: &CollisionIndex,
    bounds: &MapBounds,
    config: &SpawnConfig,
    fare: &FareConfig,
    rng: &mut R,
) -> Vec<Passenger> {
    let mut pool = eligible_points(roads, collision, bounds, config);
    let requested = config.max_passengers.min(PASSENGER_ROSTER_CAP);
    let count = requested.min(pool.len());
    if count < requested {
        log::warn!(
            "only {} eligible spawn points for {} requested passengers",
            pool.len(),
            requested
        );
    }
    // Every trip needs a dropoff distinct from its pickup, so a
    // one-point city spawns nobody.
    if count < 2 {
        return Vec::new();
    }

    let mut selected = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.gen_range(0..pool.len());
        selected.push(pool.swap_remove(index));
    }

    selected
        .iter()
        .enumerate()
        .map(|(index, &pickup)| {
            // Farthest other selected point; at least one other exists
            // because we never select fewer than two.
            let dropoff = selected
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, p)| *p)
                .max_by(|a, b| pickup.distance(*a).total_cmp(&pickup.distance(*b)))
                .unwrap_or(pickup);

            let kind = PassengerKind::ALL[rng.gen_range(0..PassengerKind::ALL.len())];
            Passenger {
                id: index as u32,
                name: PASSENGER_NAMES[index % PASSENGER_NAMES.len()],
                kind,
                base_fare: rng.gen_range(fare.min_base_fare..=fare.max_base_fare),
                pickup,
                dropoff,
                picked_up_at_ms: None,
            }
        })
        .collect()
}

/// Picks the taxi start: the widest, most central road clear of
/// buildings, preferring spots away from waiting passengers. Falls back
/// to the bounds center when no road qualifies.
pub fn place_taxi(
    roads: &RoadNetwork,
    collision: &CollisionIndex,
    bounds: &MapBounds,
    passengers: &[Passenger],
    physics: &PhysicsConfig,
    config: &SpawnConfig,
) -> Vec3 {
    let center = bounds.center();
    let mut best: Option<(f32, Vec3)> = None;

    for segment in &roads.segments {
        let extent = segment_extent(segment);
        if extent < config.min_start_road_extent {
            continue;
        }
        let spawn = Vec3::new(segment.center.x, physics.ride_height, segment.center.z);

        let probe = crate::spatial::Aabb::from_center_half_extents(spawn, Vec3::splat(10.0));
        if collision.box_intersects_building(&probe) {
            continue;
        }

        let nearest_pickup = passengers
            .iter()
            .map(|p| spawn.distance(p.pickup))
            .fold(f32::INFINITY, f32::min);
        let centrality = 100.0
            - ((segment.center.x - center.x).abs() * 0.05
                + (segment.center.z - center.z).abs() * 0.05);
        let score = extent + centrality + nearest_pickup * 0.5;

        if best.map(|(s, _)| score > s).unwrap_or(true) {
            best = Some((score, spawn));
        }
    }

    best.map(|(_, spawn)| spawn).unwrap_or(Vec3::new(
        center.x,
        physics.ride_height,
        center.z,
    ))
}
