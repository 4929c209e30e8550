use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

/// City generation parameters. Distances are in grid cell units unless
/// noted; `world_scale` converts cell units to world units.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct CityConfig {
    /// Number of street lines per axis (rows and columns).
    pub grid_size: usize,
    /// Cell width in grid units.
    pub cell_width: f32,
    /// Cell depth in grid units.
    pub cell_depth: f32,
    /// Grid-unit to world-unit scale factor.
    pub world_scale: f32,
    /// Minimum building height in world units.
    pub min_building_height: f32,
    /// Maximum building height in world units.
    pub max_building_height: f32,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            grid_size: 7,
            cell_width: 10.0,
            cell_depth: 10.0,
            world_scale: 20.0,
            min_building_height: 15.0,
            max_building_height: 60.0,
        }
    }
}

impl CityConfig {
    /// One cell edge in world units (width axis).
    pub fn cell_world_width(&self) -> f32 {
        self.cell_width * self.world_scale
    }

    /// One cell edge in world units (depth axis).
    pub fn cell_world_depth(&self) -> f32 {
        self.cell_depth * self.world_scale
    }
}

/// Arcade vehicle model. Velocity/turn values are per tick, not per
/// second; the tick loop runs one step per rendered frame.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Forward acceleration per tick while the accelerate signal is held.
    pub acceleration: f32,
    /// Forward speed clamp.
    pub max_speed: f32,
    /// Reverse speed clamp as a fraction of `max_speed`.
    pub reverse_fraction: f32,
    /// Heading change per tick while steering.
    pub turn_rate: f32,
    /// Velocity multiplier applied on coasting ticks.
    pub friction: f32,
    /// Speeds below this snap to zero while coasting.
    pub stop_epsilon: f32,
    /// Steering is ignored below this speed.
    pub turn_threshold: f32,
    /// Velocity multiplier applied while the handbrake is held.
    pub handbrake_factor: f32,
    /// Vehicle box expansion used for building collision tests.
    pub collision_margin: f32,
    /// Back-off distance applied along the reversed displacement on hit.
    pub collision_backoff: f32,
    /// Ride height above the ground surface.
    pub ride_height: f32,
    /// Minimum distance kept from every map edge.
    pub bounds_buffer: f32,
    /// Vehicle half extents (x, y, z) for the collision box.
    pub half_extents: [f32; 3],
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.08,
            max_speed: 5.0,
            reverse_fraction: 0.5,
            turn_rate: 0.024,
            friction: 0.994,
            stop_epsilon: 0.0005,
            turn_threshold: 0.015,
            handbrake_factor: 0.85,
            collision_margin: 0.8,
            collision_backoff: 0.5,
            ride_height: 8.0,
            bounds_buffer: 15.0,
            half_extents: [10.0, 8.0, 20.0],
        }
    }
}

/// Traffic light cycle and red-light enforcement parameters.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct TrafficConfig {
    pub green_secs: f32,
    pub yellow_secs: f32,
    pub red_secs: f32,
    /// Enforcement radius around the light position.
    pub violation_radius: f32,
    /// Minimum speed that counts as running the light.
    pub violation_min_speed: f32,
    /// Global cooldown between consecutive charges, in sim ms.
    pub violation_cooldown_ms: u64,
    /// Fine debited per violation.
    pub violation_fine: i64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            green_secs: 15.0,
            yellow_secs: 3.0,
            red_secs: 12.0,
            violation_radius: 25.0,
            violation_min_speed: 0.05,
            violation_cooldown_ms: 2000,
            violation_fine: 15,
        }
    }
}

/// Fare calculation parameters. See [`crate::pricing`] for the formula.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct FareConfig {
    /// World units per billed distance unit.
    pub distance_scale: f64,
    /// Fare per billed distance unit.
    pub per_distance_rate: f64,
    /// Expected trip seconds per billed distance unit; the ratio of
    /// actual to expected time drives the speed bonus and tip bands.
    pub expected_secs_per_unit: f64,
    /// Base fare roll range (inclusive).
    pub min_base_fare: i64,
    pub max_base_fare: i64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            distance_scale: 10.0,
            per_distance_rate: 2.0,
            expected_secs_per_unit: 8.0,
            min_base_fare: 25,
            max_base_fare: 39,
        }
    }
}

/// Passenger spawn-point selection parameters, in world units.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Upper bound on spawned passengers; fewer spawn when the city
    /// yields fewer eligible points.
    pub max_passengers: usize,
    /// Minimum pairwise distance between pickup points.
    pub min_separation: f32,
    /// Candidate centers must sit this far inside the map bounds.
    pub bounds_margin: f32,
    /// Lateral offset from the road center onto the sidewalk.
    pub sidewalk_offset: f32,
    /// Longitudinal spacing between candidates on one road.
    pub lane_offset: f32,
    /// Building boxes are expanded by this margin when rejecting points.
    pub building_margin: f32,
    /// Roads shorter than this yield no candidates.
    pub min_road_extent: f32,
    /// Roads shorter than this are not considered for the taxi start.
    pub min_start_road_extent: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            max_passengers: 12,
            min_separation: 80.0,
            bounds_margin: 150.0,
            sidewalk_offset: 15.0,
            lane_offset: 30.0,
            building_margin: 10.0,
            min_road_extent: 50.0,
            min_start_road_extent: 100.0,
        }
    }
}

/// Everything needed to build one session world. The seed drives city
/// layout, archetype choice and passenger placement, so two sessions
/// with equal params are identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionParams {
    pub seed: u64,
    pub starting_money: i64,
    /// In-game hour-of-day at session start.
    pub start_hour: f64,
    pub city: CityConfig,
    pub physics: PhysicsConfig,
    pub traffic: TrafficConfig,
    pub fare: FareConfig,
    pub spawn: SpawnConfig,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            seed: 0,
            starting_money: 250,
            start_hour: 6.0,
            city: CityConfig::default(),
            physics: PhysicsConfig::default(),
            traffic: TrafficConfig::default(),
            fare: FareConfig::default(),
            spawn: SpawnConfig::default(),
        }
    }
}
