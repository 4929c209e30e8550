pub mod dropoff;
pub mod game_time;
pub mod kinematics;
pub mod pickup;

/// Pickup/dropoff trigger radius around the marker point.
pub const ENGAGEMENT_RADIUS: f32 = 15.0;
/// The vehicle must be near-stationary for pickup/dropoff to fire.
pub const STOP_SPEED: f32 = 0.05;
