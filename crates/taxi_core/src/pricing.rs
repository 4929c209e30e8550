//! Fare calculation. A pure function of the passenger, the elapsed trip
//! time and the in-game hour; the same ratio bands drive both the speed
//! bonus and the base tip fraction.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::FareConfig;
use crate::ecs::{Passenger, PassengerKind};

/// Ratio thresholds of actual to expected trip time, fastest first.
const RATIO_BANDS: [f64; 5] = [0.5, 0.7, 1.0, 1.3, 2.0];
/// Flat bonus per band; anything slower than the fourth band earns none.
const SPEED_BONUS: [i64; 5] = [50, 35, 20, 10, 0];
/// Base tip fraction per band, before the passenger-type multiplier.
const TIP_FRACTION: [f64; 6] = [0.5, 0.35, 0.25, 0.15, 0.05, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub base: i64,
    pub speed_bonus: i64,
    pub tip: i64,
    pub total: i64,
}

/// Surcharge for the in-game hour: night, evening rush, morning rush.
pub fn time_of_day_multiplier(hour: u32) -> f64 {
    if hour >= 20 || hour < 6 {
        1.8
    } else if (17..20).contains(&hour) {
        1.4
    } else if (7..9).contains(&hour) {
        1.3
    } else {
        1.0
    }
}

fn band_index(trip_secs: f64, expected_secs: f64) -> usize {
    RATIO_BANDS
        .iter()
        .position(|limit| trip_secs < expected_secs * limit)
        .unwrap_or(RATIO_BANDS.len())
}

/// Billed distance between two points, in fare units.
pub fn billed_distance(config: &FareConfig, pickup: Vec3, dropoff: Vec3) -> f64 {
    (dropoff - pickup).length() as f64 / config.distance_scale
}

/// Computes the full fare for a finished trip.
///
/// `base = round((baseFare + distance * rate) * type * timeOfDay)`,
/// `tip = round((base + bonus) * tipFraction * typeTip)`, and the total
/// is their sum plus the bonus.
pub fn calculate_fare(
    config: &FareConfig,
    kind: PassengerKind,
    base_fare: i64,
    pickup: Vec3,
    dropoff: Vec3,
    trip_secs: f64,
    hour: u32,
) -> FareBreakdown {
    let distance = billed_distance(config, pickup, dropoff);
    let expected_secs = distance * config.expected_secs_per_unit;

    let band = band_index(trip_secs, expected_secs);
    let speed_bonus = SPEED_BONUS.get(band).copied().unwrap_or(0);
    let tip_fraction = TIP_FRACTION[band] * kind.tip_multiplier();

    let base = ((base_fare as f64 + distance * config.per_distance_rate)
        * kind.fare_multiplier()
        * time_of_day_multiplier(hour))
    .round() as i64;
    let tip = ((base + speed_bonus) as f64 * tip_fraction).round() as i64;

    FareBreakdown {
        base,
        speed_bonus,
        tip,
        total: base + speed_bonus + tip,
    }
}

/// Convenience wrapper over [`calculate_fare`] for a boarded passenger.
pub fn fare_for_passenger(
    config: &FareConfig,
    passenger: &Passenger,
    now_ms: u64,
    hour: u32,
) -> FareBreakdown {
    let trip_secs = passenger
        .picked_up_at_ms
        .map(|t| now_ms.saturating_sub(t) as f64 / 1000.0)
        .unwrap_or(0.0);
    calculate_fare(
        config,
        passenger.kind,
        passenger.base_fare,
        passenger.pickup,
        passenger.dropoff,
        trip_secs,
        hour,
    )
}
