//! Advances the in-game hour-of-day each tick.

use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{GameClock, TickDelta};

pub fn game_time_system(delta: Res<TickDelta>, mut clock: ResMut<GameClock>) {
    clock.advance(delta.0);
}
