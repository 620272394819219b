//! Player domain: per-tick observation.

use bevy::prelude::*;

use crate::core::PlayField;
use crate::player::{Player, PlayerTracker};

pub(crate) fn track_player(
    field: Res<PlayField>,
    mut tracker: ResMut<PlayerTracker>,
    players: Query<&Transform, With<Player>>,
) {
    let position = players
        .iter()
        .next()
        .map(|transform| field.from_world(transform.translation));
    tracker.observe(position);
}
