//! Player domain: the read-only view of the player that adversaries target.
//!
//! Input, movement, and the player's own health live outside this crate. The
//! tracker only records where the player is, once per tick.

mod systems;

use bevy::prelude::*;

use crate::core::{AdversarySet, PlayerSnapshot};

/// Marks the entity adversaries aim at.
#[derive(Component, Debug, Default)]
pub struct Player;

/// Player position this tick and last tick, in field coordinates.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct PlayerTracker {
    current: Option<Vec2>,
    previous: Option<Vec2>,
}

impl PlayerTracker {
    /// Records a new observation. `None` means the player is gone this tick,
    /// which also forgets the previous position so a respawn does not look
    /// like a jump across the field.
    pub fn observe(&mut self, position: Option<Vec2>) {
        self.previous = match position {
            Some(_) => self.current.or(position),
            None => None,
        };
        self.current = position;
    }

    pub fn current(&self) -> Option<Vec2> {
        self.current
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self.current,
            previous: self.previous,
        }
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTracker>()
            .add_systems(Update, systems::track_player.in_set(AdversarySet::Observe));
    }
}
