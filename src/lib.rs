//! Adversary behavior and combat resolution for a side-scrolling shooter.
//!
//! Every non-player combatant is a [`combat::Combatant`]: it is advanced once
//! per tick through a [`core::TickContext`] and damaged only through
//! `take_damage`. [`AdversaryPlugin`] wires the whole thing into a Bevy app.

pub mod combat;
pub mod content;
pub mod core;
pub mod player;
pub mod projectiles;

#[cfg(test)]
mod testing;

use std::path::PathBuf;

use bevy::prelude::*;

/// Core, content, player tracking, and combat in one plugin.
pub struct AdversaryPlugin {
    pub tuning_path: PathBuf,
}

impl Default for AdversaryPlugin {
    fn default() -> Self {
        Self {
            tuning_path: PathBuf::from(content::TUNING_PATH),
        }
    }
}

impl Plugin for AdversaryPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            core::CorePlugin,
            content::ContentPlugin {
                tuning_path: self.tuning_path.clone(),
            },
            player::PlayerPlugin,
            combat::CombatPlugin,
        ));
    }
}
