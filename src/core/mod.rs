//! Core domain: play field, randomness, and the per-tick context handed to
//! every adversary update.

mod context;
mod random;
mod resources;

pub use context::{CombatCue, FRAME_RATE, PlayerSnapshot, TickContext, WorldQuery, frames};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use resources::{CombatRng, PlayField, RunConfig};

use bevy::prelude::*;

/// Ordering of the adversary pipeline within one `Update` tick.
///
/// The player is observed first, queued damage is resolved, then every
/// combatant behaves, cues are turned into messages, and finished entities
/// are despawned.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdversarySet {
    Observe,
    Damage,
    Behave,
    Dispatch,
    Cleanup,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunConfig>()
            .init_resource::<PlayField>()
            .init_resource::<CombatRng>()
            .configure_sets(
                Update,
                (
                    AdversarySet::Observe,
                    AdversarySet::Damage,
                    AdversarySet::Behave,
                    AdversarySet::Dispatch,
                    AdversarySet::Cleanup,
                )
                    .chain(),
            );
    }
}
