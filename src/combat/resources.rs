//! Combat domain: per-tick cue buffering.

use bevy::prelude::*;

use crate::core::CombatCue;

/// Cues produced by combatant updates this tick, tagged with their source.
#[derive(Resource, Debug, Default)]
pub struct PendingCues {
    entries: Vec<(Entity, CombatCue)>,
}

impl PendingCues {
    pub fn extend(&mut self, source: Entity, cues: impl IntoIterator<Item = CombatCue>) {
        self.entries
            .extend(cues.into_iter().map(|cue| (source, cue)));
    }

    pub fn drain(&mut self) -> impl Iterator<Item = (Entity, CombatCue)> + '_ {
        self.entries.drain(..)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
