//! Shared fixture for driving combatants tick by tick in unit tests.

use bevy::prelude::*;

use crate::combat::Combatant;
use crate::content::CombatTuning;
use crate::core::{CombatCue, PlayField, PlayerSnapshot, SequenceRandom, TickContext};

pub(crate) const DT: f32 = 1.0 / 60.0;

pub(crate) struct Harness {
    pub tuning: CombatTuning,
    pub field: PlayField,
    pub rng: SequenceRandom,
    pub player: PlayerSnapshot,
    pub cues: Vec<CombatCue>,
    pub dt: f32,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            tuning: CombatTuning::default(),
            field: PlayField::default(),
            rng: SequenceRandom::constant(0.5),
            player: PlayerSnapshot::absent(),
            cues: Vec::new(),
            dt: DT,
        }
    }
}

impl Harness {
    pub fn with_player(mut self, position: Vec2) -> Self {
        self.player = PlayerSnapshot::at(position);
        self
    }

    pub fn with_rng(mut self, rng: SequenceRandom) -> Self {
        self.rng = rng;
        self
    }

    pub fn context(&mut self) -> TickContext<'_> {
        TickContext {
            dt: self.dt,
            world: &self.player,
            field: &self.field,
            tuning: &self.tuning,
            rng: &mut self.rng,
            cues: &mut self.cues,
        }
    }

    pub fn tick(&mut self, combatant: &mut impl Combatant) {
        let mut ctx = self.context();
        combatant.update(&mut ctx);
    }

    pub fn run(&mut self, combatant: &mut impl Combatant, ticks: usize) {
        for _ in 0..ticks {
            self.tick(combatant);
        }
    }

    /// Ticks until `done` holds or `limit` ticks pass. Returns ticks taken.
    pub fn run_until<C: Combatant>(
        &mut self,
        combatant: &mut C,
        limit: usize,
        mut done: impl FnMut(&C) -> bool,
    ) -> Option<usize> {
        for tick in 1..=limit {
            self.tick(combatant);
            if done(combatant) {
                return Some(tick);
            }
        }
        None
    }

    pub fn count_cues(&self, matches: impl Fn(&CombatCue) -> bool) -> usize {
        self.cues.iter().filter(|&cue| matches(cue)).count()
    }
}
