//! Combat domain: per-pattern behavior state and its dispatch.

use bevy::prelude::*;

use crate::combat::ai::burst::BurstState;
use crate::combat::ai::drifter::DrifterState;
use crate::combat::ai::juggernaut::JuggernautState;
use crate::combat::ai::patterns::{DiveState, OscillateState, SineState, update_straight};
use crate::combat::components::{Hull, MovementPattern};
use crate::content::CombatTuning;
use crate::core::{PlayField, RandomSource, TickContext};

/// Behavior state for a regular enemy, one variant per movement pattern.
#[derive(Debug, Clone)]
pub enum Behavior {
    Straight,
    Zigzag(BurstState),
    Sine(SineState),
    Dive(DiveState),
    Drifter(DrifterState),
    Oscillate(OscillateState),
    Juggernaut(JuggernautState),
}

impl Behavior {
    pub fn for_pattern(
        pattern: MovementPattern,
        spawn: Vec2,
        tuning: &CombatTuning,
        field: &PlayField,
        rng: &mut dyn RandomSource,
    ) -> Self {
        match pattern {
            MovementPattern::Straight => Behavior::Straight,
            MovementPattern::Zigzag => {
                Behavior::Zigzag(BurstState::new(spawn, &tuning.burst, rng))
            }
            MovementPattern::Sine => Behavior::Sine(SineState::new(spawn, &tuning.sine)),
            MovementPattern::Dive => Behavior::Dive(DiveState::default()),
            MovementPattern::Drifter => Behavior::Drifter(DrifterState::new(&tuning.drifter, rng)),
            MovementPattern::Oscillate => Behavior::Oscillate(OscillateState::new(spawn, rng)),
            MovementPattern::Juggernaut => {
                Behavior::Juggernaut(JuggernautState::new(spawn, &tuning.juggernaut, field))
            }
        }
    }

    pub fn pattern(&self) -> MovementPattern {
        match self {
            Behavior::Straight => MovementPattern::Straight,
            Behavior::Zigzag(_) => MovementPattern::Zigzag,
            Behavior::Sine(_) => MovementPattern::Sine,
            Behavior::Dive(_) => MovementPattern::Dive,
            Behavior::Drifter(_) => MovementPattern::Drifter,
            Behavior::Oscillate(_) => MovementPattern::Oscillate,
            Behavior::Juggernaut(_) => MovementPattern::Juggernaut,
        }
    }

    pub fn update(&mut self, hull: &mut Hull, ctx: &mut TickContext<'_>) {
        match self {
            Behavior::Straight => update_straight(hull, ctx),
            Behavior::Zigzag(state) => state.update(hull, ctx),
            Behavior::Sine(state) => state.update(hull, ctx),
            Behavior::Dive(state) => state.update(hull, ctx),
            Behavior::Drifter(state) => state.update(hull, ctx),
            Behavior::Oscillate(state) => state.update(hull, ctx),
            Behavior::Juggernaut(state) => state.update(hull, ctx),
        }
    }
}
