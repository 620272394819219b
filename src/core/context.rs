//! Core domain: the narrow world view and event sink passed into `update`.

use bevy::prelude::*;

use crate::combat::AttackKind;
use crate::content::CombatTuning;
use crate::core::random::RandomSource;
use crate::core::resources::PlayField;

/// Reference simulation rate. Speeds are tuned in pixels per frame at this rate.
pub const FRAME_RATE: f32 = 60.0;

/// Converts elapsed seconds into elapsed reference frames.
pub fn frames(dt: f32) -> f32 {
    dt * FRAME_RATE
}

/// Read-only access to the player for targeting.
///
/// `None` means no target is available this tick (player removed or
/// respawning); behaviors fall back to their untargeted motion.
pub trait WorldQuery {
    fn player_position(&self) -> Option<Vec2>;
    fn player_previous_position(&self) -> Option<Vec2>;
}

/// Player position captured once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Option<Vec2>,
    pub previous: Option<Vec2>,
}

impl PlayerSnapshot {
    /// A stationary player.
    pub fn at(position: Vec2) -> Self {
        Self {
            position: Some(position),
            previous: Some(position),
        }
    }

    /// A player that moved from `previous` to `position` over the last tick.
    pub fn moving(previous: Vec2, position: Vec2) -> Self {
        Self {
            position: Some(position),
            previous: Some(previous),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

impl WorldQuery for PlayerSnapshot {
    fn player_position(&self) -> Option<Vec2> {
        self.position
    }

    fn player_previous_position(&self) -> Option<Vec2> {
        self.previous.or(self.position)
    }
}

/// Something a combatant wants the rest of the game to know about.
///
/// Cues are fire-and-forget: the core never waits on their consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatCue {
    ProjectileFired {
        origin: Vec2,
        count: usize,
        homing: bool,
    },
    DashTelegraph {
        position: Vec2,
    },
    BurstTelegraph {
        position: Vec2,
    },
    FireTelegraph {
        position: Vec2,
    },
    AttackTelegraphed {
        attack: AttackKind,
        position: Vec2,
    },
    ChargeStarted {
        position: Vec2,
    },
    ShieldBroken {
        position: Vec2,
    },
    ShieldRestored {
        position: Vec2,
    },
    /// Push the player along `direction` (unit length) with `magnitude`.
    Knockback {
        direction: Vec2,
        magnitude: f32,
    },
    /// Purely cosmetic explosion at `position`; `intensity` is in `0..=1`.
    ExplosionEffect {
        position: Vec2,
        intensity: f32,
    },
    /// Area damage the resolver applies to the player if within `radius`.
    ExplosionDamage {
        position: Vec2,
        radius: f32,
        damage: u32,
    },
    PhaseChanged {
        phase: u8,
    },
    BerserkEntered,
}

/// Everything one combatant may see or touch during a single tick.
pub struct TickContext<'a> {
    /// Seconds since the previous tick.
    pub dt: f32,
    pub world: &'a dyn WorldQuery,
    pub field: &'a PlayField,
    pub tuning: &'a CombatTuning,
    pub rng: &'a mut dyn RandomSource,
    pub cues: &'a mut Vec<CombatCue>,
}

impl TickContext<'_> {
    pub fn frames(&self) -> f32 {
        frames(self.dt)
    }

    pub fn player(&self) -> Option<Vec2> {
        self.world.player_position()
    }

    pub fn player_previous(&self) -> Option<Vec2> {
        self.world.player_previous_position()
    }

    pub fn emit(&mut self, cue: CombatCue) {
        self.cues.push(cue);
    }
}
