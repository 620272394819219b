//! Combat domain: components and combat-related state types.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::TickContext;
use crate::projectiles::ProjectileSet;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Player character
    Player,
    /// Enemies and bosses
    Enemy,
    /// Player shots (damage enemies)
    PlayerShot,
    /// Enemy shots (damage player)
    EnemyShot,
}

/// The surface every adversary exposes to the frame loop and the collision
/// resolver.
pub trait Combatant {
    /// Advances behavior, attacks, and owned projectiles by one tick.
    fn update(&mut self, ctx: &mut TickContext<'_>);

    /// Applies damage from the resolver. Returns `true` only on the call that
    /// destroys the combatant.
    fn take_damage(&mut self, amount: i32, hit_position: Option<Vec2>) -> bool;

    fn position(&self) -> Vec2;

    fn hitbox(&self) -> Rect;

    fn projectiles(&self) -> &ProjectileSet;

    fn projectiles_mut(&mut self) -> &mut ProjectileSet;

    fn is_dying(&self) -> bool;

    /// True once the entity may be despawned and reclaimed.
    fn is_removable(&self) -> bool;
}

/// Movement pattern tag chosen by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum MovementPattern {
    Straight,
    /// Elite enemy with a single telegraphed speed burst.
    Zigzag,
    Sine,
    Dive,
    /// Base enemy: drift, dash, stutter, one shot.
    Drifter,
    Oscillate,
    Juggernaut,
}

impl MovementPattern {
    pub const ALL: [MovementPattern; 7] = [
        MovementPattern::Straight,
        MovementPattern::Zigzag,
        MovementPattern::Sine,
        MovementPattern::Dive,
        MovementPattern::Drifter,
        MovementPattern::Oscillate,
        MovementPattern::Juggernaut,
    ];
}

/// Health for damageable combatants. Never drops below zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Returns the damage actually applied.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max - self.current.min(self.max));
        self.current += actual;
        actual
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// A single shield layer that absorbs whole hits until depleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Shield {
    pub charge: u32,
    pub capacity: u32,
    /// Set when the shield reaches zero; cleared on regeneration.
    pub broken: bool,
    pub regen_delay: f32,
    regen_timer: f32,
    break_cue_pending: bool,
}

impl Shield {
    pub fn new(capacity: u32, regen_delay: f32) -> Self {
        Self {
            charge: capacity,
            capacity,
            broken: false,
            regen_delay,
            regen_timer: 0.0,
            break_cue_pending: false,
        }
    }

    pub fn none() -> Self {
        Self::new(0, 0.0)
    }

    pub fn is_active(&self) -> bool {
        self.charge > 0
    }

    /// Absorbs the whole hit if the shield is up. Health must only be
    /// touched when this returns `false`.
    pub fn absorb(&mut self, amount: u32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.charge = self.charge.saturating_sub(amount);
        if self.charge == 0 {
            self.broken = true;
            self.break_cue_pending = true;
            self.regen_timer = self.regen_delay;
        }
        true
    }

    /// Counts down the regeneration window. The shield only comes back when
    /// `may_regenerate` holds at the moment the window has elapsed.
    /// Returns `true` on the tick the shield is restored.
    pub fn tick(&mut self, dt: f32, may_regenerate: bool) -> bool {
        if !self.broken || self.capacity == 0 {
            return false;
        }
        self.regen_timer = (self.regen_timer - dt).max(0.0);
        if self.regen_timer <= 0.0 && may_regenerate {
            self.charge = self.capacity;
            self.broken = false;
            return true;
        }
        false
    }

    /// One-shot flag for the "shield broken" cue.
    pub fn take_break_cue(&mut self) -> bool {
        std::mem::take(&mut self.break_cue_pending)
    }
}

/// Lifecycle of a regular enemy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Lifecycle {
    #[default]
    Alive,
    /// Destroyed but still drawn while the explosion plays.
    Exploding { remaining: f32 },
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn direction(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// The facing that looks from `from` toward `to`.
    pub fn toward(from: Vec2, to: Vec2) -> Self {
        if to.x < from.x {
            Facing::Left
        } else {
            Facing::Right
        }
    }

    /// True if `to` lies in the half-plane in front of `from`.
    pub fn faces(self, from: Vec2, to: Vec2) -> bool {
        (to.x - from.x) * self.sign() > 0.0
    }
}

/// Position and size of a combatant in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Center of the body.
    pub position: Vec2,
    pub size: Vec2,
    /// Base speed in pixels per frame.
    pub speed: f32,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            position,
            size,
            speed,
        }
    }

    pub fn half_height(&self) -> f32 {
        self.size.y * 0.5
    }

    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    /// Point on the leading (left) edge, where shots leave the hull.
    pub fn muzzle(&self, facing: Facing) -> Vec2 {
        self.position + facing.direction() * self.half_width()
    }
}

/// Clamps a resolver-supplied damage amount to a non-negative integer.
pub fn sanitize_damage(amount: i32) -> u32 {
    u32::try_from(amount).unwrap_or(0)
}

/// The mutable parts of a regular enemy that every behavior may touch.
#[derive(Debug, Clone)]
pub struct Hull {
    pub body: Body,
    pub health: Health,
    pub shield: Shield,
    pub projectiles: ProjectileSet,
}

impl Hull {
    pub fn new(body: Body, health: Health, shield: Shield) -> Self {
        Self {
            body,
            health,
            shield,
            projectiles: ProjectileSet::default(),
        }
    }
}
