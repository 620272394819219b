//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::attacks::AttackKind;

/// Damage reported by the external collision resolver.
#[derive(Debug)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: i32,
    pub hit_position: Option<Vec2>,
}

impl Message for DamageEvent {}

/// A projectile owned by `owner` hit something and must be spent.
#[derive(Debug)]
pub struct ProjectileHitEvent {
    pub owner: Entity,
    /// Index from the owner's `ProjectileSet::live`.
    pub index: usize,
}

impl Message for ProjectileHitEvent {}

#[derive(Debug)]
pub struct ProjectileFiredEvent {
    pub owner: Entity,
    pub origin: Vec2,
    pub count: usize,
    pub homing: bool,
}

impl Message for ProjectileFiredEvent {}

/// Push to apply to the player.
#[derive(Debug)]
pub struct KnockbackEvent {
    pub source: Entity,
    pub direction: Vec2,
    pub magnitude: f32,
}

impl Message for KnockbackEvent {}

/// Cosmetic explosion request.
#[derive(Debug)]
pub struct ExplosionEffectEvent {
    pub position: Vec2,
    pub intensity: f32,
}

impl Message for ExplosionEffectEvent {}

/// Area damage the resolver applies to the player if within `radius`.
#[derive(Debug)]
pub struct ExplosionDamageEvent {
    pub source: Entity,
    pub position: Vec2,
    pub radius: f32,
    pub damage: u32,
}

impl Message for ExplosionDamageEvent {}

#[derive(Debug)]
pub struct ShieldBrokenEvent {
    pub entity: Entity,
    pub position: Vec2,
}

impl Message for ShieldBrokenEvent {}

#[derive(Debug)]
pub struct TelegraphEvent {
    pub entity: Entity,
    pub position: Vec2,
    /// `None` for movement telegraphs (dash, burst, fire preparation).
    pub attack: Option<AttackKind>,
}

impl Message for TelegraphEvent {}

#[derive(Debug)]
pub struct BossPhaseChangeEvent {
    pub boss: Entity,
    pub new_phase: u8,
}

impl Message for BossPhaseChangeEvent {}

#[derive(Debug)]
pub struct BossDefeatedEvent {
    pub boss: Entity,
}

impl Message for BossDefeatedEvent {}

#[derive(Debug)]
pub struct EnemyDestroyedEvent {
    pub entity: Entity,
    pub position: Vec2,
}

impl Message for EnemyDestroyedEvent {}
