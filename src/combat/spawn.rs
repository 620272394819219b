//! Combat domain: enemy and boss spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::{Boss, Enemy};
use crate::combat::components::{Combatant, GameLayer};
use crate::core::PlayField;

/// Bundle for spawning a regular enemy with a kinematic sensor body.
#[derive(Bundle)]
pub struct EnemyBundle {
    pub name: Name,
    pub enemy: Enemy,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub sensor: Sensor,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
}

impl EnemyBundle {
    pub fn new(enemy: Enemy, field: &PlayField) -> Self {
        let size = enemy.body().size;
        Self {
            name: Name::new(format!("{:?}", enemy.pattern())),
            transform: Transform::from_translation(field.to_world(enemy.position())),
            rigid_body: RigidBody::Kinematic,
            collider: Collider::rectangle(size.x, size.y),
            sensor: Sensor,
            collision_events: CollisionEventsEnabled,
            collision_layers: enemy_layers(),
            enemy,
        }
    }
}

#[derive(Bundle)]
pub struct BossBundle {
    pub name: Name,
    pub boss: Boss,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub sensor: Sensor,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
}

impl BossBundle {
    pub fn new(boss: Boss, field: &PlayField) -> Self {
        let size = boss.hitbox().size();
        Self {
            name: Name::new("Boss"),
            transform: Transform::from_translation(field.to_world(boss.position())),
            rigid_body: RigidBody::Kinematic,
            collider: Collider::rectangle(size.x, size.y),
            sensor: Sensor,
            collision_events: CollisionEventsEnabled,
            collision_layers: enemy_layers(),
            boss,
        }
    }
}

/// Enemies are hit by player shots and touch the player.
fn enemy_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Enemy, [GameLayer::Player, GameLayer::PlayerShot])
}

/// Spawn a boss entity and return it.
pub fn spawn_boss(commands: &mut Commands, boss: Boss, field: &PlayField) -> Entity {
    info!(
        "Spawning boss at ({:.0}, {:.0})",
        boss.position().x,
        boss.position().y
    );
    commands.spawn(BossBundle::new(boss, field)).id()
}
