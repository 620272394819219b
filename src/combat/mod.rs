//! Combat domain: adversary behavior, boss state machine, damage intake,
//! and the messages that report combat outcomes.

pub mod ai;
mod attacks;
mod components;
mod events;
mod resources;
mod spawn;
mod systems;
#[cfg(test)]
mod tests;

pub use ai::{Behavior, Boss, BossState, Enemy};
pub use attacks::{AttackKind, AttackPlan, execute_attack};
pub use components::{
    Body, Combatant, Facing, GameLayer, Health, Hull, Lifecycle, MovementPattern, Shield,
    sanitize_damage,
};
pub use events::{
    BossDefeatedEvent, BossPhaseChangeEvent, DamageEvent, EnemyDestroyedEvent,
    ExplosionDamageEvent, ExplosionEffectEvent, KnockbackEvent, ProjectileFiredEvent,
    ProjectileHitEvent, ShieldBrokenEvent, TelegraphEvent,
};
pub use resources::PendingCues;
pub use spawn::{BossBundle, EnemyBundle, spawn_boss};

use bevy::prelude::*;

use crate::core::AdversarySet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingCues>()
            .add_message::<DamageEvent>()
            .add_message::<ProjectileHitEvent>()
            .add_message::<ProjectileFiredEvent>()
            .add_message::<TelegraphEvent>()
            .add_message::<KnockbackEvent>()
            .add_message::<ExplosionEffectEvent>()
            .add_message::<ExplosionDamageEvent>()
            .add_message::<ShieldBrokenEvent>()
            .add_message::<BossPhaseChangeEvent>()
            .add_message::<BossDefeatedEvent>()
            .add_message::<EnemyDestroyedEvent>()
            .add_systems(
                Update,
                (systems::apply_damage, systems::apply_projectile_hits)
                    .chain()
                    .in_set(AdversarySet::Damage),
            )
            .add_systems(
                Update,
                (systems::update_enemies, systems::update_bosses)
                    .chain()
                    .in_set(AdversarySet::Behave),
            )
            .add_systems(Update, systems::dispatch_cues.in_set(AdversarySet::Dispatch))
            .add_systems(Update, systems::despawn_finished.in_set(AdversarySet::Cleanup));

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, systems::log_boss_status.after(AdversarySet::Cleanup));
    }
}
