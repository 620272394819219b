//! Combat domain: systems for damage intake, combatant updates, cue dispatch,
//! and cleanup.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::ai::{Boss, Enemy};
use crate::combat::components::Combatant;
use crate::combat::events::{
    BossDefeatedEvent, BossPhaseChangeEvent, DamageEvent, EnemyDestroyedEvent,
    ExplosionDamageEvent, ExplosionEffectEvent, KnockbackEvent, ProjectileFiredEvent,
    ProjectileHitEvent, ShieldBrokenEvent, TelegraphEvent,
};
use crate::combat::resources::PendingCues;
use crate::content::CombatTuning;
use crate::core::{CombatCue, CombatRng, PlayField, TickContext};
use crate::player::PlayerTracker;

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut destroyed_events: MessageWriter<EnemyDestroyedEvent>,
    mut defeated_events: MessageWriter<BossDefeatedEvent>,
    mut enemies: Query<&mut Enemy>,
    mut bosses: Query<&mut Boss>,
) {
    for event in damage_events.read() {
        if let Ok(mut enemy) = enemies.get_mut(event.target) {
            if enemy.take_damage(event.amount, event.hit_position) {
                debug!("{:?} destroyed", enemy.pattern());
                destroyed_events.write(EnemyDestroyedEvent {
                    entity: event.target,
                    position: enemy.position(),
                });
            }
        } else if let Ok(mut boss) = bosses.get_mut(event.target) {
            if boss.take_damage(event.amount, event.hit_position) {
                info!("Boss defeated");
                defeated_events.write(BossDefeatedEvent { boss: event.target });
            }
        }
    }
}

pub(crate) fn apply_projectile_hits(
    mut hit_events: MessageReader<ProjectileHitEvent>,
    mut enemies: Query<&mut Enemy>,
    mut bosses: Query<&mut Boss>,
) {
    for event in hit_events.read() {
        let spent = if let Ok(mut enemy) = enemies.get_mut(event.owner) {
            enemy.projectiles_mut().mark_hit(event.index)
        } else if let Ok(mut boss) = bosses.get_mut(event.owner) {
            boss.projectiles_mut().mark_hit(event.index)
        } else {
            false
        };
        if !spent {
            debug!(
                "Ignoring hit on missing projectile {} of {:?}",
                event.index, event.owner
            );
        }
    }
}

pub(crate) fn update_enemies(
    time: Res<Time>,
    tracker: Res<PlayerTracker>,
    field: Res<PlayField>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<CombatRng>,
    mut pending: ResMut<PendingCues>,
    mut enemies: Query<(Entity, &mut Enemy, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let world = tracker.snapshot();
    let mut cues = Vec::new();

    for (entity, mut enemy, mut transform) in &mut enemies {
        let mut ctx = TickContext {
            dt,
            world: &world,
            field: &field,
            tuning: &tuning,
            rng: &mut rng.0,
            cues: &mut cues,
        };
        enemy.update(&mut ctx);
        transform.translation = field
            .to_world(enemy.position())
            .with_z(transform.translation.z);
        pending.extend(entity, cues.drain(..));
    }
}

pub(crate) fn update_bosses(
    time: Res<Time>,
    tracker: Res<PlayerTracker>,
    field: Res<PlayField>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<CombatRng>,
    mut pending: ResMut<PendingCues>,
    mut bosses: Query<(Entity, &mut Boss, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let world = tracker.snapshot();
    let mut cues = Vec::new();

    for (entity, mut boss, mut transform) in &mut bosses {
        let mut ctx = TickContext {
            dt,
            world: &world,
            field: &field,
            tuning: &tuning,
            rng: &mut rng.0,
            cues: &mut cues,
        };
        boss.update(&mut ctx);
        transform.translation = field
            .to_world(boss.position())
            .with_z(transform.translation.z);
        pending.extend(entity, cues.drain(..));
    }
}

/// Turns this tick's cues into messages for the audio, effects, and player
/// collaborators.
#[allow(clippy::too_many_arguments)]
pub(crate) fn dispatch_cues(
    mut pending: ResMut<PendingCues>,
    mut fired_events: MessageWriter<ProjectileFiredEvent>,
    mut telegraph_events: MessageWriter<TelegraphEvent>,
    mut knockback_events: MessageWriter<KnockbackEvent>,
    mut effect_events: MessageWriter<ExplosionEffectEvent>,
    mut area_events: MessageWriter<ExplosionDamageEvent>,
    mut shield_events: MessageWriter<ShieldBrokenEvent>,
    mut phase_events: MessageWriter<BossPhaseChangeEvent>,
) {
    for (source, cue) in pending.drain() {
        match cue {
            CombatCue::ProjectileFired {
                origin,
                count,
                homing,
            } => {
                fired_events.write(ProjectileFiredEvent {
                    owner: source,
                    origin,
                    count,
                    homing,
                });
            }
            CombatCue::DashTelegraph { position }
            | CombatCue::BurstTelegraph { position }
            | CombatCue::FireTelegraph { position } => {
                telegraph_events.write(TelegraphEvent {
                    entity: source,
                    position,
                    attack: None,
                });
            }
            CombatCue::AttackTelegraphed { attack, position } => {
                telegraph_events.write(TelegraphEvent {
                    entity: source,
                    position,
                    attack: Some(attack),
                });
            }
            CombatCue::ChargeStarted { position } => {
                debug!("{:?} charge started at {:?}", source, position);
            }
            CombatCue::ShieldBroken { position } => {
                shield_events.write(ShieldBrokenEvent {
                    entity: source,
                    position,
                });
            }
            CombatCue::ShieldRestored { .. } => {
                debug!("{:?} shield restored", source);
            }
            CombatCue::Knockback {
                direction,
                magnitude,
            } => {
                knockback_events.write(KnockbackEvent {
                    source,
                    direction,
                    magnitude,
                });
            }
            CombatCue::ExplosionEffect {
                position,
                intensity,
            } => {
                effect_events.write(ExplosionEffectEvent {
                    position,
                    intensity,
                });
            }
            CombatCue::ExplosionDamage {
                position,
                radius,
                damage,
            } => {
                area_events.write(ExplosionDamageEvent {
                    source,
                    position,
                    radius,
                    damage,
                });
            }
            CombatCue::PhaseChanged { phase } => {
                phase_events.write(BossPhaseChangeEvent {
                    boss: source,
                    new_phase: phase,
                });
            }
            CombatCue::BerserkEntered => {
                debug!("{:?} went berserk", source);
            }
        }
    }
}

pub(crate) fn despawn_finished(
    mut commands: Commands,
    enemies: Query<(Entity, &Enemy)>,
    bosses: Query<(Entity, &Boss)>,
) {
    for (entity, enemy) in &enemies {
        if enemy.is_removable() {
            commands.entity(entity).despawn();
        }
    }
    for (entity, boss) in &bosses {
        if boss.is_removable() {
            debug!("Despawning finished boss {:?}", entity);
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(feature = "dev-tools")]
const BOSS_STATUS_INTERVAL: f32 = 2.0;

/// Periodic boss status line for tuning sessions.
#[cfg(feature = "dev-tools")]
pub(crate) fn log_boss_status(time: Res<Time>, mut timer: Local<f32>, bosses: Query<&Boss>) {
    *timer -= time.delta_secs();
    if *timer > 0.0 {
        return;
    }
    *timer = BOSS_STATUS_INTERVAL;

    for boss in &bosses {
        info!(
            "Boss {:?}: phase {} hp {}/{} shield {}/{} berserk={}",
            boss.state(),
            boss.phase(),
            boss.health().current,
            boss.health().max,
            boss.shield().charge,
            boss.shield().capacity,
            boss.is_berserk()
        );
    }
}
