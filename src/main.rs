//! Headless demo: one enemy of every pattern plus a boss against a scripted
//! player, with the external collision resolver stubbed by timed damage.

use std::time::Duration;

use adversary_engine::AdversaryPlugin;
use adversary_engine::combat::{
    Boss, BossDefeatedEvent, BossPhaseChangeEvent, DamageEvent, Enemy, EnemyBundle,
    EnemyDestroyedEvent, ExplosionDamageEvent, KnockbackEvent, MovementPattern, spawn_boss,
};
use adversary_engine::content::CombatTuning;
use adversary_engine::core::{AdversarySet, CombatRng, PlayField, RunConfig};
use adversary_engine::player::Player;
use bevy::app::ScheduleRunnerPlugin;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::log::LogPlugin;
use bevy::prelude::*;

const DEMO_SECONDS: f32 = 30.0;
const DEMO_SEED: u64 = 7;
const ENEMY_HIT: i32 = 1;
const BOSS_HIT: i32 = 8;

#[derive(Resource)]
struct DamageClock(Timer);

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(LogPlugin::default())
        .insert_resource(RunConfig { seed: DEMO_SEED })
        .insert_resource(DamageClock(Timer::from_seconds(0.5, TimerMode::Repeating)))
        .add_plugins(AdversaryPlugin::default())
        .add_systems(Startup, spawn_encounter)
        .add_systems(Update, steer_player.before(AdversarySet::Observe))
        .add_systems(Update, strike_adversaries.before(AdversarySet::Damage))
        .add_systems(
            Update,
            (report_outcomes, finish_demo).after(AdversarySet::Cleanup),
        )
        .run();
}

fn spawn_encounter(
    mut commands: Commands,
    field: Res<PlayField>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<CombatRng>,
) {
    commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_translation(field.to_world(Vec2::new(120.0, field.center_y()))),
    ));

    let lanes = MovementPattern::ALL.len() as f32;
    for (index, pattern) in MovementPattern::ALL.into_iter().enumerate() {
        let y = field.height * (index as f32 + 1.0) / (lanes + 1.0);
        let enemy = Enemy::spawn_at_edge(pattern, y, &tuning, &field, &mut rng.0);
        commands.spawn(EnemyBundle::new(enemy, &field));
    }

    let boss = Boss::new(Vec2::new(field.spawn_x(), field.center_y()), &tuning.boss);
    spawn_boss(&mut commands, boss, &field);
    info!(
        "Demo encounter: {} enemies and a boss",
        MovementPattern::ALL.len()
    );
}

/// Moves the player up and down along a fixed column.
fn steer_player(
    time: Res<Time>,
    field: Res<PlayField>,
    mut players: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = players.single_mut() else {
        return;
    };
    let y = field.center_y() + 180.0 * (time.elapsed_secs() * 0.8).sin();
    transform.translation = field.to_world(Vec2::new(120.0, y));
}

/// Stands in for the collision resolver: every half second, everything alive
/// takes a hit.
fn strike_adversaries(
    time: Res<Time>,
    mut clock: ResMut<DamageClock>,
    mut damage: MessageWriter<DamageEvent>,
    enemies: Query<Entity, With<Enemy>>,
    bosses: Query<Entity, With<Boss>>,
) {
    if !clock.0.tick(time.delta()).just_finished() {
        return;
    }
    for target in &enemies {
        damage.write(DamageEvent {
            target,
            amount: ENEMY_HIT,
            hit_position: None,
        });
    }
    for target in &bosses {
        damage.write(DamageEvent {
            target,
            amount: BOSS_HIT,
            hit_position: None,
        });
    }
}

fn report_outcomes(
    mut knockbacks: MessageReader<KnockbackEvent>,
    mut explosions: MessageReader<ExplosionDamageEvent>,
    mut destroyed: MessageReader<EnemyDestroyedEvent>,
    mut phases: MessageReader<BossPhaseChangeEvent>,
    mut defeated: MessageReader<BossDefeatedEvent>,
) {
    for event in knockbacks.read() {
        info!(
            "Player knocked back along ({:.2}, {:.2}) with force {:.1}",
            event.direction.x, event.direction.y, event.magnitude
        );
    }
    for event in explosions.read() {
        info!(
            "Explosion at ({:.0}, {:.0}) radius {:.0} deals {}",
            event.position.x, event.position.y, event.radius, event.damage
        );
    }
    for event in destroyed.read() {
        info!(
            "Enemy destroyed at ({:.0}, {:.0})",
            event.position.x, event.position.y
        );
    }
    for event in phases.read() {
        info!("Boss phase {}", event.new_phase);
    }
    for event in defeated.read() {
        info!("Boss {:?} defeated", event.boss);
    }
}

fn finish_demo(time: Res<Time>, mut exit: MessageWriter<AppExit>) {
    if time.elapsed_secs() >= DEMO_SECONDS {
        info!("Demo finished after {:.0}s", DEMO_SECONDS);
        exit.write(AppExit::Success);
    }
}
