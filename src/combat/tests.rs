//! Combat domain: unit tests for health, shields, attacks, and the director.

use std::time::Duration;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::ai::{AttackDirector, AttackStage, ChargePhase, ChargeState, phase_for_fraction};
use super::{
    AttackKind, AttackPlan, Body, Boss, BossDefeatedEvent, Combatant, DamageEvent, Enemy,
    EnemyDestroyedEvent, ExplosionEffectEvent, Facing, Health, MovementPattern,
    ProjectileHitEvent, Shield, ShieldBrokenEvent, execute_attack, sanitize_damage,
};
use crate::AdversaryPlugin;
use crate::content::{AttackTuning, ChargeTuning, CombatTuning};
use crate::core::{AdversarySet, CombatCue, PlayField, RunConfig, SequenceRandom};
use crate::projectiles::{Projectile, ProjectileSet};
use crate::testing::{DT, Harness};

fn boss_body(position: Vec2) -> Body {
    Body::new(position, Vec2::new(140.0, 110.0), 2.0)
}

// ============================================================================
// Health and shield
// ============================================================================

#[test]
fn test_health_never_goes_negative() {
    let mut health = Health::new(5);
    assert_eq!(health.take_damage(3), 3);
    assert_eq!(health.take_damage(10), 2);
    assert_eq!(health.current, 0);
    assert!(health.is_depleted());
    assert_eq!(health.take_damage(1), 0);
    assert_eq!(health.current, 0);
}

#[test]
fn test_health_fraction_handles_zero_max() {
    assert_eq!(Health::new(0).fraction(), 0.0);
    let mut health = Health::new(4);
    health.take_damage(1);
    assert_eq!(health.fraction(), 0.75);
}

#[test]
fn test_heal_caps_at_max() {
    let mut health = Health::new(10);
    health.take_damage(4);
    assert_eq!(health.heal(100), 4);
    assert_eq!(health.current, 10);
}

#[test]
fn test_negative_damage_is_zero() {
    assert_eq!(sanitize_damage(-5), 0);
    assert_eq!(sanitize_damage(0), 0);
    assert_eq!(sanitize_damage(7), 7);
}

#[test]
fn test_shield_absorbs_whole_hits_until_empty() {
    let mut shield = Shield::new(5, 2.0);

    assert!(shield.absorb(3));
    assert_eq!(shield.charge, 2);
    assert!(!shield.broken);

    // No carry-over: the overflow is swallowed too.
    assert!(shield.absorb(10));
    assert_eq!(shield.charge, 0);
    assert!(shield.broken);

    assert!(!shield.absorb(1));
}

#[test]
fn test_shield_break_cue_fires_once() {
    let mut shield = Shield::new(1, 2.0);
    shield.absorb(1);
    assert!(shield.take_break_cue());
    assert!(!shield.take_break_cue());
}

#[test]
fn test_shield_regenerates_only_when_allowed() {
    let mut shield = Shield::new(5, 1.0);
    shield.absorb(5);

    assert!(!shield.tick(0.5, true));
    // Window elapsed, but regeneration is not allowed right now.
    assert!(!shield.tick(0.6, false));
    assert!(shield.broken);

    assert!(shield.tick(0.1, true));
    assert_eq!(shield.charge, 5);
    assert!(!shield.broken);
}

#[test]
fn test_empty_shield_never_regenerates() {
    let mut shield = Shield::none();
    assert!(!shield.is_active());
    assert!(!shield.absorb(3));
    assert!(!shield.tick(100.0, true));
}

#[test]
fn test_facing_half_plane() {
    let from = Vec2::new(100.0, 0.0);
    assert!(Facing::Left.faces(from, Vec2::new(50.0, 300.0)));
    assert!(!Facing::Left.faces(from, Vec2::new(150.0, 0.0)));
    assert_eq!(Facing::toward(from, Vec2::new(150.0, 0.0)), Facing::Right);
    assert_eq!(Facing::toward(from, Vec2::new(20.0, 0.0)), Facing::Left);
}

// ============================================================================
// Attacks
// ============================================================================

#[test]
fn test_missile_barrage_fires_homing_fan() {
    let mut harness = Harness::default().with_player(Vec2::new(100.0, 300.0));
    let attacks = harness.tuning.boss.attacks.clone();
    let body = boss_body(Vec2::new(600.0, 300.0));
    let mut projectiles = ProjectileSet::default();

    let fired = execute_attack(
        AttackPlan::new(AttackKind::MissileBarrage),
        &body,
        Facing::Left,
        &attacks,
        &mut projectiles,
        &mut harness.context(),
    );

    assert_eq!(fired, 5);
    assert_eq!(projectiles.len(), 5);
    assert!(projectiles.iter().all(|missile| missile.is_homing()));
    assert_eq!(
        harness.cues,
        vec![CombatCue::ProjectileFired {
            origin: Vec2::new(530.0, 300.0),
            count: 5,
            homing: true,
        }]
    );
}

#[test]
fn test_twin_shot_is_symmetric() {
    let mut harness = Harness::default().with_player(Vec2::new(100.0, 300.0));
    let attacks = harness.tuning.boss.attacks.clone();
    let body = boss_body(Vec2::new(600.0, 300.0));
    let mut projectiles = ProjectileSet::default();

    execute_attack(
        AttackPlan::new(AttackKind::TwinShot),
        &body,
        Facing::Left,
        &attacks,
        &mut projectiles,
        &mut harness.context(),
    );

    let shots = projectiles.as_slice();
    assert_eq!(shots.len(), 2);
    assert!(shots[0].velocity.x < 0.0 && shots[1].velocity.x < 0.0);
    assert!((shots[0].velocity.y + shots[1].velocity.y).abs() < 1e-4);
    assert!(shots[0].velocity.y.abs() > 0.5);
}

#[test]
fn test_hasty_shots_are_faster() {
    let mut harness = Harness::default().with_player(Vec2::new(100.0, 300.0));
    let attacks = harness.tuning.boss.attacks.clone();
    let body = boss_body(Vec2::new(600.0, 300.0));
    let mut projectiles = ProjectileSet::default();

    execute_attack(
        AttackPlan::hasty(AttackKind::SingleShot),
        &body,
        Facing::Left,
        &attacks,
        &mut projectiles,
        &mut harness.context(),
    );

    let expected = harness.tuning.projectiles.shot_speed * attacks.desperate_speed_multiplier;
    assert!((projectiles.as_slice()[0].speed() - expected).abs() < 1e-4);
}

#[test]
fn test_shield_pulse_knocks_back_nearby_player() {
    let mut harness = Harness::default().with_player(Vec2::new(500.0, 300.0));
    let attacks = harness.tuning.boss.attacks.clone();
    let body = boss_body(Vec2::new(600.0, 300.0));
    let mut projectiles = ProjectileSet::default();

    let fired = execute_attack(
        AttackPlan::new(AttackKind::ShieldPulse),
        &body,
        Facing::Left,
        &attacks,
        &mut projectiles,
        &mut harness.context(),
    );

    assert_eq!(fired, 0);
    assert!(projectiles.is_empty());
    assert!(harness.cues.contains(&CombatCue::Knockback {
        direction: Vec2::NEG_X,
        magnitude: attacks.pulse_force,
    }));
}

#[test]
fn test_shield_pulse_misses_distant_player() {
    let mut harness = Harness::default().with_player(Vec2::new(100.0, 300.0));
    let attacks = harness.tuning.boss.attacks.clone();
    let body = boss_body(Vec2::new(600.0, 300.0));
    let mut projectiles = ProjectileSet::default();

    execute_attack(
        AttackPlan::new(AttackKind::ShieldPulse),
        &body,
        Facing::Left,
        &attacks,
        &mut projectiles,
        &mut harness.context(),
    );

    assert_eq!(
        harness.count_cues(|cue| matches!(cue, CombatCue::Knockback { .. })),
        0
    );
    assert_eq!(
        harness.count_cues(|cue| matches!(cue, CombatCue::ExplosionEffect { .. })),
        1
    );
}

#[test]
fn test_telegraph_durations_favor_area_attacks() {
    let tuning = AttackTuning::default();
    let barrage = AttackKind::MissileBarrage.telegraph(&tuning);
    assert!(AttackKind::ShieldPulse.telegraph(&tuning) < barrage);
    assert!(AttackKind::SingleShot.telegraph(&tuning) < barrage);
}

// ============================================================================
// Director
// ============================================================================

#[test]
fn test_phase_thresholds() {
    assert_eq!(phase_for_fraction(1.0), 1);
    assert_eq!(phase_for_fraction(0.7), 1);
    assert_eq!(phase_for_fraction(0.6), 2);
    assert_eq!(phase_for_fraction(0.34), 2);
    assert_eq!(phase_for_fraction(1.0 / 3.0), 3);
    assert_eq!(phase_for_fraction(0.0), 3);
}

#[test]
fn test_phase_is_monotonic_and_berserk_latches() {
    let mut harness = Harness::default();
    let attacks = harness.tuning.boss.attacks.clone();
    let mut director = AttackDirector::new(&attacks);

    director.observe_health(0.9, &attacks, &mut harness.context());
    assert_eq!(director.phase(), 1);

    let shift = director.observe_health(0.5, &attacks, &mut harness.context());
    assert_eq!(shift.new_phase, Some(2));

    let shift = director.observe_health(0.2, &attacks, &mut harness.context());
    assert_eq!(shift.new_phase, Some(3));
    assert!(shift.berserk_entered);

    // Healing back up changes nothing.
    let shift = director.observe_health(1.0, &attacks, &mut harness.context());
    assert_eq!(shift.new_phase, None);
    assert!(!shift.berserk_entered);
    assert_eq!(director.phase(), 3);
    assert!(director.is_berserk());
    let multiplier = director.speed_multiplier(&attacks);
    assert!((multiplier - attacks.critical_speed_multiplier).abs() < 1e-6);

    assert_eq!(
        harness.cues,
        vec![
            CombatCue::PhaseChanged { phase: 2 },
            CombatCue::PhaseChanged { phase: 3 },
            CombatCue::BerserkEntered,
        ]
    );
}

#[test]
fn test_begin_is_noop_while_busy() {
    let attacks = AttackTuning::default();
    let mut director = AttackDirector::new(&attacks);

    assert!(director.begin(AttackPlan::new(AttackKind::SingleShot), &attacks));
    assert!(!director.begin(AttackPlan::new(AttackKind::TwinShot), &attacks));

    match director.stage() {
        AttackStage::Telegraphing { attack, .. } => {
            assert_eq!(attack.kind, AttackKind::SingleShot)
        }
        other => panic!("expected telegraph, got {:?}", other),
    }
}

#[test]
fn test_director_waits_without_target() {
    let mut harness = Harness::default();
    let attacks = harness.tuning.boss.attacks.clone();
    let mut director = AttackDirector::new(&attacks);

    for _ in 0..300 {
        let plan = director.tick(Vec2::new(600.0, 300.0), &attacks, &mut harness.context());
        assert!(plan.is_none());
    }
    assert!(director.is_ready());
    assert!(harness.cues.is_empty());
}

#[test]
fn test_director_turns_toward_player_behind() {
    let mut harness = Harness::default().with_player(Vec2::new(700.0, 300.0));
    let attacks = harness.tuning.boss.attacks.clone();
    let mut director = AttackDirector::new(&attacks);
    let mut executed = Vec::new();

    for _ in 0..200 {
        let position = Vec2::new(600.0, 300.0);
        if let Some(plan) = director.tick(position, &attacks, &mut harness.context()) {
            executed.push(plan);
        }
    }

    assert_eq!(director.facing(), Facing::Right);
    // Phase one, player close: the pulse, exactly once.
    assert_eq!(executed, vec![AttackPlan::new(AttackKind::ShieldPulse)]);
}

#[test]
fn test_phase_three_prefers_barrage_unless_close() {
    let mut harness = Harness::default().with_player(Vec2::new(200.0, 300.0));
    let attacks = AttackTuning {
        opening_delay: 0.0,
        ..AttackTuning::default()
    };

    let mut far = AttackDirector::new(&attacks);
    far.observe_health(0.3, &attacks, &mut harness.context());
    far.tick(Vec2::new(600.0, 300.0), &attacks, &mut harness.context());
    let barrage = AttackPlan::new(AttackKind::MissileBarrage);
    assert!(matches!(
        far.stage(),
        AttackStage::Telegraphing { attack, .. } if attack == barrage
    ));

    let mut near = AttackDirector::new(&attacks);
    near.observe_health(0.3, &attacks, &mut harness.context());
    near.tick(Vec2::new(300.0, 300.0), &attacks, &mut harness.context());
    let desperate = AttackPlan::hasty(AttackKind::TwinShot);
    assert!(matches!(
        near.stage(),
        AttackStage::Telegraphing { attack, .. } if attack == desperate
    ));
}

#[test]
fn test_phase_two_twin_chance() {
    let attacks = AttackTuning {
        opening_delay: 0.0,
        ..AttackTuning::default()
    };
    let position = Vec2::new(600.0, 300.0);

    let mut harness = Harness::default()
        .with_player(Vec2::new(200.0, 300.0))
        .with_rng(SequenceRandom::constant(0.5));
    let mut director = AttackDirector::new(&attacks);
    director.observe_health(0.5, &attacks, &mut harness.context());
    director.tick(position, &attacks, &mut harness.context());
    assert!(matches!(
        director.stage(),
        AttackStage::Telegraphing { attack, .. } if attack.kind == AttackKind::TwinShot
    ));

    let mut harness = Harness::default()
        .with_player(Vec2::new(200.0, 300.0))
        .with_rng(SequenceRandom::constant(0.9));
    let mut director = AttackDirector::new(&attacks);
    director.observe_health(0.5, &attacks, &mut harness.context());
    director.tick(position, &attacks, &mut harness.context());
    assert!(matches!(
        director.stage(),
        AttackStage::Telegraphing { attack, .. } if attack.kind == AttackKind::SingleShot
    ));
}

#[test]
fn test_cooldown_shortens_with_phase_and_berserk() {
    let mut harness = Harness::default();
    let attacks = AttackTuning::default();

    let cooldown_after_attack = |director: &mut AttackDirector, harness: &mut Harness| {
        director.begin(AttackPlan::new(AttackKind::SingleShot), &attacks);
        for _ in 0..120 {
            director.tick(Vec2::new(600.0, 300.0), &attacks, &mut harness.context());
            if director.is_ready() {
                break;
            }
        }
        director.cooldown()
    };

    let mut calm = AttackDirector::new(&attacks);
    let calm_cooldown = cooldown_after_attack(&mut calm, &mut harness);
    assert!((calm_cooldown - attacks.cooldown_phase_one).abs() < 1e-5);

    let mut berserk = AttackDirector::new(&attacks);
    berserk.observe_health(0.1, &attacks, &mut harness.context());
    let berserk_cooldown = cooldown_after_attack(&mut berserk, &mut harness);
    let expected = attacks.cooldown_phase_three * attacks.berserk_cooldown_scale;
    assert!((berserk_cooldown - expected).abs() < 1e-5);
    assert!(berserk_cooldown < calm_cooldown);
}

#[test]
fn test_cancel_only_drops_telegraphs() {
    let attacks = AttackTuning::default();
    let mut director = AttackDirector::new(&attacks);
    director.begin(AttackPlan::new(AttackKind::TwinShot), &attacks);
    director.cancel();
    assert!(director.is_ready());
}

// ============================================================================
// Charge
// ============================================================================

#[test]
fn test_charge_requires_phase_and_cooldown() {
    let tuning = ChargeTuning {
        min_phase: 2,
        ..ChargeTuning::default()
    };
    let mut charge = ChargeState::new(&tuning);
    assert!(!charge.can_charge(2, &tuning));

    for _ in 0..400 {
        charge.tick(1.0 / 60.0, &tuning);
    }
    assert!(!charge.can_charge(1, &tuning));
    assert!(charge.can_charge(2, &tuning));
}

#[test]
fn test_retreat_is_proportional_to_charge() {
    let tuning = ChargeTuning {
        cooldown: 0.0,
        ..ChargeTuning::default()
    };
    let mut rng = SequenceRandom::constant(0.5);
    let mut charge = ChargeState::new(&tuning);
    assert!(!charge.can_charge(1, &tuning));
    assert!(charge.can_charge(2, &tuning));
    assert!(charge.start(
        Vec2::new(600.0, 300.0),
        Vec2::new(200.0, 300.0),
        2.0,
        &tuning,
        &mut rng
    ));

    let mut charge_ticks = 0;
    let mut retreat_ticks = 0;
    let mut charge_velocity = Vec2::ZERO;
    let mut retreat_velocity = Vec2::ZERO;
    for _ in 0..600 {
        match charge.phase() {
            ChargePhase::Charging { .. } => {
                charge_ticks += 1;
                charge_velocity = charge.tick(1.0 / 60.0, &tuning).unwrap_or_default();
            }
            ChargePhase::Retreating { .. } => {
                // No new charge mid-retreat.
                assert!(!charge.can_charge(3, &tuning));
                assert!(!charge.start(Vec2::ZERO, Vec2::X, 2.0, &tuning, &mut rng));
                retreat_ticks += 1;
                retreat_velocity = charge.tick(1.0 / 60.0, &tuning).unwrap_or_default();
            }
            ChargePhase::Idle => break,
        }
    }

    // 0.8 s charge at 0.5 between 0.6 and 1.0, then 1.5x that in retreat.
    assert!((charge_ticks as i32 - 48).abs() <= 1);
    assert!((retreat_ticks as i32 - 72).abs() <= 1);
    assert!(charge_velocity.x < 0.0);
    assert!(retreat_velocity.x > 0.0);
    assert!(charge.is_idle());
}

// ============================================================================
// ECS wiring
// ============================================================================

#[derive(Resource, Default)]
struct Outcomes {
    destroyed: Vec<Entity>,
    defeated: Vec<Entity>,
    shields_broken: Vec<Entity>,
    explosions: usize,
}

fn record_outcomes(
    mut outcomes: ResMut<Outcomes>,
    mut destroyed: MessageReader<EnemyDestroyedEvent>,
    mut defeated: MessageReader<BossDefeatedEvent>,
    mut shields: MessageReader<ShieldBrokenEvent>,
    mut explosions: MessageReader<ExplosionEffectEvent>,
) {
    outcomes
        .destroyed
        .extend(destroyed.read().map(|event| event.entity));
    outcomes.defeated.extend(defeated.read().map(|event| event.boss));
    outcomes
        .shields_broken
        .extend(shields.read().map(|event| event.entity));
    outcomes.explosions += explosions.read().count();
}

/// The full plugin stack on a clock advanced by hand.
fn combat_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .insert_resource(CombatTuning::default())
        .insert_resource(RunConfig { seed: 1 })
        .init_resource::<Outcomes>()
        .add_plugins(AdversaryPlugin::default())
        .add_systems(Update, record_outcomes.after(AdversarySet::Cleanup));
    app
}

fn step(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(DT));
        app.update();
    }
}

fn straight_enemy() -> Enemy {
    Enemy::spawn(
        MovementPattern::Straight,
        Vec2::new(400.0, 300.0),
        &CombatTuning::default(),
        &PlayField::default(),
        &mut SequenceRandom::constant(0.5),
    )
}

#[test]
fn test_damage_message_destroys_then_despawns_enemy() {
    let mut app = combat_app();
    let entity = app
        .world_mut()
        .spawn((straight_enemy(), Transform::default()))
        .id();

    app.world_mut().write_message(DamageEvent {
        target: entity,
        amount: 5,
        hit_position: None,
    });
    step(&mut app, 1);

    let outcomes = app.world().resource::<Outcomes>();
    assert_eq!(outcomes.destroyed, vec![entity]);
    assert_eq!(outcomes.explosions, 1);
    let enemy = app.world().get::<Enemy>(entity).expect("kept while exploding");
    assert!(enemy.is_dying());

    step(&mut app, 10);
    assert!(app.world().get::<Enemy>(entity).is_some());
    step(&mut app, 40);
    assert!(app.world().get::<Enemy>(entity).is_none());
    assert_eq!(app.world().resource::<Outcomes>().explosions, 1);
}

#[test]
fn test_boss_shield_break_and_defeat_reach_messages() {
    let mut app = combat_app();
    let boss = Boss::new(Vec2::new(600.0, 300.0), &CombatTuning::default().boss)
        .with_health(Health::new(10))
        .with_shield(Shield::new(5, 8.0));
    let entity = app.world_mut().spawn((boss, Transform::default())).id();

    app.world_mut().write_message(DamageEvent {
        target: entity,
        amount: 20,
        hit_position: None,
    });
    step(&mut app, 1);

    let outcomes = app.world().resource::<Outcomes>();
    assert_eq!(outcomes.shields_broken, vec![entity]);
    assert!(outcomes.defeated.is_empty());
    let health = app.world().get::<Boss>(entity).map(|boss| boss.health().current);
    assert_eq!(health, Some(10));

    app.world_mut().write_message(DamageEvent {
        target: entity,
        amount: 10,
        hit_position: None,
    });
    step(&mut app, 1);
    assert_eq!(app.world().resource::<Outcomes>().defeated, vec![entity]);

    step(&mut app, 120);
    assert!(app.world().get::<Boss>(entity).is_none());
}

#[test]
fn test_projectile_hit_message_spends_the_shot() {
    let mut app = combat_app();
    let mut enemy = straight_enemy();
    for y in [200.0, 300.0] {
        enemy.projectiles_mut().fire(Projectile::leftward(
            Vec2::new(380.0, y),
            5.0,
            Vec2::new(10.0, 4.0),
            1,
        ));
    }
    let entity = app.world_mut().spawn((enemy, Transform::default())).id();

    app.world_mut().write_message(ProjectileHitEvent {
        owner: entity,
        index: 0,
    });
    step(&mut app, 1);

    let enemy = app.world().get::<Enemy>(entity).expect("enemy alive");
    let remaining: Vec<f32> = enemy
        .projectiles()
        .iter()
        .map(|shot| shot.position.y)
        .collect();
    assert_eq!(remaining, vec![300.0]);
}
