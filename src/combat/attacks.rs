//! Combat domain: heavy-adversary attack kinds and their execution.

use bevy::prelude::*;

use crate::combat::components::{Body, Facing};
use crate::content::{AttackTuning, ProjectileTuning};
use crate::core::{CombatCue, TickContext};
use crate::projectiles::{Homing, Projectile, ProjectileSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    SingleShot,
    TwinShot,
    MissileBarrage,
    /// Close-range knockback burst centered on the attacker.
    ShieldPulse,
}

impl AttackKind {
    /// Warning window before the attack goes off.
    pub fn telegraph(self, tuning: &AttackTuning) -> f32 {
        match self {
            AttackKind::SingleShot => tuning.telegraph_single,
            AttackKind::TwinShot => tuning.telegraph_twin,
            AttackKind::MissileBarrage => tuning.telegraph_barrage,
            AttackKind::ShieldPulse => tuning.telegraph_pulse,
        }
    }
}

/// A chosen attack. `hasty` attacks fire faster projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackPlan {
    pub kind: AttackKind,
    pub hasty: bool,
}

impl AttackPlan {
    pub fn new(kind: AttackKind) -> Self {
        Self { kind, hasty: false }
    }

    pub fn hasty(kind: AttackKind) -> Self {
        Self { kind, hasty: true }
    }
}

/// Applies an attack once. Returns the number of projectiles fired.
pub fn execute_attack(
    plan: AttackPlan,
    body: &Body,
    facing: Facing,
    attacks: &AttackTuning,
    projectiles: &mut ProjectileSet,
    ctx: &mut TickContext<'_>,
) -> usize {
    let tuning = ctx.tuning;
    let shots = &tuning.projectiles;
    let origin = body.muzzle(facing);
    let aim = ctx
        .player()
        .map(|target| target - origin)
        .filter(|offset| offset.length_squared() > f32::EPSILON)
        .unwrap_or_else(|| facing.direction());
    let speed_scale = if plan.hasty {
        attacks.desperate_speed_multiplier
    } else {
        1.0
    };

    let fired = match plan.kind {
        AttackKind::SingleShot => {
            projectiles.fire(aimed_shot(origin, aim, speed_scale, shots));
            1
        }
        AttackKind::TwinShot => {
            for angle in [-attacks.twin_angle, attacks.twin_angle] {
                let direction = Vec2::from_angle(angle).rotate(aim);
                projectiles.fire(aimed_shot(origin, direction, speed_scale, shots));
            }
            2
        }
        AttackKind::MissileBarrage => {
            let count = attacks.barrage_count;
            for i in 0..count {
                let angle = fan_angle(i, count, attacks.barrage_spread);
                let direction = Vec2::from_angle(angle).rotate(aim);
                projectiles.fire(Projectile::homing(
                    origin,
                    direction,
                    Homing {
                        strength: shots.missile_homing_strength,
                        speed: shots.missile_speed * speed_scale,
                        lifetime: shots.missile_lifetime,
                    },
                    Vec2::new(shots.missile_width, shots.missile_height),
                    shots.missile_damage,
                    shots.trail_length,
                ));
            }
            count
        }
        AttackKind::ShieldPulse => {
            ctx.emit(CombatCue::ExplosionEffect {
                position: body.position,
                intensity: 0.6,
            });
            if let Some(player) = ctx.player() {
                let offset = player - body.position;
                if offset.length() <= attacks.pulse_range {
                    ctx.emit(CombatCue::Knockback {
                        direction: offset.normalize_or(facing.direction()),
                        magnitude: attacks.pulse_force,
                    });
                }
            }
            0
        }
    };

    if fired > 0 {
        ctx.emit(CombatCue::ProjectileFired {
            origin,
            count: fired,
            homing: plan.kind == AttackKind::MissileBarrage,
        });
    }
    debug!("Executed {:?} ({} projectiles)", plan.kind, fired);
    fired
}

fn aimed_shot(
    origin: Vec2,
    direction: Vec2,
    speed_scale: f32,
    shots: &ProjectileTuning,
) -> Projectile {
    Projectile::aimed(
        origin,
        direction,
        shots.shot_speed * speed_scale,
        Vec2::new(shots.shot_width, shots.shot_height),
        shots.shot_damage,
    )
}

/// Evenly spreads `count` angles across `[-spread, spread]`.
fn fan_angle(index: usize, count: usize, spread: f32) -> f32 {
    if count <= 1 {
        return 0.0;
    }
    let t = index as f32 / (count - 1) as f32;
    -spread + 2.0 * spread * t
}
