//! Combat domain: phase tracking, attack selection, and charge pacing shared
//! by juggernauts and bosses.

use bevy::prelude::*;

use crate::combat::attacks::{AttackKind, AttackPlan};
use crate::combat::components::Facing;
use crate::content::{AttackTuning, ChargeTuning};
use crate::core::{CombatCue, RandomSource, TickContext};

/// Health phase for a remaining-health fraction: 1 above 2/3, 2 above 1/3,
/// 3 at or below 1/3.
pub fn phase_for_fraction(fraction: f32) -> u8 {
    if fraction > 2.0 / 3.0 {
        1
    } else if fraction > 1.0 / 3.0 {
        2
    } else {
        3
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackStage {
    Ready,
    Telegraphing { attack: AttackPlan, remaining: f32 },
    /// The attack fired this tick; the director returns to `Ready` next tick.
    Executing { attack: AttackPlan },
}

/// What changed when the director last looked at health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthShift {
    pub new_phase: Option<u8>,
    pub berserk_entered: bool,
}

#[derive(Debug, Clone)]
pub struct AttackDirector {
    stage: AttackStage,
    phase: u8,
    berserk: bool,
    cooldown: f32,
    facing: Facing,
}

impl AttackDirector {
    pub fn new(tuning: &AttackTuning) -> Self {
        Self {
            stage: AttackStage::Ready,
            phase: 1,
            berserk: false,
            cooldown: tuning.opening_delay,
            facing: Facing::Left,
        }
    }

    pub fn stage(&self) -> AttackStage {
        self.stage
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn is_berserk(&self) -> bool {
        self.berserk
    }

    pub fn is_ready(&self) -> bool {
        self.stage == AttackStage::Ready
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Movement speed multiplier from the phase-three latch.
    pub fn speed_multiplier(&self, tuning: &AttackTuning) -> f32 {
        if self.phase >= 3 {
            tuning.critical_speed_multiplier
        } else {
            1.0
        }
    }

    /// Updates phase and berserk from the remaining-health fraction. Both only
    /// ever move forward, so restoring health later changes nothing.
    pub fn observe_health(
        &mut self,
        fraction: f32,
        tuning: &AttackTuning,
        ctx: &mut TickContext<'_>,
    ) -> HealthShift {
        let mut shift = HealthShift::default();

        let derived = phase_for_fraction(fraction);
        if derived > self.phase {
            self.phase = derived;
            shift.new_phase = Some(derived);
            ctx.emit(CombatCue::PhaseChanged { phase: derived });
        }

        if !self.berserk && fraction <= tuning.berserk_fraction {
            self.berserk = true;
            shift.berserk_entered = true;
            ctx.emit(CombatCue::BerserkEntered);
        }

        shift
    }

    /// Starts telegraphing `plan`. A no-op returning `false` unless the
    /// director is `Ready`.
    pub fn begin(&mut self, plan: AttackPlan, tuning: &AttackTuning) -> bool {
        if self.stage != AttackStage::Ready {
            return false;
        }
        self.stage = AttackStage::Telegraphing {
            attack: plan,
            remaining: plan.kind.telegraph(tuning),
        };
        true
    }

    /// Drops a pending telegraph. Attacks already executing are left alone.
    pub fn cancel(&mut self) {
        if matches!(self.stage, AttackStage::Telegraphing { .. }) {
            self.stage = AttackStage::Ready;
        }
    }

    /// Advances one tick. Returns the plan on the single tick it must be
    /// executed.
    pub fn tick(
        &mut self,
        position: Vec2,
        tuning: &AttackTuning,
        ctx: &mut TickContext<'_>,
    ) -> Option<AttackPlan> {
        match self.stage {
            AttackStage::Ready => {
                self.cooldown = (self.cooldown - ctx.dt).max(0.0);
                if self.cooldown > 0.0 {
                    return None;
                }
                // No target: hold until one shows up.
                let player = ctx.player()?;

                if !self.facing.faces(position, player) {
                    self.facing = Facing::toward(position, player);
                    self.cooldown = tuning.turn_retry;
                    debug!("Turned {:?} to face the player", self.facing);
                    return None;
                }

                let plan = self.choose(position.distance(player), tuning, &mut *ctx.rng);
                if self.begin(plan, tuning) {
                    ctx.emit(CombatCue::AttackTelegraphed {
                        attack: plan.kind,
                        position,
                    });
                    debug!("Telegraphing {:?} in phase {}", plan.kind, self.phase);
                }
                None
            }
            AttackStage::Telegraphing { attack, remaining } => {
                let remaining = remaining - ctx.dt;
                if remaining > 0.0 {
                    self.stage = AttackStage::Telegraphing { attack, remaining };
                    return None;
                }
                self.stage = AttackStage::Executing { attack };
                Some(attack)
            }
            AttackStage::Executing { .. } => {
                self.stage = AttackStage::Ready;
                self.cooldown = self.next_cooldown(tuning);
                None
            }
        }
    }

    fn next_cooldown(&self, tuning: &AttackTuning) -> f32 {
        let base = match self.phase {
            1 => tuning.cooldown_phase_one,
            2 => tuning.cooldown_phase_two,
            _ => tuning.cooldown_phase_three,
        };
        if self.berserk {
            base * tuning.berserk_cooldown_scale
        } else {
            base
        }
    }

    fn choose(
        &self,
        distance: f32,
        tuning: &AttackTuning,
        rng: &mut dyn RandomSource,
    ) -> AttackPlan {
        match self.phase {
            1 if distance <= tuning.pulse_range => AttackPlan::new(AttackKind::ShieldPulse),
            1 => AttackPlan::new(AttackKind::SingleShot),
            2 if rng.chance(tuning.twin_chance) => AttackPlan::new(AttackKind::TwinShot),
            2 => AttackPlan::new(AttackKind::SingleShot),
            _ if distance <= tuning.desperation_range => AttackPlan::hasty(AttackKind::TwinShot),
            _ => AttackPlan::new(AttackKind::MissileBarrage),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargePhase {
    Idle,
    Charging {
        remaining: f32,
        duration: f32,
        velocity: Vec2,
    },
    /// Forced back-off after a charge; no new charge may start.
    Retreating { remaining: f32, velocity: Vec2 },
}

/// Charge-then-retreat cycle. Retreat length scales with the charge length.
#[derive(Debug, Clone)]
pub struct ChargeState {
    phase: ChargePhase,
    cooldown: f32,
}

impl ChargeState {
    pub fn new(tuning: &ChargeTuning) -> Self {
        Self {
            phase: ChargePhase::Idle,
            cooldown: tuning.cooldown,
        }
    }

    pub fn phase(&self) -> ChargePhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ChargePhase::Idle
    }

    pub fn can_charge(&self, health_phase: u8, tuning: &ChargeTuning) -> bool {
        self.is_idle() && self.cooldown <= 0.0 && health_phase >= tuning.min_phase
    }

    /// Launches a charge from `from` toward `target` at a multiple of
    /// `base_speed`. Ignored unless idle.
    pub fn start(
        &mut self,
        from: Vec2,
        target: Vec2,
        base_speed: f32,
        tuning: &ChargeTuning,
        rng: &mut dyn RandomSource,
    ) -> bool {
        if !self.is_idle() {
            return false;
        }
        let duration = rng.range(tuning.duration_min, tuning.duration_max);
        let velocity =
            (target - from).normalize_or(Vec2::NEG_X) * base_speed * tuning.speed_multiplier;
        self.phase = ChargePhase::Charging {
            remaining: duration,
            duration,
            velocity,
        };
        true
    }

    /// Advances timers and returns the velocity override (pixels per frame)
    /// while charging or retreating.
    pub fn tick(&mut self, dt: f32, tuning: &ChargeTuning) -> Option<Vec2> {
        match self.phase {
            ChargePhase::Idle => {
                self.cooldown = (self.cooldown - dt).max(0.0);
                None
            }
            ChargePhase::Charging {
                remaining,
                duration,
                velocity,
            } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = ChargePhase::Charging {
                        remaining,
                        duration,
                        velocity,
                    };
                } else {
                    let multiplier = tuning.speed_multiplier.max(f32::EPSILON);
                    self.phase = ChargePhase::Retreating {
                        remaining: duration * tuning.retreat_ratio,
                        velocity: -velocity / multiplier,
                    };
                }
                Some(velocity)
            }
            ChargePhase::Retreating {
                remaining,
                velocity,
            } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = ChargePhase::Retreating {
                        remaining,
                        velocity,
                    };
                } else {
                    self.phase = ChargePhase::Idle;
                    self.cooldown = tuning.cooldown;
                }
                Some(velocity)
            }
        }
    }
}
