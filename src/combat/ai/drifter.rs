//! Combat domain: the base drifter enemy.
//!
//! Drifts left at reduced speed, stutters now and then, occasionally dashes
//! vertically after a short warning, and fires exactly one shot once it is
//! inside the right edge of the field.

use bevy::prelude::*;

use crate::combat::components::Hull;
use crate::content::DrifterTuning;
use crate::core::{CombatCue, RandomSource, TickContext};
use crate::projectiles::Projectile;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashStage {
    Idle,
    Telegraph { remaining: f32, direction: f32 },
    Dashing { remaining: f32, direction: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrifterState {
    pub dash: DashStage,
    stutter_cooldown: f32,
    stutter_remaining: f32,
    can_shoot: bool,
    has_shot: bool,
    preparing: Option<f32>,
}

impl DrifterState {
    pub fn new(tuning: &DrifterTuning, rng: &mut dyn RandomSource) -> Self {
        Self {
            dash: DashStage::Idle,
            stutter_cooldown: rng
                .range(tuning.stutter_cooldown_min, tuning.stutter_cooldown_max),
            stutter_remaining: 0.0,
            can_shoot: false,
            has_shot: false,
            preparing: None,
        }
    }

    /// Latched once the drifter is inside firing range of the edge.
    pub fn can_shoot(&self) -> bool {
        self.can_shoot
    }

    /// Latched after the one and only shot.
    pub fn has_shot(&self) -> bool {
        self.has_shot
    }

    pub fn is_preparing_fire(&self) -> bool {
        self.preparing.is_some()
    }

    pub fn is_stuttering(&self) -> bool {
        self.stutter_remaining > 0.0
    }

    pub fn update(&mut self, hull: &mut Hull, ctx: &mut TickContext<'_>) {
        let tuning = ctx.tuning;
        let tuning = &tuning.drifter;
        let dt = ctx.dt;
        let frames = ctx.frames();

        // Stutter
        let mut speed = hull.body.speed * tuning.drift_factor;
        if self.stutter_remaining > 0.0 {
            speed *= tuning.stutter_factor;
            self.stutter_remaining = (self.stutter_remaining - dt).max(0.0);
        } else {
            self.stutter_cooldown -= dt;
            if self.stutter_cooldown <= 0.0 {
                self.stutter_remaining = tuning.stutter_duration;
                self.stutter_cooldown = ctx
                    .rng
                    .range(tuning.stutter_cooldown_min, tuning.stutter_cooldown_max);
            }
        }
        hull.body.position.x -= speed * frames;

        self.update_dash(hull, tuning, ctx);
        self.update_fire(hull, tuning, ctx);
    }

    fn update_dash(
        &mut self,
        hull: &mut Hull,
        tuning: &DrifterTuning,
        ctx: &mut TickContext<'_>,
    ) {
        let dt = ctx.dt;
        let frames = ctx.frames();
        match self.dash {
            DashStage::Idle => {
                if ctx.rng.chance_per_frame(tuning.dash_chance, frames) {
                    let direction = match ctx.player() {
                        Some(player) if player.y != hull.body.position.y => {
                            (player.y - hull.body.position.y).signum()
                        }
                        _ => ctx.rng.sign(),
                    };
                    self.dash = DashStage::Telegraph {
                        remaining: tuning.dash_telegraph,
                        direction,
                    };
                    ctx.emit(CombatCue::DashTelegraph {
                        position: hull.body.position,
                    });
                }
            }
            DashStage::Telegraph {
                remaining,
                direction,
            } => {
                let remaining = remaining - dt;
                self.dash = if remaining > 0.0 {
                    DashStage::Telegraph {
                        remaining,
                        direction,
                    }
                } else {
                    DashStage::Dashing {
                        remaining: tuning.dash_duration,
                        direction,
                    }
                };
            }
            DashStage::Dashing {
                remaining,
                direction,
            } => {
                hull.body.position.y += direction * tuning.dash_speed * frames;
                let remaining = remaining - dt;
                self.dash = if remaining > 0.0 {
                    DashStage::Dashing {
                        remaining,
                        direction,
                    }
                } else {
                    DashStage::Idle
                };
            }
        }
    }

    fn update_fire(
        &mut self,
        hull: &mut Hull,
        tuning: &DrifterTuning,
        ctx: &mut TickContext<'_>,
    ) {
        let fire_line = ctx.field.width - tuning.fire_edge_offset;
        if !self.can_shoot && hull.body.position.x <= fire_line {
            self.can_shoot = true;
        }
        if !self.can_shoot || self.has_shot {
            return;
        }

        match self.preparing {
            None => {
                self.preparing = Some(tuning.fire_preparation);
                ctx.emit(CombatCue::FireTelegraph {
                    position: hull.body.position,
                });
            }
            Some(remaining) => {
                let remaining = remaining - ctx.dt;
                if remaining > 0.0 {
                    self.preparing = Some(remaining);
                    return;
                }
                let shots = &ctx.tuning.projectiles;
                let origin = Vec2::new(
                    hull.body.position.x - hull.body.half_width(),
                    hull.body.position.y,
                );
                hull.projectiles.fire(Projectile::leftward(
                    origin,
                    shots.shot_speed,
                    Vec2::new(shots.shot_width, shots.shot_height),
                    shots.shot_damage,
                ));
                self.preparing = None;
                self.has_shot = true;
                ctx.emit(CombatCue::ProjectileFired {
                    origin,
                    count: 1,
                    homing: false,
                });
            }
        }
    }
}
