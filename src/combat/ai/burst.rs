//! Combat domain: the burst elite (zigzag pattern).
//!
//! Cruises with a small zigzag while loosely following a target lane. When
//! the player comes within reach ahead of it, it telegraphs and performs a
//! single speed burst toward a lane picked from the player's current or
//! predicted height.

use bevy::prelude::*;

use crate::combat::components::Hull;
use crate::content::BurstTuning;
use crate::core::{CombatCue, PlayField, RandomSource, TickContext};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstStage {
    Cruise,
    Telegraph { remaining: f32 },
    Bursting { remaining: f32 },
    /// Post-burst cooldown. Lane retargeting is suspended.
    Recovery { remaining: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BurstState {
    pub stage: BurstStage,
    burst_available: bool,
    pub target_lane_y: f32,
    lane_cooldown: f32,
    zigzag_direction: f32,
    zigzag_timer: f32,
}

impl BurstState {
    pub fn new(spawn: Vec2, tuning: &BurstTuning, rng: &mut dyn RandomSource) -> Self {
        Self {
            stage: BurstStage::Cruise,
            burst_available: true,
            target_lane_y: spawn.y,
            lane_cooldown: 0.0,
            zigzag_direction: rng.sign(),
            zigzag_timer: tuning.zigzag_interval,
        }
    }

    /// One-way latch: `false` from the moment the burst starts.
    pub fn burst_available(&self) -> bool {
        self.burst_available
    }

    pub fn is_bursting(&self) -> bool {
        matches!(self.stage, BurstStage::Bursting { .. })
    }

    pub fn update(&mut self, hull: &mut Hull, ctx: &mut TickContext<'_>) {
        let tuning = ctx.tuning;
        let tuning = &tuning.burst;
        let dt = ctx.dt;
        let frames = ctx.frames();
        let speed = hull.body.speed;

        match self.stage {
            BurstStage::Cruise => {
                hull.body.position.x -= speed * frames;
                self.zigzag(hull, tuning, dt, frames);
                self.retarget_lane(hull.body.position, tuning, ctx);
                self.follow_lane(hull, tuning.lane_follow_rate, frames);

                let in_reach = ctx.player().is_some_and(|player| {
                    let ahead = hull.body.position.x - player.x;
                    ahead > 0.0 && ahead <= tuning.detection_range
                });
                if self.burst_available && in_reach {
                    self.stage = BurstStage::Telegraph {
                        remaining: tuning.telegraph,
                    };
                    ctx.emit(CombatCue::BurstTelegraph {
                        position: hull.body.position,
                    });
                    debug!("Burst telegraph at x={:.0}", hull.body.position.x);
                }
            }
            BurstStage::Telegraph { remaining } => {
                hull.body.position.x -= speed * frames;
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.stage = BurstStage::Telegraph { remaining };
                    return;
                }
                if let (Some(player), Some(previous)) = (ctx.player(), ctx.player_previous()) {
                    self.target_lane_y =
                        pick_lane(player, previous, ctx.field, tuning, &mut *ctx.rng);
                }
                self.burst_available = false;
                self.stage = BurstStage::Bursting {
                    remaining: tuning.burst_duration,
                };
            }
            BurstStage::Bursting { remaining } => {
                hull.body.position.x -= speed * tuning.burst_multiplier * frames;
                self.follow_lane(hull, tuning.burst_lane_rate, frames);
                let remaining = remaining - dt;
                self.stage = if remaining > 0.0 {
                    BurstStage::Bursting { remaining }
                } else {
                    BurstStage::Recovery {
                        remaining: tuning.burst_cooldown,
                    }
                };
            }
            BurstStage::Recovery { remaining } => {
                hull.body.position.x -= speed * frames;
                self.zigzag(hull, tuning, dt, frames);
                let remaining = remaining - dt;
                self.stage = if remaining > 0.0 {
                    BurstStage::Recovery { remaining }
                } else {
                    BurstStage::Cruise
                };
            }
        }
    }

    fn zigzag(&mut self, hull: &mut Hull, tuning: &BurstTuning, dt: f32, frames: f32) {
        hull.body.position.y += self.zigzag_direction * tuning.zigzag_speed * frames;
        self.zigzag_timer -= dt;
        if self.zigzag_timer <= 0.0 {
            self.zigzag_direction = -self.zigzag_direction;
            self.zigzag_timer = tuning.zigzag_interval;
        }
    }

    fn retarget_lane(
        &mut self,
        position: Vec2,
        tuning: &BurstTuning,
        ctx: &mut TickContext<'_>,
    ) {
        self.lane_cooldown = (self.lane_cooldown - ctx.dt).max(0.0);
        if self.lane_cooldown > 0.0 {
            return;
        }
        let (Some(player), Some(previous)) = (ctx.player(), ctx.player_previous()) else {
            return;
        };
        let lane = pick_lane(player, previous, ctx.field, tuning, &mut *ctx.rng);
        if lane != self.target_lane_y {
            debug!("Burst enemy at y={:.0} retargeting lane {:.0}", position.y, lane);
        }
        self.target_lane_y = lane;
        self.lane_cooldown = tuning.lane_retarget_cooldown;
    }

    fn follow_lane(&self, hull: &mut Hull, rate: f32, frames: f32) {
        let blend = (rate * frames).min(1.0);
        hull.body.position.y += (self.target_lane_y - hull.body.position.y) * blend;
    }
}

/// Picks a lane from the player's current height, or with
/// `prediction_chance` from a linear extrapolation of their last movement.
pub fn pick_lane(
    player: Vec2,
    previous: Vec2,
    field: &PlayField,
    tuning: &BurstTuning,
    rng: &mut dyn RandomSource,
) -> f32 {
    let y = if rng.chance(tuning.prediction_chance) {
        player.y + (player.y - previous.y) * tuning.prediction_frames
    } else {
        player.y
    };
    lane_center(y, field, tuning.lane_count)
}

/// Center of the lane containing `y`. The usable band between the vertical
/// margins is split into `lane_count` equal lanes.
pub fn lane_center(y: f32, field: &PlayField, lane_count: u32) -> f32 {
    let lanes = lane_count.max(1);
    let top = field.vertical_margin;
    let usable = (field.height - 2.0 * field.vertical_margin).max(1.0);
    let lane_height = usable / lanes as f32;
    let index = ((y - top) / lane_height).floor().clamp(0.0, (lanes - 1) as f32);
    top + (index + 0.5) * lane_height
}
