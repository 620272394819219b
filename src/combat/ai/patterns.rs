//! Combat domain: the formula-driven movement patterns.

use bevy::prelude::*;

use crate::combat::components::Hull;
use crate::content::{DiveTuning, OscillateTuning, SineTuning};
use crate::core::{RandomSource, TickContext};

/// Leftward drift along a sine wave. Amplitude and frequency are fixed at spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SineState {
    pub base_y: f32,
    pub phase: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl SineState {
    pub fn new(spawn: Vec2, tuning: &SineTuning) -> Self {
        Self {
            base_y: spawn.y,
            phase: 0.0,
            amplitude: tuning.amplitude,
            frequency: tuning.frequency,
        }
    }

    pub fn update(&mut self, hull: &mut Hull, ctx: &mut TickContext<'_>) {
        let frames = ctx.frames();
        let body = &mut hull.body;
        body.position.x -= body.speed * frames;
        self.phase += self.frequency * frames;
        body.position.y = self.base_y + self.amplitude * self.phase.sin();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiveStage {
    Approach,
    Dive { target_y: f32 },
    Retreat,
}

/// Approach, then dive at a height, then retreat. Transitions are positional.
#[derive(Debug, Clone, PartialEq)]
pub struct DiveState {
    pub stage: DiveStage,
}

impl Default for DiveState {
    fn default() -> Self {
        Self {
            stage: DiveStage::Approach,
        }
    }
}

impl DiveState {
    pub fn update(&mut self, hull: &mut Hull, ctx: &mut TickContext<'_>) {
        let tuning: &DiveTuning = &ctx.tuning.dive;
        let frames = ctx.frames();
        let field = ctx.field;
        let body = &mut hull.body;

        match self.stage {
            DiveStage::Approach => {
                body.position.x -= body.speed * frames;
                if body.position.x <= field.width * tuning.trigger_fraction {
                    let aim = ctx.player().map_or(field.center_y(), |player| player.y);
                    let target_y = field.clamp_y(aim, body.half_height());
                    self.stage = DiveStage::Dive { target_y };
                }
            }
            DiveStage::Dive { target_y } => {
                body.position.x -= body.speed * 0.5 * frames;
                let gap = target_y - body.position.y;
                let step = tuning.dive_speed * frames;
                body.position.y += gap.clamp(-step, step);
                if (target_y - body.position.y).abs() <= tuning.target_tolerance {
                    self.stage = DiveStage::Retreat;
                }
            }
            DiveStage::Retreat => {
                body.position.x -= body.speed * tuning.retreat_speed_multiplier * frames;
                body.position.y -= tuning.retreat_climb * frames;
            }
        }
    }
}

/// Triangular vertical bounce around the spawn height.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillateState {
    pub anchor_y: f32,
    /// `1.0` moving down, `-1.0` moving up.
    pub direction: f32,
}

impl OscillateState {
    pub fn new(spawn: Vec2, rng: &mut dyn RandomSource) -> Self {
        Self {
            anchor_y: spawn.y,
            direction: rng.sign(),
        }
    }

    pub fn update(&mut self, hull: &mut Hull, ctx: &mut TickContext<'_>) {
        let tuning: &OscillateTuning = &ctx.tuning.oscillate;
        let frames = ctx.frames();
        let body = &mut hull.body;

        body.position.x -= body.speed * frames;
        body.position.y += self.direction * tuning.vertical_speed * frames;

        let top = self.anchor_y - tuning.range;
        let bottom = self.anchor_y + tuning.range;
        if body.position.y >= bottom {
            body.position.y = bottom;
            self.direction = -1.0;
        } else if body.position.y <= top {
            body.position.y = top;
            self.direction = 1.0;
        }

        let clamped = ctx.field.clamp_y(body.position.y, body.half_height());
        if clamped < body.position.y {
            self.direction = -1.0;
        } else if clamped > body.position.y {
            self.direction = 1.0;
        }
        body.position.y = clamped;
    }
}

/// Constant leftward motion.
pub fn update_straight(hull: &mut Hull, ctx: &mut TickContext<'_>) {
    hull.body.position.x -= hull.body.speed * ctx.frames();
}
