//! Combat domain: the juggernaut, a shielded heavy that holds a distance band
//! to the player and runs the phased attack loop.

use bevy::prelude::*;

use crate::combat::ai::director::{AttackDirector, ChargeState};
use crate::combat::attacks::execute_attack;
use crate::combat::components::Hull;
use crate::content::JuggernautTuning;
use crate::core::{CombatCue, PlayField, TickContext};

#[derive(Debug, Clone)]
pub struct JuggernautState {
    pub target_x: f32,
    reposition_timer: f32,
    anchor_y: f32,
    bob_phase: f32,
    tracking_offset: f32,
    pub director: AttackDirector,
    pub charge: ChargeState,
}

impl JuggernautState {
    pub fn new(spawn: Vec2, tuning: &JuggernautTuning, field: &PlayField) -> Self {
        Self {
            target_x: field.width * 0.75,
            reposition_timer: tuning.reposition_interval,
            anchor_y: spawn.y,
            bob_phase: 0.0,
            tracking_offset: 0.0,
            director: AttackDirector::new(&tuning.attacks),
            charge: ChargeState::new(&tuning.charge),
        }
    }

    pub fn update(&mut self, hull: &mut Hull, ctx: &mut TickContext<'_>) {
        let tuning = ctx.tuning;
        let tuning = &tuning.juggernaut;
        let dt = ctx.dt;
        let frames = ctx.frames();

        if hull.shield.tick(dt, self.director.phase() == 1) {
            ctx.emit(CombatCue::ShieldRestored {
                position: hull.body.position,
            });
        }

        let shift = self
            .director
            .observe_health(hull.health.fraction(), &tuning.attacks, ctx);
        if let Some(phase) = shift.new_phase {
            debug!("Juggernaut entered phase {}", phase);
        }
        let speed = hull.body.speed * self.director.speed_multiplier(&tuning.attacks);

        self.reposition_timer -= dt;
        if self.reposition_timer <= 0.0 {
            self.reposition_timer = tuning.reposition_interval;
            self.retarget(hull, tuning, ctx);
        }

        let position = hull.body.position;
        let wants_charge = self.director.is_ready()
            && self.charge.can_charge(self.director.phase(), &tuning.charge);
        let facing = self.director.facing();
        let target = ctx
            .player()
            .filter(|player| wants_charge && facing.faces(position, *player));
        if let Some(player) = target {
            self.charge
                .start(position, player, speed, &tuning.charge, &mut *ctx.rng);
            ctx.emit(CombatCue::ChargeStarted { position });
            debug!("Juggernaut charging from x={:.0}", position.x);
        }

        match self.charge.tick(dt, &tuning.charge) {
            Some(velocity) => hull.body.position += velocity * frames,
            None => {
                let step = (self.target_x - position.x) * tuning.approach_rate * frames;
                let limit = speed * frames;
                hull.body.position.x += step.clamp(-limit, limit);
            }
        }
        // Charges may not carry it off the left edge.
        hull.body.position.x = hull.body.position.x.max(hull.body.half_width());

        if let Some(player) = ctx.player() {
            let goal = player.y + self.tracking_offset;
            let blend = (tuning.tracking_rate * frames).min(1.0);
            self.anchor_y += (goal - self.anchor_y) * blend;
        }
        self.anchor_y = ctx.field.clamp_y(self.anchor_y, hull.body.half_height());
        self.bob_phase += tuning.bob_frequency * frames;
        hull.body.position.y = self.anchor_y + tuning.bob_amplitude * self.bob_phase.sin();

        if let Some(plan) = self
            .director
            .tick(hull.body.position, &tuning.attacks, ctx)
        {
            execute_attack(
                plan,
                &hull.body,
                self.director.facing(),
                &tuning.attacks,
                &mut hull.projectiles,
                ctx,
            );
        }
    }

    /// Picks a new target x that keeps the horizontal gap to the player
    /// within `[min_distance, max_distance]`.
    fn retarget(
        &mut self,
        hull: &Hull,
        tuning: &JuggernautTuning,
        ctx: &mut TickContext<'_>,
    ) {
        let x = hull.body.position.x;
        self.tracking_offset = ctx
            .rng
            .range(-tuning.tracking_offset, tuning.tracking_offset);

        let Some(player) = ctx.player() else {
            return;
        };
        let distance = (x - player.x).abs();
        let band = tuning.max_distance - tuning.min_distance;
        let min_x = ctx.field.width * tuning.min_x_fraction;
        let max_x = (ctx.field.width - hull.body.half_width()).max(min_x);
        // Stay on whichever side of the player we are already on.
        let side = if x >= player.x { 1.0 } else { -1.0 };

        let target = if distance < tuning.min_distance {
            let reach = tuning.min_distance + band * 0.25;
            let near = (player.x + side * reach).clamp(min_x, max_x);
            let far = (player.x - side * reach).clamp(min_x, max_x);
            let near_gap = (near - player.x).abs();
            if near_gap >= tuning.min_distance || near_gap >= (far - player.x).abs() {
                near
            } else {
                far
            }
        } else if distance > tuning.max_distance {
            player.x + side * (tuning.min_distance + tuning.max_distance) * 0.5
        } else if ctx.rng.chance(tuning.reposition_chance) {
            x + ctx
                .rng
                .range(-tuning.reposition_jitter, tuning.reposition_jitter)
        } else {
            return;
        };

        self.target_x = target.clamp(min_x, max_x);
        debug!(
            "Juggernaut retarget: distance {:.0}, target x {:.0}",
            distance, self.target_x
        );
    }
}
