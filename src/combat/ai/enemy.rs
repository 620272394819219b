//! Combat domain: the regular enemy combatant.

use bevy::prelude::*;

use crate::combat::ai::behavior::Behavior;
use crate::combat::components::{
    Body, Combatant, Health, Hull, Lifecycle, MovementPattern, Shield, sanitize_damage,
};
use crate::content::CombatTuning;
use crate::core::{CombatCue, PlayField, RandomSource, TickContext};
use crate::projectiles::ProjectileSet;

/// A non-boss adversary: one movement pattern, health, optional shield, and
/// the projectiles it has fired.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    hull: Hull,
    behavior: Behavior,
    lifecycle: Lifecycle,
    explosion_duration: f32,
    explosion_announced: bool,
}

impl Enemy {
    pub fn spawn(
        pattern: MovementPattern,
        position: Vec2,
        tuning: &CombatTuning,
        field: &PlayField,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let hull_tuning = tuning.hull_for(pattern);
        let body = Body::new(
            position,
            Vec2::new(hull_tuning.width, hull_tuning.height),
            hull_tuning.speed,
        );
        let shield = match pattern {
            MovementPattern::Juggernaut => Shield::new(
                tuning.juggernaut.shield.capacity,
                tuning.juggernaut.shield.regen_delay,
            ),
            _ => Shield::none(),
        };

        Self {
            hull: Hull::new(body, Health::new(hull_tuning.health), shield),
            behavior: Behavior::for_pattern(pattern, position, tuning, field, rng),
            lifecycle: Lifecycle::Alive,
            explosion_duration: tuning.explosion.enemy_duration,
            explosion_announced: false,
        }
    }

    /// Spawns at the standard entry point just past the right edge.
    pub fn spawn_at_edge(
        pattern: MovementPattern,
        y: f32,
        tuning: &CombatTuning,
        field: &PlayField,
        rng: &mut dyn RandomSource,
    ) -> Self {
        Self::spawn(pattern, Vec2::new(field.spawn_x(), y), tuning, field, rng)
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.hull.health = health;
        self
    }

    pub fn with_shield(mut self, shield: Shield) -> Self {
        self.hull.shield = shield;
        self
    }

    pub fn pattern(&self) -> MovementPattern {
        self.behavior.pattern()
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut Behavior {
        &mut self.behavior
    }

    pub fn body(&self) -> &Body {
        &self.hull.body
    }

    pub fn health(&self) -> &Health {
        &self.hull.health
    }

    pub fn shield(&self) -> &Shield {
        &self.hull.shield
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    fn update_alive(&mut self, ctx: &mut TickContext<'_>) {
        self.behavior.update(&mut self.hull, ctx);

        let body = &mut self.hull.body;
        body.position.y = ctx.field.clamp_y(body.position.y, body.half_height());
        if ctx.field.is_past_left_edge(body.position.x, body.size.x) {
            self.lifecycle = Lifecycle::Removed;
            debug!("{:?} left the field", self.behavior.pattern());
        }
    }

    fn update_exploding(&mut self, remaining: f32, ctx: &mut TickContext<'_>) {
        if !self.explosion_announced {
            self.explosion_announced = true;
            ctx.emit(CombatCue::ExplosionEffect {
                position: self.hull.body.position,
                intensity: 0.5,
            });
        }
        let remaining = remaining - ctx.dt;
        self.lifecycle = if remaining > 0.0 {
            Lifecycle::Exploding { remaining }
        } else {
            Lifecycle::Removed
        };
    }
}

impl Combatant for Enemy {
    fn update(&mut self, ctx: &mut TickContext<'_>) {
        // Flushed before the lifecycle check so a same-tick kill keeps the cue.
        if self.hull.shield.take_break_cue() {
            debug!("{:?} shield broken", self.behavior.pattern());
            ctx.emit(CombatCue::ShieldBroken {
                position: self.hull.body.position,
            });
        }
        match self.lifecycle {
            Lifecycle::Alive => self.update_alive(ctx),
            Lifecycle::Exploding { remaining } => self.update_exploding(remaining, ctx),
            Lifecycle::Removed => {}
        }
        // Shots already in flight outlive their owner's explosion.
        self.hull
            .projectiles
            .update(ctx.dt, ctx.player(), ctx.field);
    }

    fn take_damage(&mut self, amount: i32, _hit_position: Option<Vec2>) -> bool {
        if self.lifecycle != Lifecycle::Alive {
            return false;
        }
        let amount = sanitize_damage(amount);
        if self.hull.shield.absorb(amount) {
            return false;
        }
        self.hull.health.take_damage(amount);
        if !self.hull.health.is_depleted() {
            return false;
        }
        self.lifecycle = Lifecycle::Exploding {
            remaining: self.explosion_duration,
        };
        true
    }

    fn position(&self) -> Vec2 {
        self.hull.body.position
    }

    fn hitbox(&self) -> Rect {
        self.hull.body.hitbox()
    }

    fn projectiles(&self) -> &ProjectileSet {
        &self.hull.projectiles
    }

    fn projectiles_mut(&mut self) -> &mut ProjectileSet {
        &mut self.hull.projectiles
    }

    fn is_dying(&self) -> bool {
        self.lifecycle != Lifecycle::Alive
    }

    fn is_removable(&self) -> bool {
        self.lifecycle == Lifecycle::Removed
    }
}
