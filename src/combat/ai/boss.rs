//! Combat domain: the boss state machine.
//!
//! Entering -> Active <-> Telegraphing -> Executing -> Active, and from any
//! live state to Dying -> Removed once health runs out.

use bevy::prelude::*;

use crate::combat::ai::director::{AttackDirector, AttackStage, ChargeState};
use crate::combat::attacks::execute_attack;
use crate::combat::components::{Body, Combatant, Health, Shield, sanitize_damage};
use crate::content::BossTuning;
use crate::core::{CombatCue, TickContext};
use crate::projectiles::ProjectileSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossState {
    /// Flying in to the battle position. Phase and attack logic are off.
    #[default]
    Entering,
    Active,
    Telegraphing,
    Executing,
    /// Explosion sequence. Harmless apart from the one area-damage pulse.
    Dying,
    Removed,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct DeathSequence {
    elapsed: f32,
    radius: f32,
    damage_dealt: bool,
    announced: bool,
}

#[derive(Component, Debug, Clone)]
pub struct Boss {
    body: Body,
    health: Health,
    shield: Shield,
    state: BossState,
    director: AttackDirector,
    charge: ChargeState,
    projectiles: ProjectileSet,
    anchor_y: f32,
    bob_phase: f32,
    death: DeathSequence,
}

impl Boss {
    pub fn new(position: Vec2, tuning: &BossTuning) -> Self {
        Self {
            body: Body::new(
                position,
                Vec2::new(tuning.hull.width, tuning.hull.height),
                tuning.hull.speed,
            ),
            health: Health::new(tuning.hull.health),
            shield: Shield::new(tuning.shield.capacity, tuning.shield.regen_delay),
            state: BossState::Entering,
            director: AttackDirector::new(&tuning.attacks),
            charge: ChargeState::new(&tuning.charge),
            projectiles: ProjectileSet::default(),
            anchor_y: position.y,
            bob_phase: 0.0,
            death: DeathSequence::default(),
        }
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = health;
        self
    }

    pub fn with_shield(mut self, shield: Shield) -> Self {
        self.shield = shield;
        self
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    pub fn phase(&self) -> u8 {
        self.director.phase()
    }

    pub fn is_berserk(&self) -> bool {
        self.director.is_berserk()
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn shield(&self) -> &Shield {
        &self.shield
    }

    pub fn director(&self) -> &AttackDirector {
        &self.director
    }

    pub fn charge(&self) -> &ChargeState {
        &self.charge
    }

    /// Current explosion radius while dying.
    pub fn explosion_radius(&self) -> f32 {
        self.death.radius
    }

    pub fn explosion_damage_dealt(&self) -> bool {
        self.death.damage_dealt
    }

    /// Heals without touching the phase or berserk latches.
    pub fn restore_health(&mut self, amount: u32) -> u32 {
        if matches!(self.state, BossState::Dying | BossState::Removed) {
            return 0;
        }
        self.health.heal(amount)
    }

    /// Battle x position: `battle_offset` in from the right edge.
    fn battle_x(&self, ctx: &TickContext<'_>) -> f32 {
        ctx.field.width - ctx.tuning.boss.battle_offset
    }

    fn update_entering(&mut self, ctx: &mut TickContext<'_>) {
        let battle_x = self.battle_x(ctx);
        let step = ctx.tuning.boss.entry_speed * ctx.frames();
        self.body.position.x = (self.body.position.x - step).max(battle_x);
        if self.body.position.x <= battle_x {
            self.state = BossState::Active;
            self.anchor_y = self.body.position.y;
            info!("Boss reached battle position at x={:.0}", battle_x);
        }
    }

    fn update_combat(&mut self, ctx: &mut TickContext<'_>) {
        let tuning = ctx.tuning;
        let tuning = &tuning.boss;
        let dt = ctx.dt;
        let frames = ctx.frames();

        let shift = self
            .director
            .observe_health(self.health.fraction(), &tuning.attacks, ctx);
        if let Some(phase) = shift.new_phase {
            info!("Boss entered phase {}", phase);
        }
        if shift.berserk_entered {
            info!("Boss is berserk");
        }

        if self.shield.tick(dt, self.director.phase() == 1) {
            info!("Boss shield restored");
            ctx.emit(CombatCue::ShieldRestored {
                position: self.body.position,
            });
        }

        let speed = self.body.speed * self.director.speed_multiplier(&tuning.attacks);
        let position = self.body.position;
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
            debug!("Boss charging toward ({:.0}, {:.0})", player.x, player.y);
        }

        match self.charge.tick(dt, &tuning.charge) {
            Some(velocity) => {
                self.body.position += velocity * frames;
                self.anchor_y = self.body.position.y;
            }
            None => self.hover(speed, ctx),
        }

        let field = ctx.field;
        let half_width = self.body.half_width();
        self.body.position.x = self
            .body
            .position
            .x
            .clamp(half_width, (field.width - half_width).max(half_width));
        self.body.position.y = field.clamp_y(self.body.position.y, self.body.half_height());

        if let Some(plan) = self.director.tick(self.body.position, &tuning.attacks, ctx) {
            execute_attack(
                plan,
                &self.body,
                self.director.facing(),
                &tuning.attacks,
                &mut self.projectiles,
                ctx,
            );
        }

        self.state = match self.director.stage() {
            AttackStage::Ready => BossState::Active,
            AttackStage::Telegraphing { .. } => BossState::Telegraphing,
            AttackStage::Executing { .. } => BossState::Executing,
        };
    }

    /// Drifts back to the battle x, loosely tracks the player's height, and bobs.
    fn hover(&mut self, speed: f32, ctx: &TickContext<'_>) {
        let tuning = &ctx.tuning.boss;
        let frames = ctx.frames();
        let limit = speed * frames;

        let dx = self.battle_x(ctx) - self.body.position.x;
        self.body.position.x += (dx * 0.05 * frames).clamp(-limit, limit);

        if let Some(player) = ctx.player() {
            let blend = (tuning.tracking_rate * frames).min(1.0);
            let pull = (player.y - self.anchor_y) * blend;
            self.anchor_y += pull.clamp(-limit, limit);
        }
        self.bob_phase += tuning.bob_frequency * frames;
        self.body.position.y = self.anchor_y + tuning.bob_amplitude * self.bob_phase.sin();
    }

    fn update_dying(&mut self, ctx: &mut TickContext<'_>) {
        let tuning = ctx.tuning;
        let tuning = &tuning.boss;

        if !self.death.announced {
            self.death.announced = true;
            ctx.emit(CombatCue::ExplosionEffect {
                position: self.body.position,
                intensity: 1.0,
            });
        }

        self.death.elapsed += ctx.dt;
        let duration = tuning.death_duration.max(f32::EPSILON);
        let progress = (self.death.elapsed / duration).min(1.0);
        self.death.radius = tuning.death_max_radius * progress;

        if !self.death.damage_dealt && progress >= 0.5 {
            self.death.damage_dealt = true;
            ctx.emit(CombatCue::ExplosionDamage {
                position: self.body.position,
                radius: self.death.radius,
                damage: tuning.death_damage,
            });
        }

        if progress >= 1.0 {
            self.state = BossState::Removed;
            info!("Boss explosion finished");
        }
    }
}

impl Combatant for Boss {
    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if self.shield.take_break_cue() {
            info!("Boss shield broken");
            ctx.emit(CombatCue::ShieldBroken {
                position: self.body.position,
            });
        }

        match self.state {
            BossState::Entering => self.update_entering(ctx),
            BossState::Active | BossState::Telegraphing | BossState::Executing => {
                self.update_combat(ctx)
            }
            BossState::Dying => self.update_dying(ctx),
            BossState::Removed => {}
        }

        self.projectiles.update(ctx.dt, ctx.player(), ctx.field);
    }

    fn take_damage(&mut self, amount: i32, _hit_position: Option<Vec2>) -> bool {
        if matches!(self.state, BossState::Dying | BossState::Removed) {
            return false;
        }
        let amount = sanitize_damage(amount);
        if self.shield.absorb(amount) {
            return false;
        }
        self.health.take_damage(amount);
        if !self.health.is_depleted() {
            return false;
        }
        self.director.cancel();
        self.state = BossState::Dying;
        true
    }

    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn hitbox(&self) -> Rect {
        self.body.hitbox()
    }

    fn projectiles(&self) -> &ProjectileSet {
        &self.projectiles
    }

    fn projectiles_mut(&mut self) -> &mut ProjectileSet {
        &mut self.projectiles
    }

    fn is_dying(&self) -> bool {
        matches!(self.state, BossState::Dying | BossState::Removed)
    }

    fn is_removable(&self) -> bool {
        self.state == BossState::Removed
    }
}
