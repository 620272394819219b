//! Projectiles domain: projectile records and the per-owner collection.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::core::{PlayField, frames};

/// Steering parameters for a homing projectile.
#[derive(Debug, Clone, PartialEq)]
pub struct Homing {
    /// Fraction of the target direction blended into velocity per frame.
    pub strength: f32,
    /// Speed the velocity is renormalized to after every correction.
    pub speed: f32,
    /// Seconds left before the projectile expires regardless of position.
    pub lifetime: f32,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec2,
    /// Pixels per frame.
    pub velocity: Vec2,
    pub size: Vec2,
    pub damage: u32,
    pub homing: Option<Homing>,
    trail: VecDeque<Vec2>,
    trail_capacity: usize,
    expired: bool,
}

impl Projectile {
    pub fn new(origin: Vec2, velocity: Vec2, size: Vec2, damage: u32) -> Self {
        Self {
            position: origin,
            velocity,
            size,
            damage,
            homing: None,
            trail: VecDeque::new(),
            trail_capacity: 0,
            expired: false,
        }
    }

    /// A shot travelling straight left at `speed`.
    pub fn leftward(origin: Vec2, speed: f32, size: Vec2, damage: u32) -> Self {
        Self::new(origin, Vec2::new(-speed, 0.0), size, damage)
    }

    /// A shot travelling along `direction` (need not be normalized) at `speed`.
    pub fn aimed(origin: Vec2, direction: Vec2, speed: f32, size: Vec2, damage: u32) -> Self {
        let velocity = direction.normalize_or(Vec2::NEG_X) * speed;
        Self::new(origin, velocity, size, damage)
    }

    pub fn homing(
        origin: Vec2,
        direction: Vec2,
        homing: Homing,
        size: Vec2,
        damage: u32,
        trail_capacity: usize,
    ) -> Self {
        let velocity = direction.normalize_or(Vec2::NEG_X) * homing.speed;
        Self {
            homing: Some(homing),
            trail: VecDeque::with_capacity(trail_capacity),
            trail_capacity,
            ..Self::new(origin, velocity, size, damage)
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_homing(&self) -> bool {
        self.homing.is_some()
    }

    /// Recent positions, oldest first. Cosmetic only.
    pub fn trail(&self) -> impl Iterator<Item = &Vec2> {
        self.trail.iter()
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Marks the projectile for removal on the owner's next update.
    pub fn expire(&mut self) {
        self.expired = true;
    }

    /// Advances one tick. Homing projectiles steer toward `target` first.
    pub fn step(&mut self, dt: f32, target: Option<Vec2>) {
        if self.expired {
            return;
        }
        let elapsed = frames(dt);

        if let Some(homing) = &mut self.homing {
            homing.lifetime -= dt;
            if homing.lifetime <= 0.0 {
                self.expired = true;
                return;
            }

            let heading = self.velocity.normalize_or(Vec2::NEG_X);
            let steered = match target {
                Some(target) => {
                    let desired = (target - self.position).normalize_or_zero();
                    self.velocity + desired * homing.strength * homing.speed * elapsed
                }
                None => self.velocity,
            };
            self.velocity = steered.normalize_or(heading) * homing.speed;

            if self.trail_capacity > 0 {
                self.trail.push_back(self.position);
                while self.trail.len() > self.trail_capacity {
                    self.trail.pop_front();
                }
            }
        }

        self.position += self.velocity * elapsed;
    }
}

/// Projectiles owned by one combatant.
#[derive(Debug, Clone, Default)]
pub struct ProjectileSet {
    items: Vec<Projectile>,
}

impl ProjectileSet {
    pub fn fire(&mut self, projectile: Projectile) {
        self.items.push(projectile);
    }

    /// Moves every projectile and drops the expired or off-field ones.
    pub fn update(&mut self, dt: f32, target: Option<Vec2>, field: &PlayField) {
        for projectile in &mut self.items {
            projectile.step(dt, target);
        }
        self.items.retain(|projectile| {
            !projectile.is_expired()
                && !field.is_outside(projectile.position, field.offscreen_margin)
        });
    }

    /// Confirms a hit reported by the collision resolver. `index` is the
    /// stable index yielded by [`ProjectileSet::live`], which matches
    /// [`ProjectileSet::as_slice`] until the next `update`.
    /// Returns `false` if `index` is out of range or already spent.
    pub fn mark_hit(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(projectile) if !projectile.is_expired() => {
                projectile.expire();
                true
            }
            _ => false,
        }
    }

    /// Unspent projectiles, for drawing.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.live().map(|(_, projectile)| projectile)
    }

    /// Unspent projectiles with the index [`ProjectileSet::mark_hit`] expects.
    pub fn live(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, projectile)| !projectile.is_expired())
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
