//! Core domain: shared resources for the play field and run seeding.

use bevy::prelude::*;
use rand::Rng;

use crate::core::random::SeededRandom;

/// Bounds of the scrolling play field.
///
/// Field coordinates have their origin at the top-left corner with y growing
/// downward. Enemies spawn past the right edge and travel left.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlayField {
    pub width: f32,
    pub height: f32,
    /// Distance from the top and bottom edges that combatants may not enter.
    pub vertical_margin: f32,
    /// How far past any edge a projectile may travel before it is dropped.
    pub offscreen_margin: f32,
}

impl Default for PlayField {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            vertical_margin: 20.0,
            offscreen_margin: 50.0,
        }
    }
}

impl PlayField {
    /// Spawn-side x position just past the right edge.
    pub fn spawn_x(&self) -> f32 {
        self.width + 20.0
    }

    pub fn center_y(&self) -> f32 {
        self.height * 0.5
    }

    /// Clamps a center y so a body of `half_height` stays inside the margins.
    pub fn clamp_y(&self, y: f32, half_height: f32) -> f32 {
        let min = self.vertical_margin + half_height;
        let max = self.height - self.vertical_margin - half_height;
        if min > max {
            return self.center_y();
        }
        y.clamp(min, max)
    }

    /// True once a body centered at `x` with `width` has fully left the left edge.
    pub fn is_past_left_edge(&self, x: f32, width: f32) -> bool {
        x + width * 0.5 < 0.0
    }

    pub fn is_outside(&self, position: Vec2, margin: f32) -> bool {
        position.x < -margin
            || position.x > self.width + margin
            || position.y < -margin
            || position.y > self.height + margin
    }

    /// Field position to a y-up world translation centered on the field.
    pub fn to_world(&self, position: Vec2) -> Vec3 {
        Vec3::new(
            position.x - self.width * 0.5,
            self.height * 0.5 - position.y,
            0.0,
        )
    }

    /// Inverse of [`PlayField::to_world`].
    pub fn from_world(&self, translation: Vec3) -> Vec2 {
        Vec2::new(
            translation.x + self.width * 0.5,
            self.height * 0.5 - translation.y,
        )
    }
}

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// The run's random stream, seeded from [`RunConfig`].
#[derive(Resource, Debug, Clone)]
pub struct CombatRng(pub SeededRandom);

impl FromWorld for CombatRng {
    fn from_world(world: &mut World) -> Self {
        let seed = world.get_resource::<RunConfig>().map_or(0, |config| config.seed);
        Self(SeededRandom::new(seed))
    }
}
