//! Projectiles domain: shots and homing missiles owned by the combatant that
//! fired them.
//!
//! There is no standalone projectile system. Each owner advances its own
//! [`ProjectileSet`] during its behavior step.

mod components;

pub use components::{Homing, Projectile, ProjectileSet};
