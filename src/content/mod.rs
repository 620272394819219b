//! Content domain: data-driven combat tuning loaded from RON.

mod data;
mod loader;

pub use data::{
    AttackTuning, BossTuning, BurstTuning, ChargeTuning, CombatTuning, DiveTuning, DrifterTuning,
    ExplosionTuning, HullTuning, JuggernautTuning, OscillateTuning, ProjectileTuning,
    ShieldTuning, SineTuning, StraightTuning,
};
pub use loader::{ContentLoadError, load_tuning, parse_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

/// Default location of the tuning file, relative to the working directory.
pub const TUNING_PATH: &str = "assets/data/combat_tuning.ron";

/// Loads [`CombatTuning`] at startup, falling back to built-in defaults.
pub struct ContentPlugin {
    pub tuning_path: PathBuf,
}

impl Default for ContentPlugin {
    fn default() -> Self {
        Self {
            tuning_path: PathBuf::from(TUNING_PATH),
        }
    }
}

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<CombatTuning>() {
            return;
        }

        let tuning = match load_tuning(&self.tuning_path) {
            Ok(tuning) => {
                info!("Loaded combat tuning from {}", self.tuning_path.display());
                tuning
            }
            Err(e) => {
                warn!("{}; using built-in combat tuning", e);
                CombatTuning::default()
            }
        };

        app.insert_resource(tuning);
    }
}
