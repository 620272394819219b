//! Data definitions for the combat tuning file.
//!
//! These structs mirror `assets/data/combat_tuning.ron`. Every section is
//! `#[serde(default)]`, so a file only needs to list the values it overrides.
//!
//! Speeds are pixels per 60 Hz frame, durations are seconds, and `*_chance`
//! values are probabilities for a single 60 Hz frame.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::MovementPattern;

#[derive(Resource, Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatTuning {
    pub projectiles: ProjectileTuning,
    pub straight: StraightTuning,
    pub sine: SineTuning,
    pub dive: DiveTuning,
    pub oscillate: OscillateTuning,
    pub drifter: DrifterTuning,
    pub burst: BurstTuning,
    pub juggernaut: JuggernautTuning,
    pub boss: BossTuning,
    pub explosion: ExplosionTuning,
}

impl CombatTuning {
    /// Base body stats for a movement pattern.
    pub fn hull_for(&self, pattern: MovementPattern) -> &HullTuning {
        match pattern {
            MovementPattern::Straight => &self.straight.hull,
            MovementPattern::Zigzag => &self.burst.hull,
            MovementPattern::Sine => &self.sine.hull,
            MovementPattern::Dive => &self.dive.hull,
            MovementPattern::Drifter => &self.drifter.hull,
            MovementPattern::Oscillate => &self.oscillate.hull,
            MovementPattern::Juggernaut => &self.juggernaut.hull,
        }
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HullTuning {
    pub speed: f32,
    pub health: u32,
    pub width: f32,
    pub height: f32,
}

impl Default for HullTuning {
    fn default() -> Self {
        Self {
            speed: 3.0,
            health: 1,
            width: 40.0,
            height: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub shot_speed: f32,
    pub shot_damage: u32,
    pub shot_width: f32,
    pub shot_height: f32,
    pub missile_speed: f32,
    /// Fraction of the target direction blended into velocity per frame.
    pub missile_homing_strength: f32,
    pub missile_lifetime: f32,
    pub missile_damage: u32,
    pub missile_width: f32,
    pub missile_height: f32,
    pub trail_length: usize,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            shot_speed: 5.0,
            shot_damage: 1,
            shot_width: 10.0,
            shot_height: 4.0,
            missile_speed: 3.5,
            missile_homing_strength: 0.12,
            missile_lifetime: 5.0,
            missile_damage: 2,
            missile_width: 12.0,
            missile_height: 6.0,
            trail_length: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShieldTuning {
    pub capacity: u32,
    /// Seconds after breaking before the shield may come back.
    pub regen_delay: f32,
}

impl Default for ShieldTuning {
    fn default() -> Self {
        Self {
            capacity: 30,
            regen_delay: 6.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChargeTuning {
    /// Lowest health phase in which a charge may start.
    pub min_phase: u8,
    pub cooldown: f32,
    pub duration_min: f32,
    pub duration_max: f32,
    pub speed_multiplier: f32,
    /// Forced retreat length as a multiple of the charge that preceded it.
    pub retreat_ratio: f32,
}

impl Default for ChargeTuning {
    fn default() -> Self {
        Self {
            min_phase: 2,
            cooldown: 5.0,
            duration_min: 0.6,
            duration_max: 1.0,
            speed_multiplier: 3.5,
            retreat_ratio: 1.5,
        }
    }
}

/// Attack selection and pacing shared by juggernauts and bosses.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AttackTuning {
    pub opening_delay: f32,
    pub cooldown_phase_one: f32,
    pub cooldown_phase_two: f32,
    pub cooldown_phase_three: f32,
    /// Delay before retrying selection after turning to face the player.
    pub turn_retry: f32,
    pub pulse_range: f32,
    pub pulse_force: f32,
    pub desperation_range: f32,
    pub twin_chance: f32,
    /// Half-angle in radians between the two twin-shot projectiles.
    pub twin_angle: f32,
    pub desperate_speed_multiplier: f32,
    pub barrage_count: usize,
    /// Half-angle in radians of the missile fan.
    pub barrage_spread: f32,
    pub telegraph_single: f32,
    pub telegraph_twin: f32,
    pub telegraph_pulse: f32,
    pub telegraph_barrage: f32,
    pub berserk_fraction: f32,
    pub berserk_cooldown_scale: f32,
    /// Permanent movement speed multiplier once phase three is reached.
    pub critical_speed_multiplier: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            opening_delay: 1.5,
            cooldown_phase_one: 2.2,
            cooldown_phase_two: 1.6,
            cooldown_phase_three: 1.1,
            turn_retry: 0.25,
            pulse_range: 180.0,
            pulse_force: 12.0,
            desperation_range: 150.0,
            twin_chance: 0.75,
            twin_angle: 0.25,
            desperate_speed_multiplier: 1.5,
            barrage_count: 5,
            barrage_spread: 0.6,
            telegraph_single: 0.4,
            telegraph_twin: 0.5,
            telegraph_pulse: 0.3,
            telegraph_barrage: 0.8,
            berserk_fraction: 0.25,
            berserk_cooldown_scale: 0.7,
            critical_speed_multiplier: 1.35,
        }
    }
}

// ============================================================================
// Movement patterns
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StraightTuning {
    pub hull: HullTuning,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SineTuning {
    pub hull: HullTuning,
    pub amplitude: f32,
    /// Phase advance in radians per frame.
    pub frequency: f32,
}

impl Default for SineTuning {
    fn default() -> Self {
        Self {
            hull: HullTuning {
                speed: 2.5,
                health: 2,
                ..HullTuning::default()
            },
            amplitude: 60.0,
            frequency: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiveTuning {
    pub hull: HullTuning,
    /// The dive starts once x falls to this fraction of the field width.
    pub trigger_fraction: f32,
    pub dive_speed: f32,
    pub target_tolerance: f32,
    pub retreat_speed_multiplier: f32,
    pub retreat_climb: f32,
}

impl Default for DiveTuning {
    fn default() -> Self {
        Self {
            hull: HullTuning {
                speed: 3.0,
                health: 2,
                ..HullTuning::default()
            },
            trigger_fraction: 0.65,
            dive_speed: 4.0,
            target_tolerance: 6.0,
            retreat_speed_multiplier: 1.6,
            retreat_climb: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OscillateTuning {
    pub hull: HullTuning,
    pub range: f32,
    pub vertical_speed: f32,
}

impl Default for OscillateTuning {
    fn default() -> Self {
        Self {
            hull: HullTuning {
                speed: 2.0,
                health: 2,
                ..HullTuning::default()
            },
            range: 80.0,
            vertical_speed: 2.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DrifterTuning {
    pub hull: HullTuning,
    pub drift_factor: f32,
    pub dash_chance: f32,
    pub dash_telegraph: f32,
    pub dash_duration: f32,
    pub dash_speed: f32,
    /// Firing unlocks once x is this far inside the right edge.
    pub fire_edge_offset: f32,
    pub fire_preparation: f32,
    pub stutter_cooldown_min: f32,
    pub stutter_cooldown_max: f32,
    pub stutter_duration: f32,
    pub stutter_factor: f32,
}

impl Default for DrifterTuning {
    fn default() -> Self {
        Self {
            hull: HullTuning {
                speed: 2.0,
                health: 3,
                ..HullTuning::default()
            },
            drift_factor: 0.7,
            dash_chance: 0.004,
            dash_telegraph: 0.25,
            dash_duration: 0.3,
            dash_speed: 5.0,
            fire_edge_offset: 15.0,
            fire_preparation: 0.5,
            stutter_cooldown_min: 2.0,
            stutter_cooldown_max: 4.0,
            stutter_duration: 0.3,
            stutter_factor: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BurstTuning {
    pub hull: HullTuning,
    /// Horizontal reach within which a player ahead triggers the burst.
    pub detection_range: f32,
    pub burst_multiplier: f32,
    pub telegraph: f32,
    pub burst_duration: f32,
    pub burst_cooldown: f32,
    /// Per-frame fraction of the lane gap closed while bursting.
    pub burst_lane_rate: f32,
    pub lane_count: u32,
    pub lane_retarget_cooldown: f32,
    pub lane_follow_rate: f32,
    pub prediction_chance: f32,
    /// Frames of player motion extrapolated when predicting.
    pub prediction_frames: f32,
    pub zigzag_speed: f32,
    pub zigzag_interval: f32,
}

impl Default for BurstTuning {
    fn default() -> Self {
        Self {
            hull: HullTuning {
                speed: 2.5,
                health: 4,
                width: 44.0,
                height: 32.0,
            },
            detection_range: 350.0,
            burst_multiplier: 2.4,
            telegraph: 0.3,
            burst_duration: 0.6,
            burst_cooldown: 1.5,
            burst_lane_rate: 0.15,
            lane_count: 6,
            lane_retarget_cooldown: 0.5,
            lane_follow_rate: 0.03,
            prediction_chance: 0.3,
            prediction_frames: 20.0,
            zigzag_speed: 1.2,
            zigzag_interval: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JuggernautTuning {
    pub hull: HullTuning,
    pub min_distance: f32,
    pub max_distance: f32,
    pub reposition_interval: f32,
    pub reposition_chance: f32,
    pub reposition_jitter: f32,
    /// Per-frame fraction of the gap to the target x closed.
    pub approach_rate: f32,
    /// Leftmost target x as a fraction of field width.
    pub min_x_fraction: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub tracking_rate: f32,
    pub tracking_offset: f32,
    pub shield: ShieldTuning,
    pub charge: ChargeTuning,
    pub attacks: AttackTuning,
}

impl Default for JuggernautTuning {
    fn default() -> Self {
        Self {
            hull: HullTuning {
                speed: 1.8,
                health: 60,
                width: 90.0,
                height: 70.0,
            },
            min_distance: 250.0,
            max_distance: 450.0,
            reposition_interval: 1.0,
            reposition_chance: 0.3,
            reposition_jitter: 60.0,
            approach_rate: 0.03,
            min_x_fraction: 0.35,
            bob_amplitude: 12.0,
            bob_frequency: 0.05,
            tracking_rate: 0.02,
            tracking_offset: 40.0,
            shield: ShieldTuning::default(),
            charge: ChargeTuning::default(),
            attacks: AttackTuning::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BossTuning {
    pub hull: HullTuning,
    pub entry_speed: f32,
    /// Battle position measured in from the right edge.
    pub battle_offset: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub tracking_rate: f32,
    pub shield: ShieldTuning,
    pub charge: ChargeTuning,
    pub attacks: AttackTuning,
    pub death_duration: f32,
    pub death_max_radius: f32,
    pub death_damage: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            hull: HullTuning {
                speed: 2.0,
                health: 300,
                width: 140.0,
                height: 110.0,
            },
            entry_speed: 2.5,
            battle_offset: 150.0,
            bob_amplitude: 18.0,
            bob_frequency: 0.04,
            tracking_rate: 0.025,
            shield: ShieldTuning {
                capacity: 40,
                regen_delay: 8.0,
            },
            charge: ChargeTuning::default(),
            attacks: AttackTuning::default(),
            death_duration: 1.5,
            death_max_radius: 160.0,
            death_damage: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExplosionTuning {
    /// How long a destroyed regular enemy lingers before removal.
    pub enemy_duration: f32,
}

impl Default for ExplosionTuning {
    fn default() -> Self {
        Self {
            enemy_duration: 0.5,
        }
    }
}
