//! Combat domain: behavior state machines for enemies and bosses.

pub mod behavior;
pub mod boss;
pub mod burst;
pub mod director;
pub mod drifter;
pub mod enemy;
pub mod juggernaut;
pub mod patterns;

pub use behavior::Behavior;
pub use boss::{Boss, BossState};
pub use burst::{BurstStage, BurstState, lane_center, pick_lane};
pub use director::{
    AttackDirector, AttackStage, ChargePhase, ChargeState, HealthShift, phase_for_fraction,
};
pub use drifter::{DashStage, DrifterState};
pub use enemy::Enemy;
pub use juggernaut::JuggernautState;
pub use patterns::{DiveStage, DiveState, OscillateState, SineState};
