//! Combat domain: tuning resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Scaling knobs for hit resolution.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct CombatTuning {
    /// Ultimate meter gained per point of damage dealt
    pub meter_gain_per_damage: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            meter_gain_per_damage: 1.0,
        }
    }
}
