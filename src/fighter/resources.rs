//! Fighter domain: controller tuning.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fighter::controls::DirectionRule;

/// Timers and rates shared by every fighter controller. Times are in
/// simulation seconds, rates are per second.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct ControllerTuning {
    /// Minimum time between two jumps
    pub jump_debounce: f64,
    /// Minimum time between two guard toggles
    pub guard_debounce: f64,
    pub guard_max: f32,
    pub guard_degrade_per_sec: f32,
    pub guard_regen_per_sec: f32,
    /// Guard value a broken shield drops to, as a positive amount
    pub guard_break_debt: f32,
    pub axis_deadzone: f32,
    /// Double-jump boost per unit of fall speed
    pub falling_jump_scale: f32,
    pub max_falling_jump_multiplier: f32,
    /// Length of the downward ground probe below the fighter's feet
    pub ground_probe: f32,
    #[serde(default)]
    pub direction_rule: DirectionRule,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            jump_debounce: 0.125,
            guard_debounce: 1.0,
            guard_max: 100.0,
            guard_degrade_per_sec: 15.0,
            guard_regen_per_sec: 15.0,
            guard_break_debt: 125.0,
            axis_deadzone: 0.2,
            falling_jump_scale: 0.005,
            max_falling_jump_multiplier: 3.0,
            ground_probe: 4.0,
            direction_rule: DirectionRule::Legacy,
        }
    }
}

impl ControllerTuning {
    /// Double-jump multiplier for the current vertical speed. Rising or
    /// hovering gives a plain jump; falling faster gives a bigger one.
    pub fn double_jump_multiplier(&self, fall_speed: f32) -> f32 {
        if fall_speed < 0.0 {
            (-fall_speed * self.falling_jump_scale)
                .min(self.max_falling_jump_multiplier)
                .max(1.0)
        } else {
            1.0
        }
    }
}
