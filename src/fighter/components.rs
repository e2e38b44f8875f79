//! Fighter domain: per-fighter components.

use std::sync::Arc;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fighter::controls::ControlScheme;
use crate::fighter::moves::FighterProfile;

/// Meter value at which an ultimate becomes available.
pub const ULTIMATE_METER_MAX: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Zero counts as facing right.
    pub fn from_sign(value: f32) -> Self {
        if value < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Combat state the UI reads: accumulated damage and the ultimate meter.
///
/// `health` starts at zero and only grows as hits land; the higher it is, the
/// further the fighter flies.
#[derive(Component, Debug, Clone)]
pub struct Fighter {
    pub profile: Arc<FighterProfile>,
    pub health: f32,
    pub ultimate_meter: f32,
}

impl Fighter {
    pub fn new(profile: Arc<FighterProfile>) -> Self {
        Self {
            profile,
            health: 0.0,
            ultimate_meter: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn weight(&self) -> f32 {
        self.profile.stats.weight
    }

    /// Add damage to health and return the new value. Negative damage heals.
    pub fn take_hit(&mut self, damage: f32) -> f32 {
        self.health += damage;
        self.health
    }

    /// Returns true if the meter actually moved.
    pub fn charge_meter(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || self.meter_full() {
            return false;
        }
        self.ultimate_meter = (self.ultimate_meter + amount).min(ULTIMATE_METER_MAX);
        true
    }

    pub fn meter_full(&self) -> bool {
        self.ultimate_meter >= ULTIMATE_METER_MAX
    }

    pub fn consume_meter(&mut self) {
        self.ultimate_meter = 0.0;
    }
}

/// Which device drives this fighter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub scheme: ControlScheme,
    /// Index among connected gamepads, only read by the gamepad scheme
    pub gamepad_slot: usize,
}

impl Controls {
    pub fn new(scheme: ControlScheme, gamepad_slot: usize) -> Self {
        Self {
            scheme,
            gamepad_slot,
        }
    }
}
