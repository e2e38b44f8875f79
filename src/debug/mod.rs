//! Debug tools for fast iteration (`dev-tools` feature).
//!
//! - F1: toggle the physics collider overlay
//! - F2: log every fighter's health, meter and guard
//! - F5: restart the battle

mod systems;


use avian2d::prelude::PhysicsDebugPlugin;
use bevy::prelude::*;

use crate::debug::systems::{log_fighter_status, request_restart, toggle_physics_overlay};
use crate::sim::FrameSet;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsDebugPlugin::default()).add_systems(
            Update,
            (toggle_physics_overlay, log_fighter_status, request_restart)
                .before(FrameSet::Input),
        );
    }
}
