//! Fighter domain: controller state machine, control schemes and animation
//! selection.

mod animation;
mod components;
mod controller;
mod controls;
mod moves;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use animation::{
    AnimationChange, AnimationChanged, AnimationClips, AnimationPlayer, ClipTiming,
    FighterAnimation,
};
pub use components::{Controls, Facing, Fighter, ULTIMATE_METER_MAX};
pub use controller::{
    FighterBody, FighterController, FighterFrame, Gate, PhysicsBody, TickPhase, TickReport,
};
pub use controls::{
    Action, ActionSet, Binding, Command, ControlScheme, DirectionRule, DirectionalInput,
    FighterInput, InputSource, Trigger, bindings_for, key_map, read_gamepad, read_keyboard,
};
pub use moves::{FighterProfile, MoveTable};
pub use resources::ControllerTuning;

use bevy::prelude::*;

use crate::fighter::systems::{detect_ground, sample_gamepads, sample_keyboard, update_fighters};
use crate::sim::FrameSet;

pub struct FighterPlugin;

impl Plugin for FighterPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationChanged>()
            .init_resource::<ControllerTuning>()
            .add_systems(
                Update,
                (sample_keyboard, sample_gamepads).in_set(FrameSet::Input),
            )
            .add_systems(
                Update,
                (detect_ground, update_fighters)
                    .chain()
                    .in_set(FrameSet::Control),
            );
    }
}
