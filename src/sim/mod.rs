//! Simulation domain: fixed-step driver, physics layers and the deletion sweep.

mod clock;
mod systems;


pub use clock::StepClock;

use avian2d::prelude::*;
use bevy::ecs::schedule::ScheduleLabel;
use bevy::prelude::*;

use crate::sim::systems::{run_simulation_steps, sweep_attacks};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Stage surfaces
    Ground,
    /// Fighter bodies
    Fighter,
    /// Attack hitboxes, sensors only
    Attack,
}

/// Runs once per fixed step. The physics engine is mounted here.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimulationStep;

/// Runs right after every [`SimulationStep`], while the step's contacts are fresh.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactResolution;

/// Ordering of the work done in one render tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Device sampling into per-fighter input state
    Input,
    /// Whole fixed steps of physics + contact resolution
    Simulate,
    /// Removal of spent and expired attacks
    Sweep,
    /// Fighter controllers and animation selection
    Control,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StepClock>()
            .init_schedule(SimulationStep)
            .init_schedule(ContactResolution)
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Simulate,
                    FrameSet::Sweep,
                    FrameSet::Control,
                )
                    .chain(),
            )
            .add_systems(Update, run_simulation_steps.in_set(FrameSet::Simulate))
            .add_systems(Update, sweep_attacks.in_set(FrameSet::Sweep));
    }
}
