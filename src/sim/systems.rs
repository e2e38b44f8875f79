//! Simulation domain: the fixed-step driver and the deletion sweep.

use bevy::prelude::*;

use crate::combat::ContactTag;
use crate::sim::{ContactResolution, SimulationStep, StepClock};

/// Consume this tick's time in whole fixed steps.
///
/// Each step runs the physics schedule and then contact resolution, with the
/// generic [`Time`] swapped for the step clock so physics integrates exactly
/// one step. Nothing despawns here: contacts only mark attacks, and the sweep
/// removes them once all steps of the tick are done.
pub(crate) fn run_simulation_steps(world: &mut World) {
    let delta = world.resource::<Time<Virtual>>().delta();
    let due = world.resource_mut::<StepClock>().accumulate(delta);

    for _ in 0..due {
        let step_time = world.resource_mut::<StepClock>().advance();
        let render_time = std::mem::replace(&mut *world.resource_mut::<Time>(), step_time);

        world.run_schedule(SimulationStep);
        world.run_schedule(ContactResolution);

        *world.resource_mut::<Time>() = render_time;
    }

    if due > 1 {
        trace!("Caught up {} fixed steps this tick", due);
    }
}

/// Despawn every attack that was consumed by a hit or outlived its expiry.
pub(crate) fn sweep_attacks(
    mut commands: Commands,
    clock: Res<StepClock>,
    bodies: Query<(Entity, &ContactTag)>,
) {
    let now = clock.elapsed_secs();

    for (entity, tag) in &bodies {
        if tag.is_due_for_removal(now) {
            commands.entity(entity).despawn();
        }
    }
}
