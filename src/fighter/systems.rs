//! Fighter domain: input sampling, ground detection and controller systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::spawn_attack;
use crate::fighter::animation::{AnimationChange, AnimationChanged, AnimationPlayer};
use crate::fighter::components::{Controls, Fighter};
use crate::fighter::controller::{FighterController, FighterFrame, PhysicsBody, TickPhase};
use crate::fighter::controls::{
    ControlScheme, FighterInput, InputSource, bindings_for, key_map, read_gamepad, read_keyboard,
};
use crate::fighter::resources::ControllerTuning;
use crate::sim::{GameLayer, StepClock};

pub(crate) fn sample_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut fighters: Query<(&Controls, &mut FighterInput)>,
) {
    for (controls, mut input) in &mut fighters {
        if controls.scheme == ControlScheme::Gamepad {
            continue;
        }
        *input = read_keyboard(&keys, key_map(controls.scheme));
    }
}

pub(crate) fn sample_gamepads(
    gamepads: Query<&Gamepad>,
    tuning: Res<ControllerTuning>,
    mut fighters: Query<(Entity, &Controls, &mut FighterInput)>,
) {
    for (entity, controls, mut input) in &mut fighters {
        if controls.scheme != ControlScheme::Gamepad {
            continue;
        }

        match gamepads.iter().nth(controls.gamepad_slot) {
            Some(gamepad) => {
                if input.source == InputSource::Unavailable {
                    info!(
                        "Gamepad {} connected for {:?}",
                        controls.gamepad_slot, entity
                    );
                }
                *input = read_gamepad(gamepad, tuning.axis_deadzone);
            }
            None => {
                if input.source != InputSource::Unavailable {
                    warn!(
                        "No gamepad in slot {} for {:?}; fighter will stand idle",
                        controls.gamepad_slot, entity
                    );
                }
                *input = FighterInput::unavailable();
            }
        }
    }
}

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<ControllerTuning>,
    mut fighters: Query<(&Transform, &Collider, &mut FighterController)>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, collider, mut controller) in &mut fighters {
        let was_grounded = controller.grounded;

        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 0.0,
        };

        let feet = transform.translation.truncate() - Vec2::new(0.0, half_height);
        let hit = spatial_query.cast_ray(
            feet,
            Dir2::NEG_Y,
            tuning.ground_probe,
            true,
            &ground_filter,
        );

        controller.grounded = hit.is_some();

        if controller.grounded != was_grounded {
            trace!("grounded={}", controller.grounded);
        }
    }
}

pub(crate) fn update_fighters(
    mut commands: Commands,
    time: Res<Time>,
    clock: Res<StepClock>,
    tuning: Res<ControllerTuning>,
    mut changes: MessageWriter<AnimationChanged>,
    mut fighters: Query<(
        Entity,
        &Transform,
        &Controls,
        &FighterInput,
        &mut Fighter,
        &mut FighterController,
        &mut AnimationPlayer,
        &mut LinearVelocity,
        &Mass,
    )>,
) {
    let dt = time.delta_secs();
    let now = clock.elapsed_secs();

    for (
        entity,
        transform,
        controls,
        input,
        mut fighter,
        mut controller,
        mut player,
        mut velocity,
        mass,
    ) in &mut fighters
    {
        let body = PhysicsBody {
            position: transform.translation.truncate(),
            velocity: &mut velocity.0,
            inverse_mass: if mass.0 > 0.0 { 1.0 / mass.0 } else { 0.0 },
        };
        let mut frame = FighterFrame::new(entity, body, &mut *fighter, &tuning, now);

        let bindings = bindings_for(controls.scheme, input.source);
        let report = controller.update(&mut frame, input, bindings, &mut *player, dt);

        for spawn in &frame.spawns {
            spawn_attack(&mut commands, spawn, now);
        }

        if let Some(AnimationChange::Switched { from }) = report.change {
            changes.write(AnimationChanged {
                fighter: entity,
                from,
                to: player.current,
            });
        }

        if report.phase == TickPhase::Active && !report.dropped.is_empty() {
            trace!("{:?} dropped inputs: {:?}", entity, report.dropped);
        }
    }
}
