//! Debug domain: hotkey systems.

use avian2d::prelude::PhysicsGizmos;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::battle::RestartBattle;
use crate::fighter::{AnimationPlayer, Fighter, FighterController};

pub(crate) fn toggle_physics_overlay(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut store: ResMut<GizmoConfigStore>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    let (config, _) = store.config_mut::<PhysicsGizmos>();
    config.enabled = !config.enabled;
    info!(
        "[DEBUG] Physics overlay {}",
        if config.enabled { "ON" } else { "OFF" }
    );
}

pub(crate) fn log_fighter_status(
    keyboard: Res<ButtonInput<KeyCode>>,
    fighters: Query<(Entity, &Fighter, &FighterController, &AnimationPlayer)>,
) {
    if !keyboard.just_pressed(KeyCode::F2) {
        return;
    }

    for (entity, fighter, controller, player) in &fighters {
        info!("[DEBUG] {:?} {}", entity, status_line(fighter, controller, player));
    }
}

pub(crate) fn request_restart(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut restart: MessageWriter<RestartBattle>,
) {
    if keyboard.just_pressed(KeyCode::F5) {
        info!("[DEBUG] Battle restart requested");
        restart.write(RestartBattle);
    }
}

pub(crate) fn status_line(
    fighter: &Fighter,
    controller: &FighterController,
    player: &AnimationPlayer,
) -> String {
    format!(
        "{}: health={:.1} meter={:.0} guard={:.1}{} grounded={} anim={} ({:.2}s)",
        fighter.id(),
        fighter.health,
        fighter.ultimate_meter,
        controller.guard_percent,
        if controller.shield_broken() { " BROKEN" } else { "" },
        controller.grounded,
        player.current.clip_name(),
        player.state_time,
    )
}
