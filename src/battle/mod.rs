//! Battle domain: stage setup, fighter spawning and teardown.

mod spawn;


pub use spawn::FighterBundle;

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::battle::spawn::spawn_stage;
use crate::combat::ContactTag;
use crate::content::{BattleConfig, FighterRegistry, load_content};
use crate::fighter::ControllerTuning;
use crate::sim::FrameSet;

/// Marker for the stage and fighters. Attacks are found by their
/// `ContactTag` instead.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BattleEntity;

/// Tear the current battle down and set it up again from `BattleConfig`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestartBattle;

impl Message for RestartBattle {}

pub struct BattlePlugin;

impl Plugin for BattlePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RestartBattle>()
            .add_systems(Startup, (spawn_camera, spawn_battle.after(load_content)))
            .add_systems(Update, restart_battle.in_set(FrameSet::Input));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn spawn_battle(
    mut commands: Commands,
    config: Res<BattleConfig>,
    registry: Res<FighterRegistry>,
    tuning: Res<ControllerTuning>,
) {
    populate(&mut commands, &config, &registry, &tuning);
}

pub(crate) fn restart_battle(
    mut commands: Commands,
    mut requests: MessageReader<RestartBattle>,
    config: Res<BattleConfig>,
    registry: Res<FighterRegistry>,
    tuning: Res<ControllerTuning>,
    existing: Query<Entity, Or<(With<BattleEntity>, With<ContactTag>)>>,
) {
    // Several requests in one tick still restart once.
    if requests.read().count() == 0 {
        return;
    }

    let removed = teardown(&mut commands, existing.iter());
    info!("Restarting battle ({} entities removed)", removed);
    populate(&mut commands, &config, &registry, &tuning);
}

/// Despawn the given battle entities. Returns how many were queued.
pub(crate) fn teardown(
    commands: &mut Commands,
    existing: impl IntoIterator<Item = Entity>,
) -> usize {
    let mut removed = 0;
    for entity in existing {
        commands.entity(entity).despawn();
        removed += 1;
    }
    removed
}

fn populate(
    commands: &mut Commands,
    config: &BattleConfig,
    registry: &FighterRegistry,
    tuning: &ControllerTuning,
) {
    spawn_stage(commands, &config.stage);

    for (index, slot) in config.slots.iter().enumerate() {
        let Some(profile) = registry.get(&slot.fighter_id) else {
            warn!(
                "Battle slot {} names unknown fighter '{}', skipping",
                index, slot.fighter_id
            );
            continue;
        };

        info!(
            "Spawning '{}' in slot {} ({:?}, facing {:?})",
            profile.name, index, slot.scheme, slot.facing
        );
        commands.spawn(FighterBundle::new(profile, slot, tuning.guard_max));
    }
}
