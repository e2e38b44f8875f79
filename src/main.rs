mod battle;
mod combat;
mod content;
#[cfg(feature = "dev-tools")]
mod debug;
mod fighter;
mod sim;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::AttackContactHooks;
use crate::sim::SimulationStep;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Brawl".to_string(),
            resolution: (1280, 720).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(
        PhysicsPlugins::new(SimulationStep).with_collision_hooks::<AttackContactHooks>(),
    )
    .add_plugins((
        sim::SimulationPlugin,
        content::ContentPlugin,
        combat::CombatPlugin,
        fighter::FighterPlugin,
        battle::BattlePlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
