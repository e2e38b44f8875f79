//! Content domain: RON data files, validation and the fighter registry.

mod data;
mod loader;
mod registry;
mod validation;


pub use data::{
    BattleConfig, ClipDef, CombatDefaults, DataFile, FighterDef, FighterSlot, FighterStats,
    HitboxDef, LaunchDef, MoveDef, SimulationDefaults, StageDef,
};
pub use loader::{
    ContentLoadError, build_registry, load_all_content, parse_data_file, parse_single_file,
};
pub use registry::FighterRegistry;
pub use validation::{ValidationError, validate_defaults, validate_fighter};

use std::path::Path;

use avian2d::prelude::Gravity;
use bevy::prelude::*;

use crate::sim::StepClock;

/// Directory holding fighters.ron and combat_defaults.ron.
pub const CONTENT_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_content);
    }
}

/// Load content and publish it as resources. Any failure is logged and the
/// built-in roster is used instead, so a match can always start.
pub(crate) fn load_content(mut commands: Commands) {
    let (registry, defaults) = match load_all_content(Path::new(CONTENT_DIR)) {
        Ok(loaded) => loaded,
        Err(errors) => {
            for e in &errors {
                error!("{}", e);
            }
            warn!(
                "Content failed to load ({} errors); using the built-in roster",
                errors.len()
            );
            (FighterRegistry::fallback(), CombatDefaults::default())
        }
    };

    info!("{}", registry.summary());
    install_defaults(&mut commands, &defaults);
    commands.insert_resource(registry);
}

/// Split the defaults file into the resources each domain reads.
fn install_defaults(commands: &mut Commands, defaults: &CombatDefaults) {
    let (gx, gy) = defaults.simulation.gravity;
    commands.insert_resource(Gravity(Vec2::new(gx, gy)));
    commands.insert_resource(StepClock::from_defaults(&defaults.simulation));
    commands.insert_resource(defaults.controller.clone());
    commands.insert_resource(defaults.combat.clone());
    commands.insert_resource(defaults.battle.clone());
}
