//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron. Fighters are turned into
//! [`FighterProfile`](crate::fighter::FighterProfile)s by the registry;
//! [`CombatDefaults`] is split into per-domain resources at startup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{AttackDirection, AttackKind, CombatTuning, DEFAULT_ATTACK_LIFETIME};
use crate::fighter::{ControlScheme, ControllerTuning, Facing, FighterAnimation};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Fighters (fighters.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FighterDef {
    pub id: String,
    pub name: String,
    pub stats: FighterStats,
    pub moves: Vec<MoveDef>,
    #[serde(default)]
    pub clips: Vec<ClipDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FighterStats {
    /// Knockback divisor. Heavier fighters fly less far.
    pub weight: f32,
    /// Physics body mass
    pub mass: f32,
    /// Impulse applied per tick while running
    pub run_speed: f32,
    pub jump_force: f32,
    pub max_velocity_grounded: f32,
    pub max_velocity_airborne: f32,
    /// Body collider width and height
    pub size: (f32, f32),
}

/// One entry in a fighter's move table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveDef {
    pub kind: AttackKind,
    /// `None` matches every direction.
    #[serde(default)]
    pub direction: Option<AttackDirection>,
    /// `None` matches both grounded and airborne.
    #[serde(default)]
    pub grounded: Option<bool>,
    /// Seconds during which the fighter ignores input after the move
    pub end_lag: f32,
    pub hitboxes: Vec<HitboxDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HitboxDef {
    pub damage: f32,
    pub force: f32,
    /// Offset from the fighter's centre, authored facing right
    pub offset: (f32, f32),
    pub size: (f32, f32),
    #[serde(default = "default_lifetime")]
    pub lifetime: f32,
    #[serde(default)]
    pub launch: Option<LaunchDef>,
}

fn default_lifetime() -> f32 {
    DEFAULT_ATTACK_LIFETIME
}

/// Projectile-style hitboxes that fly off on their own.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaunchDef {
    pub impulse: (f32, f32),
    #[serde(default)]
    pub bring_fighter: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipDef {
    pub animation: FighterAnimation,
    pub frames: u32,
    pub frame_duration: f32,
}

impl FighterDef {
    /// Built-in fighter used when no content could be loaded.
    pub fn sparring_partner() -> Self {
        let jab = |damage: f32, force: f32, offset: (f32, f32), size: (f32, f32)| HitboxDef {
            damage,
            force,
            offset,
            size,
            lifetime: DEFAULT_ATTACK_LIFETIME,
            launch: None,
        };
        let basic = |direction: AttackDirection, hitbox: HitboxDef| MoveDef {
            kind: AttackKind::Basic,
            direction: Some(direction),
            grounded: None,
            end_lag: 0.25,
            hitboxes: vec![hitbox],
        };

        Self {
            id: "sparring_partner".to_string(),
            name: "Sparring Partner".to_string(),
            stats: FighterStats {
                weight: 1.0,
                mass: 1.0,
                run_speed: 60.0,
                jump_force: 550.0,
                max_velocity_grounded: 300.0,
                max_velocity_airborne: 220.0,
                size: (40.0, 80.0),
            },
            moves: vec![
                basic(
                    AttackDirection::Neutral,
                    jab(4.0, 400.0, (40.0, 0.0), (30.0, 20.0)),
                ),
                basic(
                    AttackDirection::Side,
                    jab(6.0, 500.0, (45.0, 0.0), (40.0, 20.0)),
                ),
                basic(
                    AttackDirection::Up,
                    jab(5.0, 450.0, (0.0, 50.0), (30.0, 30.0)),
                ),
                basic(
                    AttackDirection::Down,
                    jab(5.0, 450.0, (20.0, -40.0), (40.0, 20.0)),
                ),
                MoveDef {
                    kind: AttackKind::Smash,
                    direction: None,
                    grounded: None,
                    end_lag: 0.6,
                    hitboxes: vec![jab(14.0, 900.0, (50.0, 0.0), (50.0, 40.0))],
                },
            ],
            clips: Vec::new(),
        }
    }
}

// ============================================================================
// Combat defaults (combat_defaults.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CombatDefaults {
    pub schema_version: u32,
    pub simulation: SimulationDefaults,
    pub controller: ControllerTuning,
    pub combat: CombatTuning,
    pub battle: BattleConfig,
}

impl Default for CombatDefaults {
    fn default() -> Self {
        Self {
            schema_version: 1,
            simulation: SimulationDefaults::default(),
            controller: ControllerTuning::default(),
            combat: CombatTuning::default(),
            battle: BattleConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationDefaults {
    /// Fixed physics step, seconds
    pub time_step: f32,
    /// Longest render tick fed to the accumulator, seconds
    pub max_frame_time: f32,
    pub gravity: (f32, f32),
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            time_step: 1.0 / 60.0,
            max_frame_time: 0.1,
            gravity: (0.0, -1400.0),
        }
    }
}

/// Stage and fighter placement for a match.
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
pub struct BattleConfig {
    pub stage: StageDef,
    pub slots: Vec<FighterSlot>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StageDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FighterSlot {
    pub fighter_id: String,
    pub scheme: ControlScheme,
    pub spawn: (f32, f32),
    pub facing: Facing,
    #[serde(default)]
    pub gamepad_slot: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        let slot = |scheme, x: f32, facing| FighterSlot {
            fighter_id: "sparring_partner".to_string(),
            scheme,
            spawn: (x, 0.0),
            facing,
            gamepad_slot: 0,
        };

        Self {
            stage: StageDef {
                position: (0.0, -200.0),
                size: (900.0, 40.0),
            },
            slots: vec![
                slot(ControlScheme::Keyboard, -200.0, Facing::Right),
                slot(ControlScheme::Keyboard2, 200.0, Facing::Left),
            ],
        }
    }
}
