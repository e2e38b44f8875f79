//! Battle domain: stage and fighter spawning helpers.

use std::sync::Arc;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::battle::BattleEntity;
use crate::combat::ContactTag;
use crate::content::{FighterSlot, StageDef};
use crate::fighter::{
    AnimationPlayer, Controls, Fighter, FighterController, FighterInput, FighterProfile,
};
use crate::sim::GameLayer;

const STAGE_COLOR: Color = Color::srgb(0.35, 0.4, 0.35);

/// Everything a fighter needs to be driven by its controller and hit by
/// attacks.
#[derive(Bundle)]
pub struct FighterBundle {
    pub battle: BattleEntity,
    pub tag: ContactTag,
    pub fighter: Fighter,
    pub controller: FighterController,
    pub animation: AnimationPlayer,
    pub controls: Controls,
    pub input: FighterInput,
    pub name: Name,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub mass: Mass,
    pub locked_axes: LockedAxes,
    pub friction: Friction,
}

impl FighterBundle {
    pub fn new(profile: Arc<FighterProfile>, slot: &FighterSlot, guard_max: f32) -> Self {
        let (width, height) = profile.stats.size;
        let (x, y) = slot.spawn;

        Self {
            battle: BattleEntity,
            tag: ContactTag::Fighter,
            name: Name::new(format!("Fighter({})", profile.id)),
            controller: FighterController::new(slot.facing, guard_max),
            animation: AnimationPlayer::default(),
            controls: Controls::new(slot.scheme, slot.gamepad_slot),
            input: FighterInput::default(),
            sprite: Sprite {
                color: fighter_color(&profile.id),
                custom_size: Some(Vec2::new(width, height)),
                ..default()
            },
            transform: Transform::from_xyz(x, y, 0.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::rectangle(width, height),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Fighter,
                [GameLayer::Ground, GameLayer::Fighter, GameLayer::Attack],
            ),
            velocity: LinearVelocity::ZERO,
            mass: Mass(profile.stats.mass),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            friction: Friction::new(0.0),
            fighter: Fighter::new(profile),
        }
    }
}

/// Stable per-id tint so the two fighters are told apart without art.
fn fighter_color(id: &str) -> Color {
    let hue = id
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)))
        % 360;
    Color::hsl(hue as f32, 0.55, 0.65)
}

pub(crate) fn spawn_stage(commands: &mut Commands, stage: &StageDef) -> Entity {
    let (x, y) = stage.position;
    let (width, height) = stage.size;

    commands
        .spawn((
            BattleEntity,
            Name::new("Stage"),
            Sprite {
                color: STAGE_COLOR,
                custom_size: Some(Vec2::new(width, height)),
                ..default()
            },
            Transform::from_xyz(x, y, 0.0),
            RigidBody::Static,
            Collider::rectangle(width, height),
            CollisionLayers::new(GameLayer::Ground, [GameLayer::Fighter]),
        ))
        .id()
}
