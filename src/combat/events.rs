//! Combat domain: contact and hit messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A new contact between two colliders, in the order the physics engine
/// reported them.
#[derive(Debug, Clone, Copy)]
pub struct ContactBegan {
    pub first: Entity,
    pub second: Entity,
}

impl Message for ContactBegan {}

/// An attack connected with a fighter other than its owner.
#[derive(Debug, Clone)]
pub struct HitLanded {
    pub attacker: Entity,
    pub target: Entity,
    pub attack: Entity,
    pub damage: f32,
    pub impulse: Vec2,
    /// Target's health after the hit
    pub target_health: f32,
}

impl Message for HitLanded {}
