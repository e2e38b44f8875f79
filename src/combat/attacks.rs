//! Combat domain: attack metadata, contact tags and hitbox spawning.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::fighter::Facing;
use crate::sim::GameLayer;

/// Lifetime used when a move does not specify one, in seconds.
pub const DEFAULT_ATTACK_LIFETIME: f32 = 0.05;

/// Which way an attack throws its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum AttackDirection {
    #[default]
    Neutral,
    Side,
    Up,
    Down,
}

impl AttackDirection {
    pub fn label(self) -> &'static str {
        match self {
            AttackDirection::Neutral => "Neutral",
            AttackDirection::Side => "Side",
            AttackDirection::Up => "Up",
            AttackDirection::Down => "Down",
        }
    }
}

/// The four attack buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AttackKind {
    Basic,
    Special,
    Smash,
    Ultimate,
}

/// Metadata carried by a live attack body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackInfo {
    /// Fighter that threw the attack. Never a valid target.
    pub owner: Entity,
    pub damage: f32,
    pub force: f32,
    pub direction: AttackDirection,
    /// Owner's facing when the attack was created
    pub facing: Facing,
    /// Absolute simulation time, seconds
    pub expires_at: f64,
}

/// What a physical entity is, as far as contact resolution cares.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum ContactTag {
    Fighter,
    Attack(AttackInfo),
    /// A spent attack waiting for the sweep.
    MarkedForDeletion,
}

impl ContactTag {
    /// Mark a live attack for removal. Returns `true` only for the call that
    /// actually retired it.
    pub fn dispose(&mut self) -> bool {
        match self {
            ContactTag::Attack(_) => {
                *self = ContactTag::MarkedForDeletion;
                true
            }
            ContactTag::Fighter | ContactTag::MarkedForDeletion => false,
        }
    }

    /// Live or spent attack. Either way it never pushes anything.
    pub fn is_attack_body(&self) -> bool {
        matches!(self, ContactTag::Attack(_) | ContactTag::MarkedForDeletion)
    }

    pub fn attack(&self) -> Option<&AttackInfo> {
        match self {
            ContactTag::Attack(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_due_for_removal(&self, now: f64) -> bool {
        match self {
            ContactTag::MarkedForDeletion => true,
            ContactTag::Attack(info) => now > info.expires_at,
            ContactTag::Fighter => false,
        }
    }
}

/// Impulse given to a launched attack body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    /// Authored for a right-facing owner
    pub impulse: Vec2,
    /// Apply the same impulse to the owner, dragging them along.
    pub bring_fighter: bool,
}

/// Everything needed to put one hitbox into the world.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackSpawn {
    pub owner: Entity,
    pub damage: f32,
    pub force: f32,
    pub direction: AttackDirection,
    pub facing: Facing,
    pub position: Vec2,
    pub size: Vec2,
    pub lifetime: f32,
    pub launch: Option<Launch>,
}

impl AttackSpawn {
    pub fn new(
        owner: Entity,
        damage: f32,
        force: f32,
        direction: AttackDirection,
        facing: Facing,
        position: Vec2,
        size: Vec2,
    ) -> Self {
        Self {
            owner,
            damage,
            force,
            direction,
            facing,
            position,
            size,
            lifetime: DEFAULT_ATTACK_LIFETIME,
            launch: None,
        }
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn launched(mut self, launch: Launch) -> Self {
        self.launch = Some(launch);
        self
    }

    /// Starting velocity of the attack body. Attack bodies have unit mass, so
    /// this equals the mirrored launch impulse.
    pub fn launch_velocity(&self) -> Vec2 {
        self.launch
            .map(|launch| mirror(launch.impulse, self.facing))
            .unwrap_or(Vec2::ZERO)
    }

    /// Impulse to apply to the owner when the launch brings them along.
    pub fn owner_recoil(&self) -> Option<Vec2> {
        self.launch
            .filter(|launch| launch.bring_fighter)
            .map(|launch| mirror(launch.impulse, self.facing))
    }

    pub fn info(&self, now: f64) -> AttackInfo {
        AttackInfo {
            owner: self.owner,
            damage: self.damage,
            force: self.force,
            direction: self.direction,
            facing: self.facing,
            expires_at: now + f64::from(self.lifetime),
        }
    }
}

fn mirror(impulse: Vec2, facing: Facing) -> Vec2 {
    Vec2::new(impulse.x * facing.sign(), impulse.y)
}

/// Spawn an attack body: a weightless sensor that only reports contacts with
/// fighters and never pushes them.
pub fn spawn_attack(commands: &mut Commands, spawn: &AttackSpawn, now: f64) -> Entity {
    let info = spawn.info(now);

    commands
        .spawn((
            Name::new(format!("Attack {:?}", spawn.direction)),
            ContactTag::Attack(info),
            Transform::from_translation(spawn.position.extend(1.0)),
            RigidBody::Dynamic,
            Collider::rectangle(spawn.size.x, spawn.size.y),
            Sensor,
            GravityScale(0.0),
            Mass(1.0),
            LinearVelocity(spawn.launch_velocity()),
            CollisionLayers::new(GameLayer::Attack, [GameLayer::Fighter]),
            CollisionEventsEnabled,
            ActiveCollisionHooks::MODIFY_CONTACTS,
        ))
        .id()
}
