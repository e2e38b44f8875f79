//! Combat domain: attack bodies, contact resolution and knockback.

mod attacks;
mod contact;
mod events;
mod resources;


pub use attacks::{
    AttackDirection, AttackInfo, AttackKind, AttackSpawn, ContactTag, DEFAULT_ATTACK_LIFETIME,
    Launch, spawn_attack,
};
pub use contact::{
    AttackContactHooks, ContactOutcome, contact_response_enabled, knockback_impulse,
    knockback_magnitude, neutralize_response, pair_contact, shape_knockback,
};
pub use events::{ContactBegan, HitLanded};
pub use resources::CombatTuning;

use bevy::prelude::*;

use crate::combat::contact::{
    charge_ultimate_meter, forward_collision_starts, resolve_attack_contacts,
};
use crate::sim::ContactResolution;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ContactBegan>()
            .add_message::<HitLanded>()
            .init_resource::<CombatTuning>()
            .add_systems(
                ContactResolution,
                (
                    forward_collision_starts,
                    resolve_attack_contacts,
                    charge_ultimate_meter,
                )
                    .chain(),
            );
    }
}
