//! Combat domain: attack-to-fighter contact resolution and knockback.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::combat::attacks::{AttackDirection, AttackInfo, ContactTag};
use crate::combat::events::{ContactBegan, HitLanded};
use crate::combat::resources::CombatTuning;
use crate::fighter::{Facing, Fighter};

/// Accumulated health at which knockback equals `force / weight`.
const KNOCKBACK_HEALTH_SCALE: f32 = 100.0;

/// Knockback strength. Grows with the target's accumulated health and
/// shrinks with its weight.
pub fn knockback_magnitude(health: f32, weight: f32, force: f32) -> f32 {
    health / KNOCKBACK_HEALTH_SCALE / weight * force
}

/// Turn a magnitude into a launch vector for the given attack direction.
pub fn shape_knockback(magnitude: f32, direction: AttackDirection, facing: Facing) -> Vec2 {
    let sign = facing.sign();
    match direction {
        AttackDirection::Neutral | AttackDirection::Side => {
            Vec2::new(sign * magnitude, magnitude / 2.0)
        }
        AttackDirection::Up => Vec2::new(sign * magnitude / 4.0, magnitude * 1.5),
        AttackDirection::Down => Vec2::new(sign * magnitude / 4.0, -magnitude * 1.5),
    }
}

/// Impulse for a hit on a fighter whose health already includes the damage.
pub fn knockback_impulse(health: f32, weight: f32, info: &AttackInfo) -> Vec2 {
    let magnitude = knockback_magnitude(health, weight, info.force);
    shape_knockback(magnitude, info.direction, info.facing)
}

/// How a single begin-contact pair was classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// A live attack touched a fighter other than its owner.
    Strike {
        target: Entity,
        attack: Entity,
        info: AttackInfo,
    },
    /// A live attack touched its own owner.
    SelfHit,
    /// The attack was already used up earlier in this step.
    Spent,
    /// Anything else: ground, two fighters, two attacks.
    Ignored,
}

/// Classify a begin-contact pair. Both orientations are checked, so the
/// result does not depend on which collider the engine listed first.
pub fn pair_contact(first: (Entity, &ContactTag), second: (Entity, &ContactTag)) -> ContactOutcome {
    for ((fighter, fighter_tag), (attack, attack_tag)) in [(first, second), (second, first)] {
        if *fighter_tag != ContactTag::Fighter {
            continue;
        }

        return match attack_tag {
            ContactTag::Attack(info) if info.owner == fighter => ContactOutcome::SelfHit,
            ContactTag::Attack(info) => ContactOutcome::Strike {
                target: fighter,
                attack,
                info: *info,
            },
            ContactTag::MarkedForDeletion => ContactOutcome::Spent,
            ContactTag::Fighter => ContactOutcome::Ignored,
        };
    }

    ContactOutcome::Ignored
}

/// Whether the physics engine may push the pair apart. Attack bodies, live
/// or spent, never push.
pub fn contact_response_enabled(first: Option<&ContactTag>, second: Option<&ContactTag>) -> bool {
    ![first, second]
        .into_iter()
        .flatten()
        .any(ContactTag::is_attack_body)
}

/// Strip constraint generation from a pair whose response is disabled. The
/// pair stays touching, so begin-contact messages still fire.
pub fn neutralize_response(
    flags: &mut ContactPairFlags,
    first: Option<&ContactTag>,
    second: Option<&ContactTag>,
) {
    if !contact_response_enabled(first, second) {
        flags.remove(
            ContactPairFlags::GENERATE_CONSTRAINTS
                | ContactPairFlags::STARTED_GENERATING_CONSTRAINTS,
        );
    }
}

/// Pre-solve hook handed to the physics engine.
#[derive(SystemParam)]
pub struct AttackContactHooks<'w, 's> {
    tags: Query<'w, 's, &'static ContactTag>,
}

impl CollisionHooks for AttackContactHooks<'_, '_> {
    fn modify_contacts(&self, contacts: &mut ContactPair, _commands: &mut Commands) -> bool {
        neutralize_response(
            &mut contacts.flags,
            self.tags.get(contacts.collider1).ok(),
            self.tags.get(contacts.collider2).ok(),
        );
        // Returning false would drop the pair and its begin-contact message.
        true
    }
}

/// Forward the physics engine's begin-contact messages for this step.
pub(crate) fn forward_collision_starts(
    mut collisions: MessageReader<CollisionStart>,
    mut contacts: MessageWriter<ContactBegan>,
) {
    for event in collisions.read() {
        contacts.write(ContactBegan {
            first: event.collider1,
            second: event.collider2,
        });
    }
}

/// Apply damage and knockback for every attack that connected this step,
/// then retire the attack so later contacts in the same step miss.
pub(crate) fn resolve_attack_contacts(
    mut contacts: MessageReader<ContactBegan>,
    mut hits: MessageWriter<HitLanded>,
    mut tags: Query<&mut ContactTag>,
    mut fighters: Query<(&mut Fighter, &mut LinearVelocity, &Mass)>,
) {
    for contact in contacts.read() {
        let outcome = match (tags.get(contact.first), tags.get(contact.second)) {
            (Ok(first), Ok(second)) => {
                pair_contact((contact.first, first), (contact.second, second))
            }
            _ => ContactOutcome::Ignored,
        };

        let ContactOutcome::Strike {
            target,
            attack,
            info,
        } = outcome
        else {
            if outcome != ContactOutcome::Ignored {
                trace!(
                    "Contact {:?} <-> {:?}: {:?}",
                    contact.first, contact.second, outcome
                );
            }
            continue;
        };

        let Ok((mut fighter, mut velocity, mass)) = fighters.get_mut(target) else {
            continue;
        };

        let health = fighter.take_hit(info.damage);
        let impulse = knockback_impulse(health, fighter.weight(), &info);
        if mass.0 > 0.0 {
            velocity.0 += impulse / mass.0;
        }

        if let Ok(mut tag) = tags.get_mut(attack) {
            tag.dispose();
        }

        debug!(
            "{:?} hit {:?} for {} ({:?}), health now {}, impulse {:?}",
            info.owner, target, info.damage, info.direction, health, impulse
        );

        hits.write(HitLanded {
            attacker: info.owner,
            target,
            attack,
            damage: info.damage,
            impulse,
            target_health: health,
        });
    }
}

/// Landing hits builds the attacker's ultimate meter.
pub(crate) fn charge_ultimate_meter(
    mut hits: MessageReader<HitLanded>,
    tuning: Res<CombatTuning>,
    mut fighters: Query<&mut Fighter>,
) {
    for hit in hits.read() {
        let Ok(mut attacker) = fighters.get_mut(hit.attacker) else {
            continue;
        };

        let gain = hit.damage * tuning.meter_gain_per_damage;
        if attacker.charge_meter(gain) && attacker.meter_full() {
            debug!("{:?} ultimate meter full", hit.attacker);
        }
    }
}
