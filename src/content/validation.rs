//! Semantic checks on loaded content.

use thiserror::Error;

use super::data::*;
use super::registry::FighterRegistry;

/// A content value that parsed but cannot be played.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("fighter '{fighter}' has non-positive {field} ({value})")]
    NonPositiveStat {
        fighter: String,
        field: &'static str,
        value: f32,
    },
    #[error("fighter '{fighter}' move {index} ({kind}) has a hitbox with lifetime {lifetime}")]
    NonPositiveLifetime {
        fighter: String,
        index: usize,
        kind: String,
        lifetime: f32,
    },
    #[error("fighter '{fighter}' move {index} repeats an earlier entry and can never be chosen")]
    DuplicateMove { fighter: String, index: usize },
    #[error("fighter '{fighter}' clip {clip} has invalid timing")]
    InvalidClipTiming { fighter: String, clip: String },
    #[error("fighter id '{0}' is defined more than once")]
    DuplicateFighter(String),
    #[error("battle slot {slot} references missing fighter '{fighter_id}'")]
    UnknownFighter { slot: usize, fighter_id: String },
    #[error("simulation time step {time_step} and max_frame_time {max_frame_time} must be positive, with the step no longer than the frame")]
    InvalidTimeStep { time_step: f32, max_frame_time: f32 },
}

/// False for zero, negatives, NaN and infinities.
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Helper macro for checking a stat is strictly positive
macro_rules! check_positive {
    ($errors:expr, $def:expr, $field:ident) => {
        if !positive($def.stats.$field) {
            $errors.push(ValidationError::NonPositiveStat {
                fighter: $def.id.clone(),
                field: stringify!($field),
                value: $def.stats.$field,
            });
        }
    };
}

/// Check a single fighter definition.
pub fn validate_fighter(def: &FighterDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_positive!(errors, def, weight);
    check_positive!(errors, def, mass);
    check_positive!(errors, def, jump_force);

    for (index, entry) in def.moves.iter().enumerate() {
        for hitbox in &entry.hitboxes {
            if !positive(hitbox.lifetime) {
                errors.push(ValidationError::NonPositiveLifetime {
                    fighter: def.id.clone(),
                    index,
                    kind: format!("{:?}", entry.kind),
                    lifetime: hitbox.lifetime,
                });
            }
        }

        let shadowed = def.moves[..index].iter().any(|earlier| {
            earlier.kind == entry.kind
                && earlier.direction == entry.direction
                && earlier.grounded == entry.grounded
        });
        if shadowed {
            errors.push(ValidationError::DuplicateMove {
                fighter: def.id.clone(),
                index,
            });
        }
    }

    for clip in &def.clips {
        if clip.frames == 0 || !positive(clip.frame_duration) {
            errors.push(ValidationError::InvalidClipTiming {
                fighter: def.id.clone(),
                clip: clip.animation.clip_name(),
            });
        }
    }

    errors
}

/// Check the defaults file against the loaded fighters.
pub fn validate_defaults(
    defaults: &CombatDefaults,
    registry: &FighterRegistry,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let sim = &defaults.simulation;
    if !positive(sim.time_step)
        || !positive(sim.max_frame_time)
        || sim.time_step > sim.max_frame_time
    {
        errors.push(ValidationError::InvalidTimeStep {
            time_step: sim.time_step,
            max_frame_time: sim.max_frame_time,
        });
    }

    for (slot, fighter) in defaults.battle.slots.iter().enumerate() {
        if registry.get(&fighter.fighter_id).is_none() {
            errors.push(ValidationError::UnknownFighter {
                slot,
                fighter_id: fighter.fighter_id.clone(),
            });
        }
    }

    errors
}
