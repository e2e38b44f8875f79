//! Fighter domain: runtime fighter profiles and move lookup.

use bevy::prelude::*;

use crate::combat::{AttackDirection, AttackKind, AttackSpawn, Launch};
use crate::content::{FighterDef, FighterStats, HitboxDef, MoveDef};
use crate::fighter::animation::{AnimationClips, ClipTiming};
use crate::fighter::components::Facing;

/// Everything about a fighter that does not change during a match.
#[derive(Debug, Clone)]
pub struct FighterProfile {
    pub id: String,
    pub name: String,
    pub stats: FighterStats,
    pub moves: MoveTable,
    pub clips: AnimationClips,
}

impl FighterProfile {
    pub fn from_def(def: &FighterDef) -> Self {
        let mut clips = AnimationClips::new(ClipTiming::default());
        for clip in &def.clips {
            clips.insert(
                clip.animation,
                ClipTiming {
                    frames: clip.frames,
                    frame_duration: clip.frame_duration,
                },
            );
        }

        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            stats: def.stats.clone(),
            moves: MoveTable::new(def.moves.clone()),
            clips,
        }
    }
}

/// Ordered move list. The first entry matching kind, direction and grounded
/// state wins; entries that leave direction or grounded unset match any.
#[derive(Debug, Clone, Default)]
pub struct MoveTable {
    moves: Vec<MoveDef>,
}

impl MoveTable {
    pub fn new(moves: Vec<MoveDef>) -> Self {
        Self { moves }
    }

    pub fn find(
        &self,
        kind: AttackKind,
        direction: AttackDirection,
        grounded: bool,
    ) -> Option<&MoveDef> {
        self.moves.iter().find(|m| {
            m.kind == kind
                && m.direction.is_none_or(|d| d == direction)
                && m.grounded.is_none_or(|g| g == grounded)
        })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl HitboxDef {
    /// Place this hitbox relative to its owner. Offsets are authored for a
    /// right-facing fighter and mirrored for a left-facing one.
    pub fn plan(
        &self,
        owner: Entity,
        origin: Vec2,
        direction: AttackDirection,
        facing: Facing,
    ) -> AttackSpawn {
        let offset = Vec2::new(self.offset.0 * facing.sign(), self.offset.1);
        let spawn = AttackSpawn::new(
            owner,
            self.damage,
            self.force,
            direction,
            facing,
            origin + offset,
            Vec2::new(self.size.0, self.size.1),
        )
        .with_lifetime(self.lifetime);

        match &self.launch {
            Some(launch) => spawn.launched(Launch {
                impulse: Vec2::new(launch.impulse.0, launch.impulse.1),
                bring_fighter: launch.bring_fighter,
            }),
            None => spawn,
        }
    }
}
