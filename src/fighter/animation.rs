//! Fighter domain: animation selection with priority preemption.
//!
//! Playback itself belongs to the renderer. This module only decides which
//! clip a fighter is in and how long it has been in it.

use std::collections::HashMap;

use bevy::ecs::message::Message;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{AttackDirection, AttackKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum FighterAnimation {
    #[default]
    Idle,
    Run,
    Jump,
    Shield,
    ShieldBreak,
    /// Grounded basic attack
    Ground(AttackDirection),
    /// Airborne basic attack
    Air(AttackDirection),
    Special(AttackDirection),
    Smash(AttackDirection),
    Ultimate,
}

impl FighterAnimation {
    /// A clip of strictly higher priority preempts a running one; equal or
    /// lower priority waits for it to finish.
    pub fn priority(self) -> u8 {
        match self {
            FighterAnimation::Idle => 0,
            FighterAnimation::Run => 1,
            FighterAnimation::Jump => 2,
            FighterAnimation::Shield => 3,
            FighterAnimation::Ground(_)
            | FighterAnimation::Air(_)
            | FighterAnimation::Special(_)
            | FighterAnimation::Smash(_)
            | FighterAnimation::Ultimate => 4,
            FighterAnimation::ShieldBreak => 5,
        }
    }

    pub fn for_attack(kind: AttackKind, direction: AttackDirection, grounded: bool) -> Self {
        match kind {
            AttackKind::Basic if grounded => FighterAnimation::Ground(direction),
            AttackKind::Basic => FighterAnimation::Air(direction),
            AttackKind::Special => FighterAnimation::Special(direction),
            AttackKind::Smash => FighterAnimation::Smash(direction),
            AttackKind::Ultimate => FighterAnimation::Ultimate,
        }
    }

    /// Asset-facing clip name, e.g. `groundSide` or `shieldBreak`.
    pub fn clip_name(self) -> String {
        match self {
            FighterAnimation::Idle => "idle".to_string(),
            FighterAnimation::Run => "run".to_string(),
            FighterAnimation::Jump => "jump".to_string(),
            FighterAnimation::Shield => "shield".to_string(),
            FighterAnimation::ShieldBreak => "shieldBreak".to_string(),
            FighterAnimation::Ground(dir) => format!("ground{}", dir.label()),
            FighterAnimation::Air(dir) => format!("air{}", dir.label()),
            FighterAnimation::Special(dir) => format!("special{}", dir.label()),
            FighterAnimation::Smash(dir) => format!("smash{}", dir.label()),
            FighterAnimation::Ultimate => "ultimate".to_string(),
        }
    }
}

/// Frame count and frame duration of one clip.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ClipTiming {
    pub frames: u32,
    pub frame_duration: f32,
}

impl Default for ClipTiming {
    fn default() -> Self {
        Self {
            frames: 4,
            frame_duration: 0.1,
        }
    }
}

impl ClipTiming {
    pub fn duration(&self) -> f32 {
        self.frames as f32 * self.frame_duration
    }

    /// True once the clip has played past its last frame.
    pub fn is_finished(&self, state_time: f32) -> bool {
        if self.frame_duration <= 0.0 {
            return true;
        }
        let frame = (state_time / self.frame_duration).floor() as i64;
        i64::from(self.frames) - 1 < frame
    }
}

/// Timing table for one fighter's clips. Missing clips use the default timing.
#[derive(Debug, Clone, Default)]
pub struct AnimationClips {
    timings: HashMap<FighterAnimation, ClipTiming>,
    fallback: ClipTiming,
}

impl AnimationClips {
    pub fn new(fallback: ClipTiming) -> Self {
        Self {
            timings: HashMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, animation: FighterAnimation, timing: ClipTiming) {
        self.timings.insert(animation, timing);
    }

    pub fn timing(&self, animation: FighterAnimation) -> ClipTiming {
        self.timings.get(&animation).copied().unwrap_or(self.fallback)
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }
}

/// Result of asking the player to show an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationChange {
    /// Already showing it.
    Unchanged,
    /// A higher or equal priority clip is still running.
    Suppressed,
    Switched { from: FighterAnimation },
}

/// Current clip and how long it has been showing.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimationPlayer {
    pub current: FighterAnimation,
    pub state_time: f32,
}

impl AnimationPlayer {
    pub fn advance(&mut self, dt: f32) {
        self.state_time += dt;
    }

    pub fn request(&mut self, next: FighterAnimation, clips: &AnimationClips) -> AnimationChange {
        if next == self.current {
            return AnimationChange::Unchanged;
        }

        let running = !clips.timing(self.current).is_finished(self.state_time);
        if self.current.priority() >= next.priority() && running {
            return AnimationChange::Suppressed;
        }

        let from = self.current;
        self.current = next;
        self.state_time = 0.0;
        AnimationChange::Switched { from }
    }
}

/// Emitted when a fighter's clip switches.
#[derive(Debug, Clone)]
pub struct AnimationChanged {
    pub fighter: Entity,
    pub from: FighterAnimation,
    pub to: FighterAnimation,
}

impl Message for AnimationChanged {}
