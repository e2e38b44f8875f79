//! Fighter domain: the per-fighter controller state machine.
//!
//! The controller never touches the ECS directly. Each render tick the
//! system hands it a [`FighterFrame`] (body, combat state, tuning, clock) and
//! collects the attacks it planned afterwards, which keeps every timer and
//! gate testable without a physics world.

use std::sync::Arc;

use bevy::prelude::*;

use crate::combat::{AttackKind, AttackSpawn};
use crate::fighter::animation::{AnimationChange, AnimationPlayer, FighterAnimation};
use crate::fighter::components::{Facing, Fighter};
use crate::fighter::controls::{Binding, Command, DirectionalInput, FighterInput};
use crate::fighter::resources::ControllerTuning;

/// The physical body a controller pushes around.
pub trait FighterBody {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn apply_impulse(&mut self, impulse: Vec2);
}

/// Body view over a fighter's physics components.
pub struct PhysicsBody<'a> {
    pub position: Vec2,
    pub velocity: &'a mut Vec2,
    pub inverse_mass: f32,
}

impl FighterBody for PhysicsBody<'_> {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        *self.velocity
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        *self.velocity += impulse * self.inverse_mass;
    }
}

/// Everything one controller update may read or change.
pub struct FighterFrame<'a, B> {
    pub owner: Entity,
    pub body: B,
    pub fighter: &'a mut Fighter,
    pub tuning: &'a ControllerTuning,
    /// Simulation time, seconds
    pub now: f64,
    /// Attacks planned during this update, spawned by the caller
    pub spawns: Vec<AttackSpawn>,
}

impl<'a, B: FighterBody> FighterFrame<'a, B> {
    pub fn new(
        owner: Entity,
        body: B,
        fighter: &'a mut Fighter,
        tuning: &'a ControllerTuning,
        now: f64,
    ) -> Self {
        Self {
            owner,
            body,
            fighter,
            tuning,
            now,
            spawns: Vec::new(),
        }
    }
}

/// Why an input did nothing. Dropped inputs are normal play, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Guarding,
    EndLag,
    Debounce,
    NoDoubleJump,
    GuardDepleted,
    MeterNotFull,
    /// The fighter has no move for this button, direction and stance
    NoMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    /// Stunned by a broken guard; input ignored.
    ShieldBroken,
    /// Recovering from an attack; input ignored.
    EndLag,
    Active,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub phase: TickPhase,
    /// `None` when the tick ended before an animation was committed
    pub change: Option<AnimationChange>,
    pub dropped: Vec<Gate>,
}

fn seconds_since(stamp: Option<f64>, now: f64) -> f64 {
    stamp.map_or(f64::INFINITY, |at| now - at)
}

#[derive(Component, Debug, Clone)]
pub struct FighterController {
    pub grounded: bool,
    pub has_double_jump: bool,
    pub guarding: bool,
    /// Shield strength. Negative while recovering from a guard break.
    pub guard_percent: f32,
    pub facing: Facing,
    /// Vertical speed over the last simulated interval, units per second.
    /// Negative when falling.
    pub fall_speed: f32,
    /// Recovery time of the last attack, seconds
    pub end_lag: f32,
    pub last_attack_at: Option<f64>,
    pub last_jump_at: Option<f64>,
    pub last_guard_toggle_at: Option<f64>,
    previous_y: Option<f32>,
    /// Simulation time of the `previous_y` sample
    previous_tick_at: Option<f64>,
    requested: FighterAnimation,
}

impl FighterController {
    pub fn new(facing: Facing, guard_max: f32) -> Self {
        Self {
            grounded: true,
            has_double_jump: false,
            guarding: false,
            guard_percent: guard_max,
            facing,
            fall_speed: 0.0,
            end_lag: 0.0,
            last_attack_at: None,
            last_jump_at: None,
            last_guard_toggle_at: None,
            previous_y: None,
            previous_tick_at: None,
            requested: FighterAnimation::Idle,
        }
    }

    /// Animation asked for so far in the current update.
    pub fn requested(&self) -> FighterAnimation {
        self.requested
    }

    pub fn in_end_lag(&self, now: f64) -> bool {
        self.end_lag > 0.0 && seconds_since(self.last_attack_at, now) <= f64::from(self.end_lag)
    }

    pub fn shield_broken(&self) -> bool {
        self.guard_percent <= 0.0
    }

    /// Update `fall_speed` from the height change over simulated time. Ticks
    /// where no physics step ran keep the previous estimate.
    fn track_fall(&mut self, y: f32, now: f64) {
        if let (Some(previous_y), Some(previous_at)) = (self.previous_y, self.previous_tick_at) {
            let elapsed = now - previous_at;
            if elapsed <= 0.0 {
                return;
            }
            self.fall_speed = (f64::from(y - previous_y) / elapsed) as f32;
        }

        self.previous_y = Some(y);
        self.previous_tick_at = Some(now);
    }

    /// Run along the ground or drift in the air. `intensity` is -1..=1.
    pub fn move_horizontal<B: FighterBody>(
        &mut self,
        frame: &mut FighterFrame<B>,
        intensity: f32,
    ) -> Result<(), Gate> {
        if self.guarding {
            return Err(Gate::Guarding);
        }

        let stats = &frame.fighter.profile.stats;
        let ceiling = if self.grounded {
            stats.max_velocity_grounded
        } else {
            stats.max_velocity_airborne
        };

        let velocity = frame.body.velocity();
        if (intensity > 0.0 && velocity.x < ceiling) || (intensity < 0.0 && velocity.x > -ceiling) {
            let impulse = Vec2::new(stats.run_speed * intensity, 0.0);
            frame.body.apply_impulse(impulse);
        }

        self.facing = Facing::from_sign(intensity);
        self.requested = FighterAnimation::Run;
        Ok(())
    }

    /// Ground jump, or the one air jump if it is still available.
    pub fn jump<B: FighterBody>(&mut self, frame: &mut FighterFrame<B>) -> Result<(), Gate> {
        if self.guarding {
            return Err(Gate::Guarding);
        }

        self.requested = FighterAnimation::Jump;

        if seconds_since(self.last_jump_at, frame.now) <= frame.tuning.jump_debounce {
            return Err(Gate::Debounce);
        }

        let jump_force = frame.fighter.profile.stats.jump_force;
        if self.grounded {
            frame.body.apply_impulse(Vec2::new(0.0, jump_force));
            self.grounded = false;
        } else if self.has_double_jump {
            let multiplier = frame.tuning.double_jump_multiplier(self.fall_speed);
            frame.body.apply_impulse(Vec2::new(0.0, jump_force * multiplier));
            self.has_double_jump = false;
            trace!("{:?} double jump x{:.2}", frame.owner, multiplier);
        } else {
            return Err(Gate::NoDoubleJump);
        }

        self.last_jump_at = Some(frame.now);
        Ok(())
    }

    pub fn guard<B: FighterBody>(&mut self, frame: &mut FighterFrame<B>) -> Result<(), Gate> {
        if self.guarding {
            return Ok(());
        }
        if self.guard_percent <= 0.0 {
            return Err(Gate::GuardDepleted);
        }
        if seconds_since(self.last_guard_toggle_at, frame.now) <= frame.tuning.guard_debounce {
            return Err(Gate::Debounce);
        }

        self.guarding = true;
        self.last_guard_toggle_at = Some(frame.now);
        Ok(())
    }

    pub fn stop_guard<B: FighterBody>(&mut self, frame: &mut FighterFrame<B>) -> Result<(), Gate> {
        if !self.guarding {
            return Ok(());
        }
        if seconds_since(self.last_guard_toggle_at, frame.now) <= frame.tuning.guard_debounce {
            return Err(Gate::Debounce);
        }

        self.guarding = false;
        self.last_guard_toggle_at = Some(frame.now);
        Ok(())
    }

    /// Look up and perform the fighter's move for this button. Returns the
    /// move's end-lag.
    pub fn attack<B: FighterBody>(
        &mut self,
        frame: &mut FighterFrame<B>,
        kind: AttackKind,
        directional: DirectionalInput,
    ) -> Result<f32, Gate> {
        if self.guarding {
            return Err(Gate::Guarding);
        }
        if self.in_end_lag(frame.now) {
            return Err(Gate::EndLag);
        }
        if kind == AttackKind::Ultimate && !frame.fighter.meter_full() {
            return Err(Gate::MeterNotFull);
        }

        let direction = frame.tuning.direction_rule.resolve(directional);
        let profile = Arc::clone(&frame.fighter.profile);
        let Some(chosen) = profile
            .moves
            .find(kind, direction, self.grounded)
            .filter(|m| m.end_lag > 0.0)
        else {
            return Err(Gate::NoMove);
        };

        if kind == AttackKind::Ultimate {
            frame.fighter.consume_meter();
        }

        self.last_attack_at = Some(frame.now);
        self.end_lag = chosen.end_lag;

        let origin = frame.body.position();
        for hitbox in &chosen.hitboxes {
            let spawn = hitbox.plan(frame.owner, origin, direction, self.facing);
            if let Some(recoil) = spawn.owner_recoil() {
                frame.body.apply_impulse(recoil);
            }
            frame.spawns.push(spawn);
        }

        self.requested = FighterAnimation::for_attack(kind, direction, self.grounded);
        debug!(
            "{} used {:?} {:?} (end lag {}s)",
            profile.id, kind, direction, chosen.end_lag
        );
        Ok(chosen.end_lag)
    }

    /// One render tick: guard upkeep, fall speed, bindings, animation.
    pub fn update<B: FighterBody>(
        &mut self,
        frame: &mut FighterFrame<B>,
        input: &FighterInput,
        bindings: &[Binding],
        player: &mut AnimationPlayer,
        dt: f32,
    ) -> TickReport {
        let profile = Arc::clone(&frame.fighter.profile);
        player.advance(dt);
        self.requested = FighterAnimation::Idle;

        let tuning = frame.tuning;
        if self.guarding {
            self.guard_percent -= tuning.guard_degrade_per_sec * dt;
            self.requested = FighterAnimation::Shield;
            if self.guard_percent <= 0.0 {
                self.guard_percent = -tuning.guard_break_debt;
                self.guarding = false;
                debug!("{} guard broken", profile.id);
            }
        } else if self.guard_percent < tuning.guard_max {
            self.guard_percent =
                (self.guard_percent + tuning.guard_regen_per_sec * dt).min(tuning.guard_max);
        }

        let y = frame.body.position().y;
        if self.shield_broken() {
            self.previous_y = Some(y);
            self.previous_tick_at = Some(frame.now);
            let change = player.request(FighterAnimation::ShieldBreak, &profile.clips);
            return TickReport {
                phase: TickPhase::ShieldBroken,
                change: Some(change),
                dropped: Vec::new(),
            };
        }

        self.track_fall(y, frame.now);

        if self.in_end_lag(frame.now) {
            return TickReport {
                phase: TickPhase::EndLag,
                change: None,
                dropped: Vec::new(),
            };
        }

        let mut dropped = Vec::new();
        for binding in bindings {
            if !binding.trigger.fires(input, tuning.axis_deadzone) {
                continue;
            }

            let result = match binding.command {
                Command::Move(intensity) => self.move_horizontal(frame, intensity),
                Command::MoveWithStick => self.move_horizontal(frame, input.stick.x),
                Command::Jump => self.jump(frame),
                Command::Guard => self.guard(frame),
                Command::StopGuard => self.stop_guard(frame),
                Command::Attack(kind) => self.attack(frame, kind, input.directional()).map(|_| ()),
            };

            if let Err(gate) = result {
                dropped.push(gate);
            }
        }

        if self.grounded {
            self.has_double_jump = true;
        }

        let change = player.request(self.requested, &profile.clips);
        TickReport {
            phase: TickPhase::Active,
            change: Some(change),
            dropped,
        }
    }
}
