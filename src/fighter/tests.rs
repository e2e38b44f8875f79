//! Fighter domain: tests for the controller, bindings and animation rules.

use std::sync::Arc;

use bevy::prelude::*;

use super::*;
use super::{AnimationPlayer, Command};
use crate::combat::{AttackDirection, AttackKind};
use crate::content::{FighterDef, HitboxDef, LaunchDef, MoveDef};

/// Body stand-in that records impulses at unit mass.
#[derive(Debug, Default)]
struct TestBody {
    position: Vec2,
    velocity: Vec2,
    impulses: Vec<Vec2>,
}

impl FighterBody for TestBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
        self.impulses.push(impulse);
    }
}

fn sparring_def() -> FighterDef {
    FighterDef::sparring_partner()
}

fn fighter_from(def: &FighterDef) -> Fighter {
    Fighter::new(Arc::new(FighterProfile::from_def(def)))
}

fn sparring_fighter() -> Fighter {
    fighter_from(&sparring_def())
}

fn with_ultimate(mut def: FighterDef) -> FighterDef {
    def.moves.push(MoveDef {
        kind: AttackKind::Ultimate,
        direction: None,
        grounded: None,
        end_lag: 1.0,
        hitboxes: vec![HitboxDef {
            damage: 20.0,
            force: 1000.0,
            offset: (60.0, 0.0),
            size: (80.0, 40.0),
            lifetime: 0.1,
            launch: None,
        }],
    });
    def
}

fn frame<'a>(
    fighter: &'a mut Fighter,
    tuning: &'a ControllerTuning,
    now: f64,
) -> FighterFrame<'a, TestBody> {
    FighterFrame::new(Entity::PLACEHOLDER, TestBody::default(), fighter, tuning, now)
}

fn controller() -> FighterController {
    FighterController::new(Facing::Right, 100.0)
}

fn held(actions: &[Action]) -> FighterInput {
    FighterInput {
        held: actions.iter().copied().collect(),
        ..default()
    }
}

fn pressed(actions: &[Action]) -> FighterInput {
    let set: ActionSet = actions.iter().copied().collect();
    FighterInput {
        held: set,
        pressed: set,
        ..default()
    }
}

const JUMP_ONLY: &[Binding] = &[Binding {
    trigger: Trigger::Pressed(Action::Jump),
    command: Command::Jump,
}];

// -----------------------------------------------------------------------------
// Facing and fighter state
// -----------------------------------------------------------------------------

#[test]
fn test_zero_counts_as_facing_right() {
    assert_eq!(Facing::from_sign(0.0), Facing::Right);
    assert_eq!(Facing::from_sign(-0.3), Facing::Left);
    assert_eq!(Facing::Left.sign(), -1.0);
}

#[test]
fn test_meter_clamps_and_never_drains_from_healing() {
    let mut fighter = sparring_fighter();

    assert!(fighter.charge_meter(60.0));
    assert!(!fighter.charge_meter(-30.0));
    assert_eq!(fighter.ultimate_meter, 60.0);
    assert!(fighter.charge_meter(60.0));
    assert_eq!(fighter.ultimate_meter, ULTIMATE_METER_MAX);
    assert!(!fighter.charge_meter(1.0));
}

// -----------------------------------------------------------------------------
// Movement
// -----------------------------------------------------------------------------

#[test]
fn test_move_applies_impulse_below_ceiling() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut f = frame(&mut fighter, &tuning, 0.0);

    assert_eq!(ctl.move_horizontal(&mut f, -1.0), Ok(()));
    assert_eq!(f.body.impulses, vec![Vec2::new(-60.0, 0.0)]);
    assert_eq!(ctl.facing, Facing::Left);
    assert_eq!(ctl.requested(), FighterAnimation::Run);
}

#[test]
fn test_move_at_ceiling_only_turns() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut f = frame(&mut fighter, &tuning, 0.0);
    f.body.velocity = Vec2::new(300.0, 0.0);

    assert_eq!(ctl.move_horizontal(&mut f, 1.0), Ok(()));
    assert!(f.body.impulses.is_empty());

    // Airborne ceiling is lower
    ctl.grounded = false;
    f.body.velocity = Vec2::new(-250.0, 0.0);
    assert_eq!(ctl.move_horizontal(&mut f, -1.0), Ok(()));
    assert!(f.body.impulses.is_empty());
    assert_eq!(ctl.facing, Facing::Left);
}

#[test]
fn test_zero_intensity_faces_right_without_impulse() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = FighterController::new(Facing::Left, 100.0);
    let mut f = frame(&mut fighter, &tuning, 0.0);

    assert_eq!(ctl.move_horizontal(&mut f, 0.0), Ok(()));
    assert!(f.body.impulses.is_empty());
    assert_eq!(ctl.facing, Facing::Right);
}

#[test]
fn test_guarding_blocks_move_jump_and_attack() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    ctl.guarding = true;
    let mut f = frame(&mut fighter, &tuning, 5.0);

    assert_eq!(ctl.move_horizontal(&mut f, 1.0), Err(Gate::Guarding));
    assert_eq!(ctl.jump(&mut f), Err(Gate::Guarding));
    assert_eq!(
        ctl.attack(&mut f, AttackKind::Basic, DirectionalInput::default()),
        Err(Gate::Guarding)
    );
    assert!(f.body.impulses.is_empty());
    assert!(f.spawns.is_empty());
}

// -----------------------------------------------------------------------------
// Jumping
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_then_debounce_then_double_jump() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();

    let mut f = frame(&mut fighter, &tuning, 1.0);
    assert_eq!(ctl.jump(&mut f), Ok(()));
    assert_eq!(f.body.impulses, vec![Vec2::new(0.0, 550.0)]);
    assert!(!ctl.grounded);
    assert_eq!(ctl.requested(), FighterAnimation::Jump);

    // Within the debounce window nothing happens, but Jump is still requested.
    let mut f = frame(&mut fighter, &tuning, 1.1);
    assert_eq!(ctl.jump(&mut f), Err(Gate::Debounce));
    assert!(f.body.impulses.is_empty());

    ctl.has_double_jump = true;
    ctl.fall_speed = -300.0;
    let mut f = frame(&mut fighter, &tuning, 1.2);
    assert_eq!(ctl.jump(&mut f), Ok(()));
    // 300 * 0.005 = 1.5x while falling
    assert_eq!(f.body.impulses, vec![Vec2::new(0.0, 825.0)]);
    assert!(!ctl.has_double_jump);

    let mut f = frame(&mut fighter, &tuning, 2.0);
    assert_eq!(ctl.jump(&mut f), Err(Gate::NoDoubleJump));
}

#[test]
fn test_double_jump_multiplier_is_clamped() {
    let tuning = ControllerTuning::default();

    assert_eq!(tuning.double_jump_multiplier(120.0), 1.0);
    assert_eq!(tuning.double_jump_multiplier(-10.0), 1.0);
    assert_eq!(tuning.double_jump_multiplier(-5000.0), 3.0);
}

#[test]
fn test_landing_restores_double_jump() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut player = AnimationPlayer::default();

    let mut f = frame(&mut fighter, &tuning, 0.0);
    ctl.update(&mut f, &FighterInput::default(), &[], &mut player, 0.016);

    assert!(ctl.has_double_jump);
}

// -----------------------------------------------------------------------------
// Guard
// -----------------------------------------------------------------------------

#[test]
fn test_guard_toggle_is_debounced() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();

    assert_eq!(ctl.guard(&mut frame(&mut fighter, &tuning, 0.0)), Ok(()));
    assert!(ctl.guarding);

    assert_eq!(
        ctl.stop_guard(&mut frame(&mut fighter, &tuning, 0.5)),
        Err(Gate::Debounce)
    );
    assert!(ctl.guarding);

    assert_eq!(ctl.stop_guard(&mut frame(&mut fighter, &tuning, 1.01)), Ok(()));
    assert!(!ctl.guarding);

    assert_eq!(
        ctl.guard(&mut frame(&mut fighter, &tuning, 1.5)),
        Err(Gate::Debounce)
    );
    assert!(!ctl.guarding);

    assert_eq!(ctl.guard(&mut frame(&mut fighter, &tuning, 2.1)), Ok(()));
    assert!(ctl.guarding);
}

#[test]
fn test_repeated_requests_do_not_restamp_toggle() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();

    assert_eq!(ctl.stop_guard(&mut frame(&mut fighter, &tuning, 0.0)), Ok(()));
    assert_eq!(ctl.last_guard_toggle_at, None);

    ctl.guard(&mut frame(&mut fighter, &tuning, 0.0)).unwrap();
    assert_eq!(ctl.guard(&mut frame(&mut fighter, &tuning, 0.9)), Ok(()));
    assert_eq!(ctl.last_guard_toggle_at, Some(0.0));
}

#[test]
fn test_depleted_guard_cannot_be_raised() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    ctl.guard_percent = -10.0;

    assert_eq!(
        ctl.guard(&mut frame(&mut fighter, &tuning, 0.0)),
        Err(Gate::GuardDepleted)
    );
}

#[test]
fn test_guard_degrades_while_up_and_regenerates_while_down() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut player = AnimationPlayer::default();
    ctl.guarding = true;
    ctl.guard_percent = 50.0;

    let mut f = frame(&mut fighter, &tuning, 0.0);
    ctl.update(&mut f, &FighterInput::default(), &[], &mut player, 1.0);
    assert_eq!(ctl.guard_percent, 35.0);
    assert_eq!(player.current, FighterAnimation::Shield);

    ctl.guarding = false;
    let mut f = frame(&mut fighter, &tuning, 1.0);
    ctl.update(&mut f, &FighterInput::default(), &[], &mut player, 1.0);
    assert_eq!(ctl.guard_percent, 50.0);

    let mut f = frame(&mut fighter, &tuning, 2.0);
    ctl.update(&mut f, &FighterInput::default(), &[], &mut player, 10.0);
    assert_eq!(ctl.guard_percent, 100.0);
}

#[test]
fn test_guard_break_stuns_until_recovered() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut player = AnimationPlayer::default();
    ctl.guarding = true;
    ctl.guard_percent = 1.0;

    let mut f = frame(&mut fighter, &tuning, 0.0);
    let report = ctl.update(&mut f, &pressed(&[Action::Jump]), JUMP_ONLY, &mut player, 0.1);

    assert_eq!(report.phase, TickPhase::ShieldBroken);
    assert_eq!(ctl.guard_percent, -125.0);
    assert!(!ctl.guarding);
    assert_eq!(player.current, FighterAnimation::ShieldBreak);

    // Still stunned next tick: regenerating, input ignored
    let mut f = frame(&mut fighter, &tuning, 0.5);
    let report = ctl.update(&mut f, &pressed(&[Action::Jump]), JUMP_ONLY, &mut player, 0.1);
    assert_eq!(report.phase, TickPhase::ShieldBroken);
    assert_eq!(ctl.guard_percent, -123.5);
    assert!(f.body.impulses.is_empty());
}

// -----------------------------------------------------------------------------
// Attacks
// -----------------------------------------------------------------------------

#[test]
fn test_ultimate_needs_full_meter() {
    let tuning = ControllerTuning::default();
    let mut fighter = fighter_from(&with_ultimate(sparring_def()));
    fighter.ultimate_meter = 99.0;
    let mut ctl = controller();
    let mut f = frame(&mut fighter, &tuning, 3.0);

    assert_eq!(
        ctl.attack(&mut f, AttackKind::Ultimate, DirectionalInput::default()),
        Err(Gate::MeterNotFull)
    );
    assert!(f.spawns.is_empty());
    assert_eq!(ctl.end_lag, 0.0);
    assert_eq!(ctl.last_attack_at, None);
    assert_eq!(f.fighter.ultimate_meter, 99.0);
}

#[test]
fn test_ultimate_consumes_meter_when_performed() {
    let tuning = ControllerTuning::default();
    let mut fighter = fighter_from(&with_ultimate(sparring_def()));
    fighter.ultimate_meter = 100.0;
    let mut ctl = controller();
    let mut f = frame(&mut fighter, &tuning, 3.0);

    assert_eq!(
        ctl.attack(&mut f, AttackKind::Ultimate, DirectionalInput::default()),
        Ok(1.0)
    );
    assert_eq!(f.fighter.ultimate_meter, 0.0);
    assert_eq!(f.spawns.len(), 1);
    assert_eq!(ctl.requested(), FighterAnimation::Ultimate);
}

#[test]
fn test_missing_move_keeps_meter_and_plays_nothing() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    fighter.ultimate_meter = 100.0;
    let mut ctl = controller();
    let mut f = frame(&mut fighter, &tuning, 0.0);

    assert_eq!(
        ctl.attack(&mut f, AttackKind::Ultimate, DirectionalInput::default()),
        Err(Gate::NoMove)
    );
    assert_eq!(f.fighter.ultimate_meter, 100.0);
    assert_eq!(ctl.requested(), FighterAnimation::Idle);
    assert!(!ctl.in_end_lag(0.0));
}

#[test]
fn test_attack_plans_mirrored_hitbox_and_enters_end_lag() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = FighterController::new(Facing::Left, 100.0);
    let mut f = frame(&mut fighter, &tuning, 2.0);
    f.body.position = Vec2::new(100.0, 10.0);

    let side = DirectionalInput {
        left: true,
        ..default()
    };
    assert_eq!(ctl.attack(&mut f, AttackKind::Basic, side), Ok(0.25));

    let spawn = &f.spawns[0];
    assert_eq!(spawn.position, Vec2::new(55.0, 10.0));
    assert_eq!(spawn.direction, AttackDirection::Side);
    assert_eq!(spawn.facing, Facing::Left);
    assert_eq!(
        ctl.requested(),
        FighterAnimation::Ground(AttackDirection::Side)
    );

    assert!(ctl.in_end_lag(2.2));
    assert!(!ctl.in_end_lag(2.3));
    assert_eq!(
        ctl.attack(&mut f, AttackKind::Basic, side),
        Err(Gate::EndLag)
    );
}

#[test]
fn test_launch_move_brings_fighter_along() {
    let tuning = ControllerTuning::default();
    let mut def = sparring_def();
    def.moves.push(MoveDef {
        kind: AttackKind::Special,
        direction: Some(AttackDirection::Side),
        grounded: None,
        end_lag: 0.4,
        hitboxes: vec![HitboxDef {
            damage: 5.0,
            force: 300.0,
            offset: (30.0, 0.0),
            size: (30.0, 30.0),
            lifetime: 0.2,
            launch: Some(LaunchDef {
                impulse: (200.0, 50.0),
                bring_fighter: true,
            }),
        }],
    });
    let mut fighter = fighter_from(&def);
    let mut ctl = FighterController::new(Facing::Left, 100.0);
    let mut f = frame(&mut fighter, &tuning, 0.0);

    let side = DirectionalInput {
        left: true,
        ..default()
    };
    ctl.attack(&mut f, AttackKind::Special, side).unwrap();

    assert_eq!(f.body.impulses, vec![Vec2::new(-200.0, 50.0)]);
    assert_eq!(f.spawns[0].launch_velocity(), Vec2::new(-200.0, 50.0));
    assert_eq!(
        ctl.requested(),
        FighterAnimation::Special(AttackDirection::Side)
    );
}

#[test]
fn test_move_table_first_match_wins_and_respects_stance() {
    let mut def = sparring_def();
    def.moves.insert(
        0,
        MoveDef {
            kind: AttackKind::Basic,
            direction: None,
            grounded: Some(false),
            end_lag: 0.5,
            hitboxes: Vec::new(),
        },
    );
    let profile = FighterProfile::from_def(&def);

    let air = profile
        .moves
        .find(AttackKind::Basic, AttackDirection::Up, false)
        .unwrap();
    assert_eq!(air.end_lag, 0.5);

    let ground = profile
        .moves
        .find(AttackKind::Basic, AttackDirection::Up, true)
        .unwrap();
    assert_eq!(ground.direction, Some(AttackDirection::Up));

    assert!(
        profile
            .moves
            .find(AttackKind::Special, AttackDirection::Up, true)
            .is_none()
    );
}

// -----------------------------------------------------------------------------
// Update cycle
// -----------------------------------------------------------------------------

#[test]
fn test_end_lag_ignores_input_and_keeps_animation() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut player = AnimationPlayer::default();

    let bindings = bindings_for(ControlScheme::Keyboard, InputSource::Connected);
    let mut f = frame(&mut fighter, &tuning, 0.0);
    let report = ctl.update(&mut f, &pressed(&[Action::Smash]), bindings, &mut player, 0.016);
    assert_eq!(report.phase, TickPhase::Active);
    assert_eq!(player.current, FighterAnimation::Smash(AttackDirection::Neutral));
    assert_eq!(f.spawns.len(), 1);

    let mut f = frame(&mut fighter, &tuning, 0.3);
    let report = ctl.update(
        &mut f,
        &pressed(&[Action::Jump, Action::Right]),
        bindings,
        &mut player,
        0.016,
    );
    assert_eq!(report.phase, TickPhase::EndLag);
    assert_eq!(report.change, None);
    assert!(f.body.impulses.is_empty());
    assert_eq!(player.current, FighterAnimation::Smash(AttackDirection::Neutral));
    assert_eq!(player.state_time, 0.016);
}

#[test]
fn test_keyboard_bindings_run_then_attack_in_order() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = FighterController::new(Facing::Left, 100.0);
    let mut player = AnimationPlayer::default();

    let mut input = held(&[Action::Right]);
    input.pressed.insert(Action::Basic);

    let bindings = bindings_for(ControlScheme::Keyboard, InputSource::Connected);
    let mut f = frame(&mut fighter, &tuning, 0.0);
    let report = ctl.update(&mut f, &input, bindings, &mut player, 0.016);

    assert_eq!(ctl.facing, Facing::Right);
    assert_eq!(f.body.impulses, vec![Vec2::new(60.0, 0.0)]);
    assert_eq!(f.spawns[0].position, Vec2::new(45.0, 0.0));
    assert_eq!(
        report.change,
        Some(AnimationChange::Switched {
            from: FighterAnimation::Idle
        })
    );
    assert_eq!(player.current, FighterAnimation::Ground(AttackDirection::Side));
}

#[test]
fn test_both_directions_held_cancel_out() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut player = AnimationPlayer::default();

    let bindings = bindings_for(ControlScheme::Keyboard, InputSource::Connected);
    let mut f = frame(&mut fighter, &tuning, 0.0);
    ctl.update(
        &mut f,
        &held(&[Action::Left, Action::Right]),
        bindings,
        &mut player,
        0.016,
    );

    assert!(f.body.impulses.is_empty());
    assert_eq!(player.current, FighterAnimation::Idle);
}

#[test]
fn test_unavailable_device_has_no_bindings() {
    assert!(bindings_for(ControlScheme::Gamepad, InputSource::Unavailable).is_empty());
    assert!(bindings_for(ControlScheme::Keyboard, InputSource::Unavailable).is_empty());
    assert!(!bindings_for(ControlScheme::Gamepad, InputSource::Connected).is_empty());
}

#[test]
fn test_fall_speed_is_units_per_second() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    let mut player = AnimationPlayer::default();

    let mut f = frame(&mut fighter, &tuning, 0.0);
    f.body.position.y = 100.0;
    ctl.update(&mut f, &FighterInput::default(), &[], &mut player, 0.1);
    assert_eq!(ctl.fall_speed, 0.0);

    let mut f = frame(&mut fighter, &tuning, 0.1);
    f.body.position.y = 95.0;
    ctl.update(&mut f, &FighterInput::default(), &[], &mut player, 0.1);
    assert!((ctl.fall_speed + 50.0).abs() < 1e-3);
}

#[test]
fn test_fall_speed_holds_across_ticks_without_a_physics_step() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let mut ctl = controller();
    ctl.grounded = false;
    let mut player = AnimationPlayer::default();

    // Rendering at 120 Hz over a 60 Hz simulation, falling at 600 u/s.
    let step = 1.0 / 60.0;
    let ticks = [
        (0.0, 0.0),
        (step, -10.0),
        (step, -10.0),
        (2.0 * step, -20.0),
        (2.0 * step, -20.0),
    ];

    for (i, (now, y)) in ticks.into_iter().enumerate() {
        let mut f = frame(&mut fighter, &tuning, now);
        f.body.position.y = y;
        ctl.update(&mut f, &FighterInput::default(), &[], &mut player, 1.0 / 120.0);

        if i > 0 {
            assert!(
                (ctl.fall_speed + 600.0).abs() < 0.1,
                "tick {i}: fall_speed {}",
                ctl.fall_speed
            );
            assert!((tuning.double_jump_multiplier(ctl.fall_speed) - 3.0).abs() < 1e-3);
        }
    }
}

#[test]
fn test_state_time_keeps_running_through_lockouts() {
    let tuning = ControllerTuning::default();
    let mut fighter = sparring_fighter();
    let bindings = bindings_for(ControlScheme::Keyboard, InputSource::Connected);

    let mut ctl = controller();
    let mut player = AnimationPlayer::default();
    let mut f = frame(&mut fighter, &tuning, 0.0);
    ctl.update(&mut f, &pressed(&[Action::Smash]), bindings, &mut player, 0.02);
    assert_eq!(player.state_time, 0.0);

    for tick in 1..=3 {
        let mut f = frame(&mut fighter, &tuning, 0.02 * f64::from(tick));
        let report = ctl.update(&mut f, &FighterInput::default(), bindings, &mut player, 0.02);
        assert_eq!(report.phase, TickPhase::EndLag);
    }
    assert!((player.state_time - 0.06).abs() < 1e-6);

    let mut ctl = controller();
    ctl.guard_percent = -50.0;
    let mut player = AnimationPlayer::default();
    for tick in 0..2 {
        let mut f = frame(&mut fighter, &tuning, 10.0 + 0.02 * f64::from(tick));
        let report = ctl.update(&mut f, &FighterInput::default(), bindings, &mut player, 0.02);
        assert_eq!(report.phase, TickPhase::ShieldBroken);
    }
    assert_eq!(player.current, FighterAnimation::ShieldBreak);
    assert!((player.state_time - 0.02).abs() < 1e-6);
}

// -----------------------------------------------------------------------------
// Animation priority
// -----------------------------------------------------------------------------

#[test]
fn test_run_does_not_interrupt_unfinished_jump() {
    let clips = AnimationClips::default();
    let mut player = AnimationPlayer {
        current: FighterAnimation::Jump,
        state_time: 0.1,
    };

    assert_eq!(
        player.request(FighterAnimation::Run, &clips),
        AnimationChange::Suppressed
    );
    assert_eq!(player.current, FighterAnimation::Jump);

    player.advance(0.35);
    assert_eq!(
        player.request(FighterAnimation::Run, &clips),
        AnimationChange::Switched {
            from: FighterAnimation::Jump
        }
    );
    assert_eq!(player.state_time, 0.0);
}

#[test]
fn test_higher_priority_preempts_and_same_clip_keeps_time() {
    let clips = AnimationClips::default();
    let mut player = AnimationPlayer {
        current: FighterAnimation::Jump,
        state_time: 0.1,
    };

    assert_eq!(
        player.request(FighterAnimation::Jump, &clips),
        AnimationChange::Unchanged
    );
    assert_eq!(player.state_time, 0.1);

    let attack = FighterAnimation::Air(AttackDirection::Down);
    assert!(matches!(
        player.request(attack, &clips),
        AnimationChange::Switched { .. }
    ));
    assert!(matches!(
        player.request(FighterAnimation::ShieldBreak, &clips),
        AnimationChange::Switched { .. }
    ));
}

#[test]
fn test_clip_timing_finishes_after_last_frame() {
    let timing = ClipTiming {
        frames: 4,
        frame_duration: 0.1,
    };

    assert!(!timing.is_finished(0.0));
    assert!(!timing.is_finished(0.35));
    assert!(timing.is_finished(0.45));
}

#[test]
fn test_clip_names_follow_asset_naming() {
    assert_eq!(
        FighterAnimation::Ground(AttackDirection::Side).clip_name(),
        "groundSide"
    );
    assert_eq!(
        FighterAnimation::Air(AttackDirection::Up).clip_name(),
        "airUp"
    );
    assert_eq!(
        FighterAnimation::Special(AttackDirection::Neutral).clip_name(),
        "specialNeutral"
    );
    assert_eq!(FighterAnimation::Ultimate.clip_name(), "ultimate");
    assert_eq!(
        FighterAnimation::for_attack(AttackKind::Basic, AttackDirection::Down, false),
        FighterAnimation::Air(AttackDirection::Down)
    );
}

// -----------------------------------------------------------------------------
// Directions and input
// -----------------------------------------------------------------------------

fn dirs(left: bool, right: bool, up: bool, down: bool) -> DirectionalInput {
    DirectionalInput {
        left,
        right,
        up,
        down,
    }
}

#[test]
fn test_legacy_direction_rule_favours_left() {
    let rule = DirectionRule::Legacy;

    assert_eq!(rule.resolve(dirs(false, false, false, false)), AttackDirection::Neutral);
    assert_eq!(rule.resolve(dirs(true, false, true, false)), AttackDirection::Side);
    assert_eq!(rule.resolve(dirs(false, true, true, false)), AttackDirection::Neutral);
    assert_eq!(rule.resolve(dirs(false, true, false, false)), AttackDirection::Side);
    assert_eq!(rule.resolve(dirs(false, false, true, false)), AttackDirection::Up);
    assert_eq!(rule.resolve(dirs(false, false, false, true)), AttackDirection::Down);
}

#[test]
fn test_symmetric_direction_rule_treats_sides_alike() {
    let rule = DirectionRule::Symmetric;

    assert_eq!(rule.resolve(dirs(true, false, true, false)), AttackDirection::Up);
    assert_eq!(rule.resolve(dirs(false, true, true, false)), AttackDirection::Up);
    assert_eq!(rule.resolve(dirs(true, false, false, true)), AttackDirection::Down);
    assert_eq!(rule.resolve(dirs(false, true, false, true)), AttackDirection::Down);
    assert_eq!(rule.resolve(dirs(true, false, false, false)), AttackDirection::Side);
    assert_eq!(rule.resolve(dirs(false, false, true, true)), AttackDirection::Neutral);
}

#[test]
fn test_keyboard_sampling_maps_keys() {
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyA);
    keys.press(KeyCode::KeyJ);

    let input = read_keyboard(&keys, key_map(ControlScheme::Keyboard));
    assert!(input.held.contains(Action::Left));
    assert!(input.pressed.contains(Action::Basic));
    assert!(!input.held.contains(Action::Right));

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::ArrowUp);
    let input = read_keyboard(&keys, key_map(ControlScheme::Keyboard2));
    assert!(input.held.contains(Action::Up));
    assert!(input.pressed.contains(Action::Jump));
}

#[test]
fn test_triggers() {
    let input = FighterInput {
        stick: Vec2::new(-0.5, 0.0),
        ..held(&[Action::Smash, Action::Special])
    };

    assert!(Trigger::HeldBoth(Action::Smash, Action::Special).fires(&input, 0.2));
    assert!(!Trigger::HeldWithout(Action::Smash, Action::Special).fires(&input, 0.2));
    assert!(Trigger::NotHeld(Action::Guard).fires(&input, 0.2));
    assert!(!Trigger::Pressed(Action::Smash).fires(&input, 0.2));
    assert!(Trigger::StickX.fires(&input, 0.2));
    assert!(!Trigger::StickX.fires(&input, 0.6));
}
