//! Fighter domain: device-independent input, control schemes and the
//! binding table.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{AttackDirection, AttackKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum ControlScheme {
    /// WASD, Space to jump, O to guard, J/K/L/I to attack
    #[default]
    Keyboard,
    /// Arrow keys only, Up to jump
    Keyboard2,
    Gamepad,
}

/// Logical buttons a fighter can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Jump,
    Guard,
    Basic,
    Special,
    Smash,
    Ultimate,
}

impl Action {
    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet(u16);

impl ActionSet {
    pub fn insert(&mut self, action: Action) {
        self.0 |= action.bit();
    }

    pub fn contains(self, action: Action) -> bool {
        self.0 & action.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut set = ActionSet::default();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Connected,
    /// The configured device is missing. The fighter stands still.
    Unavailable,
}

/// One render tick's worth of input for one fighter.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FighterInput {
    pub held: ActionSet,
    /// Went down this tick
    pub pressed: ActionSet,
    pub stick: Vec2,
    pub source: InputSource,
}

impl FighterInput {
    pub fn unavailable() -> Self {
        Self {
            source: InputSource::Unavailable,
            ..default()
        }
    }

    pub fn directional(&self) -> DirectionalInput {
        DirectionalInput {
            left: self.held.contains(Action::Left),
            right: self.held.contains(Action::Right),
            up: self.held.contains(Action::Up),
            down: self.held.contains(Action::Down),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionalInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// How held directions turn into an attack direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum DirectionRule {
    /// Left alone is enough for Side, even with Up or Down held; Right only
    /// counts when no vertical direction is held.
    #[default]
    Legacy,
    /// Left and right are treated alike.
    Symmetric,
}

impl DirectionRule {
    pub fn resolve(self, input: DirectionalInput) -> AttackDirection {
        let DirectionalInput {
            left,
            right,
            up,
            down,
        } = input;
        let vertical = up || down;

        let side = match self {
            DirectionRule::Legacy => left || (right && !vertical),
            DirectionRule::Symmetric => (left || right) && !vertical,
        };

        if side {
            AttackDirection::Side
        } else if up && !(right || down) {
            AttackDirection::Up
        } else if down && !(up || right) {
            AttackDirection::Down
        } else if self == DirectionRule::Symmetric && up && !down {
            AttackDirection::Up
        } else if self == DirectionRule::Symmetric && down && !up {
            AttackDirection::Down
        } else {
            AttackDirection::Neutral
        }
    }
}

/// Condition half of a binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Held(Action),
    NotHeld(Action),
    Pressed(Action),
    /// First held while the second is not
    HeldWithout(Action, Action),
    HeldBoth(Action, Action),
    /// Stick pushed sideways past the deadzone
    StickX,
}

impl Trigger {
    pub fn fires(self, input: &FighterInput, deadzone: f32) -> bool {
        match self {
            Trigger::Held(action) => input.held.contains(action),
            Trigger::NotHeld(action) => !input.held.contains(action),
            Trigger::Pressed(action) => input.pressed.contains(action),
            Trigger::HeldWithout(action, other) => {
                input.held.contains(action) && !input.held.contains(other)
            }
            Trigger::HeldBoth(a, b) => input.held.contains(a) && input.held.contains(b),
            Trigger::StickX => input.stick.x.abs() > deadzone,
        }
    }
}

/// Action half of a binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(f32),
    /// Move by the stick's horizontal deflection
    MoveWithStick,
    Jump,
    Guard,
    StopGuard,
    Attack(AttackKind),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binding {
    pub trigger: Trigger,
    pub command: Command,
}

const fn bind(trigger: Trigger, command: Command) -> Binding {
    Binding { trigger, command }
}

const KEYBOARD_BINDINGS: &[Binding] = &[
    bind(
        Trigger::HeldWithout(Action::Left, Action::Right),
        Command::Move(-1.0),
    ),
    bind(
        Trigger::HeldWithout(Action::Right, Action::Left),
        Command::Move(1.0),
    ),
    bind(Trigger::Pressed(Action::Jump), Command::Jump),
    bind(Trigger::Held(Action::Guard), Command::Guard),
    bind(Trigger::NotHeld(Action::Guard), Command::StopGuard),
    bind(
        Trigger::Pressed(Action::Basic),
        Command::Attack(AttackKind::Basic),
    ),
    bind(
        Trigger::Pressed(Action::Special),
        Command::Attack(AttackKind::Special),
    ),
    bind(
        Trigger::Pressed(Action::Smash),
        Command::Attack(AttackKind::Smash),
    ),
    bind(
        Trigger::Pressed(Action::Ultimate),
        Command::Attack(AttackKind::Ultimate),
    ),
];

const KEYBOARD2_BINDINGS: &[Binding] = &[
    bind(
        Trigger::HeldWithout(Action::Left, Action::Right),
        Command::Move(-1.0),
    ),
    bind(
        Trigger::HeldWithout(Action::Right, Action::Left),
        Command::Move(1.0),
    ),
    bind(Trigger::Pressed(Action::Jump), Command::Jump),
];

// Special + Smash held together is the ultimate chord, so neither fires alone
// while the other is down.
const GAMEPAD_BINDINGS: &[Binding] = &[
    bind(Trigger::StickX, Command::MoveWithStick),
    bind(Trigger::Held(Action::Jump), Command::Jump),
    bind(
        Trigger::Held(Action::Basic),
        Command::Attack(AttackKind::Basic),
    ),
    bind(
        Trigger::HeldWithout(Action::Special, Action::Smash),
        Command::Attack(AttackKind::Special),
    ),
    bind(
        Trigger::HeldWithout(Action::Smash, Action::Special),
        Command::Attack(AttackKind::Smash),
    ),
    bind(
        Trigger::HeldBoth(Action::Smash, Action::Special),
        Command::Attack(AttackKind::Ultimate),
    ),
    bind(Trigger::Held(Action::Guard), Command::Guard),
    bind(Trigger::NotHeld(Action::Guard), Command::StopGuard),
];

/// Ordered binding table for a scheme. A missing device gets no bindings at
/// all, so its fighter idles instead of reacting to phantom input.
pub fn bindings_for(scheme: ControlScheme, source: InputSource) -> &'static [Binding] {
    if source == InputSource::Unavailable {
        return &[];
    }

    match scheme {
        ControlScheme::Keyboard => KEYBOARD_BINDINGS,
        ControlScheme::Keyboard2 => KEYBOARD2_BINDINGS,
        ControlScheme::Gamepad => GAMEPAD_BINDINGS,
    }
}

const KEYBOARD_KEYS: &[(KeyCode, Action)] = &[
    (KeyCode::KeyA, Action::Left),
    (KeyCode::KeyD, Action::Right),
    (KeyCode::KeyW, Action::Up),
    (KeyCode::KeyS, Action::Down),
    (KeyCode::Space, Action::Jump),
    (KeyCode::KeyO, Action::Guard),
    (KeyCode::KeyJ, Action::Basic),
    (KeyCode::KeyK, Action::Special),
    (KeyCode::KeyL, Action::Smash),
    (KeyCode::KeyI, Action::Ultimate),
];

const KEYBOARD2_KEYS: &[(KeyCode, Action)] = &[
    (KeyCode::ArrowLeft, Action::Left),
    (KeyCode::ArrowRight, Action::Right),
    (KeyCode::ArrowUp, Action::Up),
    (KeyCode::ArrowDown, Action::Down),
    (KeyCode::ArrowUp, Action::Jump),
];

const GAMEPAD_BUTTONS: &[(GamepadButton, Action)] = &[
    (GamepadButton::South, Action::Jump),
    (GamepadButton::West, Action::Basic),
    (GamepadButton::North, Action::Special),
    (GamepadButton::East, Action::Smash),
    (GamepadButton::RightTrigger, Action::Guard),
];

pub fn key_map(scheme: ControlScheme) -> &'static [(KeyCode, Action)] {
    match scheme {
        ControlScheme::Keyboard => KEYBOARD_KEYS,
        ControlScheme::Keyboard2 => KEYBOARD2_KEYS,
        ControlScheme::Gamepad => &[],
    }
}

pub fn read_keyboard(keys: &ButtonInput<KeyCode>, map: &[(KeyCode, Action)]) -> FighterInput {
    let mut input = FighterInput::default();
    for &(key, action) in map {
        if keys.pressed(key) {
            input.held.insert(action);
        }
        if keys.just_pressed(key) {
            input.pressed.insert(action);
        }
    }
    input
}

pub fn read_gamepad(gamepad: &Gamepad, deadzone: f32) -> FighterInput {
    let mut input = FighterInput {
        stick: gamepad.left_stick(),
        ..default()
    };

    for &(button, action) in GAMEPAD_BUTTONS {
        if gamepad.pressed(button) {
            input.held.insert(action);
        }
        if gamepad.just_pressed(button) {
            input.pressed.insert(action);
        }
    }

    let stick = input.stick;
    for (active, action) in [
        (stick.x < -deadzone, Action::Left),
        (stick.x > deadzone, Action::Right),
        (stick.y > deadzone, Action::Up),
        (stick.y < -deadzone, Action::Down),
    ] {
        if active {
            input.held.insert(action);
        }
    }

    input
}
