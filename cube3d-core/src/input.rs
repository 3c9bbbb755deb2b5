/// Key bindings and the table that maps commands onto transform mutations
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::transform::{Axis, Field, TransformState};

/// Rotation step in degrees
pub const ANGLE_STEP: f32 = 5.0;
/// Translation and scaling step in world units
pub const LINEAR_STEP: f32 = 0.1;

/// Discrete user commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputCommand {
    RotateXPos,
    RotateXNeg,
    RotateYPos,
    RotateYNeg,
    RotateZPos,
    RotateZNeg,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBack,
    ScaleXUp,
    ScaleXDown,
    ScaleYUp,
    ScaleYDown,
    ScaleZUp,
    ScaleZDown,
}

/// A single-component change to the transform state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation {
    pub field: Field,
    pub axis: Axis,
    pub delta: f32,
}

impl Mutation {
    const fn new(field: Field, axis: Axis, delta: f32) -> Self {
        Self { field, axis, delta }
    }

    pub fn apply(&self, state: &mut TransformState) {
        state.add(self.field, self.axis, self.delta);
    }
}

use InputCommand::*;

pub const COMMAND_TABLE: [(InputCommand, Mutation); 18] = [
    (RotateXPos, Mutation::new(Field::Rotation, Axis::X, ANGLE_STEP)),
    (RotateXNeg, Mutation::new(Field::Rotation, Axis::X, -ANGLE_STEP)),
    (RotateYPos, Mutation::new(Field::Rotation, Axis::Y, ANGLE_STEP)),
    (RotateYNeg, Mutation::new(Field::Rotation, Axis::Y, -ANGLE_STEP)),
    (RotateZPos, Mutation::new(Field::Rotation, Axis::Z, ANGLE_STEP)),
    (RotateZNeg, Mutation::new(Field::Rotation, Axis::Z, -ANGLE_STEP)),
    (MoveUp, Mutation::new(Field::Position, Axis::Y, LINEAR_STEP)),
    (MoveDown, Mutation::new(Field::Position, Axis::Y, -LINEAR_STEP)),
    (MoveLeft, Mutation::new(Field::Position, Axis::X, -LINEAR_STEP)),
    (MoveRight, Mutation::new(Field::Position, Axis::X, LINEAR_STEP)),
    (MoveForward, Mutation::new(Field::Position, Axis::Z, LINEAR_STEP)),
    (MoveBack, Mutation::new(Field::Position, Axis::Z, -LINEAR_STEP)),
    (ScaleXUp, Mutation::new(Field::Scaling, Axis::X, LINEAR_STEP)),
    (ScaleXDown, Mutation::new(Field::Scaling, Axis::X, -LINEAR_STEP)),
    (ScaleYUp, Mutation::new(Field::Scaling, Axis::Y, LINEAR_STEP)),
    (ScaleYDown, Mutation::new(Field::Scaling, Axis::Y, -LINEAR_STEP)),
    (ScaleZUp, Mutation::new(Field::Scaling, Axis::Z, LINEAR_STEP)),
    (ScaleZDown, Mutation::new(Field::Scaling, Axis::Z, -LINEAR_STEP)),
];

pub const DEFAULT_BINDINGS: [(char, InputCommand); 18] = [
    ('u', RotateXPos),
    ('j', RotateXNeg),
    ('i', RotateYPos),
    ('k', RotateYNeg),
    ('o', RotateZPos),
    ('l', RotateZNeg),
    ('w', MoveUp),
    ('s', MoveDown),
    ('a', MoveLeft),
    ('d', MoveRight),
    ('q', MoveForward),
    ('e', MoveBack),
    ('r', ScaleXUp),
    ('f', ScaleXDown),
    ('t', ScaleYUp),
    ('g', ScaleYDown),
    ('y', ScaleZUp),
    ('h', ScaleZDown),
];

impl InputCommand {
    #[rustfmt::skip]
    pub const ALL: [InputCommand; 18] = [
        RotateXPos, RotateXNeg, RotateYPos, RotateYNeg, RotateZPos, RotateZNeg,
        MoveUp, MoveDown, MoveLeft, MoveRight, MoveForward, MoveBack,
        ScaleXUp, ScaleXDown, ScaleYUp, ScaleYDown, ScaleZUp, ScaleZDown,
    ];

    pub fn mutation(self) -> Mutation {
        // Every variant has exactly one table row.
        COMMAND_TABLE[self as usize].1
    }

    /// Kebab-case name used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            RotateXPos => "rotate-x-pos",
            RotateXNeg => "rotate-x-neg",
            RotateYPos => "rotate-y-pos",
            RotateYNeg => "rotate-y-neg",
            RotateZPos => "rotate-z-pos",
            RotateZNeg => "rotate-z-neg",
            MoveUp => "move-up",
            MoveDown => "move-down",
            MoveLeft => "move-left",
            MoveRight => "move-right",
            MoveForward => "move-forward",
            MoveBack => "move-back",
            ScaleXUp => "scale-x-up",
            ScaleXDown => "scale-x-down",
            ScaleYUp => "scale-y-up",
            ScaleYDown => "scale-y-down",
            ScaleZUp => "scale-z-up",
            ScaleZDown => "scale-z-down",
        }
    }
}

impl fmt::Display for InputCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown command name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown input command '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for InputCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputCommand::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Case-insensitive mapping from key characters to commands
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    bindings: HashMap<char, InputCommand>,
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn lookup(&self, key: char) -> Option<InputCommand> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Key currently bound to `command`, if any
    pub fn key_for(&self, command: InputCommand) -> Option<char> {
        self.bindings
            .iter()
            .find_map(|(&key, &bound)| (bound == command).then_some(key))
    }

    /// Bind `key` to `command`, dropping the command's previous key.
    ///
    /// Returns the command that was bound to `key` before and has now lost
    /// its binding, if it differs from `command`.
    pub fn rebind(&mut self, command: InputCommand, key: char) -> Option<InputCommand> {
        self.bindings.retain(|_, bound| *bound != command);
        self.bindings
            .insert(normalize(key), command)
            .filter(|&displaced| displaced != command)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS.into_iter().collect(),
        }
    }
}

fn normalize(key: char) -> char {
    key.to_ascii_lowercase()
}

/// Outcome of a key dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The state changed; the caller owes exactly one redraw
    Applied(InputCommand),
    Ignored,
}

/// Stateless key dispatcher over a [`KeyMap`]
#[derive(Debug, Clone, Default)]
pub struct InputController {
    keymap: KeyMap,
}

impl InputController {
    pub fn new(keymap: KeyMap) -> Self {
        Self { keymap }
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn apply(&self, state: &mut TransformState, command: InputCommand) {
        command.mutation().apply(state);
    }

    /// Apply the mutation bound to `key`; unknown keys leave `state` untouched
    pub fn dispatch(&self, state: &mut TransformState, key: char) -> Dispatch {
        match self.keymap.lookup(key) {
            Some(command) => {
                self.apply(state, command);
                tracing::debug!(?command, ?key, "applied input command");
                Dispatch::Applied(command)
            }
            None => {
                tracing::trace!(?key, "ignored unbound key");
                Dispatch::Ignored
            }
        }
    }
}
