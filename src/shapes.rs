//! Shape catalog: the seven tetrominoes, their rotation states and colours.
//!
//! Rotation states are fixed data rather than computed rotations, so a shape
//! cycles through exactly the states listed for it (O has one, I/S/Z two).

use ratatui::style::Color;

/// One rotation state: rows of cells, 0 = empty, nonzero = filled (`id + 1`).
pub type Mask = &'static [&'static [u8]];

/// Tetromino identifiers 0..=6 (T, S, Z, J, L, I, O).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    T,
    S,
    Z,
    J,
    L,
    I,
    O,
}

const T_STATES: &[Mask] = &[
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
];

const S_STATES: &[Mask] = &[
    &[&[0, 2, 2], &[2, 2, 0]],
    &[&[2, 0], &[2, 2], &[0, 2]],
];

const Z_STATES: &[Mask] = &[
    &[&[3, 3, 0], &[0, 3, 3]],
    &[&[0, 3], &[3, 3], &[3, 0]],
];

const J_STATES: &[Mask] = &[
    &[&[4, 0, 0], &[4, 4, 4]],
    &[&[4, 4], &[4, 0], &[4, 0]],
    &[&[4, 4, 4], &[0, 0, 4]],
    &[&[0, 4], &[0, 4], &[4, 4]],
];

const L_STATES: &[Mask] = &[
    &[&[0, 0, 5], &[5, 5, 5]],
    &[&[5, 0], &[5, 0], &[5, 5]],
    &[&[5, 5, 5], &[5, 0, 0]],
    &[&[5, 5], &[0, 5], &[0, 5]],
];

const I_STATES: &[Mask] = &[&[&[6, 6, 6, 6]], &[&[6], &[6], &[6], &[6]]];

const O_STATES: &[Mask] = &[&[&[7, 7], &[7, 7]]];

impl ShapeId {
    pub const ALL: [Self; 7] = [Self::T, Self::S, Self::Z, Self::J, Self::L, Self::I, Self::O];

    /// Catalog lookup; wraps so every index maps to a shape.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::T => "T",
            Self::S => "S",
            Self::Z => "Z",
            Self::J => "J",
            Self::L => "L",
            Self::I => "I",
            Self::O => "O",
        }
    }

    /// All rotation states, in the order `rotate` walks them.
    pub fn states(self) -> &'static [Mask] {
        match self {
            Self::T => T_STATES,
            Self::S => S_STATES,
            Self::Z => Z_STATES,
            Self::J => J_STATES,
            Self::L => L_STATES,
            Self::I => I_STATES,
            Self::O => O_STATES,
        }
    }

    pub fn state_count(self) -> usize {
        self.states().len()
    }

    pub fn color(self) -> Color {
        match self {
            Self::T => Color::Rgb(0, 255, 255),
            Self::S => Color::Rgb(255, 255, 0),
            Self::Z => Color::Rgb(128, 0, 128),
            Self::J => Color::Rgb(0, 255, 0),
            Self::L => Color::Rgb(255, 0, 0),
            Self::I => Color::Rgb(0, 0, 255),
            Self::O => Color::Rgb(255, 127, 0),
        }
    }
}
