//! The active tetromino: shape, grid position, rotation.

use crate::grid::COLS;
use crate::shapes::{Mask, ShapeId};
use ratatui::style::Color;

/// Spawn point of every new piece (top-left of its mask).
pub const SPAWN_X: i32 = (COLS / 2) as i32;
pub const SPAWN_Y: i32 = 0;

/// Current piece. Moves and rotations are unchecked; legality is decided by
/// [`crate::grid::Grid::collides`] and reverted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub shape: ShapeId,
    pub x: i32,
    pub y: i32,
    /// Always below `shape.state_count()`.
    pub rotation: usize,
    pub color: Color,
}

impl Piece {
    pub fn spawn(shape: ShapeId) -> Self {
        Self {
            shape,
            x: SPAWN_X,
            y: SPAWN_Y,
            rotation: 0,
            color: shape.color(),
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.shape.state_count();
    }

    pub fn active_mask(&self) -> Mask {
        let states = self.shape.states();
        states[self.rotation % states.len()]
    }

    /// Absolute grid coordinates of every filled cell of the active mask.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.active_mask().iter().enumerate().flat_map(move |(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, cell)| **cell != 0)
                .map(move |(dx, _)| (self.x + dx as i32, self.y + dy as i32))
        })
    }
}
