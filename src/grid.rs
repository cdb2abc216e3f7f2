//! Playfield grid: locked cells, collision, locking and row clearing.

use crate::piece::Piece;
use ratatui::style::Color;
use std::collections::VecDeque;

pub const COLS: usize = 10;
pub const ROWS: usize = 20;

/// Single cell: either empty or a locked block of a given colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Block(Color),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// Locked cells, `ROWS` x `COLS`. y=0 is top; rows[0] is the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: VecDeque<[Cell; COLS]>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            rows: (0..ROWS).map(|_| [Cell::Empty; COLS]).collect(),
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> {
        self.rows.iter()
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Returns false when (x, y) is off the grid.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self.rows.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// True if any filled cell of the piece is off the grid or on a locked block.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .any(|(x, y)| !matches!(self.get(x, y), Some(Cell::Empty)))
    }

    /// Writes the piece colour into its cells. Callers check `collides` first;
    /// anything off the grid is dropped.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Cell::Block(piece.color));
        }
    }

    /// Removes every full row, inserting an empty row at the top for each.
    /// Returns the number of rows removed.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows.len();
        while y > 0 {
            let idx = y - 1;
            if self.rows[idx].iter().all(|c| !c.is_empty()) {
                self.rows.remove(idx);
                self.rows.push_front([Cell::Empty; COLS]);
                cleared += 1;
                // Rows above shifted down into `idx`; examine it again.
            } else {
                y -= 1;
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{SPAWN_X, SPAWN_Y};
    use crate::shapes::ShapeId;
    use proptest::prelude::*;

    const RED: Cell = Cell::Block(Color::Rgb(255, 0, 0));

    fn fill_row(grid: &mut Grid, y: i32) {
        for x in 0..COLS as i32 {
            grid.set(x, y, RED);
        }
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.rows().count(), ROWS);
        assert!(grid.rows().all(|row| row.iter().all(|c| c.is_empty())));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::new();
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, -1), None);
        assert_eq!(grid.get(COLS as i32, 0), None);
        assert_eq!(grid.get(0, ROWS as i32), None);
        assert_eq!(grid.get(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_set_out_of_bounds_is_rejected() {
        let mut grid = Grid::new();
        assert!(!grid.set(-1, 0, RED));
        assert!(!grid.set(COLS as i32, 0, RED));
        assert!(grid.set(3, 4, RED));
        assert_eq!(grid.get(3, 4), Some(RED));
    }

    #[test]
    fn test_collides_at_walls_and_floor() {
        let grid = Grid::new();
        let mut p = Piece::spawn(ShapeId::O);
        assert!(!grid.collides(&p));
        p.x = -1;
        assert!(grid.collides(&p));
        p.x = COLS as i32 - 1;
        assert!(grid.collides(&p));
        p.x = 0;
        p.y = ROWS as i32 - 1;
        assert!(grid.collides(&p));
        p.y = -1;
        assert!(grid.collides(&p));
    }

    #[test]
    fn test_collides_with_locked_block() {
        let mut grid = Grid::new();
        let p = Piece::spawn(ShapeId::I);
        grid.set(p.x + 3, p.y, RED);
        assert!(grid.collides(&p));
    }

    #[test]
    fn test_lock_then_collides() {
        let mut grid = Grid::new();
        for shape in ShapeId::ALL {
            let mut p = Piece::spawn(shape);
            p.y = 5;
            p.x = 2;
            let mut g = grid.clone();
            assert!(!g.collides(&p));
            g.lock(&p);
            assert!(g.collides(&p));
            for (x, y) in p.cells() {
                assert_eq!(g.get(x, y), Some(Cell::Block(shape.color())));
            }
        }
        grid.lock(&Piece::spawn(ShapeId::T));
        assert_eq!(grid.get(SPAWN_X, SPAWN_Y), Some(Cell::Block(ShapeId::T.color())));
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut grid = Grid::new();
        grid.set(0, ROWS as i32 - 1, RED);
        grid.set(4, 7, RED);
        let before = grid.clone();
        assert_eq!(grid.clear_completed_rows(), 0);
        assert_eq!(grid, before);
        assert_eq!(grid.clear_completed_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_clear_single_bottom_row_shifts_down() {
        let mut grid = Grid::new();
        let marker = Cell::Block(Color::Rgb(0, 0, 255));
        grid.set(2, 0, marker);
        grid.set(7, 18, marker);
        fill_row(&mut grid, 19);
        assert_eq!(grid.clear_completed_rows(), 1);
        assert_eq!(grid.rows().count(), ROWS);
        assert_eq!(grid.get(2, 1), Some(marker));
        assert_eq!(grid.get(2, 0), Some(Cell::Empty));
        assert_eq!(grid.get(7, 19), Some(marker));
    }

    #[test]
    fn test_clear_adjacent_and_split_rows() {
        let mut grid = Grid::new();
        let marker = Cell::Block(Color::Rgb(0, 255, 0));
        fill_row(&mut grid, 19);
        fill_row(&mut grid, 18);
        grid.set(0, 17, marker);
        fill_row(&mut grid, 16);
        grid.set(5, 15, marker);
        assert_eq!(grid.clear_completed_rows(), 3);
        assert_eq!(grid.rows().count(), ROWS);
        assert_eq!(grid.get(0, 19), Some(marker));
        assert_eq!(grid.get(5, 18), Some(marker));
        for y in 0..18 {
            assert!(grid.rows().nth(y).is_some_and(|r| r.iter().all(|c| c.is_empty())));
        }
    }

    #[test]
    fn test_clear_entire_grid() {
        let mut grid = Grid::new();
        for y in 0..ROWS as i32 {
            fill_row(&mut grid, y);
        }
        assert_eq!(grid.clear_completed_rows(), ROWS);
        assert_eq!(grid, Grid::new());
    }

    proptest! {
        #[test]
        fn prop_collides_iff_cell_out_of_bounds_or_occupied(
            shape_idx in 0usize..7,
            turns in 0usize..4,
            x in -4i32..(COLS as i32 + 2),
            y in -4i32..(ROWS as i32 + 2),
            blocks in proptest::collection::vec((0i32..COLS as i32, 0i32..ROWS as i32), 0..40),
        ) {
            let mut grid = Grid::new();
            for (bx, by) in blocks {
                grid.set(bx, by, RED);
            }
            let mut p = Piece::spawn(ShapeId::from_index(shape_idx));
            for _ in 0..turns {
                p.rotate();
            }
            p.x = x;
            p.y = y;
            let expected = p.cells().any(|(cx, cy)| {
                cx < 0
                    || cy < 0
                    || cx >= COLS as i32
                    || cy >= ROWS as i32
                    || grid.get(cx, cy) != Some(Cell::Empty)
            });
            prop_assert_eq!(grid.collides(&p), expected);
        }

        #[test]
        fn prop_clear_keeps_dimensions(
            full_rows in proptest::collection::vec(0i32..ROWS as i32, 0..8),
            rounds in 1usize..4,
        ) {
            let mut grid = Grid::new();
            for y in full_rows {
                fill_row(&mut grid, y);
            }
            for _ in 0..rounds {
                grid.clear_completed_rows();
                prop_assert_eq!(grid.rows().count(), ROWS);
                prop_assert!(grid.rows().all(|r| r.len() == COLS));
            }
        }
    }
}
