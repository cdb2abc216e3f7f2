//! Frame painting through a pixel-space renderer.
//!
//! The board is laid out in pixels (`BLOCK_SIZE` per cell) with the sidebar to
//! its right. Backends only have to rasterise rectangles, lines and text.

use crate::game::GameState;
use crate::grid::{COLS, Cell, Grid, ROWS};
use crate::piece::Piece;
use crate::theme::Theme;
use ratatui::style::Color;
use std::io;

/// Pixel size of one grid cell.
pub const BLOCK_SIZE: i32 = 30;
pub const BOARD_WIDTH_PX: i32 = COLS as i32 * BLOCK_SIZE;
pub const BOARD_HEIGHT_PX: i32 = ROWS as i32 * BLOCK_SIZE;
pub const SIDEBAR_WIDTH_PX: i32 = 6 * BLOCK_SIZE;

/// Left edge of sidebar content.
const SIDEBAR_X: i32 = BOARD_WIDTH_PX + BLOCK_SIZE / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn cell(x: i32, y: i32) -> Self {
        Self::new(x * BLOCK_SIZE, y * BLOCK_SIZE, BLOCK_SIZE, BLOCK_SIZE)
    }
}

/// Drawing surface the game paints onto once per frame.
pub trait Renderer {
    fn draw_rect(&mut self, color: Color, rect: PixelRect);
    fn draw_line(&mut self, color: Color, from: (i32, i32), to: (i32, i32));
    fn draw_text(&mut self, color: Color, at: (i32, i32), text: &str);
    /// Flip the finished frame to the screen.
    fn present(&mut self) -> io::Result<()>;
}

/// Paint grid, grid lines, active piece and sidebar, then present.
pub fn draw_frame<R: Renderer + ?Sized>(
    renderer: &mut R,
    state: &GameState,
    theme: &Theme,
) -> io::Result<()> {
    draw_grid(renderer, &state.grid, theme);
    draw_piece(renderer, &state.piece);
    draw_sidebar(renderer, state, theme);
    renderer.present()
}

fn draw_grid<R: Renderer + ?Sized>(renderer: &mut R, grid: &Grid, theme: &Theme) {
    for (y, row) in grid.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let color = match cell {
                Cell::Empty => theme.empty,
                Cell::Block(color) => *color,
            };
            renderer.draw_rect(color, PixelRect::cell(x as i32, y as i32));
        }
    }
    for y in 0..ROWS as i32 {
        let py = y * BLOCK_SIZE;
        renderer.draw_line(theme.grid_line, (0, py), (BOARD_WIDTH_PX, py));
    }
    for x in 0..COLS as i32 {
        let px = x * BLOCK_SIZE;
        renderer.draw_line(theme.grid_line, (px, 0), (px, BOARD_HEIGHT_PX));
    }
}

fn draw_piece<R: Renderer + ?Sized>(renderer: &mut R, piece: &Piece) {
    for (x, y) in piece.cells() {
        renderer.draw_rect(piece.color, PixelRect::cell(x, y));
    }
}

fn draw_sidebar<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState, theme: &Theme) {
    let line = |n: i32| n * BLOCK_SIZE;
    renderer.draw_text(theme.title, (SIDEBAR_X, line(0)), "SCORE");
    renderer.draw_text(theme.main_fg, (SIDEBAR_X, line(1)), &state.score.to_string());
    renderer.draw_text(theme.title, (SIDEBAR_X, line(3)), "LINES");
    renderer.draw_text(
        theme.main_fg,
        (SIDEBAR_X, line(4)),
        &state.lines_cleared.to_string(),
    );
    renderer.draw_text(
        theme.title,
        (SIDEBAR_X, line(6)),
        &format!("NEXT {}", state.next.shape.name()),
    );
    for (dy, row) in state.next.active_mask().iter().enumerate() {
        for (dx, cell) in row.iter().enumerate() {
            if *cell != 0 {
                renderer.draw_rect(
                    state.next.color,
                    PixelRect::new(
                        SIDEBAR_X + dx as i32 * BLOCK_SIZE,
                        line(7) + dy as i32 * BLOCK_SIZE,
                        BLOCK_SIZE,
                        BLOCK_SIZE,
                    ),
                );
            }
        }
    }
    if state.is_game_over() {
        renderer.draw_text(theme.alert, (SIDEBAR_X, line(11)), "GAME OVER");
    }
    renderer.draw_text(theme.main_fg, (SIDEBAR_X, line(ROWS as i32 - 1)), "q: quit");
}
