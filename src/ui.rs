//! Terminal backend: rasterises pixel-space draw calls onto a ratatui buffer
//! and flips it to the screen.

use crate::render::{
    BLOCK_SIZE, BOARD_HEIGHT_PX, BOARD_WIDTH_PX, PixelRect, Renderer, SIDEBAR_WIDTH_PX,
};
use crate::theme::Theme;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Block;
use std::io;

/// One board cell is two terminal columns wide and one row tall.
const CELL_WIDTH: i32 = 2;
const CELL_HEIGHT: i32 = 1;

const H_LINE: &str = "▔";
const V_LINE: &str = "▏";
const DOT: &str = "·";

/// Canvas size in terminal cells (board + sidebar, no border).
pub fn canvas_size() -> (u16, u16) {
    let w = to_col(BOARD_WIDTH_PX + SIDEBAR_WIDTH_PX);
    let h = to_row(BOARD_HEIGHT_PX);
    (w as u16, h as u16)
}

#[inline]
fn to_col(px: i32) -> i32 {
    px.div_euclid(BLOCK_SIZE) * CELL_WIDTH + px.rem_euclid(BLOCK_SIZE) * CELL_WIDTH / BLOCK_SIZE
}

#[inline]
fn to_row(py: i32) -> i32 {
    py.div_euclid(BLOCK_SIZE) * CELL_HEIGHT + py.rem_euclid(BLOCK_SIZE) * CELL_HEIGHT / BLOCK_SIZE
}

/// Off-screen terminal-cell canvas addressed in pixels.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    buf: Buffer,
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelCanvas {
    pub fn new() -> Self {
        let (w, h) = canvas_size();
        Self {
            buf: Buffer::empty(Rect::new(0, 0, w, h)),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.reset();
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut ratatui::buffer::Cell> {
        let x = u16::try_from(col).ok()?;
        let y = u16::try_from(row).ok()?;
        self.buf.cell_mut((x, y))
    }

    /// Fill every terminal cell the rectangle touches.
    pub fn fill_rect(&mut self, color: Color, rect: PixelRect) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let x0 = to_col(rect.x);
        let y0 = to_row(rect.y);
        // Exclusive end, rounded up so partial cells are covered.
        let x1 = to_col(rect.x + rect.w - 1) + 1;
        let y1 = to_row(rect.y + rect.h - 1) + 1;
        for row in y0..y1 {
            for col in x0..x1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }

    /// Axis-aligned lines hug the top/left edge of the cells they cross;
    /// anything else is plotted as dots.
    pub fn line(&mut self, color: Color, from: (i32, i32), to: (i32, i32)) {
        let (c0, r0) = (to_col(from.0), to_row(from.1));
        let (c1, r1) = (to_col(to.0), to_row(to.1));
        if from.1 == to.1 {
            for col in c0.min(c1)..c0.max(c1) {
                if let Some(cell) = self.cell_mut(col, r0) {
                    cell.set_symbol(H_LINE).set_fg(color);
                }
            }
        } else if from.0 == to.0 {
            for row in r0.min(r1)..r0.max(r1) {
                if let Some(cell) = self.cell_mut(c0, row) {
                    cell.set_symbol(V_LINE).set_fg(color);
                }
            }
        } else {
            self.plot_dots(color, (c0, r0), (c1, r1));
        }
    }

    fn plot_dots(&mut self, color: Color, from: (i32, i32), to: (i32, i32)) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            if let Some(cell) = self.cell_mut(x, y) {
                cell.set_symbol(DOT).set_fg(color);
            }
            if (x, y) == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn text(&mut self, color: Color, at: (i32, i32), text: &str) {
        let (col, row) = (to_col(at.0), to_row(at.1));
        let (Ok(x), Ok(y)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        let area = self.buf.area;
        if x >= area.right() || y >= area.bottom() {
            return;
        }
        self.buf
            .set_stringn(x, y, text, usize::from(area.right() - x), Style::default().fg(color));
    }
}

/// Renders frames into the terminal, centred, inside a titled border.
pub struct TerminalRenderer {
    terminal: DefaultTerminal,
    canvas: PixelCanvas,
    border: Color,
    title: Color,
}

impl TerminalRenderer {
    pub fn new(terminal: DefaultTerminal, theme: &Theme) -> Self {
        Self {
            terminal,
            canvas: PixelCanvas::new(),
            border: theme.border,
            title: theme.title,
        }
    }
}

/// Outer rect (with border) centred in `area`.
fn centered(area: Rect) -> Rect {
    let (w, h) = canvas_size();
    let (w, h) = (w + 2, h + 2);
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

impl Renderer for TerminalRenderer {
    fn draw_rect(&mut self, color: Color, rect: PixelRect) {
        self.canvas.fill_rect(color, rect);
    }

    fn draw_line(&mut self, color: Color, from: (i32, i32), to: (i32, i32)) {
        self.canvas.line(color, from, to);
    }

    fn draw_text(&mut self, color: Color, at: (i32, i32), text: &str) {
        self.canvas.text(color, at, text);
    }

    fn present(&mut self) -> io::Result<()> {
        let canvas = &self.canvas;
        let (border, title) = (self.border, self.title);
        self.terminal.draw(|frame| {
            let outer = centered(frame.area());
            let block = Block::bordered()
                .border_style(Style::default().fg(border))
                .title(Span::styled(" blocktui ", Style::default().fg(title)));
            let inner = block.inner(outer);
            frame.render_widget(block, outer);
            blit(canvas.buffer(), frame.buffer_mut(), inner);
        })?;
        self.canvas.clear();
        Ok(())
    }
}

/// Copy `src` into `dst` at `target`, clipped to `target`.
fn blit(src: &Buffer, dst: &mut Buffer, target: Rect) {
    let w = src.area.width.min(target.width);
    let h = src.area.height.min(target.height);
    for y in 0..h {
        for x in 0..w {
            if let (Some(from), Some(to)) = (src.cell((x, y)), dst.cell_mut((target.x + x, target.y + y))) {
                *to = from.clone();
            }
        }
    }
}
