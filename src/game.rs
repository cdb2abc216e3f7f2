//! Game state: grid, active and next piece, score, gravity timer.

use crate::grid::Grid;
use crate::input::Input;
use crate::piece::Piece;
use crate::shapes::ShapeId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Time between gravity steps.
pub const FALL_INTERVAL: Duration = Duration::from_millis(500);

/// Points per cleared row.
pub const SCORE_PER_LINE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// A freshly promoted piece overlapped the stack. Only `Quit` is honoured.
    GameOver,
}

/// Whole session: everything one tick reads or writes.
#[derive(Debug)]
pub struct GameState {
    pub grid: Grid,
    pub piece: Piece,
    pub next: Piece,
    pub score: u32,
    pub lines_cleared: u32,
    pub status: Status,
    pub running: bool,
    fall_accumulator: Duration,
    rng: StdRng,
}

impl GameState {
    /// New session; `seed` makes the piece sequence reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng)
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let piece = Piece::spawn(random_shape(&mut rng));
        let next = Piece::spawn(random_shape(&mut rng));
        Self {
            grid: Grid::new(),
            piece,
            next,
            score: 0,
            lines_cleared: 0,
            status: Status::Running,
            running: true,
            fall_accumulator: Duration::ZERO,
            rng,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status == Status::GameOver
    }

    /// One loop iteration: drain inputs in order, then advance gravity by `elapsed`.
    pub fn tick<I>(&mut self, inputs: I, elapsed: Duration)
    where
        I: IntoIterator<Item = Input>,
    {
        for input in inputs {
            self.apply_input(input);
        }
        if self.is_game_over() {
            return;
        }
        self.fall_accumulator += elapsed;
        if self.fall_accumulator >= FALL_INTERVAL {
            self.fall_accumulator = Duration::ZERO;
            self.tick_gravity();
        }
    }

    pub fn apply_input(&mut self, input: Input) {
        if input == Input::Quit {
            self.running = false;
            return;
        }
        if self.is_game_over() {
            return;
        }
        match input {
            Input::Left => self.try_shift(-1),
            Input::Right => self.try_shift(1),
            Input::Down => self.soft_drop(),
            Input::Up => self.rotate(),
            Input::Quit => {}
        }
    }

    fn try_shift(&mut self, dx: i32) {
        self.piece.move_by(dx, 0);
        if self.grid.collides(&self.piece) {
            self.piece.move_by(-dx, 0);
        }
    }

    /// Move down one row; a blocked drop locks the piece. The fall timer is
    /// left alone.
    pub fn soft_drop(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.piece.move_by(0, 1);
        if self.grid.collides(&self.piece) {
            self.piece.move_by(0, -1);
            self.lock_piece();
        }
    }

    /// Rotate; a blocked rotation is undone by three further forward turns.
    pub fn rotate(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.piece.rotate();
        if self.grid.collides(&self.piece) {
            for _ in 0..3 {
                self.piece.rotate();
            }
        }
    }

    /// One gravity step, as fired by the fall timer.
    pub fn tick_gravity(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.piece.move_by(0, 1);
        if self.grid.collides(&self.piece) {
            self.piece.move_by(0, -1);
            self.lock_piece();
        }
    }

    fn lock_piece(&mut self) {
        self.grid.lock(&self.piece);
        let cleared = self.grid.clear_completed_rows() as u32;
        if cleared > 0 {
            log::debug!("cleared {} row(s)", cleared);
        }
        self.score += cleared * SCORE_PER_LINE;
        self.lines_cleared += cleared;
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let fresh = Piece::spawn(random_shape(&mut self.rng));
        self.piece = std::mem::replace(&mut self.next, fresh);
        if self.grid.collides(&self.piece) {
            self.status = Status::GameOver;
            log::info!(
                "game over: score {}, lines {}",
                self.score,
                self.lines_cleared
            );
        }
    }
}

fn random_shape(rng: &mut StdRng) -> ShapeId {
    ShapeId::from_index(rng.gen_range(0..ShapeId::ALL.len()))
}
