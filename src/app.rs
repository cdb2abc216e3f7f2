//! App: terminal init, main loop, frame pacing.

use crate::GameConfig;
use crate::game::GameState;
use crate::input::{Input, event_to_input};
use crate::render::draw_frame;
use crate::theme::Theme;
use crate::ui::TerminalRenderer;
use anyhow::Result;
use crossterm::event;
use std::time::{Duration, Instant};

/// Target frame time (~60 FPS). Input polling waits at most this long.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Reports the wall time elapsed since it was last asked.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    pub fn elapsed_since_last(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }
}

pub struct App {
    theme: Theme,
    state: GameState,
}

impl App {
    pub fn new(config: &GameConfig, theme: Theme) -> Self {
        match config.seed {
            Some(seed) => log::info!("starting game with seed {}", seed),
            None => log::info!("starting game with random seed"),
        }
        Self {
            theme,
            state: GameState::new(config.seed),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let result = ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))
            .map_err(anyhow::Error::from)
            .and_then(|terminal| {
                let mut renderer = TerminalRenderer::new(terminal, &self.theme);
                self.run_loop(&mut renderer)
            });

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        log::info!(
            "quit with score {}, lines {}",
            self.state.score,
            self.state.lines_cleared
        );
        result
    }

    fn run_loop(&mut self, renderer: &mut TerminalRenderer) -> Result<()> {
        let mut clock = FrameClock::new();
        draw_frame(renderer, &self.state, &self.theme)?;

        while self.state.running {
            let frame_start = Instant::now();
            let inputs = poll_inputs(FRAME_DURATION)?;
            let elapsed = clock.elapsed_since_last();
            self.state.tick(inputs, elapsed);
            draw_frame(renderer, &self.state, &self.theme)?;

            // Events can end the poll early; keep frames from running hot.
            let spent = frame_start.elapsed();
            if spent < FRAME_DURATION && self.state.running {
                std::thread::sleep(FRAME_DURATION - spent);
            }
        }
        Ok(())
    }
}

/// Wait up to `timeout` for input, then drain everything already queued.
fn poll_inputs(timeout: Duration) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();
    if event::poll(timeout)? {
        while event::poll(Duration::ZERO)? {
            if let Some(input) = event_to_input(&event::read()?) {
                inputs.push(input);
            }
        }
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_reports_time_since_last_call() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));
        let first = clock.elapsed_since_last();
        assert!(first >= Duration::from_millis(5));
        let second = clock.elapsed_since_last();
        assert!(second < first);
    }

    #[test]
    fn test_app_seeds_state() {
        let config = GameConfig { seed: Some(9) };
        let a = App::new(&config, Theme::default());
        let b = App::new(&config, Theme::default());
        assert_eq!(a.state.piece.shape, b.state.piece.shape);
        assert_eq!(a.state.next.shape, b.state.next.shape);
        assert!(a.state.running);
    }
}
