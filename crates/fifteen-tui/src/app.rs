use crate::game::Game;
use crate::highscore::HighScores;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use fifteen_core::{Direction, Solution, Solver};
use std::collections::VecDeque;
use std::time::Duration;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Win screen with the score table
    Won,
}

/// The main application state
pub struct App {
    /// Current game
    pub game: Game,
    /// Color theme
    pub theme: Theme,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Tile the last hint wants slid, cleared by the next key
    pub hint: Option<Direction>,
    /// Message to display
    pub message: Option<String>,
    /// Message timer (ticks)
    message_timer: u32,
    /// Queued auto-solve slides, applied one per tick
    autoplay: VecDeque<Direction>,
    /// High score table
    pub scores: HighScores,
    /// Rank of the last recorded win, if it made the table
    pub last_rank: Option<usize>,
    solver: Solver,
    size: usize,
}

impl App {
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        Self {
            game: Game::new(size, seed),
            theme: Theme::default(),
            screen_state: ScreenState::Playing,
            hint: None,
            message: None,
            message_timer: 0,
            autoplay: VecDeque::new(),
            scores: HighScores::load_default(),
            last_rank: None,
            solver: Solver::new(),
            size,
        }
    }

    /// Faster ticks while the auto-solver is replaying its moves.
    pub fn tick_rate(&self) -> Duration {
        if self.autoplay.is_empty() {
            Duration::from_millis(250)
        } else {
            Duration::from_millis(120)
        }
    }

    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if !self.game.is_paused() {
            if let Some(dir) = self.autoplay.pop_front() {
                if !self.game.slide(dir) {
                    // The player intervened and the recorded line no longer
                    // applies; drop the rest.
                    self.autoplay.clear();
                }
            }
        }

        if self.screen_state == ScreenState::Playing && self.game.is_won() {
            self.finish_game();
        }
    }

    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 12;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Won => self.handle_key_won(key),
            ScreenState::Playing => self.handle_key_playing(key),
        }
    }

    fn handle_key_playing(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up => self.player_slide(Direction::Up),
            KeyCode::Down => self.player_slide(Direction::Down),
            KeyCode::Left => self.player_slide(Direction::Left),
            KeyCode::Right => self.player_slide(Direction::Right),
            KeyCode::Char('h') => self.request_hint(),
            KeyCode::Char('a') => self.request_auto_solve(),
            KeyCode::Char('n') => self.new_game(),
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.game.toggle_pause();
                self.autoplay.clear();
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_key_won(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('n') | KeyCode::Enter => self.new_game(),
            _ => {}
        }
        AppAction::Continue
    }

    fn player_slide(&mut self, dir: Direction) {
        // Manual input takes over from any pending auto-solve.
        self.autoplay.clear();
        self.hint = None;
        self.game.slide(dir);
    }

    fn request_hint(&mut self) {
        match self.solver.hint(self.game.board()) {
            Some(dir) => self.hint = Some(dir),
            None => self.show_message("No hint available"),
        }
    }

    fn request_auto_solve(&mut self) {
        self.hint = None;
        match self.solver.solve(self.game.board()) {
            Ok(Solution::Moves(moves)) => {
                self.show_message(&format!("Auto-solving: {} moves", moves.len()));
                self.autoplay = moves.into();
            }
            Ok(Solution::AlreadySolved) => self.show_message("Already solved"),
            Ok(Solution::Unsolvable) => self.show_message("This board cannot be solved"),
            Err(e) => self.show_message(&format!("Solver failed: {}", e)),
        }
    }

    fn new_game(&mut self) {
        self.game = Game::new(self.size, None);
        self.screen_state = ScreenState::Playing;
        self.hint = None;
        self.message = None;
        self.message_timer = 0;
        self.autoplay.clear();
        self.last_rank = None;
    }

    fn finish_game(&mut self) {
        self.autoplay.clear();
        self.hint = None;
        self.last_rank = self.scores.record(
            self.game.size(),
            self.game.moves(),
            self.game.elapsed().as_secs(),
        );
        self.screen_state = ScreenState::Won;
    }
}
