use fifteen_core::{Board, Direction, Generator};
use std::time::{Duration, Instant};

/// One game session: the board plus move and time accounting.
///
/// Elapsed time is banked across pauses so the clock only runs while the
/// player can actually slide tiles.
pub struct Game {
    board: Board,
    moves: usize,
    start: Instant,
    banked: Duration,
    paused: bool,
}

impl Game {
    /// Start a fresh scrambled game.
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        let mut generator = match seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };
        Self::from_board(generator.generate(size))
    }

    /// Wrap an existing board in a session (used by tests and replays).
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            moves: 0,
            start: Instant::now(),
            banked: Duration::ZERO,
            paused: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Slide a tile. Only legal slides count as moves; nothing happens while
    /// the game is paused or already won.
    pub fn slide(&mut self, dir: Direction) -> bool {
        if self.paused || self.is_won() {
            return false;
        }
        if self.board.apply(dir) {
            self.moves += 1;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> Duration {
        if self.paused {
            self.banked
        } else {
            self.banked + self.start.elapsed()
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.start = Instant::now();
        } else {
            self.banked += self.start.elapsed();
        }
        self.paused = !self.paused;
    }

    pub fn is_won(&self) -> bool {
        self.board.is_solved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_legal_moves() {
        // Blank at the bottom-right corner: Up and Left are illegal.
        let board = Board::solved(3);
        let mut game = Game::from_board(board);
        // A solved board accepts no further moves at all.
        assert!(!game.slide(Direction::Right));

        let board =
            Board::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 0, 8]]).unwrap();
        let mut game = Game::from_board(board);
        // Blank on the bottom row: no tile below it to slide up.
        assert!(!game.slide(Direction::Up));
        assert_eq!(game.moves(), 0);
        assert!(game.slide(Direction::Left));
        assert_eq!(game.moves(), 1);
        assert!(game.is_won());
    }

    #[test]
    fn pause_blocks_sliding() {
        let board =
            Board::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 0, 8]]).unwrap();
        let mut game = Game::from_board(board);
        game.toggle_pause();
        assert!(game.is_paused());
        assert!(!game.slide(Direction::Left));
        assert_eq!(game.moves(), 0);
        game.toggle_pause();
        assert!(game.slide(Direction::Left));
    }
}
