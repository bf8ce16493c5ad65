//! Constructive sliding-puzzle solver.
//!
//! Solves row-by-row and column-by-column over shrinking rings and finishes
//! with a 2×2 rotation. There is no search and no heuristic: every call
//! either places its tiles deterministically or reports an internal error.
//! Move counts are polynomial in N, not minimal.

mod endgame;
mod pusher;
mod routing;
mod session;
mod strip;

use std::fmt;

use thiserror::Error;

use crate::board::{Board, Direction, Position};
use session::SolveSession;

/// Outcome of a solve. Callers branch on data: only internal defects
/// surface as [`SolveError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// The board was already in the goal configuration.
    AlreadySolved,
    /// The configuration cannot reach the goal; no moves exist.
    Unsolvable,
    /// Slides that transform the input into the goal, in order.
    Moves(Vec<Direction>),
}

impl Solution {
    /// The move list; empty for the two degenerate outcomes.
    pub fn moves(&self) -> &[Direction] {
        match self {
            Solution::Moves(moves) => moves,
            _ => &[],
        }
    }

    pub fn into_moves(self) -> Vec<Direction> {
        match self {
            Solution::Moves(moves) => moves,
            _ => Vec::new(),
        }
    }
}

/// One strip of a ring, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strip {
    Row(usize),
    Col(usize),
}

impl fmt::Display for Strip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strip::Row(i) => write!(f, "row {}", i),
            Strip::Col(i) => write!(f, "column {}", i),
        }
    }
}

/// Internal solver defects. None of these describe an input condition:
/// unsolvable boards are a [`Solution`] variant, and any of these errors
/// escaping `solve` means the placement logic itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("no open route for the blank from {blank} to {target}")]
    RoutingExhausted { blank: Position, target: Position },
    #[error("tile {tile} stalled on its way to {target}")]
    PushStalled { tile: u16, target: Position },
    #[error("could not place the last two tiles {tiles:?} of {strip}")]
    HookExhausted { strip: Strip, tiles: (u16, u16) },
    #[error("final 2x2 block at {block} did not converge")]
    EndgameStuck { block: Position },
}

/// Stateless solver; all state is per call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Parity check: can this configuration reach the goal at all?
    ///
    /// Inversions of the tile sequence with the blank removed; for even N
    /// the blank's row distance from the bottom joins the sum.
    pub fn is_solvable(&self, board: &Board) -> bool {
        let inversions = count_inversions(board.tiles());
        if board.size() % 2 == 1 {
            inversions % 2 == 0
        } else {
            let blank_from_bottom = board.size() - 1 - board.blank_pos().row;
            (inversions + blank_from_bottom) % 2 == 0
        }
    }

    /// Produce a move sequence that solves `board`.
    ///
    /// Solved and unsolvable inputs are ordinary outcomes, not errors. A
    /// returned [`SolveError`] is an internal defect and propagates as-is.
    pub fn solve(&self, board: &Board) -> Result<Solution, SolveError> {
        if board.is_solved() {
            return Ok(Solution::AlreadySolved);
        }
        if !self.is_solvable(board) {
            return Ok(Solution::Unsolvable);
        }

        let n = board.size();
        let mut s = SolveSession::new(board);
        let mut ring = 0;
        while n - ring > 2 {
            log::trace!("placing ring {}", ring);
            strip::place_row(&mut s, ring)?;
            strip::place_col(&mut s, ring)?;
            ring += 1;
        }
        if n - ring == 2 {
            endgame::solve_final_block(&mut s, ring)?;
        }
        debug_assert!(s.is_solved());
        Ok(Solution::Moves(s.into_moves()))
    }

    /// The first move of a full solve, or `None` when the board is solved,
    /// unsolvable, or the solver trips over itself. Swallowing the error
    /// here is deliberate: a hint should degrade, not crash the front-end.
    pub fn hint(&self, board: &Board) -> Option<Direction> {
        match self.solve(board) {
            Ok(solution) => solution.moves().first().copied(),
            Err(e) => {
                log::warn!("hint unavailable: {}", e);
                None
            }
        }
    }
}

/// Running inversion count over a sorted auxiliary vector: O(N² log N)
/// comparisons plus insertion shifts, fine for any playable N.
fn count_inversions(tiles: &[u16]) -> usize {
    let mut seen: Vec<u16> = Vec::with_capacity(tiles.len());
    let mut inversions = 0;
    for &v in tiles.iter().filter(|&&v| v != 0) {
        let at = seen.partition_point(|&x| x < v);
        inversions += seen.len() - at;
        seen.insert(at, v);
    }
    inversions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::generator::Generator;
    use std::collections::HashSet;

    fn solve_and_replay(board: &Board) -> Vec<Direction> {
        let moves = match Solver::new().solve(board).unwrap() {
            Solution::Moves(m) => m,
            other => panic!("expected moves, got {:?}", other),
        };
        assert!(!moves.is_empty());
        let mut replay = board.clone();
        for (i, &m) in moves.iter().enumerate() {
            assert!(replay.apply(m), "move {} ({}) was illegal", i, m);
        }
        assert!(replay.is_solved(), "replay did not reach the goal");
        moves
    }

    /// All states reachable from the solved 3×3 board by legal moves.
    fn bfs_reachable_3x3() -> HashSet<[u16; 9]> {
        let start = Board::solved(3);
        let mut seen: HashSet<[u16; 9]> = HashSet::with_capacity(200_000);
        let key = |b: &Board| -> [u16; 9] { b.tiles().try_into().unwrap() };
        seen.insert(key(&start));
        let mut frontier = vec![start];
        while let Some(board) = frontier.pop() {
            for dir in board.legal_moves() {
                let mut next = board.clone();
                next.apply(dir);
                if seen.insert(key(&next)) {
                    frontier.push(next);
                }
            }
        }
        seen
    }

    fn for_each_3x3_permutation(mut visit: impl FnMut(&[u16; 9])) {
        // Heap's algorithm over the 9 tile values.
        let mut tiles: [u16; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        let mut stack = [0usize; 9];
        visit(&tiles);
        let mut i = 1;
        while i < 9 {
            if stack[i] < i {
                if i % 2 == 0 {
                    tiles.swap(0, i);
                } else {
                    tiles.swap(stack[i], i);
                }
                visit(&tiles);
                stack[i] += 1;
                i = 1;
            } else {
                stack[i] = 0;
                i += 1;
            }
        }
    }

    #[test]
    fn parity_agrees_with_reachability_on_every_3x3() {
        let reachable = bfs_reachable_3x3();
        assert_eq!(reachable.len(), 181_440);

        let solver = Solver::new();
        let mut solvable = 0usize;
        let mut total = 0usize;
        for_each_3x3_permutation(|tiles| {
            let board = Board::from_flat(3, tiles.to_vec()).unwrap();
            let claims = solver.is_solvable(&board);
            assert_eq!(
                claims,
                reachable.contains(tiles),
                "parity disagrees with reachability for {:?}",
                tiles
            );
            total += 1;
            if claims {
                solvable += 1;
            }
        });
        assert_eq!(total, 362_880);
        assert_eq!(solvable, 181_440);
    }

    #[test]
    fn solves_every_solvable_3x3() {
        let solver = Solver::new();
        let mut solved = 0usize;
        for_each_3x3_permutation(|tiles| {
            let board = Board::from_flat(3, tiles.to_vec()).unwrap();
            match solver.solve(&board).unwrap() {
                Solution::AlreadySolved => {
                    assert!(board.is_solved());
                    solved += 1;
                }
                Solution::Unsolvable => assert!(!solver.is_solvable(&board)),
                Solution::Moves(moves) => {
                    let mut replay = board.clone();
                    for &m in &moves {
                        assert!(replay.apply(m), "illegal move replaying {:?}", tiles);
                    }
                    assert!(replay.is_solved(), "wrong final state for {:?}", tiles);
                    assert!(moves.len() < 50 * 27, "runaway solution for {:?}", tiles);
                    solved += 1;
                }
            }
        });
        assert_eq!(solved, 181_440);
    }

    #[test]
    fn one_slide_from_goal() {
        let board =
            Board::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 0, 8]]).unwrap();
        let moves = solve_and_replay(&board);
        assert_eq!(moves, vec![Direction::Left]);
    }

    #[test]
    fn unsolvable_board_returns_empty_without_error() {
        let board =
            Board::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6], vec![8, 7, 0]]).unwrap();
        let solver = Solver::new();
        assert!(!solver.is_solvable(&board));
        assert_eq!(solver.solve(&board).unwrap(), Solution::Unsolvable);
        assert!(solver.solve(&board).unwrap().moves().is_empty());
    }

    #[test]
    fn goal_boards_yield_no_moves_and_no_hint() {
        let solver = Solver::new();
        for size in 2..=6 {
            let board = Board::solved(size);
            assert_eq!(solver.solve(&board).unwrap(), Solution::AlreadySolved);
            assert_eq!(solver.hint(&board), None);
        }
    }

    #[test]
    fn rotated_endgame_block_resolves_within_eight_moves() {
        // A quarter-turn of the final 2x2 block is the smallest solvable
        // disturbance that exercises the endgame path on a 4x4.
        let mut board = Board::solved(4);
        for dir in [Direction::Down, Direction::Right, Direction::Up, Direction::Left] {
            assert!(board.apply(dir));
        }
        assert!(!board.is_solved());
        let moves = solve_and_replay(&board);
        assert!(moves.len() <= 8, "took {} moves", moves.len());
    }

    #[test]
    fn swapped_pair_4x4_is_the_classic_unsolvable_board() {
        // Swapping the two bottom-right tiles of the goal flips parity.
        let board = Board::from_rows(vec![
            vec![1, 2, 3, 4],
            vec![5, 6, 7, 8],
            vec![9, 10, 11, 12],
            vec![13, 15, 14, 0],
        ])
        .unwrap();
        let solver = Solver::new();
        assert!(!solver.is_solvable(&board));
        assert_eq!(solver.solve(&board).unwrap(), Solution::Unsolvable);
        assert_eq!(solver.hint(&board), None);
    }

    #[test]
    fn scrambled_7x7_solves_within_the_polynomial_bound() {
        let mut generator = Generator::with_seed(7);
        for _ in 0..10 {
            let board = generator.generate(7);
            let moves = solve_and_replay(&board);
            assert!(moves.len() < 50 * 7 * 7 * 7, "took {} moves", moves.len());
        }
    }

    #[test]
    fn sampled_sizes_solve_and_stay_bounded() {
        for size in 4..=8 {
            let mut generator = Generator::with_seed(size as u64);
            for _ in 0..25 {
                let board = generator.generate(size);
                let moves = solve_and_replay(&board);
                assert!(
                    moves.len() < 50 * size * size * size,
                    "size {}: took {} moves",
                    size,
                    moves.len()
                );
            }
        }
    }

    #[test]
    fn hint_is_the_first_move_of_the_solution() {
        let solver = Solver::new();
        for size in 3..=6 {
            let mut generator = Generator::with_seed(100 + size as u64);
            for _ in 0..5 {
                let board = generator.generate(size);
                let moves = solver.solve(&board).unwrap().into_moves();
                assert_eq!(solver.hint(&board), moves.first().copied());
            }
        }
    }

    #[test]
    fn inversion_count_examples() {
        assert_eq!(count_inversions(&[1, 2, 3, 4, 5, 6, 7, 8, 0]), 0);
        assert_eq!(count_inversions(&[2, 1, 3, 4, 5, 6, 7, 8, 0]), 1);
        // 8 before everything smaller: seven inversions, plus 7>6.
        assert_eq!(count_inversions(&[8, 1, 2, 3, 4, 5, 7, 6, 0]), 8);
    }
}
