//! Final 2×2 block resolution.
//!
//! With everything outside the block frozen, the three remaining tiles form
//! a cycle. Bring the blank to the bottom-right cell, then rotate clockwise
//! a quarter turn at a time; a solvable board converges within two turns.

use crate::board::Direction;

use super::routing::route_blank;
use super::session::SolveSession;
use super::SolveError;

const ROTATION: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

pub(crate) fn solve_final_block(s: &mut SolveSession, ring: usize) -> Result<(), SolveError> {
    let n = s.n();
    let tl = s.idx(ring, ring);
    let done = |s: &SolveSession| {
        s.value_at(tl) == (tl + 1) as u16
            && s.value_at(tl + 1) == (tl + 2) as u16
            && s.value_at(tl + n) == (tl + n + 1) as u16
    };

    let bottom_right = s.idx(ring + 1, ring + 1);
    route_blank(s, bottom_right)?;
    if done(s) {
        return Ok(());
    }
    for _ in 0..2 {
        for dir in ROTATION {
            s.slide(dir);
        }
        if done(s) {
            return Ok(());
        }
    }
    Err(SolveError::EndgameStuck {
        block: s.position(tl),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn rotates_a_two_by_two_home() {
        let board = Board::from_rows(vec![vec![2, 0], vec![1, 3]]).unwrap();
        let mut s = SolveSession::new(&board);
        solve_final_block(&mut s, 0).unwrap();
        assert!(s.is_solved());
        // Blank routed to the corner (1 slide), then two quarter turns.
        assert_eq!(s.move_count(), 9);
    }

    #[test]
    fn solved_block_needs_no_rotation() {
        let board = Board::solved(2);
        let mut s = SolveSession::new(&board);
        solve_final_block(&mut s, 0).unwrap();
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn inner_block_of_a_larger_board() {
        // Outer ring already placed and frozen; the inner 2x2 holds a cycle.
        let board = Board::from_rows(vec![
            vec![1, 2, 3],
            vec![4, 8, 5],
            vec![7, 0, 6],
        ]).unwrap();
        let mut s = SolveSession::new(&board);
        for col in 0..3 {
            s.freeze(s.idx(0, col));
        }
        for row in 1..3 {
            s.freeze(s.idx(row, 0));
        }
        solve_final_block(&mut s, 1).unwrap();
        assert!(s.is_solved());
    }
}
