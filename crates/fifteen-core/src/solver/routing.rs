//! Blank routing under freeze constraints.
//!
//! Planning is purely geometric: tiles never block the blank (each step
//! swaps through them), only frozen cells do. Strategies are tried in a
//! fixed order and the first feasible path wins, so routing is deterministic
//! without any cost comparison.

use super::session::SolveSession;
use super::SolveError;

/// Walk the blank to `target` without entering frozen cells.
///
/// Strategy ladder: two-segment L-paths (both leg orders), three-segment
/// detours through a neighbouring row or column, then one- and two-step
/// escapes that retry the direct strategies from a nudged position.
/// Exhausting the ladder is a hard error: the freeze bookkeeping upstream
/// left no corridor, which correct sequencing never does.
pub(crate) fn route_blank(s: &mut SolveSession, target: usize) -> Result<(), SolveError> {
    let from = s.blank();
    if from == target {
        return Ok(());
    }
    let path = plan(s, from, target).ok_or_else(|| SolveError::RoutingExhausted {
        blank: s.position(from),
        target: s.position(target),
    })?;
    for cell in path {
        s.step_blank_to(cell);
    }
    Ok(())
}

fn plan(s: &SolveSession, from: usize, to: usize) -> Option<Vec<usize>> {
    direct(s, from, to)
        .or_else(|| escape(s, from, to, false))
        .or_else(|| escape(s, from, to, true))
}

fn direct(s: &SolveSession, from: usize, to: usize) -> Option<Vec<usize>> {
    l_path(s, from, to, true)
        .or_else(|| l_path(s, from, to, false))
        .or_else(|| detour(s, from, to))
}

/// Horizontal-then-vertical (or the reverse) corridor walk.
fn l_path(s: &SolveSession, from: usize, to: usize, horizontal_first: bool) -> Option<Vec<usize>> {
    let (fr, fc) = (s.row_of(from), s.col_of(from));
    let (tr, tc) = (s.row_of(to), s.col_of(to));
    let mut path = Vec::new();
    if horizontal_first {
        seg_h(s, &mut path, fr, fc, tc);
        seg_v(s, &mut path, tc, fr, tr);
    } else {
        seg_v(s, &mut path, fc, fr, tr);
        seg_h(s, &mut path, tr, fc, tc);
    }
    open(s, path)
}

/// Route around an obstruction via an intermediate row or column, scanning
/// outward from the blank's own line by increasing offset.
fn detour(s: &SolveSession, from: usize, to: usize) -> Option<Vec<usize>> {
    let n = s.n();
    let (fr, fc) = (s.row_of(from), s.col_of(from));
    let (tr, tc) = (s.row_of(to), s.col_of(to));

    for offset in 1..n {
        let rows = [fr.checked_sub(offset), Some(fr + offset).filter(|&r| r < n)];
        for mid in rows.into_iter().flatten() {
            let mut path = Vec::new();
            seg_v(s, &mut path, fc, fr, mid);
            seg_h(s, &mut path, mid, fc, tc);
            seg_v(s, &mut path, tc, mid, tr);
            if let Some(path) = open(s, path) {
                return Some(path);
            }
        }
        let cols = [fc.checked_sub(offset), Some(fc + offset).filter(|&c| c < n)];
        for mid in cols.into_iter().flatten() {
            let mut path = Vec::new();
            seg_h(s, &mut path, fr, fc, mid);
            seg_v(s, &mut path, mid, fr, tr);
            seg_h(s, &mut path, tr, mid, tc);
            if let Some(path) = open(s, path) {
                return Some(path);
            }
        }
    }
    None
}

/// Nudge the blank one (or two) speculative steps aside and retry the direct
/// strategies from there.
fn escape(s: &SolveSession, from: usize, to: usize, two_steps: bool) -> Option<Vec<usize>> {
    for nb in open_neighbors(s, from) {
        if !two_steps {
            if let Some(rest) = direct(s, nb, to) {
                let mut path = vec![nb];
                path.extend(rest);
                return Some(path);
            }
        } else {
            for nb2 in open_neighbors(s, nb) {
                if nb2 == from {
                    continue;
                }
                if let Some(rest) = direct(s, nb2, to) {
                    let mut path = vec![nb, nb2];
                    path.extend(rest);
                    return Some(path);
                }
            }
        }
    }
    None
}

fn open(s: &SolveSession, path: Vec<usize>) -> Option<Vec<usize>> {
    path.iter().all(|&c| !s.is_frozen(c)).then_some(path)
}

fn open_neighbors(s: &SolveSession, cell: usize) -> impl Iterator<Item = usize> + '_ {
    let n = s.n();
    let row = s.row_of(cell);
    let col = s.col_of(cell);
    [
        (row > 0).then(|| cell - n),
        (row + 1 < n).then(|| cell + n),
        (col > 0).then(|| cell - 1),
        (col + 1 < n).then(|| cell + 1),
    ]
    .into_iter()
    .flatten()
    .filter(move |&c| !s.is_frozen(c))
}

/// Push the cells of one horizontal leg (exclusive of the start cell).
fn seg_h(s: &SolveSession, path: &mut Vec<usize>, row: usize, from_col: usize, to_col: usize) {
    if from_col < to_col {
        for col in from_col + 1..=to_col {
            path.push(s.idx(row, col));
        }
    } else {
        for col in (to_col..from_col).rev() {
            path.push(s.idx(row, col));
        }
    }
}

/// Push the cells of one vertical leg (exclusive of the start cell).
fn seg_v(s: &SolveSession, path: &mut Vec<usize>, col: usize, from_row: usize, to_row: usize) {
    if from_row < to_row {
        for row in from_row + 1..=to_row {
            path.push(s.idx(row, col));
        }
    } else {
        for row in (to_row..from_row).rev() {
            path.push(s.idx(row, col));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn session(rows: Vec<Vec<u16>>) -> SolveSession {
        SolveSession::new(&Board::from_rows(rows).unwrap())
    }

    #[test]
    fn straight_line_route() {
        let mut s = session(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        let target = s.idx(0, 2);
        route_blank(&mut s, target).unwrap();
        assert_eq!(s.blank(), s.idx(0, 2));
        assert_eq!(s.move_count(), 2);
    }

    #[test]
    fn l_route_prefers_horizontal_leg_first() {
        let mut s = session(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        let target = s.idx(2, 2);
        route_blank(&mut s, target).unwrap();
        assert_eq!(s.blank(), s.idx(2, 2));
        // Horizontal leg first: 1 and 2 slide left, then 5 and 8 slide up.
        use crate::board::Direction::*;
        let moves = s.into_moves();
        assert_eq!(moves, vec![Left, Left, Up, Up]);
    }

    #[test]
    fn detours_around_a_frozen_wall() {
        let mut s = session(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        // Walling off the middle of the blank's row forces a detour through
        // the row below.
        s.freeze(s.idx(0, 1));
        let target = s.idx(0, 2);
        route_blank(&mut s, target).unwrap();
        assert_eq!(s.blank(), s.idx(0, 2));
        assert!(!s.is_frozen(s.idx(0, 2)));
    }

    #[test]
    fn escape_backs_out_of_a_pocket() {
        let mut s = session(vec![
            vec![1, 2, 0, 3],
            vec![4, 5, 6, 7],
            vec![8, 9, 10, 11],
            vec![12, 13, 14, 15],
        ]);
        // Frozen cells to the left and below leave the blank no direct or
        // detoured corridor to (1,1); it must first step aside to (0,3).
        s.freeze(s.idx(0, 0));
        s.freeze(s.idx(0, 1));
        s.freeze(s.idx(1, 2));
        let target = s.idx(1, 1);
        route_blank(&mut s, target).unwrap();
        assert_eq!(s.blank(), s.idx(1, 1));
        // The guarded cells were never crossed.
        assert_eq!(s.value_at(s.idx(0, 0)), 1);
        assert_eq!(s.value_at(s.idx(0, 1)), 2);
        assert_eq!(s.value_at(s.idx(1, 2)), 6);
    }

    #[test]
    fn sealed_blank_reports_routing_error() {
        let mut s = session(vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        s.freeze(s.idx(0, 1));
        s.freeze(s.idx(1, 0));
        let target = s.idx(2, 2);
        let err = route_blank(&mut s, target).unwrap_err();
        assert!(matches!(err, SolveError::RoutingExhausted { .. }));
        // Nothing moved.
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn frozen_cells_are_never_traversed() {
        let mut s = session(vec![vec![3, 1, 2], vec![0, 4, 5], vec![6, 7, 8]]);
        let wall = s.idx(1, 1);
        s.freeze(wall);
        let target = s.idx(1, 2);
        route_blank(&mut s, target).unwrap();
        // Tile 4 stayed put: the route went around the frozen cell.
        assert_eq!(s.value_at(wall), 4);
        assert_eq!(s.blank(), s.idx(1, 2));
    }
}
