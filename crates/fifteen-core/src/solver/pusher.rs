//! Single-tile advancement.
//!
//! A push is a loop of one-cell advances: pick the slide that closes the
//! priority-axis gap, ghost-freeze the tile so the router cannot walk
//! through it, bring the blank to the cell the tile will enter, slide once.

use crate::board::Direction;

use super::routing::route_blank;
use super::session::SolveSession;
use super::SolveError;

/// Which gap a push closes first. Row strips close the column gap first,
/// column strips the row gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AxisOrder {
    ColumnFirst,
    RowFirst,
}

/// Move `tile` to `target`, leaving frozen cells untouched.
///
/// Each outer iteration advances the tile exactly one cell, so the `4·N²`
/// cap is generous; hitting it means the advance rule and the freeze state
/// disagree, which is an internal bug, not an input condition.
pub(crate) fn push_tile(
    s: &mut SolveSession,
    tile: u16,
    target: usize,
    order: AxisOrder,
) -> Result<(), SolveError> {
    let cap = 4 * s.n() * s.n();
    for _ in 0..cap {
        let cur = s.find(tile);
        if cur == target {
            return Ok(());
        }
        let dir = advance_direction(s, cur, target, order).ok_or(SolveError::PushStalled {
            tile,
            target: s.position(target),
        })?;
        let dest = s.slide_dest(cur, dir);

        debug_assert!(!s.is_frozen(cur), "pushed tile sits on a frozen cell");
        s.freeze(cur);
        let routed = route_blank(s, dest);
        s.unfreeze(cur);
        routed?;
        s.slide(dir);
    }
    Err(SolveError::PushStalled {
        tile,
        target: s.position(target),
    })
}

/// The next one-cell slide for a tile at `cur` heading to `target`.
///
/// Prefers the priority axis, falls back to the other axis, and finally
/// sidesteps perpendicular to the blocked line when both destinations are
/// frozen. Sidesteps prefer down/right, away from the placed boundary.
fn advance_direction(
    s: &SolveSession,
    cur: usize,
    target: usize,
    order: AxisOrder,
) -> Option<Direction> {
    let n = s.n();
    let (cr, cc) = (s.row_of(cur), s.col_of(cur));
    let (tr, tc) = (s.row_of(target), s.col_of(target));

    let col_dir = match cc.cmp(&tc) {
        std::cmp::Ordering::Less => Some(Direction::Right),
        std::cmp::Ordering::Greater => Some(Direction::Left),
        std::cmp::Ordering::Equal => None,
    };
    let row_dir = match cr.cmp(&tr) {
        std::cmp::Ordering::Less => Some(Direction::Down),
        std::cmp::Ordering::Greater => Some(Direction::Up),
        std::cmp::Ordering::Equal => None,
    };
    let (first, second) = match order {
        AxisOrder::ColumnFirst => (col_dir, row_dir),
        AxisOrder::RowFirst => (row_dir, col_dir),
    };

    for dir in [first, second].into_iter().flatten() {
        if !s.is_frozen(s.slide_dest(cur, dir)) {
            return Some(dir);
        }
    }

    // Both goal-ward destinations are walled off; sidestep off the line.
    let sideways = if first == col_dir && col_dir.is_some() {
        [Direction::Down, Direction::Up, Direction::Right, Direction::Left]
    } else {
        [Direction::Right, Direction::Left, Direction::Down, Direction::Up]
    };
    for dir in sideways {
        let fits = match dir {
            Direction::Up => cr > 0,
            Direction::Down => cr + 1 < n,
            Direction::Left => cc > 0,
            Direction::Right => cc + 1 < n,
        };
        if fits && !s.is_frozen(s.slide_dest(cur, dir)) {
            return Some(dir);
        }
    }
    None
}
