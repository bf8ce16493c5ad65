//! Row and column strip placement.
//!
//! All but the last two tiles of a strip are pushed straight to their cells
//! and frozen. The last two need the hook maneuver: park the corner tile
//! away from the action, stage the first tile at the strip's terminal
//! corner, bring the parked tile in next to it, and drop both with a fixed
//! two-slide rotation. The cell next to the corner (the notch) stays frozen
//! from the moment it is clear so no routing decision can bounce the corner
//! tile into that dead end. Each attempt runs against a snapshot; on a bad
//! outcome the board is rolled back and the parking cell changes.

use crate::board::Direction;

use super::pusher::{push_tile, AxisOrder};
use super::routing::route_blank;
use super::session::SolveSession;
use super::{SolveError, Strip};

const HOOK_ATTEMPTS: usize = 4;

/// Everything one hook maneuver needs to know. `notch` doubles as the first
/// tile's home cell and `corner` as the second's.
struct HookPlan {
    strip: Strip,
    /// tile that ends up next to the corner
    a: u16,
    /// tile that ends up in the corner
    b: u16,
    corner: usize,
    notch: usize,
    stage: usize,
    parks: [usize; HOOK_ATTEMPTS],
    order: AxisOrder,
    rotation: [Direction; 2],
}

/// Place row `ring` of the current ring: tiles at columns `ring..N`.
pub(crate) fn place_row(s: &mut SolveSession, ring: usize) -> Result<(), SolveError> {
    let n = s.n();
    for col in ring..n - 2 {
        let tile = (ring * n + col + 1) as u16;
        let target = s.idx(ring, col);
        push_tile(s, tile, target, AxisOrder::ColumnFirst)?;
        s.freeze(target);
    }
    let plan = HookPlan {
        strip: Strip::Row(ring),
        a: (ring * n + n - 1) as u16,
        b: (ring * n + n) as u16,
        corner: s.idx(ring, n - 1),
        notch: s.idx(ring, n - 2),
        stage: s.idx(ring + 1, n - 1),
        parks: [
            s.idx(n - 1, ring),
            s.idx(n - 1, ring + 1),
            s.idx(n - 2, ring),
            s.idx(n - 2, ring + 1),
        ],
        order: AxisOrder::ColumnFirst,
        rotation: [Direction::Left, Direction::Up],
    };
    place_last_two(s, plan)
}

/// Place column `ring` of the current ring: tiles at rows `ring+1..N`.
pub(crate) fn place_col(s: &mut SolveSession, ring: usize) -> Result<(), SolveError> {
    let n = s.n();
    for row in ring + 1..n - 2 {
        let tile = (row * n + ring + 1) as u16;
        let target = s.idx(row, ring);
        push_tile(s, tile, target, AxisOrder::RowFirst)?;
        s.freeze(target);
    }
    let plan = HookPlan {
        strip: Strip::Col(ring),
        a: ((n - 2) * n + ring + 1) as u16,
        b: ((n - 1) * n + ring + 1) as u16,
        corner: s.idx(n - 1, ring),
        notch: s.idx(n - 2, ring),
        stage: s.idx(n - 1, ring + 1),
        parks: [
            s.idx(ring + 1, n - 1),
            s.idx(ring + 2, n - 1),
            s.idx(ring + 1, n - 2),
            s.idx(ring + 2, n - 2),
        ],
        order: AxisOrder::RowFirst,
        rotation: [Direction::Up, Direction::Left],
    };
    place_last_two(s, plan)
}

fn place_last_two(s: &mut SolveSession, plan: HookPlan) -> Result<(), SolveError> {
    if s.find(plan.a) == plan.notch && s.find(plan.b) == plan.corner {
        s.freeze(plan.notch);
        s.freeze(plan.corner);
        return Ok(());
    }

    for (attempt, &park) in plan.parks.iter().enumerate() {
        let snap = s.snapshot();
        let outcome = hook_attempt(s, &plan, park);
        match outcome {
            Ok(()) if s.value_at(plan.notch) == plan.a && s.value_at(plan.corner) == plan.b => {
                s.freeze(plan.notch);
                s.freeze(plan.corner);
                return Ok(());
            }
            Ok(()) => {
                log::debug!(
                    "{} hook attempt {} misplaced tiles {} and {}, rolling back",
                    plan.strip,
                    attempt + 1,
                    plan.a,
                    plan.b
                );
                s.restore(&snap);
            }
            Err(e) => {
                log::debug!("{} hook attempt {} failed: {}", plan.strip, attempt + 1, e);
                s.restore(&snap);
            }
        }
    }
    Err(SolveError::HookExhausted {
        strip: plan.strip,
        tiles: (plan.a, plan.b),
    })
}

/// One four-phase maneuver: park, stage the corner tile, stage its partner
/// behind the notch guard, rotate both home.
fn hook_attempt(s: &mut SolveSession, plan: &HookPlan, park: usize) -> Result<(), SolveError> {
    push_tile(s, plan.b, park, plan.order)?;

    // The notch guard goes up as soon as the cell is clear of the tile we
    // are about to stage; a frozen notch can never be re-entered, so the
    // corner approach stays a corridor instead of a trap.
    if s.find(plan.a) == plan.notch {
        push_tile(s, plan.a, plan.corner, plan.order)?;
        s.freeze(plan.notch);
    } else {
        s.freeze(plan.notch);
        push_tile(s, plan.a, plan.corner, plan.order)?;
    }
    s.freeze(plan.corner);

    push_tile(s, plan.b, plan.stage, plan.order)?;
    s.freeze(plan.stage);

    s.unfreeze(plan.notch);
    route_blank(s, plan.notch)?;
    s.unfreeze(plan.corner);
    s.unfreeze(plan.stage);
    s.slide(plan.rotation[0]);
    s.slide(plan.rotation[1]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn session(rows: Vec<Vec<u16>>) -> SolveSession {
        SolveSession::new(&Board::from_rows(rows).unwrap())
    }

    fn assert_row_placed(s: &SolveSession, ring: usize) {
        let n = s.n();
        for col in ring..n {
            let want = (ring * n + col + 1) as u16;
            assert_eq!(s.value_at(s.idx(ring, col)), want, "row {ring} col {col}");
            assert!(s.is_frozen(s.idx(ring, col)));
        }
    }

    #[test]
    fn places_the_top_row_of_a_scrambled_board() {
        let mut s = session(vec![vec![8, 6, 7], vec![2, 5, 4], vec![3, 0, 1]]);
        place_row(&mut s, 0).unwrap();
        assert_row_placed(&s, 0);
    }

    #[test]
    fn hook_short_circuits_when_both_tiles_sit_home() {
        let mut s = session(vec![vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]);
        place_row(&mut s, 0).unwrap();
        assert_row_placed(&s, 0);
        assert_eq!(s.move_count(), 0);
    }

    #[test]
    fn places_a_column_after_its_row() {
        let mut s = session(vec![vec![8, 6, 7], vec![2, 5, 4], vec![3, 0, 1]]);
        place_row(&mut s, 0).unwrap();
        place_col(&mut s, 0).unwrap();
        assert_row_placed(&s, 0);
        let n = s.n();
        for row in 1..n {
            let want = (row * n + 1) as u16;
            assert_eq!(s.value_at(s.idx(row, 0)), want, "col 0 row {row}");
            assert!(s.is_frozen(s.idx(row, 0)));
        }
    }

    #[test]
    fn swapped_last_pair_is_still_placed() {
        // Tiles 3 and 4 of the top row swapped with each other is the
        // awkward start for the hook; the parked tile must come back around.
        let mut s = session(vec![
            vec![1, 2, 4, 3],
            vec![5, 6, 7, 8],
            vec![9, 10, 11, 12],
            vec![13, 14, 15, 0],
        ]);
        // The board above is only used for geometry; solvability is not
        // required for strip placement itself.
        place_row(&mut s, 0).unwrap();
        assert_row_placed(&s, 0);
    }
}
