//! Sliding puzzle engine.
//!
//! Board model, solvable-board generator, and a constructive solver that
//! turns any solvable N×N configuration into an explicit move sequence.
//! Front-ends (see `fifteen-tui`) replay those moves at their own pace.

pub mod board;
pub mod generator;
pub mod solver;

pub use board::{Board, BoardError, Direction, Position};
pub use generator::Generator;
pub use solver::{Solution, SolveError, Solver, Strip};
