//! Basic example of using the puzzle engine.

use fifteen_core::{Generator, Solution, Solver};

fn main() {
    // Generate a scrambled 4x4 board
    println!("Generating a scrambled 4x4 board...\n");
    let mut generator = Generator::new();
    let board = generator.generate(4);
    println!("{}", board);

    let solver = Solver::new();
    println!("Solvable: {}", solver.is_solvable(&board));

    // Solve it and replay the moves
    match solver.solve(&board) {
        Ok(Solution::Moves(moves)) => {
            println!("Solved in {} moves", moves.len());

            let mut replay = board.clone();
            for &m in &moves {
                replay.apply(m);
            }
            println!("\nAfter replay:");
            println!("{}", replay);
        }
        Ok(Solution::AlreadySolved) => println!("Board was already solved"),
        Ok(Solution::Unsolvable) => println!("Board cannot be solved"),
        Err(e) => eprintln!("Solver defect: {}", e),
    }

    // Ask for a single hint
    if let Some(dir) = solver.hint(&board) {
        println!("Hint: slide a tile {}", dir);
    }
}
