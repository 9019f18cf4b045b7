//! Basic example of using the puzzle engine.

use gridoku_core::{BoardKind, Generator, Point, Puzzle};

fn main() {
    // Generate a classic puzzle
    println!("Generating a classic 9x9 puzzle...\n");
    let mut generator = Generator::new();
    let mut puzzle = generator
        .generate(BoardKind::Classic)
        .expect("classic wiring is static");

    println!("Generated puzzle:");
    println!("{}", puzzle);

    // Show some stats
    println!("Given cells: {}", puzzle.given_count());
    println!("Empty cells: {}", puzzle.empty_count());
    println!("Unique solution: {}\n", puzzle.has_unique_solution());

    // Peek at the candidates of the first empty cell
    if let Some((point, _)) = puzzle.cells().find(|(_, c)| c.is_empty()) {
        let candidates: Vec<u8> = puzzle.mark_up(point).unwrap().iter().collect();
        println!("Candidates at {}: {:?}", point, candidates);
        let refined: Vec<u8> = puzzle.hints(point, 3).unwrap().iter().collect();
        println!("After hint deduction: {:?}\n", refined);
    }

    // Solve it
    println!("Solving ({} search nodes so far)...\n", puzzle.tries());
    if puzzle.solve() {
        println!("Solution:");
        println!("{}", puzzle);
    } else {
        println!("No solution found (this shouldn't happen for a generated puzzle!)");
    }

    // A small Futoshiki round
    println!("--- Futoshiki 5x5 ---\n");
    let futoshiki = generator
        .generate(BoardKind::Futoshiki { size: 5 })
        .expect("futoshiki wiring is static");
    println!("{}", futoshiki);

    // Import a puzzle from the text format
    println!("--- Importing from text ---\n");
    let mut imported = Puzzle::new_classic().expect("classic wiring is static");
    imported
        .import(&puzzle.export())
        .expect("just exported this grid");
    println!(
        "Imported {} givens, value at (0,0) is {}",
        imported.given_count(),
        imported.value(Point::new(0, 0)).unwrap()
    );
}
