//! Random puzzle generation.
//!
//! Seeds a complete valid solution (topology-specific), then carves cells
//! back out while the solution stays unique, and finally locks everything
//! that survived as givens.

use crate::board::{BoardKind, SAMURAI_ORIGINS};
use crate::error::WiringError;
use crate::point::Point;
use crate::puzzle::Puzzle;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Tuning knobs for generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Stop carving after this many successful removals. An explicit
    /// performance bound, not a quality target.
    pub max_removals: usize,
    /// Number of inequality edges to derive for a Futoshiki board.
    pub futoshiki_edges: usize,
}

impl GeneratorConfig {
    /// Defaults tuned per board family.
    pub fn for_kind(kind: BoardKind) -> Self {
        match kind {
            BoardKind::Classic => Self {
                max_removals: 52,
                futoshiki_edges: 0,
            },
            BoardKind::Super => Self {
                max_removals: 170,
                futoshiki_edges: 0,
            },
            BoardKind::Samurai => Self {
                max_removals: 250,
                futoshiki_edges: 0,
            },
            BoardKind::Futoshiki { size } => Self {
                max_removals: (size as usize) * (size as usize) - size as usize,
                futoshiki_edges: (size as usize) * 2,
            },
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_kind(BoardKind::Classic)
    }
}

/// Random puzzle generator.
pub struct Generator {
    rng: StdRng,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Generator seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator with a fixed seed, for reproducible puzzles.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generate a puzzle with the default tuning for `kind`.
    pub fn generate(&mut self, kind: BoardKind) -> Result<Puzzle, WiringError> {
        self.generate_with_config(kind, &GeneratorConfig::for_kind(kind))
    }

    /// Generate a puzzle with explicit tuning.
    pub fn generate_with_config(
        &mut self,
        kind: BoardKind,
        config: &GeneratorConfig,
    ) -> Result<Puzzle, WiringError> {
        let mut puzzle = match kind {
            BoardKind::Classic => {
                let mut puzzle = Puzzle::new_classic()?;
                self.seed_classic(&mut puzzle);
                puzzle
            }
            BoardKind::Super => {
                let mut puzzle = Puzzle::new_super()?;
                self.seed_super(&mut puzzle);
                puzzle
            }
            BoardKind::Samurai => {
                let mut puzzle = Puzzle::new_samurai()?;
                self.seed_samurai(&mut puzzle);
                puzzle
            }
            BoardKind::Futoshiki { size } => {
                return self.generate_futoshiki(size, config);
            }
        };
        self.carve(&mut puzzle, config.max_removals);
        puzzle.lock_filled();
        debug!("generated {} puzzle, {} givens", kind, puzzle.given_count());
        Ok(puzzle)
    }

    /// Classic seeding: the three diagonal boxes are constraint-independent,
    /// so each takes an independent random permutation; the rest is a single
    /// brute-force completion.
    fn seed_classic(&mut self, puzzle: &mut Puzzle) {
        loop {
            puzzle.reset();
            let seeded = self.fill_box(puzzle, Point::new(0, 0), 3)
                && self.fill_box(puzzle, Point::new(3, 3), 3)
                && self.fill_box(puzzle, Point::new(6, 6), 3);
            if seeded && puzzle.solve() {
                return;
            }
        }
    }

    /// Super seeding: same scheme over the four diagonal 4×4 boxes, with the
    /// explicit-stack solver for the deeper board.
    fn seed_super(&mut self, puzzle: &mut Puzzle) {
        loop {
            puzzle.reset();
            let seeded = (0..4).all(|i| self.fill_box(puzzle, Point::new(i * 4, i * 4), 4));
            if seeded && puzzle.solve_iterative() {
                return;
            }
        }
    }

    /// Samurai seeding. A single unrestricted brute force over the 21×21
    /// composite is intractable, so the board is decomposed: the diagonal
    /// boxes of the four corner grids are mutually constraint-independent
    /// and get independent permutations, each corner grid is completed as an
    /// ordinary 9×9 solve (fixing the center grid's corner boxes along the
    /// way), and only then are the center's remaining cells brute-forced.
    fn seed_samurai(&mut self, puzzle: &mut Puzzle) {
        let corners = &SAMURAI_ORIGINS[..4];
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            puzzle.reset();
            let seeded = corners.iter().all(|(ox, oy)| {
                (0..3).all(|i| self.fill_box(puzzle, Point::new(ox + i * 3, oy + i * 3), 3))
            });
            if !seeded {
                continue;
            }
            let corners_solved = corners
                .iter()
                .all(|(ox, oy)| puzzle.solve_region(&subgrid_points(*ox, *oy)));
            if corners_solved && puzzle.solve_region(&subgrid_points(6, 6)) {
                debug!("samurai seed took {} attempts", attempts);
                return;
            }
        }
    }

    /// Futoshiki generation: complete a random latin square on a
    /// relation-free board, derive inequality edges from a random sample of
    /// adjacent pairs, then rebuild the board with those relations wired and
    /// carve it like any other.
    fn generate_futoshiki(
        &mut self,
        size: u8,
        config: &GeneratorConfig,
    ) -> Result<Puzzle, WiringError> {
        let mut latin = Puzzle::new_futoshiki(size, &[])?;
        loop {
            latin.reset();
            let mut values: Vec<u8> = (1..=size).collect();
            values.shuffle(&mut self.rng);
            let seeded = values
                .iter()
                .enumerate()
                .all(|(x, v)| latin.set_value(Point::new(x as u8, 0), *v).is_ok());
            if seeded && latin.solve() {
                break;
            }
        }

        let mut adjacent: Vec<(Point, Point)> = Vec::new();
        for y in 0..size {
            for x in 0..size {
                if x + 1 < size {
                    adjacent.push((Point::new(x, y), Point::new(x + 1, y)));
                }
                if y + 1 < size {
                    adjacent.push((Point::new(x, y), Point::new(x, y + 1)));
                }
            }
        }
        adjacent.shuffle(&mut self.rng);

        let mut edges: Vec<(Point, Point)> = Vec::new();
        for (a, b) in adjacent.into_iter().take(config.futoshiki_edges) {
            let va = latin.cell(a).map(|c| c.value()).unwrap_or(0);
            let vb = latin.cell(b).map(|c| c.value()).unwrap_or(0);
            if va > vb {
                edges.push((a, b));
            } else {
                edges.push((b, a));
            }
        }

        let mut puzzle = Puzzle::new_futoshiki(size, &edges)?;
        let solution: Vec<(Point, u8)> = latin.cells().map(|(p, c)| (p, c.value())).collect();
        for (point, value) in solution {
            // The relations were derived from this very solution, so the
            // transfer cannot violate them.
            let placed = puzzle.set_value(point, value).is_ok();
            debug_assert!(placed);
        }
        self.carve(&mut puzzle, config.max_removals);
        puzzle.lock_filled();
        Ok(puzzle)
    }

    /// Fill one box with a random permutation. Returns false if a value was
    /// rejected, which makes the caller reseed.
    fn fill_box(&mut self, puzzle: &mut Puzzle, corner: Point, box_size: u8) -> bool {
        let count = box_size as usize * box_size as usize;
        let mut values: Vec<u8> = (1..=count as u8).collect();
        values.shuffle(&mut self.rng);
        let mut i = 0;
        for dy in 0..box_size {
            for dx in 0..box_size {
                let point = Point::new(corner.x + dx, corner.y + dy);
                if puzzle.set_value(point, values[i]).is_err() {
                    return false;
                }
                i += 1;
            }
        }
        true
    }

    /// Shuffle all cells into a random removal order and clear them one at a
    /// time, keeping each removal only while the solution stays unique.
    fn carve(&mut self, puzzle: &mut Puzzle, max_removals: usize) {
        let mut points = puzzle.points();
        points.shuffle(&mut self.rng);
        let mut removed = 0;
        for point in points {
            if removed >= max_removals {
                break;
            }
            let old = match puzzle.cell(point) {
                Some(cell) if !cell.is_empty() => cell.value(),
                _ => continue,
            };
            puzzle.reset_cell(point);
            if puzzle.count_solutions(2) == 1 {
                removed += 1;
            } else {
                puzzle.place_unchecked(point, old);
            }
        }
        debug!("carved {} cells", removed);
    }
}

/// The 81 points of the Samurai subgrid anchored at `(ox, oy)`.
fn subgrid_points(ox: u8, oy: u8) -> Vec<Point> {
    let mut points = Vec::with_capacity(81);
    for y in 0..9 {
        for x in 0..9 {
            points.push(Point::new(ox + x, oy + y));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_classic() {
        let mut generator = Generator::with_seed(42);
        let mut puzzle = generator.generate(BoardKind::Classic).unwrap();

        assert!(puzzle.has_unique_solution());
        assert!(puzzle.empty_count() > 0);
        for (_, cell) in puzzle.cells() {
            if !cell.is_empty() {
                assert!(cell.is_read_only(), "every remaining cell is a given");
            }
        }
    }

    #[test]
    fn test_generate_classic_is_reproducible() {
        let a = Generator::with_seed(7).generate(BoardKind::Classic).unwrap();
        let b = Generator::with_seed(7).generate(BoardKind::Classic).unwrap();
        for (point, cell) in a.cells() {
            assert_eq!(cell.value(), b.value(point).unwrap());
        }
    }

    #[test]
    fn test_generate_futoshiki() {
        let mut generator = Generator::with_seed(42);
        let kind = BoardKind::Futoshiki { size: 5 };
        let mut puzzle = generator.generate(kind).unwrap();

        assert_eq!(puzzle.kind(), kind);
        // 10 line groups plus a mirrored relation pair per derived edge.
        assert_eq!(puzzle.constraint_count(), 10 + 2 * 10);
        assert!(puzzle.has_unique_solution());
        assert!(puzzle.solve());
    }

    #[test]
    fn test_generate_super_with_small_cap() {
        let mut generator = Generator::with_seed(42);
        let config = GeneratorConfig {
            max_removals: 12,
            futoshiki_edges: 0,
        };
        let mut puzzle = generator
            .generate_with_config(BoardKind::Super, &config)
            .unwrap();
        assert!(puzzle.empty_count() <= 12);
        assert!(puzzle.has_unique_solution());
    }

    #[test]
    fn test_generate_samurai_with_small_cap() {
        let mut generator = Generator::with_seed(42);
        let config = GeneratorConfig {
            max_removals: 12,
            futoshiki_edges: 0,
        };
        let mut puzzle = generator
            .generate_with_config(BoardKind::Samurai, &config)
            .unwrap();
        assert_eq!(puzzle.cell_count(), 369);
        assert!(puzzle.has_unique_solution());
        for (_, cell) in puzzle.cells() {
            if !cell.is_empty() {
                assert!(cell.is_read_only());
            }
        }
    }
}
