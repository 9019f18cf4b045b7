//! Layered hint deduction.
//!
//! Each level refines the previous one, so the candidate set never grows
//! with the level. The level 1–3 eliminations scan siblings in wiring order
//! and do not iterate to a fixpoint; the first hidden single found wins.

use crate::error::PuzzleError;
use crate::markup::MarkUp;
use crate::point::Point;
use crate::puzzle::Puzzle;

impl Puzzle {
    /// Candidate set for `point` refined up to `level`.
    ///
    /// - 0: the raw markup.
    /// - 1: drops values that are the sole candidate of a sibling cell.
    /// - 2: drops value pairs shared by two sibling cells of one constraint.
    /// - 3: collapses to a hidden single when one exists.
    pub fn hints(&self, point: Point, level: u8) -> Result<MarkUp, PuzzleError> {
        let mut result = self.mark_up(point)?;
        if level >= 1 {
            self.remove_naked_singles(point, &mut result);
        }
        if level >= 2 {
            self.remove_naked_pairs(point, &mut result);
        }
        if level >= 3 {
            if let Some(value) = self.detect_hidden_single(point, &result) {
                let mut single = MarkUp::empty(result.width());
                single.set(value);
                result = single;
            }
        }
        Ok(result)
    }

    /// Level 1: a sibling with exactly one candidate claims that value.
    fn remove_naked_singles(&self, point: Point, result: &mut MarkUp) {
        for sibling in self.siblings(point) {
            let candidates = self.candidates(sibling);
            if candidates.cardinality() == 1 {
                if let Some(value) = candidates.lowest() {
                    result.unset(value);
                }
            }
        }
    }

    /// Level 2: two siblings of one constraint sharing an identical 2-value
    /// candidate set claim both values.
    fn remove_naked_pairs(&self, point: Point, result: &mut MarkUp) {
        let cell = match self.cell(point) {
            Some(cell) => cell,
            None => return,
        };
        for id in cell.constraints() {
            let others: Vec<MarkUp> = self
                .constraint(*id)
                .cells()
                .iter()
                .filter(|p| **p != point)
                .map(|p| self.candidates(*p))
                .filter(|m| m.cardinality() == 2)
                .collect();
            for (i, first) in others.iter().enumerate() {
                for second in &others[i + 1..] {
                    if first == second {
                        for value in first.iter() {
                            result.unset(value);
                        }
                    }
                }
            }
        }
    }

    /// Level 3: a candidate no sibling of some constraint can take must go
    /// here. Values are tried ascending; the first hit wins.
    fn detect_hidden_single(&self, point: Point, result: &MarkUp) -> Option<u8> {
        let cell = self.cell(point)?;
        for value in result.iter() {
            for id in cell.constraints() {
                let claimed = self
                    .constraint(*id)
                    .cells()
                    .iter()
                    .filter(|p| **p != point)
                    .any(|p| self.candidates(*p).get(value));
                if !claimed {
                    return Some(value);
                }
            }
        }
        None
    }

    /// Sibling cells sharing any constraint with `point`, in wiring order,
    /// with repeats when two cells share more than one constraint.
    fn siblings(&self, point: Point) -> Vec<Point> {
        let cell = match self.cell(point) {
            Some(cell) => cell,
            None => return Vec::new(),
        };
        let mut out = Vec::new();
        for id in cell.constraints() {
            for p in self.constraint(*id).cells() {
                if *p != point {
                    out.push(*p);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_zero_is_raw_markup() {
        let mut puzzle = Puzzle::new_classic().unwrap();
        puzzle.set_value(Point::new(0, 0), 1).unwrap();
        let p = Point::new(4, 0);
        assert_eq!(puzzle.hints(p, 0).unwrap(), puzzle.mark_up(p).unwrap());
    }

    #[test]
    fn test_naked_single_elimination() {
        let mut puzzle = Puzzle::new_classic().unwrap();
        // Column 1 leaves (1,0) with 5 as its only candidate.
        let column_values = [1, 2, 3, 4, 6, 7, 8, 9];
        for (i, v) in column_values.iter().enumerate() {
            puzzle.set_value(Point::new(1, (i + 1) as u8), *v).unwrap();
        }
        assert_eq!(puzzle.mark_up(Point::new(1, 0)).unwrap().cardinality(), 1);

        // (0,0) shares row 0 and box 0 with (1,0); level 1 strips the 5.
        let p = Point::new(0, 0);
        let level0 = puzzle.hints(p, 0).unwrap();
        assert!(level0.get(5));
        let level1 = puzzle.hints(p, 1).unwrap();
        assert!(!level1.get(5));
        assert_eq!(level1.cardinality(), level0.cardinality() - 1);
    }

    #[test]
    fn test_naked_pair_elimination() {
        // 4x4 latin square, no inequality edges. Columns 1 and 2 restrict
        // (1,0) and (2,0) to the identical pair {1,2}.
        let mut puzzle = Puzzle::new_futoshiki(4, &[]).unwrap();
        puzzle.set_value(Point::new(1, 1), 3).unwrap();
        puzzle.set_value(Point::new(1, 2), 4).unwrap();
        puzzle.set_value(Point::new(2, 1), 4).unwrap();
        puzzle.set_value(Point::new(2, 2), 3).unwrap();

        let pair: Vec<u8> = puzzle.mark_up(Point::new(1, 0)).unwrap().iter().collect();
        assert_eq!(pair, vec![1, 2]);

        let p = Point::new(0, 0);
        assert_eq!(puzzle.hints(p, 1).unwrap().cardinality(), 4);
        let level2: Vec<u8> = puzzle.hints(p, 2).unwrap().iter().collect();
        assert_eq!(level2, vec![3, 4]);
    }

    #[test]
    fn test_hidden_single_collapse() {
        // 4x4 latin square with 2s placed so that no row-0 sibling of (0,0)
        // can take a 2: the 2 must land at (0,0).
        let mut puzzle = Puzzle::new_futoshiki(4, &[]).unwrap();
        puzzle.set_value(Point::new(1, 1), 2).unwrap();
        puzzle.set_value(Point::new(2, 2), 2).unwrap();
        puzzle.set_value(Point::new(3, 3), 2).unwrap();

        let p = Point::new(0, 0);
        assert_eq!(puzzle.hints(p, 2).unwrap().cardinality(), 4);
        let level3: Vec<u8> = puzzle.hints(p, 3).unwrap().iter().collect();
        assert_eq!(level3, vec![2]);
    }

    #[test]
    fn test_levels_never_grow() {
        let mut puzzle = Puzzle::new_classic().unwrap();
        puzzle.set_value(Point::new(0, 0), 1).unwrap();
        puzzle.set_value(Point::new(5, 1), 2).unwrap();
        puzzle.set_value(Point::new(8, 8), 3).unwrap();
        for (point, cell) in puzzle.cells() {
            if !cell.is_empty() {
                continue;
            }
            let mut previous = puzzle.hints(point, 0).unwrap().cardinality();
            for level in 1..=3 {
                let current = puzzle.hints(point, level).unwrap().cardinality();
                assert!(current <= previous, "level {} grew at {}", level, point);
                previous = current;
            }
        }
    }
}
