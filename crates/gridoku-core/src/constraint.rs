//! The constraint graph's node types.
//!
//! Two constraint variants cover every board in the family: `ExclusiveGroup`
//! (rows, columns, boxes — each value at most once) and `Relation` (the
//! inequality edges of Futoshiki). Constraints refer to their cells by
//! `Point` and are owned by exactly one puzzle's arena.

use crate::cell::Cell;
use crate::error::{PuzzleError, WiringError};
use crate::markup::MarkUp;
use crate::point::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index into a puzzle's constraint arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(pub(crate) usize);

impl ConstraintId {
    /// Arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Direction of a [`Relation`]: how `source` compares to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    GreaterThan,
    LessThan,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::GreaterThan => write!(f, ">"),
            Direction::LessThan => write!(f, "<"),
        }
    }
}

/// A fixed-capacity group of cells in which each value appears at most once.
#[derive(Debug, Clone)]
pub struct ExclusiveGroup {
    label: String,
    capacity: usize,
    cells: Vec<Point>,
    occupied: MarkUp,
}

impl ExclusiveGroup {
    /// Empty group with a fixed capacity over values `1..=width`.
    pub fn new(label: impl Into<String>, capacity: usize, width: u8) -> Self {
        Self {
            label: label.into(),
            capacity,
            cells: Vec::with_capacity(capacity),
            occupied: MarkUp::empty(width),
        }
    }

    /// Group label, e.g. `"row 3"`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Attach a cell. Fails once the fixed capacity is reached.
    pub fn add_cell(&mut self, point: Point) -> Result<(), WiringError> {
        if self.cells.len() >= self.capacity {
            return Err(WiringError::TooManyCells {
                label: self.label.clone(),
                capacity: self.capacity,
            });
        }
        self.cells.push(point);
        Ok(())
    }

    /// Participating cells, in wiring order.
    pub fn cells(&self) -> &[Point] {
        &self.cells
    }

    /// Clone of the occupied-value set.
    pub fn numbers(&self) -> MarkUp {
        self.occupied
    }

    fn check_update(&self, point: Point, value: u8) -> Result<(), PuzzleError> {
        if value != 0 && self.occupied.get(value) {
            return Err(PuzzleError::Content { point, value });
        }
        Ok(())
    }

    fn update(&mut self, old: u8, new: u8) {
        if old != 0 {
            self.occupied.unset(old);
        }
        if new != 0 {
            self.occupied.set(new);
        }
    }

    fn clear(&mut self) {
        self.occupied = MarkUp::empty(self.occupied.width());
    }
}

/// A binary inequality edge between two cells.
///
/// One-directional: the relation constrains what may be placed at `source`
/// given `target`'s current value, never the other way around. Boards that
/// need both directions wire a mirrored pair.
#[derive(Debug, Clone)]
pub struct Relation {
    source: Point,
    target: Point,
    direction: Direction,
    max_value: u8,
}

impl Relation {
    /// New relation `source <direction> target` over values `1..=max_value`.
    pub fn new(source: Point, target: Point, direction: Direction, max_value: u8) -> Self {
        Self {
            source,
            target,
            direction,
            max_value,
        }
    }

    pub fn source(&self) -> Point {
        self.source
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Values excluded at `source` by the target's current value.
    ///
    /// An empty target acts as lower bound 0 for `>` and upper bound
    /// `max_value + 1` for `<`, excluding nothing in either case.
    fn numbers(&self, target_value: u8) -> MarkUp {
        let mut excluded = MarkUp::empty(self.max_value);
        match self.direction {
            Direction::GreaterThan => {
                for v in 1..=target_value.min(self.max_value) {
                    excluded.set(v);
                }
            }
            Direction::LessThan => {
                if target_value != 0 {
                    for v in target_value..=self.max_value {
                        excluded.set(v);
                    }
                }
            }
        }
        excluded
    }

    fn check_update(&self, point: Point, value: u8, target_value: u8) -> Result<(), PuzzleError> {
        if value == 0 {
            return Ok(());
        }
        let ok = match self.direction {
            Direction::GreaterThan => value > target_value,
            Direction::LessThan => {
                let bound = if target_value == 0 {
                    self.max_value + 1
                } else {
                    target_value
                };
                value < bound
            }
        };
        if ok {
            Ok(())
        } else {
            Err(PuzzleError::Content { point, value })
        }
    }
}

/// A constraint: either an exclusive group or an inequality relation.
#[derive(Debug, Clone)]
pub enum Constraint {
    Exclusive(ExclusiveGroup),
    Relation(Relation),
}

impl Constraint {
    /// The cells visible to markup derivation and hint deduction.
    ///
    /// For a relation this is the target cell only: the relation's exclusion
    /// set is a function of the target's state.
    pub fn cells(&self) -> &[Point] {
        match self {
            Constraint::Exclusive(group) => group.cells(),
            Constraint::Relation(relation) => std::slice::from_ref(&relation.target),
        }
    }

    /// Validate a prospective assignment without mutating any state.
    pub(crate) fn check_update(
        &self,
        cells: &BTreeMap<Point, Cell>,
        point: Point,
        value: u8,
    ) -> Result<(), PuzzleError> {
        match self {
            Constraint::Exclusive(group) => group.check_update(point, value),
            Constraint::Relation(relation) => {
                let target_value = cells
                    .get(&relation.target)
                    .map(|c| c.value())
                    .unwrap_or(0);
                relation.check_update(point, value, target_value)
            }
        }
    }

    /// Commit an assignment. Called only after `check_update` has passed for
    /// every constraint of the owning cell.
    pub(crate) fn update(&mut self, old: u8, new: u8) {
        match self {
            Constraint::Exclusive(group) => group.update(old, new),
            // Relations keep no state; the target's value is read on demand.
            Constraint::Relation(_) => {}
        }
    }

    /// The set of values this constraint currently excludes.
    pub(crate) fn numbers(&self, cells: &BTreeMap<Point, Cell>) -> MarkUp {
        match self {
            Constraint::Exclusive(group) => group.numbers(),
            Constraint::Relation(relation) => {
                let target_value = cells
                    .get(&relation.target)
                    .map(|c| c.value())
                    .unwrap_or(0);
                relation.numbers(target_value)
            }
        }
    }

    /// Drop all occupied-value state (grid reset).
    pub(crate) fn clear(&mut self) {
        if let Constraint::Exclusive(group) = self {
            group.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_capacity() {
        let mut group = ExclusiveGroup::new("row 0", 2, 9);
        group.add_cell(Point::new(0, 0)).unwrap();
        group.add_cell(Point::new(1, 0)).unwrap();
        let err = group.add_cell(Point::new(2, 0)).unwrap_err();
        assert_eq!(
            err,
            WiringError::TooManyCells {
                label: "row 0".into(),
                capacity: 2
            }
        );
    }

    #[test]
    fn test_group_rejects_occupied_value() {
        let mut group = ExclusiveGroup::new("row 0", 9, 9);
        group.update(0, 5);
        assert!(group.check_update(Point::new(1, 0), 5).is_err());
        assert!(group.check_update(Point::new(1, 0), 6).is_ok());
    }

    #[test]
    fn test_group_update_moves_bits() {
        let mut group = ExclusiveGroup::new("row 0", 9, 9);
        group.update(0, 3);
        assert!(group.numbers().get(3));
        group.update(3, 7);
        assert!(!group.numbers().get(3));
        assert!(group.numbers().get(7));
    }

    #[test]
    fn test_greater_than_exclusions() {
        // source > target, max 5, target holds 3: 1..3 excluded, 4..5 legal.
        let relation = Relation::new(
            Point::new(0, 0),
            Point::new(1, 0),
            Direction::GreaterThan,
            5,
        );
        let excluded = relation.numbers(3);
        assert_eq!(excluded.cardinality(), 3);
        let values: Vec<u8> = excluded.iter().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_less_than_exclusions() {
        let relation = Relation::new(Point::new(0, 0), Point::new(1, 0), Direction::LessThan, 5);
        let values: Vec<u8> = relation.numbers(3).iter().collect();
        assert_eq!(values, vec![3, 4, 5]);
        // Empty target excludes nothing.
        assert!(relation.numbers(0).is_empty());
    }

    #[test]
    fn test_relation_check_with_empty_target() {
        let gt = Relation::new(Point::new(0, 0), Point::new(1, 0), Direction::GreaterThan, 5);
        // Empty target is lower bound 0, so anything goes.
        assert!(gt.check_update(Point::new(0, 0), 1, 0).is_ok());

        let lt = Relation::new(Point::new(0, 0), Point::new(1, 0), Direction::LessThan, 5);
        // Empty target is upper bound max + 1.
        assert!(lt.check_update(Point::new(0, 0), 5, 0).is_ok());
        assert!(lt.check_update(Point::new(0, 0), 5, 5).is_err());
        assert!(lt.check_update(Point::new(0, 0), 4, 5).is_ok());
    }
}
