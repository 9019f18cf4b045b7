//! A single grid cell.
//!
//! Cells live in the puzzle's cell arena and refer to their constraints by
//! id, never by reference, so the cell/constraint graph stays acyclic and
//! the whole puzzle is a plain-value clone.

use crate::constraint::ConstraintId;

/// One grid position: a value, a lock flag, and the ids of the constraints
/// the cell participates in.
#[derive(Debug, Clone)]
pub struct Cell {
    value: u8,
    read_only: bool,
    limit: u8,
    constraints: Vec<ConstraintId>,
}

impl Cell {
    /// Create an empty, unlocked cell with the given value limit.
    pub fn new(limit: u8) -> Self {
        Self {
            value: 0,
            read_only: false,
            limit,
            constraints: Vec::new(),
        }
    }

    /// Current value, 0 if empty.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// True if no value is placed.
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// True if the cell is a locked given.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Largest value this cell can hold.
    pub fn limit(&self) -> u8 {
        self.limit
    }

    /// Ids of the constraints this cell participates in, in wiring order.
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub(crate) fn add_constraint(&mut self, id: ConstraintId) {
        self.constraints.push(id);
    }

    pub(crate) fn set_value_raw(&mut self, value: u8) {
        self.value = value;
    }

    pub(crate) fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Back to the empty state, discarding any lock.
    pub(crate) fn reset(&mut self) {
        self.value = 0;
        self.read_only = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut cell = Cell::new(9);
        assert!(cell.is_empty());
        assert!(!cell.is_read_only());

        cell.set_value_raw(4);
        assert_eq!(cell.value(), 4);
        assert!(!cell.is_empty());

        cell.set_read_only(true);
        assert!(cell.is_read_only());

        cell.reset();
        assert!(cell.is_empty());
        assert!(!cell.is_read_only());
    }
}
