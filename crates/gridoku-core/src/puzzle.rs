//! The puzzle: cell arena, constraint arena, and the mutation API.
//!
//! Cells and constraints are stored in two arenas owned by the puzzle and
//! cross-reference each other by `Point` and `ConstraintId`. There are no
//! shared references, so `Clone` is a plain dual-arena copy and a cloned
//! puzzle never shares constraint state with its original.

use crate::board::BoardKind;
use crate::cell::Cell;
use crate::constraint::{Constraint, ConstraintId};
use crate::error::{PuzzleError, WiringError};
use crate::markup::MarkUp;
use crate::point::Point;
use std::collections::BTreeMap;

/// A grid puzzle: the Point→Cell map plus the wired constraint graph.
///
/// Not re-entrant: the search routines mutate the grid in place and must not
/// be invoked concurrently on the same instance. There is no internal
/// locking and no cooperative cancellation; callers needing either must
/// guard the puzzle externally.
#[derive(Debug, Clone)]
pub struct Puzzle {
    kind: BoardKind,
    max_value: u8,
    cells: BTreeMap<Point, Cell>,
    constraints: Vec<Constraint>,
    tries: u64,
}

impl Puzzle {
    /// Bare puzzle with no cells wired yet. Topology builders fill it in.
    pub(crate) fn empty(kind: BoardKind, max_value: u8) -> Self {
        Self {
            kind,
            max_value,
            cells: BTreeMap::new(),
            constraints: Vec::new(),
            tries: 0,
        }
    }

    pub(crate) fn add_cell(&mut self, point: Point) -> Result<(), WiringError> {
        if self.cells.contains_key(&point) {
            return Err(WiringError::DuplicatePoint { point });
        }
        self.cells.insert(point, Cell::new(self.max_value));
        Ok(())
    }

    /// Move a constraint into the arena and register its id on every cell it
    /// governs. A relation only governs its source cell.
    pub(crate) fn add_constraint(&mut self, constraint: Constraint) -> ConstraintId {
        let id = ConstraintId(self.constraints.len());
        let governed: Vec<Point> = match &constraint {
            Constraint::Exclusive(group) => group.cells().to_vec(),
            Constraint::Relation(relation) => vec![relation.source()],
        };
        self.constraints.push(constraint);
        for point in governed {
            debug_assert!(self.cells.contains_key(&point), "constraint wired to missing cell");
            if let Some(cell) = self.cells.get_mut(&point) {
                cell.add_constraint(id);
            }
        }
        id
    }

    /// Board topology this puzzle was wired for.
    pub fn kind(&self) -> BoardKind {
        self.kind
    }

    /// Largest placeable value.
    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    /// Nodes expanded by the search routines since the last `reset`.
    pub fn tries(&self) -> u64 {
        self.tries
    }

    pub(crate) fn bump_tries(&mut self) {
        self.tries += 1;
    }

    /// Read view of the grid, in row-major point order.
    pub fn cells(&self) -> impl Iterator<Item = (Point, &Cell)> {
        self.cells.iter().map(|(p, c)| (*p, c))
    }

    /// All grid points, in row-major order.
    pub fn points(&self) -> Vec<Point> {
        self.cells.keys().copied().collect()
    }

    /// The cell at `point`, if the point is part of the grid.
    pub fn cell(&self, point: Point) -> Option<&Cell> {
        self.cells.get(&point)
    }

    /// True if `point` is part of the grid.
    pub fn contains(&self, point: Point) -> bool {
        self.cells.contains_key(&point)
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of wired constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id.0]
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.values().filter(|c| c.is_empty()).count()
    }

    /// Number of locked givens.
    pub fn given_count(&self) -> usize {
        self.cells.values().filter(|c| c.is_read_only()).count()
    }

    /// Value at `point`, 0 if empty.
    pub fn value(&self, point: Point) -> Result<u8, PuzzleError> {
        self.cells
            .get(&point)
            .map(|c| c.value())
            .ok_or(PuzzleError::IllegalPosition { point })
    }

    /// Place `value` at `point` (0 clears the cell).
    ///
    /// Two-phase commit: every constraint of the cell validates the
    /// assignment first, without mutating anything; only when all of them
    /// accept is the change committed to each constraint and to the cell.
    /// On any rejection the grid is left untouched.
    pub fn set_value(&mut self, point: Point, value: u8) -> Result<(), PuzzleError> {
        let cell = self
            .cells
            .get(&point)
            .ok_or(PuzzleError::IllegalPosition { point })?;
        if cell.is_read_only() {
            return Err(PuzzleError::ReadOnly { point });
        }
        if value > cell.limit() {
            return Err(PuzzleError::Range {
                value,
                max_value: cell.limit(),
            });
        }
        let old = cell.value();
        let ids: Vec<ConstraintId> = cell.constraints().to_vec();

        // Validate phase. No state changes here: a rejection from the third
        // constraint must not leave the first two half-committed.
        for id in &ids {
            self.constraints[id.0].check_update(&self.cells, point, value)?;
        }

        // Commit phase.
        for id in &ids {
            self.constraints[id.0].update(old, value);
        }
        if let Some(cell) = self.cells.get_mut(&point) {
            cell.set_value_raw(value);
        }
        Ok(())
    }

    /// Place a given: `set_value` plus the lock. Used for imported clues and
    /// generated puzzles. A given cannot be empty.
    pub fn set_given(&mut self, point: Point, value: u8) -> Result<(), PuzzleError> {
        if value == 0 {
            return Err(PuzzleError::Range {
                value,
                max_value: self.max_value,
            });
        }
        self.set_value(point, value)?;
        if let Some(cell) = self.cells.get_mut(&point) {
            cell.set_read_only(true);
        }
        Ok(())
    }

    /// Clear the cell at `point`. Fails on a locked given.
    pub fn clear(&mut self, point: Point) -> Result<(), PuzzleError> {
        self.set_value(point, 0)
    }

    /// Drop the lock on a given, making the cell mutable again.
    pub fn unlock(&mut self, point: Point) -> Result<(), PuzzleError> {
        let cell = self
            .cells
            .get_mut(&point)
            .ok_or(PuzzleError::IllegalPosition { point })?;
        cell.set_read_only(false);
        Ok(())
    }

    /// Candidate set for `point`: the values no constraint currently
    /// excludes. Empty for a filled cell.
    pub fn mark_up(&self, point: Point) -> Result<MarkUp, PuzzleError> {
        let cell = self
            .cells
            .get(&point)
            .ok_or(PuzzleError::IllegalPosition { point })?;
        Ok(self.candidates_of(cell))
    }

    /// True iff no cell is empty.
    pub fn is_solved(&self) -> bool {
        self.cells.values().all(|c| !c.is_empty())
    }

    /// Clear all values and locks and zero the search counter. The
    /// constraint graph itself is left wired.
    pub fn reset(&mut self) {
        for cell in self.cells.values_mut() {
            cell.reset();
        }
        for constraint in &mut self.constraints {
            constraint.clear();
        }
        self.tries = 0;
    }

    // ==================== Internal mutation for search/generation ====================

    /// Infallible candidate lookup for a known-valid point.
    pub(crate) fn candidates(&self, point: Point) -> MarkUp {
        match self.cells.get(&point) {
            Some(cell) => self.candidates_of(cell),
            None => MarkUp::empty(self.max_value),
        }
    }

    fn candidates_of(&self, cell: &Cell) -> MarkUp {
        if !cell.is_empty() {
            return MarkUp::empty(cell.limit());
        }
        let mut excluded = MarkUp::empty(cell.limit());
        for id in cell.constraints() {
            excluded = excluded.or(&self.constraints[id.0].numbers(&self.cells));
        }
        excluded.complement()
    }

    /// Drop the value and lock at `point`, unwinding constraint state.
    pub(crate) fn reset_cell(&mut self, point: Point) {
        let (old, ids) = match self.cells.get(&point) {
            Some(cell) => (cell.value(), cell.constraints().to_vec()),
            None => return,
        };
        if old != 0 {
            for id in &ids {
                self.constraints[id.0].update(old, 0);
            }
        }
        if let Some(cell) = self.cells.get_mut(&point) {
            cell.reset();
        }
    }

    /// Re-place a value known to be legal (restores a removal during
    /// generation). Skips validation but keeps constraint state coherent.
    pub(crate) fn place_unchecked(&mut self, point: Point, value: u8) {
        let (old, ids) = match self.cells.get(&point) {
            Some(cell) => (cell.value(), cell.constraints().to_vec()),
            None => return,
        };
        for id in &ids {
            self.constraints[id.0].update(old, value);
        }
        if let Some(cell) = self.cells.get_mut(&point) {
            cell.set_value_raw(value);
        }
    }

    /// Lock every filled cell as a given.
    pub(crate) fn lock_filled(&mut self) {
        for cell in self.cells.values_mut() {
            if !cell.is_empty() {
                cell.set_read_only(true);
            }
        }
    }
}
