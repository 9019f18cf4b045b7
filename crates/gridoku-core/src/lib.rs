//! Core engine for a family of grid logic puzzles.
//!
//! One cell/constraint model and one backtracking search serve four board
//! topologies: classic 9×9 Sudoku, the 16×16 "super" board, the 21×21
//! Samurai composite, and Futoshiki with its inequality edges. The engine
//! covers interactive play validation, solvability checks, solution
//! uniqueness counting, and random puzzle generation; front ends (CLI, GUI,
//! file import/export) live in separate crates and drive it through the
//! [`Puzzle`] API.
//!
//! Everything is single-threaded and CPU-bound. The search routines mutate
//! the grid in place and are not re-entrant; callers needing cancellation or
//! bounded latency must run them on a dedicated worker.

mod board;
mod cell;
mod constraint;
mod error;
mod format;
mod generate;
mod hints;
mod markup;
mod point;
mod puzzle;
mod search;

pub use board::BoardKind;
pub use cell::Cell;
pub use constraint::{Constraint, ConstraintId, Direction, ExclusiveGroup, Relation};
pub use error::{PuzzleError, WiringError};
pub use format::FormatError;
pub use generate::{Generator, GeneratorConfig};
pub use markup::{MarkUp, MarkUpIter};
pub use point::Point;
pub use puzzle::Puzzle;
