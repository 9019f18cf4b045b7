//! Error types.
//!
//! `PuzzleError` covers the recoverable conditions of interactive play; the
//! search engine treats them as "try the next candidate". `WiringError`
//! indicates a defect in topology construction and only occurs while a
//! puzzle's constraint graph is being built.

use crate::Point;
use std::fmt;

/// Recoverable errors raised by the play/search API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// Value outside the board's value domain `[0, max_value]`.
    Range { value: u8, max_value: u8 },

    /// Coordinate is not part of the grid.
    IllegalPosition { point: Point },

    /// Assignment violates a constraint at this point.
    Content { point: Point, value: u8 },

    /// The cell is locked (a given) and cannot be changed.
    ReadOnly { point: Point },
}

impl PuzzleError {
    /// True for constraint violations, including the locked-cell case.
    pub fn is_content_violation(&self) -> bool {
        matches!(self, PuzzleError::Content { .. } | PuzzleError::ReadOnly { .. })
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::Range { value, max_value } => {
                write!(f, "value {} outside domain [0,{}]", value, max_value)
            }
            PuzzleError::IllegalPosition { point } => {
                write!(f, "point {} is not part of the grid", point)
            }
            PuzzleError::Content { point, value } => {
                write!(f, "value {} violates a constraint at {}", value, point)
            }
            PuzzleError::ReadOnly { point } => {
                write!(f, "cell at {} is read-only", point)
            }
        }
    }
}

impl std::error::Error for PuzzleError {}

/// Fatal errors raised while wiring a puzzle's constraint graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WiringError {
    /// An exclusive group was handed more cells than its fixed capacity.
    TooManyCells { label: String, capacity: usize },

    /// The same point was added to the grid twice.
    DuplicatePoint { point: Point },

    /// A constraint names a point that is not part of the grid.
    UnknownPoint { point: Point },
}

impl fmt::Display for WiringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WiringError::TooManyCells { label, capacity } => {
                write!(f, "group '{}' exceeds its capacity of {}", label, capacity)
            }
            WiringError::DuplicatePoint { point } => {
                write!(f, "point {} added to the grid twice", point)
            }
            WiringError::UnknownPoint { point } => {
                write!(f, "constraint names point {} outside the grid", point)
            }
        }
    }
}

impl std::error::Error for WiringError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_violation_classification() {
        let p = Point::new(0, 0);
        assert!(PuzzleError::Content { point: p, value: 3 }.is_content_violation());
        assert!(PuzzleError::ReadOnly { point: p }.is_content_violation());
        assert!(!PuzzleError::Range { value: 10, max_value: 9 }.is_content_violation());
        assert!(!PuzzleError::IllegalPosition { point: p }.is_content_violation());
    }

    #[test]
    fn test_display() {
        let e = PuzzleError::Range { value: 10, max_value: 9 };
        assert_eq!(e.to_string(), "value 10 outside domain [0,9]");
    }
}
