//! The row-major text format shared with the file collaborators.
//!
//! One line per row, comma-separated fields, `0` for an empty cell, values
//! above 9 letter-coded (`A` = 10 … `G` = 16), `_` for points outside a
//! partial grid such as the Samurai gaps. Importing applies `set_given` to
//! every nonzero entry, so imported clues arrive locked.

use crate::error::PuzzleError;
use crate::point::Point;
use crate::puzzle::Puzzle;
use std::fmt;

/// Errors raised while parsing the grid text format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Line or field count does not match the board's dimensions.
    Shape { line: usize },

    /// A field is neither a value, `0`, nor `_`.
    BadField { line: usize, field: String },

    /// A parsed clue was rejected by the grid.
    Puzzle(PuzzleError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Shape { line } => {
                write!(f, "line {} does not match the board shape", line + 1)
            }
            FormatError::BadField { line, field } => {
                write!(f, "unreadable field '{}' on line {}", field, line + 1)
            }
            FormatError::Puzzle(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FormatError::Puzzle(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PuzzleError> for FormatError {
    fn from(e: PuzzleError) -> Self {
        FormatError::Puzzle(e)
    }
}

fn encode(value: u8) -> char {
    if value <= 9 {
        (b'0' + value) as char
    } else {
        (b'A' + value - 10) as char
    }
}

fn decode(field: &str) -> Option<u8> {
    let mut chars = field.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match ch {
        '0'..='9' => Some(ch as u8 - b'0'),
        'A'..='G' => Some(ch as u8 - b'A' + 10),
        _ => None,
    }
}

impl Puzzle {
    /// Render the grid in the row-major text format.
    pub fn export(&self) -> String {
        let (width, height) = self.kind().dimensions();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                if x > 0 {
                    out.push(',');
                }
                match self.cell(Point::new(x, y)) {
                    Some(cell) => out.push(encode(cell.value())),
                    None => out.push('_'),
                }
            }
            out.push('\n');
        }
        out
    }

    /// Apply clues from the text format. Nonzero entries become locked
    /// givens; `0` entries and `_` gaps are skipped.
    pub fn import(&mut self, text: &str) -> Result<(), FormatError> {
        let (width, height) = self.kind().dimensions();
        let lines: Vec<&str> = text.lines().collect();
        if lines.len() != height as usize {
            // Too few lines: the row where input ran out. Too many: the
            // first extra line.
            return Err(FormatError::Shape {
                line: lines.len().min(height as usize),
            });
        }
        for (y, line) in lines.iter().enumerate() {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != width as usize {
                return Err(FormatError::Shape { line: y });
            }
            for (x, field) in fields.iter().enumerate() {
                let point = Point::new(x as u8, y as u8);
                if *field == "_" {
                    continue;
                }
                let value = decode(field).ok_or_else(|| FormatError::BadField {
                    line: y,
                    field: (*field).to_string(),
                })?;
                if value != 0 {
                    self.set_given(point, value)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.export())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_round_trip() {
        let mut original = Puzzle::new_classic().unwrap();
        original.set_given(Point::new(0, 0), 5).unwrap();
        original.set_given(Point::new(4, 4), 9).unwrap();
        original.set_given(Point::new(8, 8), 1).unwrap();

        let text = original.export();
        let mut imported = Puzzle::new_classic().unwrap();
        imported.import(&text).unwrap();

        assert_eq!(imported.export(), text);
        for (point, cell) in original.cells() {
            assert_eq!(cell.value(), imported.value(point).unwrap());
        }
    }

    #[test]
    fn test_import_locks_clues() {
        let mut puzzle = Puzzle::new_classic().unwrap();
        let mut source = Puzzle::new_classic().unwrap();
        source.set_given(Point::new(3, 2), 7).unwrap();
        puzzle.import(&source.export()).unwrap();

        assert_eq!(puzzle.given_count(), 1);
        assert!(puzzle.cell(Point::new(3, 2)).unwrap().is_read_only());
        // Untouched cells stay unlocked and empty.
        assert!(puzzle.cell(Point::new(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_super_letter_coding() {
        let mut puzzle = Puzzle::new_super().unwrap();
        puzzle.set_given(Point::new(0, 0), 16).unwrap();
        puzzle.set_given(Point::new(1, 0), 10).unwrap();
        let text = puzzle.export();
        assert!(text.starts_with("G,A,0"));

        let mut imported = Puzzle::new_super().unwrap();
        imported.import(&text).unwrap();
        assert_eq!(imported.value(Point::new(0, 0)).unwrap(), 16);
        assert_eq!(imported.value(Point::new(1, 0)).unwrap(), 10);
    }

    #[test]
    fn test_samurai_gaps() {
        let puzzle = Puzzle::new_samurai().unwrap();
        let text = puzzle.export();
        let first: &str = text.lines().next().unwrap();
        // Row 0 covers the two top subgrids with a gap between them.
        assert_eq!(first.matches('_').count(), 3);

        let mut imported = Puzzle::new_samurai().unwrap();
        imported.import(&text).unwrap();
    }

    #[test]
    fn test_bad_field() {
        let mut puzzle = Puzzle::new_classic().unwrap();
        let mut text = puzzle.export();
        text = text.replacen('0', "x", 1);
        let err = puzzle.import(&text).unwrap_err();
        assert_eq!(
            err,
            FormatError::BadField {
                line: 0,
                field: "x".into()
            }
        );
    }

    #[test]
    fn test_wrong_shape() {
        let mut puzzle = Puzzle::new_classic().unwrap();
        assert!(matches!(
            puzzle.import("0,0,0\n").unwrap_err(),
            FormatError::Shape { .. }
        ));
    }

    #[test]
    fn test_shape_error_names_offending_line() {
        let mut puzzle = Puzzle::new_classic().unwrap();
        let row = "0,0,0,0,0,0,0,0,0\n";

        // Input runs out after three rows; row 3 is the first one missing.
        let err = puzzle.import(&row.repeat(3)).unwrap_err();
        assert_eq!(err, FormatError::Shape { line: 3 });
        assert_eq!(err.to_string(), "line 4 does not match the board shape");

        // Row 9 is the first extra one.
        let err = puzzle.import(&row.repeat(10)).unwrap_err();
        assert_eq!(err, FormatError::Shape { line: 9 });
    }
}
