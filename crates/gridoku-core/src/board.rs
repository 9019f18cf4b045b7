//! Board topologies.
//!
//! A puzzle is specialized per board only in how its cells and constraints
//! are wired at construction. The four topologies here share everything
//! else: the classic 9×9, the 16×16 "super" board, the 21×21 Samurai
//! composite of five overlapping 9×9 grids, and the Futoshiki inequality
//! board.

use crate::constraint::{Constraint, Direction, ExclusiveGroup, Relation};
use crate::error::WiringError;
use crate::point::Point;
use crate::puzzle::Puzzle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Origins of the five Samurai subgrids: four corners plus the center.
pub(crate) static SAMURAI_ORIGINS: [(u8, u8); 5] = [(0, 0), (12, 0), (0, 12), (12, 12), (6, 6)];

/// The board family a puzzle was wired for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardKind {
    /// Classic 9×9 Sudoku.
    Classic,
    /// 16×16 Sudoku with 4×4 boxes.
    Super,
    /// 21×21 composite of five overlapping 9×9 grids.
    Samurai,
    /// size×size latin square with inequality edges.
    Futoshiki { size: u8 },
}

impl BoardKind {
    /// Largest placeable value on this board.
    pub fn max_value(&self) -> u8 {
        match self {
            BoardKind::Classic | BoardKind::Samurai => 9,
            BoardKind::Super => 16,
            BoardKind::Futoshiki { size } => *size,
        }
    }

    /// Bounding-box width and height.
    pub fn dimensions(&self) -> (u8, u8) {
        match self {
            BoardKind::Classic => (9, 9),
            BoardKind::Super => (16, 16),
            BoardKind::Samurai => (21, 21),
            BoardKind::Futoshiki { size } => (*size, *size),
        }
    }
}

impl std::fmt::Display for BoardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardKind::Classic => write!(f, "Classic"),
            BoardKind::Super => write!(f, "Super"),
            BoardKind::Samurai => write!(f, "Samurai"),
            BoardKind::Futoshiki { size } => write!(f, "Futoshiki {0}x{0}", size),
        }
    }
}

impl Puzzle {
    /// Classic 9×9 board: 9 rows, 9 columns, 9 boxes.
    pub fn new_classic() -> Result<Puzzle, WiringError> {
        let mut puzzle = Puzzle::empty(BoardKind::Classic, 9);
        wire_square(&mut puzzle, Point::new(0, 0), 9, 3, "")?;
        Ok(puzzle)
    }

    /// 16×16 board with 4×4 boxes.
    pub fn new_super() -> Result<Puzzle, WiringError> {
        let mut puzzle = Puzzle::empty(BoardKind::Super, 16);
        wire_square(&mut puzzle, Point::new(0, 0), 16, 4, "")?;
        Ok(puzzle)
    }

    /// 21×21 Samurai board: five overlapping 9×9 subgrids. The center grid
    /// shares its corner boxes with the four corner grids; shared boxes are
    /// wired once. Points outside every subgrid are not part of the grid.
    pub fn new_samurai() -> Result<Puzzle, WiringError> {
        let mut puzzle = Puzzle::empty(BoardKind::Samurai, 9);

        // Cells first; overlap cells belong to two subgrids but exist once.
        for (ox, oy) in SAMURAI_ORIGINS {
            for y in 0..9 {
                for x in 0..9 {
                    let point = Point::new(ox + x, oy + y);
                    if !puzzle.contains(point) {
                        puzzle.add_cell(point)?;
                    }
                }
            }
        }

        let mut wired_boxes: BTreeSet<Point> = BTreeSet::new();
        for (index, (ox, oy)) in SAMURAI_ORIGINS.iter().enumerate() {
            let origin = Point::new(*ox, *oy);
            let prefix = format!("grid {} ", index);
            wire_lines(&mut puzzle, origin, 9, &prefix)?;
            wire_boxes(&mut puzzle, origin, 9, 3, &mut wired_boxes)?;
        }
        Ok(puzzle)
    }

    /// Futoshiki board: a size×size latin square plus inequality edges.
    ///
    /// Each edge `(greater, lesser)` is wired as a mirrored pair of
    /// relations so both endpoints are constrained.
    pub fn new_futoshiki(size: u8, edges: &[(Point, Point)]) -> Result<Puzzle, WiringError> {
        let mut puzzle = Puzzle::empty(BoardKind::Futoshiki { size }, size);
        for y in 0..size {
            for x in 0..size {
                puzzle.add_cell(Point::new(x, y))?;
            }
        }
        wire_lines(&mut puzzle, Point::new(0, 0), size, "")?;

        for (greater, lesser) in edges {
            for point in [greater, lesser] {
                if !puzzle.contains(*point) {
                    return Err(WiringError::UnknownPoint { point: *point });
                }
            }
            puzzle.add_constraint(Constraint::Relation(Relation::new(
                *greater,
                *lesser,
                Direction::GreaterThan,
                size,
            )));
            puzzle.add_constraint(Constraint::Relation(Relation::new(
                *lesser,
                *greater,
                Direction::LessThan,
                size,
            )));
        }
        Ok(puzzle)
    }
}

/// Wire a full square region: cells, rows, columns, and boxes.
fn wire_square(
    puzzle: &mut Puzzle,
    origin: Point,
    size: u8,
    box_size: u8,
    prefix: &str,
) -> Result<(), WiringError> {
    for y in 0..size {
        for x in 0..size {
            puzzle.add_cell(Point::new(origin.x + x, origin.y + y))?;
        }
    }
    wire_lines(puzzle, origin, size, prefix)?;
    let mut seen = BTreeSet::new();
    wire_boxes(puzzle, origin, size, box_size, &mut seen)
}

/// Wire one row group and one column group per line of a square region.
fn wire_lines(
    puzzle: &mut Puzzle,
    origin: Point,
    size: u8,
    prefix: &str,
) -> Result<(), WiringError> {
    let width = puzzle.max_value();
    for y in 0..size {
        let mut group = ExclusiveGroup::new(format!("{}row {}", prefix, y), size as usize, width);
        for x in 0..size {
            group.add_cell(Point::new(origin.x + x, origin.y + y))?;
        }
        puzzle.add_constraint(Constraint::Exclusive(group));
    }
    for x in 0..size {
        let mut group = ExclusiveGroup::new(format!("{}column {}", prefix, x), size as usize, width);
        for y in 0..size {
            group.add_cell(Point::new(origin.x + x, origin.y + y))?;
        }
        puzzle.add_constraint(Constraint::Exclusive(group));
    }
    Ok(())
}

/// Wire the box groups of a square region, skipping boxes already wired by
/// an overlapping region.
fn wire_boxes(
    puzzle: &mut Puzzle,
    origin: Point,
    size: u8,
    box_size: u8,
    wired: &mut BTreeSet<Point>,
) -> Result<(), WiringError> {
    let width = puzzle.max_value();
    let boxes_per_side = size / box_size;
    for by in 0..boxes_per_side {
        for bx in 0..boxes_per_side {
            let corner = Point::new(origin.x + bx * box_size, origin.y + by * box_size);
            if !wired.insert(corner) {
                continue;
            }
            let mut group = ExclusiveGroup::new(
                format!("box ({},{})", corner.x, corner.y),
                (box_size as usize) * (box_size as usize),
                width,
            );
            for dy in 0..box_size {
                for dx in 0..box_size {
                    group.add_cell(Point::new(corner.x + dx, corner.y + dy))?;
                }
            }
            puzzle.add_constraint(Constraint::Exclusive(group));
        }
    }
    Ok(())
}
