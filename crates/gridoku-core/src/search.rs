//! Backtracking search: brute-force solving and solution counting.
//!
//! The work queue starts in row-major point order and is re-sorted by
//! candidate-set cardinality after every successful placement (minimum
//! remaining values). The re-sort is what keeps the composite and 16×16
//! boards tractable; it is not cosmetic.

use crate::markup::MarkUp;
use crate::point::Point;
use crate::puzzle::Puzzle;
use log::{debug, trace};
use std::collections::VecDeque;

impl Puzzle {
    /// Depth-first search over all empty cells. Returns true and leaves the
    /// grid solved on success; restores the grid on failure.
    pub fn solve(&mut self) -> bool {
        let mut queue: VecDeque<Point> = self.empty_points().into();
        let before = self.tries();
        let solved = self.solve_queue(&mut queue);
        debug!(
            "solve: {} after {} nodes",
            if solved { "solved" } else { "no solution" },
            self.tries() - before
        );
        solved
    }

    /// Search restricted to the empty cells among `points`. Used by the
    /// generator to complete one Samurai subgrid at a time.
    pub(crate) fn solve_region(&mut self, points: &[Point]) -> bool {
        let mut queue: VecDeque<Point> = points
            .iter()
            .copied()
            .filter(|p| self.cell(*p).map(|c| c.is_empty()).unwrap_or(false))
            .collect();
        self.solve_queue(&mut queue)
    }

    fn solve_queue(&mut self, queue: &mut VecDeque<Point>) -> bool {
        let head = match queue.pop_front() {
            None => return true,
            Some(point) => point,
        };
        self.bump_tries();

        let candidates = self.candidates(head);
        for value in candidates.iter() {
            if self.set_value(head, value).is_err() {
                continue;
            }
            self.resort_by_candidates(queue);
            if self.solve_queue(queue) {
                return true;
            }
            self.reset_cell(head);
        }
        queue.push_front(head);
        false
    }

    /// Explicit-stack variant of [`solve`](Puzzle::solve), for boards deep
    /// enough to make recursion a concern. Same ordering heuristics.
    pub fn solve_iterative(&mut self) -> bool {
        struct Frame {
            point: Point,
            values: MarkUp,
            next: u8,
            rest: Vec<Point>,
        }

        let mut pending = self.empty_points();
        let mut stack: Vec<Frame> = Vec::new();

        loop {
            if pending.is_empty() {
                return true;
            }
            self.bump_tries();
            let point = pending.remove(0);
            stack.push(Frame {
                point,
                values: self.candidates(point),
                next: 0,
                rest: pending,
            });

            // Advance the top frame; pop exhausted frames until one places.
            loop {
                let top = match stack.last_mut() {
                    Some(top) => top,
                    None => return false,
                };
                let mut placed = false;
                while let Some(value) = top.values.iter().find(|v| *v > top.next) {
                    top.next = value;
                    if self.set_value(top.point, value).is_ok() {
                        placed = true;
                        break;
                    }
                }
                if placed {
                    pending = top.rest.clone();
                    self.resort_slice(&mut pending);
                    break;
                }
                // Exhausted: undo the parent's placement and retry it.
                if let Some(frame) = stack.pop() {
                    pending = frame.rest;
                    pending.insert(0, frame.point);
                }
                match stack.last() {
                    Some(parent) => self.reset_cell(parent.point),
                    None => return false,
                }
            }
        }
    }

    /// Count solutions, stopping once `limit` is reached. The grid is
    /// restored exactly, locks and all, before returning.
    pub fn count_solutions(&mut self, limit: usize) -> usize {
        let mut queue: VecDeque<Point> = self.empty_points().into();
        let mut count = 0;
        self.count_queue(&mut queue, &mut count, limit);
        trace!("count_solutions: {} (limit {})", count, limit);
        count
    }

    /// True iff the puzzle has exactly one solution.
    pub fn has_unique_solution(&mut self) -> bool {
        self.count_solutions(2) == 1
    }

    /// Returns true to abort the search (limit reached).
    fn count_queue(&mut self, queue: &mut VecDeque<Point>, count: &mut usize, limit: usize) -> bool {
        let head = match queue.pop_front() {
            None => {
                *count += 1;
                return *count >= limit;
            }
            Some(point) => point,
        };
        self.bump_tries();

        let candidates = self.candidates(head);
        for value in candidates.iter() {
            if self.set_value(head, value).is_err() {
                continue;
            }
            self.resort_by_candidates(queue);
            let abort = self.count_queue(queue, count, limit);
            self.reset_cell(head);
            if abort {
                queue.push_front(head);
                return true;
            }
        }
        queue.push_front(head);
        false
    }

    /// All empty cells, in row-major order.
    fn empty_points(&self) -> Vec<Point> {
        self.cells()
            .filter(|(_, c)| c.is_empty())
            .map(|(p, _)| p)
            .collect()
    }

    /// Stable re-sort of the work queue ascending by candidate cardinality.
    fn resort_by_candidates(&self, queue: &mut VecDeque<Point>) {
        let mut rest: Vec<Point> = queue.drain(..).collect();
        self.resort_slice(&mut rest);
        queue.extend(rest);
    }

    fn resort_slice(&self, points: &mut [Point]) {
        points.sort_by_key(|p| self.candidates(*p).cardinality());
    }
}
