//! Reachability between two cells over 4-connected walkable cells.
//!
//! Two searches are available. [`is_reachable`] walks a single path and
//! unmarks cells when it backtracks out of them, so `visited` only ever holds
//! the current path. [`flood_fill_reachable`] never unmarks and is linear in
//! the grid size. Both give the same answer.

use crate::map::{Grid, Position};

/// Neighbor order: up, down, left, right.
const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Backtracking revisits cells through alternate routes and can take
/// exponential time once an unreachable target sits in a large open region;
/// flood fill is linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SearchStrategy {
    /// Depth-first path search that unmarks cells on backtrack.
    Backtracking,
    /// Depth-first flood fill with permanent marks.
    #[default]
    FloodFill,
}

impl SearchStrategy {
    pub fn reachable(self, grid: &Grid, source: Position, target: Position) -> bool {
        let mut visited = Visited::new(grid.size);
        let found = match self {
            SearchStrategy::Backtracking => is_reachable(grid, source, target, &mut visited),
            SearchStrategy::FloodFill => flood_fill_reachable(grid, source, target, &mut visited),
        };
        tracing::trace!(strategy = ?self, %source, %target, found, marked = visited.marked_count(), "search finished");
        found
    }
}

/// Boolean marks parallel to a grid.
#[derive(Debug, Clone)]
pub struct Visited {
    size: usize,
    marks: Vec<bool>,
}

impl Visited {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            marks: vec![false; size * size],
        }
    }

    fn idx(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    pub fn is_marked(&self, pos: Position) -> bool {
        self.marks[self.idx(pos)]
    }

    pub fn mark(&mut self, pos: Position) {
        let i = self.idx(pos);
        self.marks[i] = true;
    }

    pub fn unmark(&mut self, pos: Position) {
        let i = self.idx(pos);
        self.marks[i] = false;
    }

    pub fn marked_count(&self) -> usize {
        self.marks.iter().filter(|&&m| m).count()
    }
}

enum Visit {
    Found,
    Skip,
    Enter,
}

/// Order of checks: visited, target, blocked. A blocked target is still
/// "found" once a neighbor of it is reached.
fn visit(grid: &Grid, pos: Position, target: Position, visited: &Visited) -> Visit {
    if visited.is_marked(pos) {
        Visit::Skip
    } else if pos == target {
        Visit::Found
    } else if !grid.get(pos).is_walkable() {
        Visit::Skip
    } else {
        Visit::Enter
    }
}

/// Backtracking depth-first search with an explicit stack.
///
/// Each stack frame holds a cell on the current path and the index of the
/// next neighbor to try. A frame whose neighbors are exhausted is popped and
/// its mark cleared. On success the marks of the found path are left in
/// `visited`.
pub fn is_reachable(grid: &Grid, source: Position, target: Position, visited: &mut Visited) -> bool {
    if !grid.contains(source) || !grid.contains(target) {
        return false;
    }

    match visit(grid, source, target, visited) {
        Visit::Found => return true,
        Visit::Skip => return false,
        Visit::Enter => visited.mark(source),
    }

    let mut stack: Vec<(Position, usize)> = vec![(source, 0)];

    while let Some(&(pos, next)) = stack.last() {
        if next == NEIGHBORS.len() {
            visited.unmark(pos);
            stack.pop();
            continue;
        }
        let top = stack.len() - 1;
        stack[top].1 += 1;

        let (dr, dc) = NEIGHBORS[next];
        let Some(candidate) = grid.offset(pos, dr, dc) else {
            continue;
        };
        match visit(grid, candidate, target, visited) {
            Visit::Found => return true,
            Visit::Skip => {}
            Visit::Enter => {
                visited.mark(candidate);
                stack.push((candidate, 0));
            }
        }
    }

    false
}

/// Flood fill from `source`; marks are never cleared.
pub fn flood_fill_reachable(
    grid: &Grid,
    source: Position,
    target: Position,
    visited: &mut Visited,
) -> bool {
    if !grid.contains(source) || !grid.contains(target) {
        return false;
    }

    match visit(grid, source, target, visited) {
        Visit::Found => return true,
        Visit::Skip => return false,
        Visit::Enter => visited.mark(source),
    }

    let mut stack = vec![source];
    while let Some(pos) = stack.pop() {
        for (dr, dc) in NEIGHBORS {
            let Some(candidate) = grid.offset(pos, dr, dc) else {
                continue;
            };
            match visit(grid, candidate, target, visited) {
                Visit::Found => return true,
                Visit::Skip => {}
                Visit::Enter => {
                    visited.mark(candidate);
                    stack.push(candidate);
                }
            }
        }
    }

    false
}
