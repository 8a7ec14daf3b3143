pub mod generator;
pub mod search;
pub mod tile;

use std::fmt;

use crate::engine::error::MazeError;
use tile::Cell;

/// A (row, col) coordinate inside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Square board of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub size: usize,
    pub cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize, fill: Cell) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Builds a grid from rows of cell codes. Rows must form a square.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MazeError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(MazeError::InvalidConfiguration(format!(
                    "row {r} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for &code in row {
                let cell = Cell::from_code(code).ok_or_else(|| {
                    MazeError::InvalidConfiguration(format!("unknown cell code {code}"))
                })?;
                cells.push(cell);
            }
        }
        Ok(Self { size, cells })
    }

    pub fn idx(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[self.idx(pos)]
    }

    pub fn set(&mut self, pos: Position, c: Cell) {
        let i = self.idx(pos);
        self.cells[i] = c;
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Applies a signed offset; `None` when the result leaves the grid.
    pub fn offset(&self, pos: Position, dr: i32, dc: i32) -> Option<Position> {
        let row = pos.row.checked_add_signed(dr as isize)?;
        let col = pos.col.checked_add_signed(dc as isize)?;
        let next = Position::new(row, col);
        self.contains(next).then_some(next)
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.contains(pos) && self.get(pos).is_walkable()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }

    pub fn count(&self, c: Cell) -> usize {
        self.cells.iter().filter(|&&x| x == c).count()
    }

    pub fn find(&self, c: Cell) -> Option<Position> {
        self.positions().find(|&p| self.get(p) == c)
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    /// One line per row, cell codes in brackets: `[1, 0, 2]`.
    pub fn render_codes(&self) -> String {
        let mut out = String::new();
        for r in 0..self.size {
            let codes: Vec<String> = self.row(r).iter().map(|c| c.code().to_string()).collect();
            out.push('[');
            out.push_str(&codes.join(", "));
            out.push_str("]\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_inside() {
        let g = Grid::new(3, Cell::Open);
        let origin = Position::new(0, 0);
        assert_eq!(g.offset(origin, -1, 0), None);
        assert_eq!(g.offset(origin, 0, -1), None);
        assert_eq!(g.offset(origin, 1, 0), Some(Position::new(1, 0)));
        assert_eq!(g.offset(Position::new(2, 2), 0, 1), None);
    }

    #[test]
    fn from_rows_rejects_ragged_and_unknown() {
        assert!(Grid::from_rows(&[vec![1, 1], vec![1]]).is_err());
        assert!(Grid::from_rows(&[vec![1, 3], vec![1, 1]]).is_err());
        let g = Grid::from_rows(&[vec![1, 0], vec![2, 8]]).unwrap();
        assert_eq!(g.get(Position::new(1, 0)), Cell::Entrance);
        assert_eq!(g.find(Cell::Exit), Some(Position::new(1, 1)));
    }

    #[test]
    fn render_codes_prints_rows() {
        let g = Grid::from_rows(&[vec![1, 0], vec![2, 8]]).unwrap();
        assert_eq!(g.render_codes(), "[1, 0]\n[2, 8]\n");
    }
}
