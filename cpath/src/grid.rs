use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

use crate::{array::Array2D, dims::Dims};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid size {0:?}, both rows and columns must be positive")]
    InvalidSize(Dims),
    #[error("wall {0:?} lies outside of the grid")]
    OutOfBounds(Dims),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which neighbors are discovered. Every search strategy inherits its tie-breaking
    /// from it, so it must stay fixed.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> Dims {
        match self {
            Self::Up => Dims(-1, 0),
            Self::Down => Dims(1, 0),
            Self::Left => Dims(0, -1),
            Self::Right => Dims(0, 1),
        }
    }
}

pub type Neighbors = SmallVec<[Dims; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pos: Dims,
    wall: bool,
    neighbors: Neighbors,
}

impl Cell {
    fn new(pos: Dims) -> Self {
        Cell {
            pos,
            wall: false,
            neighbors: Neighbors::new(),
        }
    }

    pub fn pos(&self) -> Dims {
        self.pos
    }

    pub fn is_wall(&self) -> bool {
        self.wall
    }

    /// Open orthogonal neighbors, in [`Direction::ALL`] order.
    pub fn neighbors(&self) -> &[Dims] {
        &self.neighbors
    }
}

/// Rectangular grid of cells with precomputed adjacency.
///
/// Immutable once built. Search strategies only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<Cell>,
}

impl Grid {
    pub fn build(size: Dims, walls: &[Dims]) -> Result<Grid, GridError> {
        if !size.all_positive() {
            return Err(GridError::InvalidSize(size));
        }

        let mut cells =
            Array2D::from_fn(size, Cell::new).ok_or(GridError::InvalidSize(size))?;

        for &wall in walls {
            cells
                .get_mut(wall)
                .ok_or(GridError::OutOfBounds(wall))?
                .wall = true;
        }

        // walls get their neighbor lists too, they are just never reached
        let neighbors = cells
            .iter_pos()
            .map(|pos| {
                Direction::ALL
                    .iter()
                    .map(|dir| pos + dir.offset())
                    .filter(|next| cells.get(*next).is_some_and(|cell| !cell.wall))
                    .collect::<Neighbors>()
            })
            .collect::<Vec<_>>();

        for (pos, list) in Dims::iter_fill(Dims::ZERO, size).zip(neighbors) {
            cells[pos].neighbors = list;
        }

        log::trace!(
            "built {}x{} grid with {} walls",
            size.0,
            size.1,
            walls.len()
        );

        Ok(Grid { cells })
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn rows(&self) -> i32 {
        self.size().0
    }

    pub fn columns(&self) -> i32 {
        self.size().1
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.contains(pos)
    }

    pub fn cell(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub fn is_wall(&self, pos: Dims) -> bool {
        self.cell(pos).is_some_and(Cell::is_wall)
    }

    /// Neighbors of the cell at `pos`, empty for positions outside of the grid.
    pub fn neighbors(&self, pos: Dims) -> &[Dims] {
        self.cell(pos).map(Cell::neighbors).unwrap_or(&[])
    }

    pub fn walls(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter().filter(|c| c.is_wall()).map(Cell::pos)
    }

    /// Renders the grid with a search result drawn over it.
    ///
    /// `S` and `E` mark the ends of the path, `*` the rest of it and `.` cells that were visited
    /// but are not on the path.
    pub fn render_with(&self, path: &[Dims], visited: &[Dims]) -> String {
        let mut marks: Array2D<Option<char>> =
            Array2D::new(None, self.rows() as usize, self.columns() as usize);
        for &pos in visited {
            if let Some(mark) = marks.get_mut(pos) {
                *mark = Some('.');
            }
        }
        for &pos in path {
            if let Some(mark) = marks.get_mut(pos) {
                *mark = Some('*');
            }
        }
        if let (Some(&first), Some(&last)) = (path.first(), path.last()) {
            if let Some(mark) = marks.get_mut(first) {
                *mark = Some('S');
            }
            if let Some(mark) = marks.get_mut(last) {
                *mark = Some('E');
            }
        }

        let mut out = String::new();
        for (cells, marks) in self.cells.rows().zip(marks.rows()) {
            out.push_str("| ");
            for (cell, mark) in cells.iter().zip(marks) {
                out.push(match (cell.wall, mark) {
                    (true, _) => 'x',
                    (false, Some(mark)) => *mark,
                    (false, None) => 'o',
                });
                out.push(' ');
            }
            out.push_str("|\n");
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            write!(f, "| ")?;
            for cell in row {
                write!(f, "{} ", if cell.wall { 'x' } else { 'o' })?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
