use std::ops;

use crate::dims::Dims;

/// Dense row-major 2D storage indexed by [`Dims`] in `(row, column)` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T> Array2D<T> {
    pub fn size(&self) -> Dims {
        Dims(self.rows as i32, self.columns as i32)
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        let Dims(row, col) = pos;
        // negative coordinates wrap around and fail the bounds check
        let (row, col) = (row as usize, col as usize);

        if row >= self.rows || col >= self.columns {
            return None;
        }

        Some(row * self.columns + col)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        Some(Dims((idx / self.columns) as i32, (idx % self.columns) as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn contains(&self, pos: Dims) -> bool {
        self.dim_to_idx(pos).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    /// Iterates rows as slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.buf.chunks(self.columns.max(1))
    }

    /// Builds the array by calling `f` for every position, row by row.
    ///
    /// Returns `None` if the size is negative in any direction.
    pub fn from_fn(size: Dims, mut f: impl FnMut(Dims) -> T) -> Option<Self> {
        if !size.all_non_negative() {
            return None;
        }

        let buf = Dims::iter_fill(Dims::ZERO, size).map(&mut f).collect();
        Some(Self {
            buf,
            rows: size.0 as usize,
            columns: size.1 as usize,
        })
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, rows: usize, columns: usize) -> Self {
        Self {
            buf: vec![item; rows * columns],
            rows,
            columns,
        }
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.get(index).expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.get_mut(index).expect("Index out of bounds")
    }
}
