//! Maze generators.
//!
//! Every generator works on the same wall lattice: a `rows x columns` grid whose cells at odd row
//! and odd column ([path cells](Dims::is_path_cell)) are always open, and whose other cells are
//! walls unless the generator carves them. The output is the list of walls left standing, which
//! can be fed straight into [`Grid::build`](crate::grid::Grid::build).

mod depth_first_search;
mod ellers;
mod partition;
mod rnd_kruskals;
mod types;

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{array::Array2D, dims::Dims, registry::Registry};

pub use depth_first_search::DepthFirstSearch;
pub use ellers::{Ellers, DEFAULT_MAX_RETRIES};
pub use partition::Partition;
pub use rnd_kruskals::RndKruskals;
pub use types::Params;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Registry of the maze generators.
pub type GeneratorRegistry = Registry<dyn MazeGenerator>;

/// Smallest lattice that still holds a path cell enclosed by walls.
pub const MIN_SIZE: Dims = Dims(3, 3);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("invalid maze size {0:?}, it must be at least 3x3")]
    InvalidSize(Dims),
}

pub trait MazeGenerator: fmt::Debug + Sync + Send {
    /// Generates a perfect maze on a lattice of the given size and returns its walls in row-major
    /// order.
    fn generate(
        &self,
        size: Dims,
        rng: &mut Random,
        params: &Params,
    ) -> Result<Vec<Dims>, GenerationError>;
}

/// Registry with all built-in generators, Eller's algorithm being the default.
pub fn default_generators() -> GeneratorRegistry {
    let ellers: Arc<dyn MazeGenerator> = Arc::new(Ellers);

    let mut registry = Registry::with_default(ellers.clone());
    registry.register("ellers".to_string(), ellers);
    registry.register("kruskal".to_string(), Arc::new(RndKruskals));
    registry.register("dfs".to_string(), Arc::new(DepthFirstSearch));
    registry
}

/// Wall lattice being carved by a generator.
#[derive(Debug, Clone)]
pub struct Lattice {
    open: Array2D<bool>,
    removed: usize,
}

impl Lattice {
    pub fn new(size: Dims) -> Result<Self, GenerationError> {
        if size.0 < MIN_SIZE.0 || size.1 < MIN_SIZE.1 {
            return Err(GenerationError::InvalidSize(size));
        }

        let open = Array2D::from_fn(size, Dims::is_path_cell)
            .ok_or(GenerationError::InvalidSize(size))?;

        Ok(Self { open, removed: 0 })
    }

    pub fn size(&self) -> Dims {
        self.open.size()
    }

    pub fn path_rows(&self) -> impl Iterator<Item = i32> {
        (1..self.size().0).step_by(2)
    }

    pub fn path_cols(&self) -> impl Iterator<Item = i32> {
        (1..self.size().1).step_by(2)
    }

    /// Path cells, row by row.
    pub fn path_cells(&self) -> impl Iterator<Item = Dims> + '_ {
        self.path_rows()
            .flat_map(move |row| self.path_cols().map(move |col| Dims(row, col)))
    }

    pub fn path_cell_count(&self) -> usize {
        let Dims(rows, cols) = self.size();
        (rows / 2 * (cols / 2)) as usize
    }

    /// Dense index of a path cell, used to address it in a [`Partition`].
    pub fn cell_index(&self, pos: Dims) -> usize {
        debug_assert!(pos.is_path_cell());
        (pos.0 / 2 * (self.size().1 / 2) + pos.1 / 2) as usize
    }

    pub fn is_path_cell(&self, pos: Dims) -> bool {
        pos.is_path_cell() && self.open.contains(pos)
    }

    /// Path cells two steps away in each direction, in the usual neighbor order.
    pub fn path_neighbors(&self, pos: Dims) -> impl Iterator<Item = Dims> + '_ {
        crate::grid::Direction::ALL
            .into_iter()
            .map(move |dir| pos + dir.offset() * 2)
            .filter(|next| self.is_path_cell(*next))
    }

    pub fn remove_wall_between(&mut self, a: Dims, b: Dims) {
        let wall = a.midpoint(b);
        debug_assert!(!self.open[wall], "wall {wall:?} removed twice");
        self.open[wall] = true;
        self.removed += 1;
    }

    /// Unites the sets of two path cells, removing the wall between them if they were apart.
    ///
    /// Returns `false` if both already were in the same set.
    pub fn merge(&mut self, sets: &mut Partition, a: Dims, b: Dims) -> bool {
        if !sets.union(self.cell_index(a), self.cell_index(b)) {
            return false;
        }

        self.remove_wall_between(a, b);
        true
    }

    pub fn removed_walls(&self) -> usize {
        self.removed
    }

    pub fn into_walls(self) -> Vec<Dims> {
        self.open
            .iter_pos()
            .zip(self.open.iter())
            .filter_map(|(pos, &open)| (!open).then_some(pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_layout() {
        let lattice = Lattice::new(Dims(5, 6)).unwrap();

        assert_eq!(lattice.path_rows().collect::<Vec<_>>(), [1, 3]);
        assert_eq!(lattice.path_cols().collect::<Vec<_>>(), [1, 3, 5]);
        assert_eq!(lattice.path_cell_count(), 6);
        assert_eq!(lattice.path_cells().count(), 6);
        for (i, cell) in lattice.path_cells().enumerate() {
            assert_eq!(lattice.cell_index(cell), i);
        }

        assert_eq!(
            lattice.path_neighbors(Dims(1, 3)).collect::<Vec<_>>(),
            [Dims(3, 3), Dims(1, 1), Dims(1, 5)]
        );
    }

    #[test]
    fn untouched_lattice_is_all_walls() {
        let lattice = Lattice::new(Dims(3, 3)).unwrap();
        let walls = lattice.into_walls();
        assert_eq!(walls.len(), 8);
        assert!(!walls.contains(&Dims(1, 1)));
    }

    #[test]
    fn merging() {
        let mut lattice = Lattice::new(Dims(3, 5)).unwrap();
        let mut sets = Partition::new(lattice.path_cell_count());

        assert!(lattice.merge(&mut sets, Dims(1, 1), Dims(1, 3)));
        assert!(!lattice.merge(&mut sets, Dims(1, 3), Dims(1, 1)));
        assert_eq!(lattice.removed_walls(), 1);
        assert!(!lattice.into_walls().contains(&Dims(1, 2)));
    }

    #[test]
    fn too_small() {
        assert_eq!(
            Lattice::new(Dims(2, 9)).err(),
            Some(GenerationError::InvalidSize(Dims(2, 9)))
        );
        assert!(Lattice::new(Dims(3, -3)).is_err());
    }

    #[test]
    fn builtin_registry() {
        let registry = default_generators();
        for name in ["ellers", "kruskal", "dfs"] {
            assert!(registry.get(name).is_some(), "{name}");
        }
        assert!(registry.get("prim").is_none());
        assert!(registry.get_default().is_some());
    }
}
