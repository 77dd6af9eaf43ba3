use rand::seq::SliceRandom as _;

use crate::dims::Dims;

use super::{GenerationError, Lattice, MazeGenerator, Params, Partition, Random};

/// Randomized Kruskal's algorithm.
///
/// Params:
/// - `no_rng`: keep the walls in lattice order instead of shuffling them
#[derive(Debug)]
pub struct RndKruskals;

impl MazeGenerator for RndKruskals {
    fn generate(
        &self,
        size: Dims,
        rng: &mut Random,
        params: &Params,
    ) -> Result<Vec<Dims>, GenerationError> {
        let mut lattice = Lattice::new(size)?;
        let mut sets = Partition::new(lattice.path_cell_count());

        let mut walls: Vec<(Dims, Dims)> = Vec::new();
        for pos in lattice.path_cells() {
            for next in [pos + Dims(0, 2), pos + Dims(2, 0)] {
                if lattice.is_path_cell(next) {
                    walls.push((pos, next));
                }
            }
        }

        if !params.parsed_or_warn("no_rng", false) {
            walls.shuffle(rng);
        }

        // popping from the back, so reverse to keep lattice order without rng
        walls.reverse();
        while let Some((from, to)) = walls.pop() {
            lattice.merge(&mut sets, from, to);

            if sets.set_count() == 1 {
                break;
            }
        }

        Ok(lattice.into_walls())
    }
}
