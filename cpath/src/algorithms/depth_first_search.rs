use rand::seq::{IteratorRandom as _, SliceRandom as _};
use smallvec::SmallVec;

use crate::{array::Array2D, dims::Dims};

use super::{GenerationError, Lattice, MazeGenerator, Params, Random};

/// Randomized depth-first backtracker. Produces long, winding corridors.
///
/// Params:
/// - `no_rng`: start in the first path cell and always carve to the first free neighbor
#[derive(Debug)]
pub struct DepthFirstSearch;

impl MazeGenerator for DepthFirstSearch {
    fn generate(
        &self,
        size: Dims,
        rng: &mut Random,
        params: &Params,
    ) -> Result<Vec<Dims>, GenerationError> {
        let mut lattice = Lattice::new(size)?;
        let no_rng = params.parsed_or_warn("no_rng", false);

        let mut visited = Array2D::new(false, size.0 as usize, size.1 as usize);
        let mut stack = Vec::with_capacity(lattice.path_cell_count());

        let first = if no_rng {
            lattice.path_cells().next()
        } else {
            lattice.path_cells().choose(rng)
        };
        let Some(start) = first else {
            return Err(GenerationError::InvalidSize(size));
        };

        visited[start] = true;
        stack.push(start);
        while let Some(current) = stack.pop() {
            let unvisited_neighbors = lattice
                .path_neighbors(current)
                .filter(|cell| !visited[*cell])
                .collect::<SmallVec<[_; 4]>>();

            let next = if no_rng {
                unvisited_neighbors.first()
            } else {
                unvisited_neighbors.choose(rng)
            };

            if let Some(&next) = next {
                stack.push(current);
                lattice.remove_wall_between(current, next);
                visited[next] = true;
                stack.push(next);
            }
        }

        Ok(lattice.into_walls())
    }
}
