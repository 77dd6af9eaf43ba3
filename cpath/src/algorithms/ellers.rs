use hashbrown::HashSet;
use rand::Rng as _;

use crate::dims::Dims;

use super::{GenerationError, Lattice, MazeGenerator, Params, Partition, Random};

/// Cap on vertical pass attempts per row, before the missing connections are forced.
pub const DEFAULT_MAX_RETRIES: usize = 1000;

/// Eller's algorithm.
///
/// Builds the maze one path row at a time, keeping only the set membership of the current row
/// in mind:
///
/// 1. adjacent cells of the row in different sets are joined at random,
/// 2. every set of the row gets at least one random connection to the row below,
/// 3. the last row joins every pair of adjacent cells still in different sets.
///
/// Cells only ever get joined across different sets, so the result is a spanning tree.
///
/// Params:
/// - `max_retries`: how many times the vertical pass is repeated, before connections are forced
#[derive(Debug)]
pub struct Ellers;

impl MazeGenerator for Ellers {
    fn generate(
        &self,
        size: Dims,
        rng: &mut Random,
        params: &Params,
    ) -> Result<Vec<Dims>, GenerationError> {
        let max_retries = params.parsed_or_warn("max_retries", DEFAULT_MAX_RETRIES);

        let mut lattice = Lattice::new(size)?;
        let mut sets = Partition::new(lattice.path_cell_count());

        let rows: Vec<i32> = lattice.path_rows().collect();
        let cols: Vec<i32> = lattice.path_cols().collect();

        for (i, &row) in rows.iter().enumerate() {
            for pair in cols.windows(2) {
                if rng.gen::<bool>() {
                    lattice.merge(&mut sets, Dims(row, pair[0]), Dims(row, pair[1]));
                }
            }

            if i + 1 == rows.len() {
                for pair in cols.windows(2) {
                    lattice.merge(&mut sets, Dims(row, pair[0]), Dims(row, pair[1]));
                }
                break;
            }

            connect_down(&mut lattice, &mut sets, rng, row, &cols, max_retries);
        }

        debug_assert_eq!(sets.set_count(), 1);
        debug_assert_eq!(lattice.removed_walls(), lattice.path_cell_count() - 1);

        Ok(lattice.into_walls())
    }
}

/// Vertical pass of a single row.
///
/// Every set of the row needs at least one connection down. The first attempt flips a coin for
/// each cell, every retry flips again only for the cells of sets that are still cut off. Nothing
/// is forced while retries remain; only once `max_retries` attempts have failed does the first
/// cell of each missing set get connected.
///
/// The cells below are still untouched, so every connection is a merge with a fresh set.
fn connect_down(
    lattice: &mut Lattice,
    sets: &mut Partition,
    rng: &mut Random,
    row: i32,
    cols: &[i32],
    max_retries: usize,
) {
    let mut connected = vec![false; cols.len()];
    let mut missing: Option<HashSet<usize>> = None;
    let mut attempts = 0;

    loop {
        for (j, &col) in cols.iter().enumerate() {
            if connected[j] {
                continue;
            }

            // retries only flip for the sets that are still cut off
            if let Some(missing) = &missing {
                let set = sets.find(lattice.cell_index(Dims(row, col)));
                if !missing.contains(&set) {
                    continue;
                }
            }

            if rng.gen::<bool>() {
                lattice.merge(sets, Dims(row, col), Dims(row + 2, col));
                connected[j] = true;
            }
        }
        attempts += 1;

        let still_missing = missing_sets(lattice, sets, row, cols, &connected);
        if still_missing.is_empty() {
            return;
        }
        missing = Some(still_missing);

        if attempts >= max_retries {
            break;
        }
    }

    let missing = missing.unwrap_or_default();
    log::debug!(
        "row {row}: forcing vertical connections for {} sets after {attempts} attempts",
        missing.len()
    );

    let mut forced = HashSet::new();
    for &col in cols {
        let set = sets.find(lattice.cell_index(Dims(row, col)));
        if missing.contains(&set) && forced.insert(set) {
            lattice.merge(sets, Dims(row, col), Dims(row + 2, col));
        }
    }
}

/// Sets of the row which have no connection to the row below yet.
fn missing_sets(
    lattice: &Lattice,
    sets: &mut Partition,
    row: i32,
    cols: &[i32],
    connected: &[bool],
) -> HashSet<usize> {
    let mut reached = HashSet::new();
    let mut present = HashSet::new();

    for (j, &col) in cols.iter().enumerate() {
        let set = sets.find(lattice.cell_index(Dims(row, col)));
        present.insert(set);
        if connected[j] {
            reached.insert(set);
        }
    }

    present.difference(&reached).copied().collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    fn generate(size: Dims, seed: u64, params: &Params) -> Vec<Dims> {
        Ellers
            .generate(size, &mut Random::seed_from_u64(seed), params)
            .unwrap()
    }

    fn removed(size: Dims, walls: &[Dims]) -> usize {
        let lattice_walls = Dims::iter_fill(Dims::ZERO, size)
            .filter(|pos| !pos.is_path_cell())
            .count();
        lattice_walls - walls.len()
    }

    #[test]
    fn spanning_tree_wall_count() {
        for (size, cells) in [
            (Dims(3, 3), 1),
            (Dims(3, 9), 4),
            (Dims(9, 3), 4),
            (Dims(7, 10), 15),
            (Dims(21, 21), 100),
        ] {
            for seed in 0..20 {
                let walls = generate(size, seed, &Params::default());
                assert_eq!(removed(size, &walls), cells - 1, "{size:?} seed {seed}");
            }
        }
    }

    #[test]
    fn path_cells_stay_open() {
        let walls = generate(Dims(11, 11), 7, &Params::default());
        assert!(walls.iter().all(|w| !w.is_path_cell()));
        // the outer border never opens
        for i in 0..11 {
            for pos in [Dims(0, i), Dims(10, i), Dims(i, 0), Dims(i, 10)] {
                assert!(walls.contains(&pos), "{pos:?}");
            }
        }
    }

    #[test]
    fn deterministic() {
        let a = generate(Dims(15, 15), 42, &Params::default());
        let b = generate(Dims(15, 15), 42, &Params::default());
        assert_eq!(a, b);
    }

    #[test]
    fn forced_connections() {
        // a single attempt leaves most rows to the forcing step
        let params = Params::new().with("max_retries", 1);
        for seed in 0..20 {
            let walls = generate(Dims(13, 13), seed, &params);
            assert_eq!(removed(Dims(13, 13), &walls), 35);
        }
    }

    #[test]
    fn vertical_pass_connects_every_set() {
        for max_retries in [1, DEFAULT_MAX_RETRIES] {
            for seed in 0..10 {
                let mut lattice = Lattice::new(Dims(5, 11)).unwrap();
                let mut sets = Partition::new(lattice.path_cell_count());
                let cols: Vec<i32> = lattice.path_cols().collect();
                lattice.merge(&mut sets, Dims(1, 1), Dims(1, 3));

                let mut rng = Random::seed_from_u64(seed);
                connect_down(&mut lattice, &mut sets, &mut rng, 1, &cols, max_retries);

                for &col in &cols {
                    let set = sets.find(lattice.cell_index(Dims(1, col)));
                    let reached = cols
                        .iter()
                        .any(|&below| sets.find(lattice.cell_index(Dims(3, below))) == set);
                    assert!(reached, "column {col}, seed {seed}, {max_retries} retries");
                }
            }
        }
    }

    #[test]
    fn too_small() {
        let result = Ellers.generate(Dims(2, 5), &mut Random::seed_from_u64(0), &Params::new());
        assert_eq!(result, Err(GenerationError::InvalidSize(Dims(2, 5))));
    }
}
