use crate::{dims::Dims, grid::Grid};

use super::{reconstruct_path, scratch, PathFinder, SearchResult};

/// Depth-first search.
///
/// The expanded check happens when a cell is popped, not when it is pushed, so a cell can sit on
/// the stack several times. Only its first pop counts, later ones are dropped without being
/// recorded. Each stack entry remembers who pushed it, which gives the returned route. It is a
/// route, not necessarily the shortest one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl PathFinder for DepthFirst {
    fn search(&self, grid: &Grid, start: Dims, end: Dims) -> SearchResult {
        let mut expanded = scratch(grid, false);
        let mut came_from = scratch(grid, None);
        let mut visited = Vec::new();
        let mut stack: Vec<(Dims, Option<Dims>)> = vec![(start, None)];

        while let Some((current, parent)) = stack.pop() {
            if expanded[current] {
                continue;
            }
            expanded[current] = true;
            came_from[current] = parent;
            visited.push(current);

            if current == end {
                return SearchResult {
                    path: reconstruct_path(&came_from, end),
                    visited,
                };
            }

            stack.extend(
                grid.neighbors(current)
                    .iter()
                    .filter(|next| !expanded[**next])
                    .map(|&next| (next, Some(current))),
            );
        }

        SearchResult::not_found(visited)
    }
}
