use std::collections::VecDeque;

use crate::{dims::Dims, grid::Grid};

use super::{reconstruct_path, scratch, PathFinder, SearchResult};

/// Breadth-first search, finds a route with the fewest moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl PathFinder for BreadthFirst {
    fn search(&self, grid: &Grid, start: Dims, end: Dims) -> SearchResult {
        let mut discovered = scratch(grid, false);
        let mut came_from = scratch(grid, None);
        let mut visited = Vec::new();
        let mut queue = VecDeque::new();

        discovered[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            visited.push(current);

            if current == end {
                return SearchResult {
                    path: reconstruct_path(&came_from, end),
                    visited,
                };
            }

            for &next in grid.neighbors(current) {
                if !discovered[next] {
                    discovered[next] = true;
                    came_from[next] = Some(current);
                    queue.push_back(next);
                }
            }
        }

        SearchResult::not_found(visited)
    }
}
