mod astar;
mod bfs;
mod dfs;

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{array::Array2D, dims::Dims, grid::Grid};

pub use astar::{AStar, Cost, Heuristic, ScoreMap};
pub use bfs::BreadthFirst;
pub use dfs::DepthFirst;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("cell {0:?} lies outside of the grid")]
    OutOfBounds(Dims),
    #[error("cell {0:?} is a wall")]
    OnWall(Dims),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown search strategy '{0}'")]
pub struct UnknownStrategy(pub String);

/// Outcome of a single search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Route from start to end, both inclusive. Empty if the end is unreachable.
    pub path: Vec<Dims>,
    /// Cells in the order they were expanded, each at most once.
    pub visited: Vec<Dims>,
}

impl SearchResult {
    pub fn not_found(visited: Vec<Dims>) -> Self {
        Self {
            path: Vec::new(),
            visited,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves along the path, `None` when no path was found.
    pub fn hops(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

pub trait PathFinder: fmt::Debug + Send + Sync {
    /// Searches `grid` from `start` to `end`.
    ///
    /// # Panics
    ///
    /// Panics if `start` lies outside of the grid. Use [`Strategy::solve`] for unvalidated input.
    fn search(&self, grid: &Grid, start: Dims, end: Dims) -> SearchResult;
}

/// Selects one of the search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    BreadthFirst,
    DepthFirst,
    AStar(Heuristic),
}

impl Strategy {
    /// Runs the search without validating the ends, see [`PathFinder::search`].
    pub fn search(&self, grid: &Grid, start: Dims, end: Dims) -> SearchResult {
        match *self {
            Strategy::BreadthFirst => BreadthFirst.search(grid, start, end),
            Strategy::DepthFirst => DepthFirst.search(grid, start, end),
            Strategy::AStar(heuristic) => AStar::new(heuristic).search(grid, start, end),
        }
    }

    /// Checks that both ends are usable cells and runs the search.
    pub fn solve(&self, grid: &Grid, start: Dims, end: Dims) -> Result<SearchResult, SearchError> {
        for pos in [start, end] {
            if !grid.is_in_bounds(pos) {
                return Err(SearchError::OutOfBounds(pos));
            }
            if grid.is_wall(pos) {
                return Err(SearchError::OnWall(pos));
            }
        }

        let result = self.search(grid, start, end);
        match result.hops() {
            Some(hops) => log::debug!(
                "{self} from {start:?} to {end:?}: {} visited, {hops} moves",
                result.visited.len()
            ),
            None => log::debug!(
                "{self} from {start:?} to {end:?}: {} visited, unreachable",
                result.visited.len()
            ),
        }

        Ok(result)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => write!(f, "bfs"),
            Strategy::DepthFirst => write!(f, "dfs"),
            Strategy::AStar(Heuristic::Manhattan) => write!(f, "astar"),
            Strategy::AStar(Heuristic::Euclidean) => write!(f, "astar-euclidean"),
        }
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Strategy::BreadthFirst,
            "dfs" | "depth-first" => Strategy::DepthFirst,
            "astar" | "a*" | "astar-manhattan" => Strategy::AStar(Heuristic::Manhattan),
            "astar-euclidean" => Strategy::AStar(Heuristic::Euclidean),
            _ => return Err(UnknownStrategy(s.to_string())),
        })
    }
}

/// Per-call scratch storage sized like the grid.
fn scratch<T: Clone>(grid: &Grid, item: T) -> Array2D<T> {
    Array2D::new(item, grid.rows() as usize, grid.columns() as usize)
}

/// Walks back-pointers from `end` until a cell without a parent, returns the route start first.
fn reconstruct_path(came_from: &Array2D<Option<Dims>>, end: Dims) -> Vec<Dims> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(prev) = came_from[current] {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strategy() {
        assert_eq!("BFS".parse(), Ok(Strategy::BreadthFirst));
        assert_eq!("DFS".parse(), Ok(Strategy::DepthFirst));
        assert_eq!("Astar".parse(), Ok(Strategy::AStar(Heuristic::Manhattan)));
        assert_eq!(
            "astar-euclidean".parse(),
            Ok(Strategy::AStar(Heuristic::Euclidean))
        );
        assert_eq!(
            "dijkstra".parse::<Strategy>(),
            Err(UnknownStrategy("dijkstra".into()))
        );

        for strategy in [
            Strategy::BreadthFirst,
            Strategy::DepthFirst,
            Strategy::AStar(Heuristic::Manhattan),
            Strategy::AStar(Heuristic::Euclidean),
        ] {
            assert_eq!(strategy.to_string().parse(), Ok(strategy));
        }
    }

    #[test]
    fn solve_validates_ends() {
        let grid = Grid::build(Dims(3, 3), &[Dims(1, 1)]).unwrap();
        let strategy = Strategy::default();

        assert_eq!(
            strategy.solve(&grid, Dims(0, 0), Dims(3, 0)),
            Err(SearchError::OutOfBounds(Dims(3, 0)))
        );
        assert_eq!(
            strategy.solve(&grid, Dims(-1, 0), Dims(2, 2)),
            Err(SearchError::OutOfBounds(Dims(-1, 0)))
        );
        assert_eq!(
            strategy.solve(&grid, Dims(1, 1), Dims(2, 2)),
            Err(SearchError::OnWall(Dims(1, 1)))
        );
        assert!(strategy.solve(&grid, Dims(0, 0), Dims(2, 2)).is_ok());
    }

    #[test]
    #[should_panic(expected = "Index out of bounds")]
    fn unvalidated_search_panics_outside_grid() {
        let grid = Grid::build(Dims(2, 2), &[]).unwrap();
        Strategy::BreadthFirst.search(&grid, Dims(5, 0), Dims(1, 1));
    }

    #[test]
    fn path_reconstruction() {
        let mut came_from = Array2D::new(None, 2, 2);
        came_from[Dims(0, 1)] = Some(Dims(0, 0));
        came_from[Dims(1, 1)] = Some(Dims(0, 1));

        assert_eq!(
            reconstruct_path(&came_from, Dims(1, 1)),
            [Dims(0, 0), Dims(0, 1), Dims(1, 1)]
        );
        assert_eq!(reconstruct_path(&came_from, Dims(0, 0)), [Dims(0, 0)]);
    }

    #[test]
    fn hops() {
        let result = SearchResult {
            path: vec![Dims(0, 0), Dims(0, 1)],
            visited: vec![],
        };
        assert_eq!(result.hops(), Some(1));
        assert_eq!(SearchResult::not_found(vec![]).hops(), None);
    }
}
