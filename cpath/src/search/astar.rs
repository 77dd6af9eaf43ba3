use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{array::Array2D, dims::Dims, grid::Grid};

use super::{reconstruct_path, scratch, PathFinder, SearchResult};

pub type Cost = f64;

/// Best known cost per cell, `None` until the cell is reached.
pub type ScoreMap = Array2D<Option<Cost>>;

/// Distance estimate and step cost used by [`AStar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// `|dRow| + |dCol|` for both the estimate and the step cost.
    #[default]
    Manhattan,
    /// Straight line distance for both the estimate and the step cost.
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: Dims, to: Dims) -> Cost {
        match self {
            Heuristic::Manhattan => Cost::from(from.manhattan(to)),
            Heuristic::Euclidean => from.euclidean(to),
        }
    }

    /// Cost of a single move between adjacent cells. Equal to 1 for every orthogonal move.
    pub fn edge_cost(self, from: Dims, to: Dims) -> Cost {
        self.estimate(from, to)
    }
}

/// Open set entry.
///
/// Ordered so that [`BinaryHeap`] pops the lowest `f` first, then the lowest `h`, then the
/// smallest position.
#[derive(Debug, Clone, Copy)]
struct Node {
    f: Cost,
    h: Cost,
    pos: Dims,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

/// A* search, finds a cheapest route according to its [`Heuristic`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AStar {
    heuristic: Heuristic,
}

impl AStar {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }
}

impl PathFinder for AStar {
    fn search(&self, grid: &Grid, start: Dims, end: Dims) -> SearchResult {
        let h = |pos: Dims| self.heuristic.estimate(pos, end);

        let mut g_score: ScoreMap = scratch(grid, None);
        let mut f_score: ScoreMap = scratch(grid, None);
        let mut came_from = scratch(grid, None);
        let mut closed = scratch(grid, false);
        let mut open = BinaryHeap::new();
        let mut visited = Vec::new();

        g_score[start] = Some(0.0);
        f_score[start] = Some(h(start));
        open.push(Node {
            f: h(start),
            h: h(start),
            pos: start,
        });

        while let Some(Node { pos: current, .. }) = open.pop() {
            // superseded entries of already expanded cells
            if closed[current] {
                continue;
            }
            closed[current] = true;
            visited.push(current);

            if current == end {
                return SearchResult {
                    path: reconstruct_path(&came_from, end),
                    visited,
                };
            }

            let Some(current_g) = g_score[current] else {
                continue;
            };

            for &next in grid.neighbors(current) {
                if closed[next] {
                    continue;
                }

                let tentative = current_g + self.heuristic.edge_cost(current, next);
                if g_score[next].map_or(true, |g| tentative < g) {
                    let next_h = h(next);
                    came_from[next] = Some(current);
                    g_score[next] = Some(tentative);
                    f_score[next] = Some(tentative + next_h);
                    open.push(Node {
                        f: tentative + next_h,
                        h: next_h,
                        pos: next,
                    });
                }
            }
        }

        log::trace!("open set exhausted after {} expansions", visited.len());
        SearchResult::not_found(visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::BreadthFirst;

    #[test]
    fn node_order() {
        let mut heap = BinaryHeap::new();
        heap.push(Node { f: 4.0, h: 2.0, pos: Dims(0, 0) });
        heap.push(Node { f: 3.0, h: 3.0, pos: Dims(2, 2) });
        heap.push(Node { f: 3.0, h: 1.0, pos: Dims(1, 1) });
        heap.push(Node { f: 3.0, h: 1.0, pos: Dims(0, 5) });

        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|n| n.pos)).collect();
        assert_eq!(order, [Dims(0, 5), Dims(1, 1), Dims(2, 2), Dims(0, 0)]);
    }

    #[test]
    fn straight_line() {
        let grid = Grid::build(Dims(1, 5), &[]).unwrap();
        let result = AStar::default().search(&grid, Dims(0, 0), Dims(0, 4));

        assert_eq!(result.path, (0..5).map(|c| Dims(0, c)).collect::<Vec<_>>());
        // the estimate is exact, nothing off the path is expanded
        assert_eq!(result.visited, result.path);
    }

    #[test]
    fn wall_row_with_gap() {
        let walls = [Dims(1, 1), Dims(1, 2), Dims(1, 3), Dims(1, 4), Dims(1, 5)];
        let grid = Grid::build(Dims(6, 6), &walls).unwrap();

        for heuristic in [Heuristic::Manhattan, Heuristic::Euclidean] {
            let result = AStar::new(heuristic).search(&grid, Dims(0, 0), Dims(5, 5));
            assert_eq!(result.hops(), Some(10), "{heuristic:?}");
            assert_eq!(result.path[1], Dims(1, 0));
        }
    }

    #[test]
    fn matches_breadth_first_length() {
        let walls = [
            Dims(0, 2),
            Dims(1, 2),
            Dims(2, 2),
            Dims(3, 4),
            Dims(4, 1),
            Dims(4, 2),
            Dims(4, 3),
            Dims(4, 4),
        ];
        let grid = Grid::build(Dims(6, 6), &walls).unwrap();

        for (start, end) in [
            (Dims(0, 0), Dims(0, 5)),
            (Dims(5, 0), Dims(2, 3)),
            (Dims(3, 3), Dims(5, 5)),
        ] {
            let expected = BreadthFirst.search(&grid, start, end).hops();
            assert!(expected.is_some());
            for heuristic in [Heuristic::Manhattan, Heuristic::Euclidean] {
                let result = AStar::new(heuristic).search(&grid, start, end);
                assert_eq!(result.hops(), expected, "{start:?} -> {end:?}, {heuristic:?}");
            }
        }
    }

    #[test]
    fn unreachable() {
        let grid = Grid::build(Dims(3, 3), &[Dims(1, 0), Dims(1, 1), Dims(1, 2)]).unwrap();
        let result = AStar::default().search(&grid, Dims(0, 0), Dims(2, 2));

        assert!(result.path.is_empty());
        let mut visited = result.visited;
        visited.sort();
        assert_eq!(visited, [Dims(0, 0), Dims(0, 1), Dims(0, 2)]);
    }

    #[test]
    fn start_is_end() {
        let grid = Grid::build(Dims(3, 3), &[]).unwrap();
        let result = AStar::default().search(&grid, Dims(2, 0), Dims(2, 0));

        assert_eq!(result.path, [Dims(2, 0)]);
        assert_eq!(result.visited, [Dims(2, 0)]);
    }

    #[test]
    fn unit_edges() {
        for heuristic in [Heuristic::Manhattan, Heuristic::Euclidean] {
            assert_eq!(heuristic.edge_cost(Dims(2, 2), Dims(1, 2)), 1.0);
            assert_eq!(heuristic.edge_cost(Dims(2, 2), Dims(2, 3)), 1.0);
        }
    }
}
