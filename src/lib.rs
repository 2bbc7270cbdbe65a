//! # maze_pathfinding
//!
//! Two services over a 2D rectangular grid: randomized
//! [Prim's-style](https://en.wikipedia.org/wiki/Maze_generation_algorithm#Iterative_randomized_Prim's_algorithm)
//! maze generation ([maze::generate]) and shortest-path search with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) under a 4- or
//! 8-directional movement model ([PathingGrid::find_path]). The two share the
//! [grid_util] grid primitives and nothing else: a generated [Maze] is one
//! valid input to a [PathingGrid].
//!
//! [PathingGrid] additionally tracks
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! so callers can answer reachability questions without running a search.

mod astar;
pub mod maze;
pub mod pathing_grid;


pub use crate::maze::Maze;
pub use crate::pathing_grid::{Heuristic, PathingGrid, SearchResult};

use grid_util::point::Point;
use thiserror::Error;

/// Cost of a cardinal (straight) step.
pub const C: i32 = 10;
/// Cost of a diagonal step, `round(sqrt(2) * C)`. Kept integral so path costs
/// stay exact.
pub const D: i32 = 14;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// Cardinal neighbour offsets in the fixed scan order: left, down, right, up.
/// Both maze generation and search use this order, which pins down which of
/// several equal-cost results is produced.
pub(crate) const CARDINAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
pub(crate) const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];

/// Errors for malformed inputs. An unreachable goal is not an error: it is an
/// empty [SearchResult::path].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid dimensions must both be positive.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A search endpoint lies outside the grid or on a wall.
    #[error("endpoint {0} is out of bounds or blocked")]
    InvalidEndpoint(Point),
}
