//! The search front end: grid occupancy, movement model, heuristics and
//! connected components.

use crate::astar::astar;
use crate::{GridError, C, CARDINAL_OFFSETS, D, DIAGONAL_OFFSETS, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Distance estimate used to guide the search towards the goal. Each variant
/// is admissible under the movement model it is named for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// `C * (|dx| + |dy|)`, for 4-directional movement.
    Manhattan,
    /// `C * (|dx| + |dy|) + (D - 2C) * min(|dx|, |dy|)`, the octile distance
    /// for 8-directional movement.
    Diagonal,
}

impl Heuristic {
    /// The estimate matching a movement model: [Heuristic::Diagonal] iff
    /// diagonal moves are allowed.
    pub fn for_movement(allow_diagonal_move: bool) -> Heuristic {
        if allow_diagonal_move {
            Heuristic::Diagonal
        } else {
            Heuristic::Manhattan
        }
    }

    /// Estimated cost of moving from `from` to `to`.
    pub fn estimate(self, from: Point, to: Point) -> i32 {
        let dx = (from.x - to.x).abs();
        let dy = (from.y - to.y).abs();
        match self {
            Heuristic::Manhattan => C * (dx + dy),
            Heuristic::Diagonal => C * (dx + dy) + (D - 2 * C) * dx.min(dy),
        }
    }
}

/// Outcome of [PathingGrid::find_path].
///
/// An unreachable goal is not an error: it yields an empty [path](Self::path)
/// with zero cost, distinguishable from success only by `path.is_empty()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Coordinates from start to goal, both inclusive; empty if no path
    /// exists.
    pub path: Vec<Point>,
    /// Sum of step costs along the path: [C] per cardinal step, [D] per
    /// diagonal step.
    pub total_cost: i32,
    /// Nodes taken off the frontier before the search stopped, including the
    /// goal itself.
    pub nodes_expanded: usize,
}

/// [PathingGrid] couples a [BoolGrid] of occupancy values ([true] is a wall)
/// with a [UnionFind] over the passage cells and the movement model used by
/// [find_path](Self::find_path). Implements [Grid] by building on [BoolGrid],
/// so walls can be edited cell by cell after construction; edits keep the
/// components incrementally where possible and flag them dirty otherwise.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    /// Enables the four diagonal moves (8-directional movement). Diagonal
    /// steps may cut corners past two adjacent walls.
    pub allow_diagonal_move: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid {
            grid: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
            allow_diagonal_move: false,
        }
    }
}

impl PathingGrid {
    /// Builds a grid of the given dimensions with the listed cells as walls
    /// and everything else passage, with components already generated. Wall
    /// coordinates outside the grid are ignored.
    pub fn with_walls(width: usize, height: usize, walls: &[Point]) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        let mut grid: PathingGrid = PathingGrid::new(width, height, false);
        for wall in walls {
            if grid.in_bounds(wall.x, wall.y) {
                grid.grid.set(wall.x as usize, wall.y as usize, true);
            }
        }
        grid.generate_components();
        Ok(grid)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }

    /// A cell can be entered iff it is inside the grid and not a wall.
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get(pos.x as usize, pos.y as usize)
    }

    /// In-bounds passage neighbours of `point` under the active movement
    /// model, in the fixed offset order.
    fn get_neighbours(&self, point: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let mut neighbours = SmallVec::new();
        for &(dx, dy) in CARDINAL_OFFSETS.iter() {
            let n = Point::new(point.x + dx, point.y + dy);
            if self.can_move_to(n) {
                neighbours.push(n);
            }
        }
        if self.allow_diagonal_move {
            for &(dx, dy) in DIAGONAL_OFFSETS.iter() {
                let n = Point::new(point.x + dx, point.y + dy);
                if self.can_move_to(n) {
                    neighbours.push(n);
                }
            }
        }
        neighbours
    }

    fn pathfinding_neighborhood(&self, pos: &Point) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        let pos = *pos;
        self.get_neighbours(pos)
            .into_iter()
            .map(|n| {
                let cost = if n.x != pos.x && n.y != pos.y { D } else { C };
                (n, cost)
            })
            .collect()
    }

    /// Computes the shortest path from `start` to `end` under the grid's
    /// movement model, guided by `heuristic`.
    ///
    /// Fails fast with [GridError::InvalidEndpoint] if either endpoint is out
    /// of bounds or on a wall. A valid but unreachable goal is an empty path
    /// in the result. [SearchResult::nodes_expanded] counts the full search
    /// either way; use [reachable](Self::reachable) first to avoid flooding
    /// the whole component when no path exists.
    pub fn find_path(
        &self,
        start: Point,
        end: Point,
        heuristic: Heuristic,
    ) -> Result<SearchResult, GridError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(GridError::InvalidDimensions {
                width: self.width(),
                height: self.height(),
            });
        }
        if !self.can_move_to(start) {
            return Err(GridError::InvalidEndpoint(start));
        }
        if !self.can_move_to(end) {
            return Err(GridError::InvalidEndpoint(end));
        }
        let (result, nodes_expanded) = astar(
            &start,
            |node| self.pathfinding_neighborhood(node),
            |point| heuristic.estimate(*point, end),
            |point| *point == end,
        );
        Ok(match result {
            Some((path, total_cost)) => SearchResult {
                path,
                total_cost,
                nodes_expanded,
            },
            None => {
                info!("{} is not reachable from {}", end, start);
                SearchResult {
                    path: Vec::new(),
                    total_cost: 0,
                    nodes_expanded,
                }
            }
        })
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.ix(*point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            !self.components.equiv(self.ix(*start), self.ix(*goal))
        } else {
            true
        }
    }

    fn ix(&self, point: Point) -> usize {
        self.grid.get_ix(point.x as usize, point.y as usize)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to
    /// the same components.
    pub fn generate_components(&mut self) {
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if self.grid.get(x, y) {
                    continue;
                }
                let point = Point::new(x as i32, y as i32);
                let parent_ix = self.ix(point);
                // Unioning each passage with its right/down (and, for
                // 8-directional movement, both forward diagonal) neighbours
                // visits every edge once.
                let mut forward: SmallVec<[Point; 4]> = SmallVec::new();
                forward.push(Point::new(point.x + 1, point.y));
                forward.push(Point::new(point.x, point.y + 1));
                if self.allow_diagonal_move {
                    forward.push(Point::new(point.x + 1, point.y + 1));
                    forward.push(Point::new(point.x + 1, point.y - 1));
                }
                for p in forward {
                    if self.can_move_to(p) {
                        let ix = self.ix(p);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height {
            for x in 0..self.grid.width {
                write!(f, "{}", if self.grid.get(x, y) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid<bool> for PathingGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        PathingGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
            allow_diagonal_move: false,
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        let p = Point::new(x as i32, y as i32);
        if blocked && !self.grid.get(x, y) {
            self.components_dirty = true;
        } else if !blocked {
            let ix = self.grid.get_ix(x, y);
            for n in self.get_neighbours(p) {
                let n_ix = self.ix(n);
                self.components.union(ix, n_ix);
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}
