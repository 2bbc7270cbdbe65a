//! Randomized Prim maze generation.

use crate::{GridError, CARDINAL_OFFSETS};
use core::fmt;
use fxhash::FxHashSet;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use rand::Rng;
use smallvec::SmallVec;

/// A generated maze: the wall cells of a `width x height` grid plus the
/// derived entrance and exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub width: usize,
    pub height: usize,
    /// Every wall cell, in row-major order. All other cells are passages.
    pub walls: Vec<Point>,
    /// First passage found scanning column 0 top to bottom, or `(0, 0)` if
    /// that column has none (a degenerate maze, not an error).
    pub start: Point,
    /// First passage found scanning column `width - 1` bottom to top, or
    /// `(0, 0)` if that column has none.
    pub end: Point,
}

/// Carves a maze of the given dimensions with the frontier-list variant of
/// randomized Prim's algorithm.
///
/// All cells start as walls. A random seed cell becomes a passage and its
/// neighbours enter the frontier; a frontier cell drawn at a random index
/// becomes a passage iff exactly one of its cardinal neighbours already is
/// one, and then contributes its own wall neighbours to the frontier. A cell
/// may sit in the frontier several times; duplicates only skew which cell is
/// drawn next, since the single-passage-neighbour test is re-evaluated on
/// every draw. Every carved passage is reachable from the seed by cardinal
/// moves.
///
/// The result is a function of the `rng` state alone: the same seed produces
/// the same maze.
pub fn generate<R: Rng>(width: usize, height: usize, rng: &mut R) -> Result<Maze, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimensions { width, height });
    }
    let mut grid = BoolGrid::new(width, height, true);
    let seed = Point::new(
        rng.gen_range(0..width) as i32,
        rng.gen_range(0..height) as i32,
    );
    grid.set(seed.x as usize, seed.y as usize, false);
    let mut frontier: Vec<Point> = wall_neighbours(&grid, seed).into_vec();
    while !frontier.is_empty() {
        let ix = rng.gen_range(0..frontier.len());
        let w = frontier[ix];
        if passage_neighbours(&grid, w) == 1 {
            grid.set(w.x as usize, w.y as usize, false);
            frontier.extend(wall_neighbours(&grid, w));
        }
        // Ordered removal, not swap_remove: the index layout feeds the next
        // draw and is part of the generated result.
        frontier.remove(ix);
    }

    let mut walls = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y) {
                walls.push(Point::new(x as i32, y as i32));
            }
        }
    }

    // Entrance and exit: both boundary scans advance over one shared index
    // and each stops as soon as it hits a passage.
    let mut start = None;
    let mut end = None;
    let mut i = 0;
    while i < height && (start.is_none() || end.is_none()) {
        if start.is_none() && !grid.get(0, i) {
            start = Some(Point::new(0, i as i32));
        }
        if end.is_none() && !grid.get(width - 1, height - 1 - i) {
            end = Some(Point::new(width as i32 - 1, (height - 1 - i) as i32));
        }
        i += 1;
    }

    info!(
        "generated {}x{} maze with {} wall cells",
        width,
        height,
        walls.len()
    );
    let origin = Point::new(0, 0);
    Ok(Maze {
        width,
        height,
        walls,
        start: start.unwrap_or(origin),
        end: end.unwrap_or(origin),
    })
}

/// In-bounds cardinal neighbours of `p` that are still walls.
fn wall_neighbours(grid: &BoolGrid, p: Point) -> SmallVec<[Point; 4]> {
    let mut out = SmallVec::new();
    for &(dx, dy) in CARDINAL_OFFSETS.iter() {
        let (nx, ny) = (p.x + dx, p.y + dy);
        if nx >= 0
            && ny >= 0
            && grid.index_in_bounds(nx as usize, ny as usize)
            && grid.get(nx as usize, ny as usize)
        {
            out.push(Point::new(nx, ny));
        }
    }
    out
}

/// Number of in-bounds cardinal neighbours of `p` that are passages.
fn passage_neighbours(grid: &BoolGrid, p: Point) -> usize {
    CARDINAL_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| {
            let (nx, ny) = (p.x + dx, p.y + dy);
            nx >= 0
                && ny >= 0
                && grid.index_in_bounds(nx as usize, ny as usize)
                && !grid.get(nx as usize, ny as usize)
        })
        .count()
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let walls: FxHashSet<Point> = self.walls.iter().copied().collect();
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x as i32, y as i32);
                let c = if p == self.start {
                    'S'
                } else if p == self.end {
                    'E'
                } else if walls.contains(&p) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
