use grid_util::point::Point;
use maze_pathfinding::maze;
use maze_pathfinding::{Heuristic, PathingGrid};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// Generates a seeded maze, solves it entrance to exit and prints the carved
// grid with the path overlaid. Pass a seed as the first argument.
fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let mut rng = StdRng::seed_from_u64(seed);
    let maze = maze::generate(31, 15, &mut rng).unwrap();
    let grid = PathingGrid::with_walls(maze.width, maze.height, &maze.walls).unwrap();
    if !grid.can_move_to(maze.start) || !grid.can_move_to(maze.end) {
        println!("Degenerate maze (no passage on a boundary column):\n{}", maze);
        return;
    }
    let result = grid
        .find_path(maze.start, maze.end, Heuristic::Manhattan)
        .unwrap();
    let on_path: HashSet<_> = result.path.iter().copied().collect();
    for (y, row) in maze.to_string().lines().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let p = Point::new(x as i32, y as i32);
            if c == '.' && on_path.contains(&p) {
                print!("*");
            } else {
                print!("{}", c);
            }
        }
        println!();
    }
    println!(
        "seed {}: {} steps, cost {}, {} nodes expanded",
        seed,
        result.path.len().saturating_sub(1),
        result.total_cost,
        result.nodes_expanded
    );
}
