use grid_util::point::Point;
use maze_pathfinding::{Heuristic, PathingGrid};

// Solves the same grid under both movement models. The 8-directional solver
// takes diagonal shortcuts and comes out cheaper.
fn main() {
    let walls = [Point::new(1, 1), Point::new(2, 2), Point::new(3, 1)];
    let start = Point::new(0, 0);
    let end = Point::new(4, 4);
    let mut grid = PathingGrid::with_walls(5, 5, &walls).unwrap();
    for diagonal in [false, true] {
        grid.allow_diagonal_move = diagonal;
        grid.generate_components();
        let heuristic = Heuristic::for_movement(diagonal);
        let result = grid.find_path(start, end, heuristic).unwrap();
        println!(
            "{}: cost {} over {} cells ({} expansions)",
            if diagonal { "8-directional" } else { "4-directional" },
            result.total_cost,
            result.path.len(),
            result.nodes_expanded
        );
    }
}
