use grid_util::point::Point;
use maze_pathfinding::{Heuristic, PathingGrid};

// In this example a path is found on a grid with shape
// S.#..
// .##..
// ...#.
// .#.#.
// .#..E
// S marks the start
// E marks the end
fn main() {
    let walls = [
        Point::new(2, 0),
        Point::new(1, 1),
        Point::new(2, 1),
        Point::new(3, 2),
        Point::new(1, 3),
        Point::new(3, 3),
        Point::new(1, 4),
    ];
    let grid = PathingGrid::with_walls(5, 5, &walls).unwrap();
    let start = Point::new(0, 0);
    let end = Point::new(4, 4);
    print!("{}", grid);
    let result = grid.find_path(start, end, Heuristic::Manhattan).unwrap();
    if result.path.is_empty() {
        println!("No path exists");
    } else {
        println!(
            "A path of cost {} has been found after {} expansions:",
            result.total_cost, result.nodes_expanded
        );
        for p in result.path {
            println!("{:?}", p);
        }
    }
}
