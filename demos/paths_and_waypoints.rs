use grid_util::point::Point;
use tile_pathfinding::{expand_waypoints, GridLayout, GridModel, Pathfinder};

/// This example illustrates the kind of output a search gives. The waypoints are a
/// minimal representation that can be expanded using [expand_waypoints].
/// A path is found on a 5x5 grid with shape
/// ```text
///     E
///  5
///  #
///
/// S
/// ```
/// where
/// - S marks the start
/// - E marks the end
/// - 5 is difficult terrain with movement penalty 5
fn main() {
    let grid = GridModel::from_ascii(
        "
        .....
        .5...
        .#...
        .....
        .....
        ",
        GridLayout::default(),
    )
    .unwrap();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(4, 4);
    match Pathfinder::default().find_path_between_cells(&grid, start, end) {
        Ok(path) => {
            println!("Path cost: {}", path.cost);
            println!("Corners:");
            for p in &path.corners {
                println!("{:?}", p);
            }
            println!("Expanded path:");
            for p in expand_waypoints(start, &path.corners) {
                println!("{:?}", p);
            }
            println!("World waypoints:");
            for p in &path.waypoints {
                println!("{}", p);
            }
        }
        Err(e) => println!("No path: {e}"),
    }
}
