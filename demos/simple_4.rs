use tile_pathfinding::{GridLayout, GridModel, Pathfinder, WorldPoint};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |  E|
// | # |
// |S  |
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let grid = GridModel::from_ascii(
        "
        ...
        .#.
        ...
        ",
        GridLayout::default(),
    )
    .unwrap();
    println!("{}", grid);
    let start = WorldPoint::new(0.5, 0.5);
    let end = WorldPoint::new(2.5, 2.5);
    let result = Pathfinder::default().find_path(&grid, start, end);
    println!("Success: {}", result.success);
    for p in result.waypoints {
        println!("{}", p);
    }
}
