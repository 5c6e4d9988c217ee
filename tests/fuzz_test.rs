/// Fuzzes the pathfinder on many random grids with movement penalties. Path existence is
/// checked against the connected components of the grid, and path cost against a plain
/// Dijkstra search over the same cost model.
use grid_util::point::Point;
use rand::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tile_pathfinding::{
    expand_waypoints, GridLayout, GridModel, PathError, Pathfinder, PathfindingConfig,
};

fn random_grid(n: usize, rng: &mut StdRng) -> GridModel {
    GridModel::from_fn(n, n, GridLayout::default(), |_, _| {
        let walkable = !rng.gen_bool(0.35);
        let penalty = if rng.gen_bool(0.2) { rng.gen_range(1..6) } else { 0 };
        (walkable, penalty)
    })
    .unwrap()
}

fn dijkstra_cost(grid: &GridModel, start: Point, goal: Point) -> Option<u32> {
    let start_ix = grid.index_of(start)?;
    let goal_ix = grid.index_of(goal)?;
    if !grid.cell_at_index(start_ix).walkable || !grid.cell_at_index(goal_ix).walkable {
        return None;
    }
    let mut dist = vec![u32::MAX; grid.max_size()];
    let mut heap = BinaryHeap::new();
    dist[start_ix] = 0;
    heap.push(Reverse((0, start_ix)));
    while let Some(Reverse((d, ix))) = heap.pop() {
        if ix == goal_ix {
            return Some(d);
        }
        if d > dist[ix] {
            continue;
        }
        for n in grid.neighbour_indices(ix) {
            let cell = grid.cell_at_index(n);
            if !cell.walkable {
                continue;
            }
            let nd = d + 1 + cell.movement_penalty;
            if nd < dist[n] {
                dist[n] = nd;
                heap.push(Reverse((nd, n)));
            }
        }
    }
    None
}

fn visualize_grid(grid: &GridModel, start: &Point, end: &Point) {
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            let cell = grid.cell(p).unwrap();
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if !cell.walkable {
                print!("#");
            } else if cell.movement_penalty > 0 {
                print!("{}", cell.movement_penalty);
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz_cost_matches_dijkstra() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for precheck_components in [true, false] {
        let pathfinder = Pathfinder::new(PathfindingConfig {
            precheck_components,
            ..PathfindingConfig::default()
        });
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, &mut rng);
            let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let expected = dijkstra_cost(&grid, start, end);
            let result = pathfinder.find_path_between_cells(&grid, start, end);
            if result.as_ref().ok().map(|p| p.cost) != expected {
                visualize_grid(&grid, &start, &end);
                println!("A*: {result:?}\nDijkstra: {expected:?}");
            }
            match result {
                Ok(path) => {
                    assert_eq!(Some(path.cost), expected);
                    assert_eq!(grid.path_cost(&path.cells, 1), Some(path.cost));
                    assert_eq!(expand_waypoints(start, &path.corners), path.cells);
                    assert_eq!(path.waypoints.len(), path.corners.len());
                }
                Err(PathError::InvalidEndpoint { .. }) => {
                    let walkable = |p: Point| grid.cell(p).unwrap().walkable;
                    assert!(!walkable(start) || !walkable(end));
                    assert_eq!(expected, None);
                }
                Err(e) => {
                    assert!(matches!(e, PathError::Unreachable { .. }));
                    assert_eq!(expected, None);
                    assert!(!grid.reachable(start, end));
                }
            }
        }
    }
}

#[test]
fn fuzz_results_are_deterministic() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(7);
    let pathfinder = Pathfinder::default();
    for _ in 0..200 {
        let grid = random_grid(N, &mut rng);
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        let first = pathfinder.find_path_between_cells(&grid, start, end);
        let second = pathfinder.find_path_between_cells(&grid, start, end);
        assert_eq!(first, second);
    }
}
