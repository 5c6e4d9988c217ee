//! Turns the parent links left by a search into a list of corner waypoints.
use grid_util::point::Point;
use itertools::Itertools;

use crate::grid::GridModel;
use crate::point::WorldPoint;
use crate::solver::NodeStore;

/// Cell indices from `goal` back to `start`, both included. [None] if the parent
/// links do not lead back to `start`.
pub fn parent_chain(nodes: &NodeStore, start: usize, goal: usize) -> Option<Vec<usize>> {
    let mut chain = vec![goal];
    let mut current = goal;
    while current != start {
        current = nodes.get(current).parent?;
        // A chain longer than the grid has a cycle.
        if chain.len() >= nodes.len() {
            return None;
        }
        chain.push(current);
    }
    Some(chain)
}

/// Positions in `points` (ordered goal to start) at which the direction of travel
/// changes. The entry before each change is the corner, and the first entry always
/// counts since the direction starts out as "not moving".
pub fn direction_changes(points: &[Point]) -> Vec<usize> {
    let mut previous = (0, 0);
    let mut changes = Vec::new();
    for (i, (a, b)) in points.iter().tuple_windows().enumerate() {
        let direction = (a.x - b.x, a.y - b.y);
        if direction != previous {
            changes.push(i);
        }
        previous = direction;
    }
    changes
}

/// Corner cells of the path from `start` to `goal`, in start to goal order. The start
/// itself is left out; a path of a single cell has no corners.
pub fn corner_points(points_goal_to_start: &[Point]) -> Vec<Point> {
    direction_changes(points_goal_to_start)
        .into_iter()
        .rev()
        .map(|i| points_goal_to_start[i])
        .collect()
}

/// World-space waypoints from `start` to `goal`: every turn of the cell path plus the
/// goal. Empty when start and goal coincide or the links are broken.
pub fn retrace(grid: &GridModel, nodes: &NodeStore, start: usize, goal: usize) -> Vec<WorldPoint> {
    let Some(chain) = parent_chain(nodes, start, goal) else {
        return Vec::new();
    };
    let points = chain
        .iter()
        .map(|&ix| grid.cell_at_index(ix).point)
        .collect::<Vec<_>>();
    let mut waypoints = direction_changes(&points)
        .into_iter()
        .map(|i| grid.cell_at_index(chain[i]).world_anchor)
        .collect::<Vec<_>>();
    waypoints.reverse();
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLayout;
    use crate::solver::SearchContext;

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn straight_run_then_turn_gives_two_corners() {
        // Goal to start: up the column x = 4, then along the row y = 0.
        let path = points(&[(4, 3), (4, 2), (4, 1), (4, 0), (3, 0), (2, 0), (1, 0), (0, 0)]);
        assert_eq!(corner_points(&path), points(&[(4, 0), (4, 3)]));
    }

    #[test]
    fn straight_line_keeps_only_the_goal() {
        let path = points(&[(0, 5), (0, 4), (0, 3), (0, 2)]);
        assert_eq!(corner_points(&path), points(&[(0, 5)]));
    }

    #[test]
    fn staircase_keeps_every_turn() {
        let path = points(&[(2, 2), (2, 1), (1, 1), (1, 0), (0, 0)]);
        assert_eq!(
            corner_points(&path),
            points(&[(1, 0), (1, 1), (2, 1), (2, 2)])
        );
    }

    #[test]
    fn single_cell_has_no_corners() {
        assert!(corner_points(&points(&[(3, 3)])).is_empty());
    }

    #[test]
    fn retrace_follows_parent_links() {
        let grid = GridModel::from_fn(3, 3, GridLayout::default(), |_, _| (true, 0)).unwrap();
        let mut ctx = SearchContext::new();
        ctx.reset(grid.max_size());
        // 0 -> 1 -> 2 -> 5 -> 8, i.e. (0,0) (1,0) (2,0) (2,1) (2,2)
        for (child, parent) in [(1, 0), (2, 1), (5, 2), (8, 5)] {
            ctx.nodes.get_mut(child).parent = Some(parent);
        }
        assert_eq!(parent_chain(&ctx.nodes, 0, 8), Some(vec![8, 5, 2, 1, 0]));
        let waypoints = retrace(&grid, &ctx.nodes, 0, 8);
        assert_eq!(
            waypoints,
            vec![WorldPoint::new(2.5, 0.5), WorldPoint::new(2.5, 2.5)]
        );
    }

    #[test]
    fn broken_links_give_no_waypoints() {
        let grid = GridModel::from_fn(2, 1, GridLayout::default(), |_, _| (true, 0)).unwrap();
        let mut ctx = SearchContext::new();
        ctx.reset(grid.max_size());
        assert_eq!(parent_chain(&ctx.nodes, 0, 1), None);
        assert!(retrace(&grid, &ctx.nodes, 0, 1).is_empty());
        // A cycle that never reaches the start.
        ctx.nodes.get_mut(1).parent = Some(1);
        assert_eq!(parent_chain(&ctx.nodes, 0, 1), None);
    }
}
