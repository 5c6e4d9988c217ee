//! # tile_pathfinding
//!
//! Shortest paths on a 4-connected tile grid where entering a cell can carry an
//! extra movement penalty. Searches use
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic
//! and an indexed binary heap as open set, and the resulting cell path is reduced to
//! the corner points an agent has to walk through in straight lines.
//!
//! Connected components are computed when a [GridModel] is built so that requests
//! for unreachable goals fail without flooding the grid.
//!
//! ```
//! use tile_pathfinding::{GridLayout, GridModel, Pathfinder, WorldPoint};
//!
//! let grid = GridModel::from_ascii(
//!     "
//!     ...
//!     .#.
//!     ...
//!     ",
//!     GridLayout::default(),
//! )
//! .unwrap();
//! let pathfinder = Pathfinder::default();
//! let result = pathfinder.find_path(&grid, WorldPoint::new(0.5, 0.5), WorldPoint::new(2.5, 2.5));
//! assert!(result.success);
//! assert_eq!(result.waypoints.len(), 2);
//! ```
pub mod config;
pub mod error;
pub mod follower;
pub mod grid;
pub mod heap;
pub mod pathfinder;
pub mod point;
pub mod request;
pub mod solver;
pub mod tiles;

pub use config::PathfindingConfig;
pub use error::{ConfigError, GridError, HeapError, PathError};
pub use follower::{FollowStatus, PathFollower};
pub use grid::{Cell, GridLayout, GridModel};
pub use pathfinder::{Path, PathResult, Pathfinder};
pub use point::WorldPoint;
pub use request::PathRequestQueue;

use grid_util::point::Point;

/// Turns corner waypoints back into the step by step path from `start`, both ends
/// included. Consecutive waypoints must share a row or a column, which holds for
/// the corners produced by a search.
pub fn expand_waypoints(start: Point, waypoints: &[Point]) -> Vec<Point> {
    let mut current = start;
    let mut path = vec![current];
    for next in waypoints {
        debug_assert!(current.x == next.x || current.y == next.y);
        while current != *next {
            current = Point::new(
                current.x + (next.x - current.x).signum(),
                current.y + (next.y - current.y).signum(),
            );
            path.push(current);
        }
    }
    path
}
