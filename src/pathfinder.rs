use grid_util::point::Point;
use log::{debug, info, warn};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use crate::config::PathfindingConfig;
use crate::error::PathError;
use crate::grid::GridModel;
use crate::point::WorldPoint;
use crate::solver::retrace::corner_points;
use crate::solver::{AStarSearch, SearchContext};

/// A path found by a search.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// Every cell from start to goal, both included.
    pub cells: Vec<Point>,
    /// Corner cells in start to goal order, ending with the goal. The start is not included.
    pub corners: Vec<Point>,
    /// World anchors of `corners`.
    pub waypoints: Vec<WorldPoint>,
    pub cost: u32,
}

/// What a caller of [Pathfinder::find_path] receives: waypoints plus a success flag.
/// Failures always carry an empty waypoint list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathResult {
    pub waypoints: Vec<WorldPoint>,
    pub success: bool,
}

impl From<Result<Path, PathError>> for PathResult {
    fn from(result: Result<Path, PathError>) -> PathResult {
        match result {
            Ok(path) => PathResult {
                waypoints: path.waypoints,
                success: true,
            },
            Err(_) => PathResult::default(),
        }
    }
}

/// Entry point for path queries. The grid is passed to every query; the pathfinder
/// only owns the reusable search state, behind a lock so that one search runs at a time.
#[derive(Debug, Default)]
pub struct Pathfinder {
    config: PathfindingConfig,
    context: Mutex<SearchContext>,
}

impl Pathfinder {
    pub fn new(config: PathfindingConfig) -> Pathfinder {
        Pathfinder {
            config,
            context: Mutex::new(SearchContext::new()),
        }
    }

    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Resolves both world positions to their nearest cells and searches between them.
    pub fn find_path(&self, grid: &GridModel, start: WorldPoint, goal: WorldPoint) -> PathResult {
        let result = self.try_find_path(grid, start, goal);
        if let Err(e) = &result {
            info!("No path from {} to {}: {}", start, goal, e);
        }
        result.into()
    }

    pub fn try_find_path(
        &self,
        grid: &GridModel,
        start: WorldPoint,
        goal: WorldPoint,
    ) -> Result<Path, PathError> {
        let start = grid.cell_at_world_position(start).point;
        let goal = grid.cell_at_world_position(goal).point;
        self.find_path_between_cells(grid, start, goal)
    }

    /// Searches between two grid coordinates. Coordinates outside the grid are
    /// reported as invalid endpoints.
    pub fn find_path_between_cells(
        &self,
        grid: &GridModel,
        start: Point,
        goal: Point,
    ) -> Result<Path, PathError> {
        let start_ix = self.endpoint(grid, start)?;
        let goal_ix = self.endpoint(grid, goal)?;
        if start_ix == goal_ix {
            debug!("{} is already the goal", start);
            return Ok(Path {
                cells: vec![start],
                corners: Vec::new(),
                waypoints: Vec::new(),
                cost: 0,
            });
        }
        let precheck = self.config.precheck_components;
        if precheck && !grid.reachable(start, goal) {
            info!("{} is not reachable from {}", goal, start);
            return Err(PathError::Unreachable { start, goal });
        }

        let timer = Instant::now();
        let mut ctx = self.context.lock().unwrap_or_else(PoisonError::into_inner);
        let step_cost = self.config.step_cost;
        let mut search = AStarSearch::new(grid, &mut ctx, start, goal, step_cost)?;
        let outcome = search.run();
        debug!(
            "Search {} -> {} finished in {:?} after expanding {} cells",
            start,
            goal,
            timer.elapsed(),
            search.expanded()
        );
        if let Err(e) = outcome {
            if precheck && matches!(e, PathError::Unreachable { .. }) {
                warn!("Reachable goal {} could not be pathed to from {}", goal, start);
            }
            return Err(e);
        }

        let chain = search
            .cell_chain()
            .ok_or(PathError::Unreachable { start, goal })?;
        let cost = search.path_cost().unwrap_or_default();
        let cells: Vec<Point> = chain.iter().map(|&ix| grid.cell_at_index(ix).point).collect();
        let goal_to_start: Vec<Point> = cells.iter().rev().copied().collect();
        let corners = corner_points(&goal_to_start);
        let waypoints = search.waypoints();
        Ok(Path {
            cells,
            corners,
            waypoints,
            cost,
        })
    }

    fn endpoint(&self, grid: &GridModel, point: Point) -> Result<usize, PathError> {
        grid.index_of(point)
            .filter(|&ix| grid.cell_at_index(ix).walkable)
            .ok_or(PathError::InvalidEndpoint { cell: point })
    }
}
