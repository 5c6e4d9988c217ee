use grid_util::point::Point;
use log::{debug, trace};

use crate::error::PathError;
use crate::grid::GridModel;
use crate::point::WorldPoint;
use crate::solver::retrace;
use crate::solver::SearchContext;

/// Lifecycle of a single [AStarSearch].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Succeeded,
    Failed,
}

/// Manhattan distance scaled by the cost of a single step. Never overestimates on a
/// 4-connected grid where every step costs at least `step_cost`.
pub fn manhattan_heuristic(a: Point, b: Point, step_cost: u32) -> u32 {
    ((a.x - b.x).unsigned_abs() + (a.y - b.y).unsigned_abs()).saturating_mul(step_cost)
}

/// One A* search from `start` to `goal` over a borrowed grid. The search writes its
/// transient per-cell state into the borrowed [SearchContext], so holding the
/// `&mut` for the lifetime of the search is what keeps searches from interleaving.
pub struct AStarSearch<'a> {
    grid: &'a GridModel,
    context: &'a mut SearchContext,
    start: usize,
    goal: usize,
    step_cost: u32,
    state: SearchState,
    failure: Option<PathError>,
    expanded: usize,
}

impl<'a> AStarSearch<'a> {
    /// Prepares a search between two cells of `grid`. Fails with
    /// [PathError::InvalidEndpoint] if either lies outside the grid; walkability is
    /// checked once the search runs.
    pub fn new(
        grid: &'a GridModel,
        context: &'a mut SearchContext,
        start: Point,
        goal: Point,
        step_cost: u32,
    ) -> Result<AStarSearch<'a>, PathError> {
        let resolve = |cell: Point| grid.index_of(cell).ok_or(PathError::InvalidEndpoint { cell });
        Ok(AStarSearch {
            grid,
            context,
            start: resolve(start)?,
            goal: resolve(goal)?,
            step_cost,
            state: SearchState::Idle,
            failure: None,
            expanded: 0,
        })
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of cells moved to the closed set.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Runs the search to a terminal state. Calling it again returns the same outcome
    /// without searching twice.
    pub fn run(&mut self) -> Result<(), PathError> {
        match self.state {
            SearchState::Succeeded => return Ok(()),
            SearchState::Failed => {
                return Err(self.failure.clone().unwrap_or_else(|| PathError::Unreachable {
                    start: self.cell_point(self.start),
                    goal: self.cell_point(self.goal),
                }))
            }
            SearchState::Idle | SearchState::Searching => {}
        }
        self.state = SearchState::Searching;
        match self.search() {
            Ok(()) => {
                self.state = SearchState::Succeeded;
                Ok(())
            }
            Err(e) => {
                self.state = SearchState::Failed;
                self.failure = Some(e.clone());
                Err(e)
            }
        }
    }

    fn search(&mut self) -> Result<(), PathError> {
        let grid = self.grid;
        for endpoint in [self.start, self.goal] {
            let cell = grid.cell_at_index(endpoint);
            if !cell.walkable {
                return Err(PathError::InvalidEndpoint { cell: cell.point });
            }
        }
        let start_point = grid.cell_at_index(self.start).point;
        let goal_point = grid.cell_at_index(self.goal).point;
        let ctx = &mut *self.context;
        ctx.reset(grid.max_size());

        let start_node = ctx.nodes.get_mut(self.start);
        start_node.g_cost = 0;
        start_node.h_cost = manhattan_heuristic(start_point, goal_point, self.step_cost);
        ctx.open.push(&mut ctx.nodes, self.start)?;
        // First cell whose cost did not fit, if any route was dropped for that reason.
        let mut overflowed = None;

        while let Some(current) = ctx.open.pop_highest_priority(&mut ctx.nodes) {
            ctx.closed.insert(current);
            self.expanded += 1;
            if current == self.goal {
                debug!(
                    "Reached {} after expanding {} cells, cost {}",
                    goal_point,
                    self.expanded,
                    ctx.nodes.get(current).g_cost
                );
                return Ok(());
            }
            let current_g = ctx.nodes.get(current).g_cost;
            for neighbour in grid.neighbour_indices(current) {
                let cell = grid.cell_at_index(neighbour);
                if !cell.walkable || ctx.closed.contains(&neighbour) {
                    continue;
                }
                let Some(tentative_g) = current_g
                    .checked_add(self.step_cost)
                    .and_then(|g| g.checked_add(cell.movement_penalty))
                else {
                    overflowed.get_or_insert(cell.point);
                    continue;
                };
                let in_open = ctx.open.contains(&ctx.nodes, neighbour);
                if tentative_g < ctx.nodes.get(neighbour).g_cost || !in_open {
                    let node = ctx.nodes.get_mut(neighbour);
                    node.g_cost = tentative_g;
                    node.h_cost = manhattan_heuristic(cell.point, goal_point, self.step_cost);
                    node.parent = Some(current);
                    if in_open {
                        ctx.open.notify_priority_increased(&mut ctx.nodes, neighbour);
                    } else {
                        ctx.open.push(&mut ctx.nodes, neighbour)?;
                    }
                }
            }
            trace!(
                "Expanded {}, open set holds {}",
                grid.cell_at_index(current).point,
                ctx.open.len()
            );
        }
        match overflowed {
            Some(cell) => Err(PathError::CostOverflow { cell }),
            None => Err(PathError::Unreachable {
                start: start_point,
                goal: goal_point,
            }),
        }
    }

    fn cell_point(&self, ix: usize) -> Point {
        self.grid.cell_at_index(ix).point
    }

    /// Cost of the path found, once the search succeeded.
    pub fn path_cost(&self) -> Option<u32> {
        (self.state == SearchState::Succeeded).then(|| self.context.nodes.get(self.goal).g_cost)
    }

    /// Cell indices from start to goal, once the search succeeded.
    pub fn cell_chain(&self) -> Option<Vec<usize>> {
        if self.state != SearchState::Succeeded {
            return None;
        }
        let mut chain = retrace::parent_chain(&self.context.nodes, self.start, self.goal)?;
        chain.reverse();
        Some(chain)
    }

    /// Simplified world-space waypoints, or an empty list if the search did not succeed.
    pub fn waypoints(&self) -> Vec<WorldPoint> {
        if self.state != SearchState::Succeeded {
            return Vec::new();
        }
        retrace::retrace(self.grid, &self.context.nodes, self.start, self.goal)
    }
}
