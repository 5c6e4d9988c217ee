//! Single-flight FIFO queue of path requests for cooperative, tick-driven callers.
//!
//! Every [tick](PathRequestQueue::tick) first hands the result of the search finished on
//! the previous tick to its callback, then starts the next queued request and runs it to
//! completion. A search therefore never blocks the tick that delivers its result, and at
//! most one search is in flight at a time.
//!
//! Callbacks receive the queue itself, so a caller can retry or chain a follow-up
//! request from inside the callback without holding a second handle to the queue.
use log::debug;
use std::collections::VecDeque;
use std::fmt;

use crate::grid::GridModel;
use crate::pathfinder::{PathResult, Pathfinder};
use crate::point::WorldPoint;

/// Receives the queue, then the waypoints and the success flag of a finished request.
pub type PathCallback = Box<dyn FnOnce(&mut PathRequestQueue, Vec<WorldPoint>, bool)>;

struct PathRequest {
    start: WorldPoint,
    goal: WorldPoint,
    callback: PathCallback,
}

impl fmt::Debug for PathRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PathRequest")
            .field("start", &self.start)
            .field("goal", &self.goal)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct PathRequestQueue {
    pending: VecDeque<PathRequest>,
    finished: Option<(PathRequest, PathResult)>,
}

impl PathRequestQueue {
    pub fn new() -> PathRequestQueue {
        PathRequestQueue::default()
    }

    /// Queues a request. The callback runs from a later [tick](Self::tick), exactly once.
    pub fn request_path<F>(&mut self, start: WorldPoint, goal: WorldPoint, callback: F)
    where
        F: FnOnce(&mut PathRequestQueue, Vec<WorldPoint>, bool) + 'static,
    {
        self.pending.push_back(PathRequest {
            start,
            goal,
            callback: Box::new(callback),
        });
    }

    /// Requests that have not been started yet.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is queued and no result is waiting to be delivered.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.finished.is_none()
    }

    /// Advances the queue by one step. Returns the number of callbacks invoked, which is
    /// at most one. Requests queued by that callback wait behind those already pending.
    pub fn tick(&mut self, pathfinder: &Pathfinder, grid: &GridModel) -> usize {
        let mut delivered = 0;
        if let Some((request, result)) = self.finished.take() {
            (request.callback)(self, result.waypoints, result.success);
            delivered += 1;
        }
        if let Some(request) = self.pending.pop_front() {
            let result = pathfinder.find_path(grid, request.start, request.goal);
            debug!(
                "Request {} -> {} done (success: {}), {} still queued",
                request.start,
                request.goal,
                result.success,
                self.pending.len()
            );
            self.finished = Some((request, result));
        }
        delivered
    }

    /// Ticks until every queued request has been delivered.
    pub fn drain(&mut self, pathfinder: &Pathfinder, grid: &GridModel) -> usize {
        let mut delivered = 0;
        while !self.is_idle() {
            delivered += self.tick(pathfinder, grid);
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridLayout;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(usize, Vec<WorldPoint>, bool)>>>;

    fn recorder(
        log: &Log,
        id: usize,
    ) -> impl FnOnce(&mut PathRequestQueue, Vec<WorldPoint>, bool) + 'static {
        let log = Rc::clone(log);
        move |_, waypoints, success| log.borrow_mut().push((id, waypoints, success))
    }

    #[test]
    fn result_is_delivered_on_the_next_tick() {
        let grid = GridModel::from_ascii("....", GridLayout::default()).unwrap();
        let pathfinder = Pathfinder::default();
        let log: Log = Rc::default();
        let mut queue = PathRequestQueue::new();
        let (start, goal) = (WorldPoint::new(0.5, 0.5), WorldPoint::new(3.5, 0.5));
        queue.request_path(start, goal, recorder(&log, 0));
        assert_eq!(queue.tick(&pathfinder, &grid), 0);
        assert!(log.borrow().is_empty());
        assert!(!queue.is_idle());
        assert_eq!(queue.tick(&pathfinder, &grid), 1);
        assert_eq!(
            *log.borrow(),
            vec![(0, vec![WorldPoint::new(3.5, 0.5)], true)]
        );
        assert!(queue.is_idle());
    }

    #[test]
    fn requests_complete_in_fifo_order() {
        let grid = GridModel::from_ascii("..#.", GridLayout::default()).unwrap();
        let pathfinder = Pathfinder::default();
        let log: Log = Rc::default();
        let mut queue = PathRequestQueue::new();
        for (id, goal_x) in [(0, 1.5), (1, 3.5), (2, 0.5)] {
            let goal = WorldPoint::new(goal_x, 0.5);
            queue.request_path(WorldPoint::new(0.5, 0.5), goal, recorder(&log, id));
        }
        assert_eq!(queue.pending(), 3);
        // One search per tick, so only one request leaves the queue each time.
        queue.tick(&pathfinder, &grid);
        assert_eq!(queue.pending(), 2);
        assert_eq!(queue.drain(&pathfinder, &grid), 3);
        let log = log.borrow();
        let ids: Vec<usize> = log.iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(log[0].2);
        // The goal behind the wall fails once with no waypoints.
        assert_eq!(log[1], (1, Vec::new(), false));
        assert!(log[2].2);
    }

    #[test]
    fn callback_can_queue_a_retry() {
        let grid = GridModel::from_ascii("..#.", GridLayout::default()).unwrap();
        let pathfinder = Pathfinder::default();
        let log: Log = Rc::default();
        let mut queue = PathRequestQueue::new();
        let start = WorldPoint::new(0.5, 0.5);
        let retry = recorder(&log, 1);
        let first = Rc::clone(&log);
        // The wall blocks the first goal, so the callback falls back to a closer one.
        queue.request_path(start, WorldPoint::new(3.5, 0.5), move |queue, waypoints, success| {
            first.borrow_mut().push((0, waypoints, success));
            if !success {
                queue.request_path(start, WorldPoint::new(1.5, 0.5), retry);
            }
        });
        queue.request_path(start, WorldPoint::new(0.5, 0.5), recorder(&log, 2));

        assert_eq!(queue.drain(&pathfinder, &grid), 3);
        let ids: Vec<usize> = log.borrow().iter().map(|(id, _, _)| *id).collect();
        assert_eq!(ids, vec![0, 2, 1]);
        assert_eq!(log.borrow()[2], (1, vec![WorldPoint::new(1.5, 0.5)], true));
        assert!(queue.is_idle());
    }
}
