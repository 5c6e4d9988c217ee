use crate::point::WorldPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowStatus {
    Moving,
    Arrived,
}

/// Moves an agent along waypoints in straight lines, one waypoint at a time.
#[derive(Clone, Debug, Default)]
pub struct PathFollower {
    position: WorldPoint,
    waypoints: Vec<WorldPoint>,
    target_index: usize,
}

impl PathFollower {
    pub fn new(position: WorldPoint, waypoints: Vec<WorldPoint>) -> PathFollower {
        PathFollower {
            position,
            waypoints,
            target_index: 0,
        }
    }

    /// Replaces the path and restarts from its first waypoint.
    pub fn set_path(&mut self, waypoints: Vec<WorldPoint>) {
        self.waypoints = waypoints;
        self.target_index = 0;
    }

    pub fn position(&self) -> WorldPoint {
        self.position
    }

    pub fn current_waypoint(&self) -> Option<WorldPoint> {
        self.waypoints.get(self.target_index).copied()
    }

    /// Waypoints not reached yet, current one included.
    pub fn remaining(&self) -> &[WorldPoint] {
        &self.waypoints[self.target_index.min(self.waypoints.len())..]
    }

    /// Moves up to `max_distance` along the path. Distance left over after reaching a
    /// waypoint carries on toward the next one.
    pub fn advance(&mut self, max_distance: f32) -> FollowStatus {
        let mut budget = max_distance.max(0.0);
        while let Some(target) = self.current_waypoint() {
            let dist = self.position.distance(&target);
            if dist > budget {
                self.position = self.position.move_towards(&target, budget);
                return FollowStatus::Moving;
            }
            self.position = target;
            budget -= dist;
            self.target_index += 1;
        }
        FollowStatus::Arrived
    }
}
