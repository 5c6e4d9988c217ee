use core::fmt;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A position in world space. Grid cells are addressed with [grid_util::point::Point].
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &WorldPoint) -> f32 {
        (*other - *self).length()
    }

    pub fn length(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Moves from `self` toward `target` by at most `max_distance`, never overshooting.
    pub fn move_towards(&self, target: &WorldPoint, max_distance: f32) -> WorldPoint {
        let delta = *target - *self;
        let dist = delta.length();
        if dist <= max_distance || dist == 0.0 {
            *target
        } else {
            let t = max_distance / dist;
            WorldPoint::new(self.x + delta.x * t, self.y + delta.y * t)
        }
    }
}

impl Add for WorldPoint {
    type Output = WorldPoint;
    fn add(self, rhs: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPoint {
    type Output = WorldPoint;
    fn sub(self, rhs: WorldPoint) -> WorldPoint {
        WorldPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
