use serde::Deserialize;

/// Penalty charged for entering difficult terrain unless configured otherwise.
pub const DEFAULT_DIFFICULT_PENALTY: u32 = 5;

/// Decodes tile codes from a tile map into walkability and movement penalty.
/// Codes listed in neither table are open ground.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TileLegend {
    pub blocked: Vec<u32>,
    pub difficult: Vec<u32>,
    pub difficult_penalty: u32,
}

impl Default for TileLegend {
    fn default() -> TileLegend {
        TileLegend {
            blocked: Vec::new(),
            difficult: Vec::new(),
            difficult_penalty: DEFAULT_DIFFICULT_PENALTY,
        }
    }
}

impl TileLegend {
    pub fn new(blocked: Vec<u32>, difficult: Vec<u32>) -> TileLegend {
        TileLegend {
            blocked,
            difficult,
            ..TileLegend::default()
        }
    }

    /// Returns `(walkable, movement_penalty)` for a tile code.
    pub fn decode(&self, code: u32) -> (bool, u32) {
        let walkable = !self.blocked.contains(&code);
        let penalty = if self.difficult.contains(&code) {
            self.difficult_penalty
        } else {
            0
        };
        (walkable, penalty)
    }
}
