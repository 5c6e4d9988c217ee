//! Search settings, loadable from TOML.
//!
//! ```toml
//! step_cost = 1
//! precheck_components = true
//!
//! [layout]
//! origin = { x = -10.0, y = -5.0 }
//! cell_size = 1.0
//!
//! [tiles]
//! blocked = [3, 4, 5]
//! difficult = [8, 9]
//! difficult_penalty = 5
//! ```
use crate::error::ConfigError;
use crate::grid::GridLayout;
use crate::tiles::TileLegend;
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PathfindingConfig {
    /// Base cost of moving between two 4-adjacent cells, before penalties.
    pub step_cost: u32,
    /// Fail fast on goals in a different connected component instead of
    /// flooding the whole component.
    pub precheck_components: bool,
    pub layout: GridLayout,
    pub tiles: TileLegend,
}

impl Default for PathfindingConfig {
    fn default() -> PathfindingConfig {
        PathfindingConfig {
            step_cost: 1,
            precheck_components: true,
            layout: GridLayout::default(),
            tiles: TileLegend::default(),
        }
    }
}

impl PathfindingConfig {
    pub fn from_toml_str(text: &str) -> Result<PathfindingConfig, ConfigError> {
        let config: PathfindingConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<PathfindingConfig, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Invalid {
            key: "path",
            reason: format!("{}: {e}", path.as_ref().display()),
        })?;
        PathfindingConfig::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_cost == 0 {
            return Err(ConfigError::Invalid {
                key: "step_cost",
                reason: "must be at least 1".to_owned(),
            });
        }
        if !(self.layout.cell_size.is_finite() && self.layout.cell_size > 0.0) {
            return Err(ConfigError::Invalid {
                key: "layout.cell_size",
                reason: format!("must be positive, got {}", self.layout.cell_size),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::WorldPoint;

    #[test]
    fn empty_document_gives_defaults() {
        let config = PathfindingConfig::from_toml_str("").unwrap();
        assert_eq!(config, PathfindingConfig::default());
    }

    #[test]
    fn parses_all_sections() {
        let config = PathfindingConfig::from_toml_str(
            r#"
            step_cost = 2
            precheck_components = false

            [layout]
            origin = { x = -10.0, y = -5.0 }
            cell_size = 0.5

            [tiles]
            blocked = [3, 4]
            difficult = [8]
            "#,
        )
        .unwrap();
        assert_eq!(config.step_cost, 2);
        assert!(!config.precheck_components);
        assert_eq!(config.layout.origin, WorldPoint::new(-10.0, -5.0));
        assert_eq!(config.layout.cell_size, 0.5);
        assert_eq!(config.tiles.blocked, vec![3, 4]);
        assert_eq!(config.tiles.difficult_penalty, 5);
    }

    #[test]
    fn rejects_zero_step_cost() {
        let err = PathfindingConfig::from_toml_str("step_cost = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "step_cost", .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = PathfindingConfig::from_toml_str("step_cost = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
