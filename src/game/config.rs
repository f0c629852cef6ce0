use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::model::{ConfigError, TileCatalog};

/// Immutable engine configuration, fixed at construction. Replaces the
/// original design's mutable shared-variable indirection; the only mutable
/// session state (swap intake enabled/busy) lives on the engine itself.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BoardConfig {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_dimension")]
    pub columns: usize,

    #[serde(default = "default_dimension")]
    pub rows: usize,

    /// Minimum run length that counts as a match.
    #[serde(default = "default_min_run_length")]
    pub min_run_length: usize,

    /// Longest same-kind run the generator will place in any line.
    #[serde(default = "default_max_in_line")]
    pub max_in_line: usize,

    /// Per-step move duration for the presentation layer. Never affects
    /// logic; the commit is atomic.
    #[serde(default = "default_swap_duration_ms")]
    pub swap_duration_ms: u64,

    /// Fixed generation seed for reproducible boards.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_version() -> u32 {
    1
}
fn default_dimension() -> usize {
    8
}
fn default_min_run_length() -> usize {
    3
}
fn default_max_in_line() -> usize {
    2
}
fn default_swap_duration_ms() -> u64 {
    350
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            version: 1,
            columns: 8,
            rows: 8,
            min_run_length: 3,
            max_in_line: 2,
            swap_duration_ms: 350,
            seed: None,
        }
    }
}

impl BoardConfig {
    pub fn load(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(mut config) = serde_json::from_str::<BoardConfig>(&contents) {
                config.migrate();
                return config;
            }
        }
        BoardConfig::default()
    }

    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(path, contents)
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }

    /// Fail fast: a board must never be generated from a degenerate setup.
    pub fn validate(&self, catalog: &TileCatalog) -> Result<(), ConfigError> {
        if self.columns < 1 || self.rows < 1 {
            return Err(ConfigError::DegenerateBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if catalog.spawnable().count() == 0 {
            return Err(ConfigError::NoSpawnableKinds);
        }
        let total: f32 = catalog.spawnable().map(|(_, kind)| kind.weight).sum();
        if total <= 0.0 {
            return Err(ConfigError::ZeroTotalWeight);
        }
        Ok(())
    }

    pub fn swap_duration(&self) -> Duration {
        Duration::from_millis(self.swap_duration_ms)
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KindId, TileKind};

    fn catalog(weights: &[f32]) -> TileCatalog {
        let mut kinds: Vec<TileKind> = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| TileKind::new(&format!("kind{}", i), "mat", w))
            .collect();
        kinds.push(TileKind::new("air", "mat_air", 0.0));
        let air = KindId(kinds.len() - 1);
        TileCatalog::new(kinds, air)
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: BoardConfig = serde_json::from_str(r#"{"columns": 5}"#).unwrap();
        assert_eq!(config.columns, 5);
        assert_eq!(config.rows, 8);
        assert_eq!(config.min_run_length, 3);
        assert_eq!(config.max_in_line, 2);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_round_trip() {
        let mut config = BoardConfig::default();
        config.seed = Some(42);
        let json = serde_json::to_string(&config).unwrap();
        let back: BoardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_degenerate_board() {
        let mut config = BoardConfig::default();
        config.rows = 0;
        assert_eq!(
            config.validate(&catalog(&[1.0])),
            Err(ConfigError::DegenerateBoard { columns: 8, rows: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_empty_and_weightless_catalogs() {
        let config = BoardConfig::default();
        assert_eq!(
            config.validate(&catalog(&[])),
            Err(ConfigError::NoSpawnableKinds)
        );
        assert_eq!(
            config.validate(&catalog(&[0.0, 0.0])),
            Err(ConfigError::ZeroTotalWeight)
        );
    }

    #[test]
    fn test_validate_accepts_sane_setup() {
        assert!(BoardConfig::default().validate(&catalog(&[0.4, 0.6])).is_ok());
    }
}
