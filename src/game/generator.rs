use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use super::board::TileBoard;
use super::config::BoardConfig;
use crate::model::{ConfigError, KindId, TileCatalog};

/// Weights are normalized onto a cumulative table over `[0, 10)` so one
/// draw picks a kind by the first threshold it falls under.
const PROBABILITY_SCALE: f32 = 10.0;

/// One generation rule: a spawnable kind and its cumulative upper bound.
#[derive(Debug, Clone, Copy)]
struct GridUnit {
    kind: KindId,
    threshold: f32,
}

/// Fills a board with weighted random tiles while refusing to place a run
/// longer than `max_in_line` in any row or column. Generation never fails
/// outright: when every kind would extend a run, the first declared kind is
/// placed anyway and the local monotony violation is accepted.
pub struct BoardGenerator {
    columns: usize,
    rows: usize,
    max_in_line: usize,
    units: Vec<GridUnit>,
}

impl BoardGenerator {
    pub fn new(config: &BoardConfig, catalog: &TileCatalog) -> Result<Self, ConfigError> {
        config.validate(catalog)?;

        let total: f32 = catalog.spawnable().map(|(_, kind)| kind.weight).sum();
        let ratio = PROBABILITY_SCALE / total;
        let mut pass = 0.0;
        let units = catalog
            .spawnable()
            .filter(|(_, kind)| kind.weight > 0.0)
            .map(|(id, kind)| {
                pass += kind.weight * ratio;
                GridUnit {
                    kind: id,
                    threshold: pass,
                }
            })
            .collect();

        Ok(Self {
            columns: config.columns,
            rows: config.rows,
            max_in_line: config.max_in_line,
            units,
        })
    }

    /// Generates a board reproducibly from a seed.
    pub fn generate(&self, seed: u64) -> TileBoard {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with(seed, &mut rng)
    }

    /// Generates with an injected random source; `seed` is only recorded on
    /// the board for later reproduction.
    pub fn generate_with(&self, seed: u64, rng: &mut dyn RngCore) -> TileBoard {
        let mut kinds: Vec<KindId> = Vec::with_capacity(self.columns * self.rows);

        // Column-major, low-to-high: only already-placed neighbors (to the
        // left and below) exist to be checked.
        for x in 0..self.columns {
            for y in 0..self.rows {
                // Tenth-granular roll, matching the original's 0..100 / 10.
                let draw = rng.random_range(0..100) as f32 / 10.0;
                let kind = self.pick_kind(draw, &kinds, x, y);
                trace!(target: "generator", "Cell ({}, {}) drew {:.1} -> {:?}", x, y, draw, kind);
                kinds.push(kind);
            }
        }

        let board = TileBoard::from_kinds(self.columns, self.rows, seed, kinds);
        trace!(target: "generator", "Generated board {:?} (seed {}): {:?}", board.id(), seed, board);
        board
    }

    fn pick_kind(&self, draw: f32, placed: &[KindId], x: usize, y: usize) -> KindId {
        let start = self
            .units
            .iter()
            .position(|unit| draw < unit.threshold)
            .unwrap_or(self.units.len() - 1);

        // Resample by advancing through the table (wrapping) until a kind
        // does not extend a run past max_in_line.
        for offset in 0..self.units.len() {
            let unit = self.units[(start + offset) % self.units.len()];
            if !self.would_extend_run(placed, x, y, unit.kind) {
                return unit.kind;
            }
        }

        // Table exhausted; accept a local violation rather than aborting.
        debug!(target: "generator", "No monotony-safe kind at ({}, {}); falling back", x, y);
        self.units[0].kind
    }

    /// True when placing `kind` at (x, y) would complete a run longer than
    /// `max_in_line`, looking left along the row and down along the column.
    fn would_extend_run(&self, placed: &[KindId], x: usize, y: usize, kind: KindId) -> bool {
        let at = |x: usize, y: usize| placed[x * self.rows + y];

        let left_run = (1..=self.max_in_line)
            .take_while(|&i| x >= i && at(x - i, y) == kind)
            .count();
        if left_run >= self.max_in_line {
            return true;
        }

        let down_run = (1..=self.max_in_line)
            .take_while(|&i| y >= i && at(x, y - i) == kind)
            .count();
        down_run >= self.max_in_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardPos, TileKind};
    use crate::tests::UsingLogger;
    use test_context::test_context;

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

    fn longest_run(kinds: &[KindId]) -> usize {
        let mut longest = 1;
        let mut current = 1;
        for pair in kinds.windows(2) {
            if pair[0] == pair[1] {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 1;
            }
        }
        longest
    }

    fn line_kinds(board: &TileBoard, line: &[crate::model::TileId]) -> Vec<KindId> {
        line.iter().map(|&id| board.tile(id).kind).collect()
    }

    #[test_context(UsingLogger)]
    #[test]
    fn test_no_line_exceeds_max_in_line(_: &mut UsingLogger) {
        let catalog = catalog(&[0.3, 0.3, 0.4]);
        let config = BoardConfig::default();
        let generator = BoardGenerator::new(&config, &catalog).unwrap();
        let board = generator.generate(1234);

        for row in board.row_views() {
            assert!(longest_run(&line_kinds(&board, row)) <= config.max_in_line);
        }
        for column in board.column_views() {
            assert!(longest_run(&line_kinds(&board, column)) <= config.max_in_line);
        }
        assert!(board.occupancy_consistent());
    }

    #[test]
    fn test_same_seed_reproduces_board() {
        let catalog = catalog(&[0.5, 0.25, 0.25]);
        let config = BoardConfig::default();
        let generator = BoardGenerator::new(&config, &catalog).unwrap();

        let first = generator.generate(99);
        let second = generator.generate(99);
        let kinds = |board: &TileBoard| -> Vec<KindId> {
            board.tiles().map(|tile| tile.kind).collect()
        };
        assert_eq!(kinds(&first), kinds(&second));
    }

    #[test]
    fn test_single_kind_catalog_falls_back_without_failing() {
        // Only one spawnable kind: every cell past the second must take the
        // fallback path, and generation still completes.
        let catalog = catalog(&[1.0]);
        let config = BoardConfig::default();
        let generator = BoardGenerator::new(&config, &catalog).unwrap();
        let board = generator.generate(5);

        let only = catalog.id_of("kind0").unwrap();
        assert!(board.tiles().all(|tile| tile.kind == only));
        assert_eq!(board.tiles().count(), 64);
    }

    #[test]
    fn test_zero_weight_kind_never_spawns() {
        let catalog = catalog(&[0.7, 0.0, 0.3]);
        let config = BoardConfig::default();
        let generator = BoardGenerator::new(&config, &catalog).unwrap();
        let board = generator.generate(77);

        let banned = catalog.id_of("kind1").unwrap();
        assert!(board.tiles().all(|tile| tile.kind != banned));
    }

    #[test]
    fn test_air_is_never_generated() {
        let catalog = catalog(&[0.5, 0.5]);
        let generator = BoardGenerator::new(&BoardConfig::default(), &catalog).unwrap();
        let board = generator.generate(31);
        assert!(board.tiles().all(|tile| !catalog.is_air(tile.kind)));
    }

    #[test]
    fn test_positions_cover_grid() {
        let catalog = catalog(&[1.0, 1.0]);
        let mut config = BoardConfig::default();
        config.columns = 3;
        config.rows = 5;
        let generator = BoardGenerator::new(&config, &catalog).unwrap();
        let board = generator.generate(8);

        for x in 0..3 {
            for y in 0..5 {
                assert!(board.tile_at(BoardPos::new(x, y)).is_some());
            }
        }
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let mut config = BoardConfig::default();
        config.columns = 0;
        assert!(BoardGenerator::new(&config, &catalog(&[1.0])).is_err());
    }
}
