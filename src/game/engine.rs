use std::cell::RefCell;
use std::rc::Rc;

use log::{trace, warn};
use rand::RngCore;

use super::board::TileBoard;
use super::config::BoardConfig;
use super::generator::BoardGenerator;
use super::matches::MatchDetector;
use super::swap::{SwapExecutor, SwapValidator};
use crate::events::EventEmitter;
use crate::model::{
    BoardEvent, BoardPos, ConfigError, SwapKind, SwapRejection, SwapResult, TileCatalog,
};

/// One board session: owns the authoritative board, the rule pipeline, and
/// the event channel to the presentation layer. Exactly one swap may be in
/// flight at a time; intake is refused while a prior swap resolves.
pub struct BoardEngine {
    config: BoardConfig,
    catalog: TileCatalog,
    board: TileBoard,
    validator: SwapValidator,
    executor: SwapExecutor,
    detector: MatchDetector,
    event_emitter: EventEmitter<BoardEvent>,
    swap_enabled: bool,
    first_selected: Option<BoardPos>,
}

impl BoardEngine {
    /// Generates a fresh board and emits `BoardGenerated`. Fails fast on a
    /// degenerate setup; no partial board ever escapes.
    pub fn new(
        config: BoardConfig,
        catalog: TileCatalog,
        event_emitter: EventEmitter<BoardEvent>,
    ) -> Result<Rc<RefCell<Self>>, ConfigError> {
        let generator = BoardGenerator::new(&config, &catalog)?;
        let seed = BoardConfig::seed_from_env()
            .or(config.seed)
            .unwrap_or_else(|| rand::rng().next_u64());
        let board = generator.generate(seed);
        Ok(Self::from_board(config, catalog, board, event_emitter))
    }

    /// Resumes a session over a prepared board, e.g. a designer layout.
    /// Emits `BoardGenerated` just like a fresh generation.
    pub fn from_board(
        config: BoardConfig,
        catalog: TileCatalog,
        board: TileBoard,
        event_emitter: EventEmitter<BoardEvent>,
    ) -> Rc<RefCell<Self>> {
        let air = catalog.air();
        let engine = Self {
            validator: SwapValidator::new(air),
            executor: SwapExecutor::new(config.swap_duration()),
            detector: MatchDetector::new(config.min_run_length, air),
            config,
            catalog,
            board,
            event_emitter,
            swap_enabled: true,
            first_selected: None,
        };
        engine.event_emitter.emit(&BoardEvent::BoardGenerated {
            board: engine.board.id(),
            columns: engine.board.column_count(),
            rows: engine.board.row_count(),
        });
        Rc::new(RefCell::new(engine))
    }

    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    pub fn swap_enabled(&self) -> bool {
        self.swap_enabled
    }

    /// Presentation-side gate: intake can be paused while an animation or
    /// dialogue owns the screen.
    pub fn set_swap_enabled(&mut self, enabled: bool) {
        self.swap_enabled = enabled;
    }

    pub fn selection(&self) -> Option<BoardPos> {
        self.first_selected
    }

    /// Clears a pending first selection. A swap already executing is not
    /// cancellable; this is the only supported interruption point.
    pub fn cancel_selection(&mut self) {
        if self.first_selected.take().is_some() {
            trace!(target: "engine", "Selection cancelled");
        }
    }

    /// Two-click intake. The first click selects; the second attempts the
    /// swap and clears the selection either way. Clicks are ignored while
    /// intake is disabled, and selecting an air tile first just resets.
    pub fn click_tile(&mut self, pos: BoardPos) -> Option<Result<SwapResult, SwapRejection>> {
        if !self.swap_enabled || !self.board.in_bounds(pos) {
            return None;
        }
        match self.first_selected {
            None => {
                let kind = self.board.kind_at(pos)?;
                if self.catalog.is_air(kind) {
                    trace!(target: "engine", "First selection {} is air; resetting", pos);
                    return None;
                }
                self.first_selected = Some(pos);
                None
            }
            Some(first) if first == pos => None,
            Some(first) => {
                self.first_selected = None;
                Some(self.request_swap(first, pos))
            }
        }
    }

    /// Validates, commits, and reports one swap. On rejection the board is
    /// untouched and the engine returns to the idle state.
    pub fn request_swap(
        &mut self,
        a: BoardPos,
        b: BoardPos,
    ) -> Result<SwapResult, SwapRejection> {
        if !self.swap_enabled {
            return Err(SwapRejection::Busy);
        }
        let kind = match self.validator.classify(&self.board, a, b) {
            Ok(kind) => kind,
            Err(rejection) => {
                warn!(target: "engine", "Swap {} <-> {} refused: {}", a, b, rejection);
                return Err(rejection);
            }
        };

        // Single-owner critical section: no new swap may start until this
        // one has fully committed and its matches are resolved.
        self.swap_enabled = false;

        let first = self.board.tile_id_at(a).expect("classified position lost its tile");
        let second = self.board.tile_id_at(b).expect("classified position lost its tile");
        let result = self.executor.execute(&mut self.board, kind, first, second);
        debug_assert!(self.board.occupancy_consistent());

        self.event_emitter
            .emit(&BoardEvent::SwapCompleted(result.clone()));

        // Matches commit strictly after the full position swap, and never
        // for gravity-free air moves.
        if kind != SwapKind::GravityFree {
            self.resolve_matches();
        }

        self.swap_enabled = true;
        Ok(result)
    }

    fn resolve_matches(&mut self) {
        let report = self.detector.find_matches(&self.board);
        if report.is_empty() {
            return;
        }
        let air = self.catalog.air();
        for id in report.iter() {
            self.board.recolor(id, air);
        }
        trace!(target: "engine", "Cleared {} matched tiles to air", report.match_count());
        self.event_emitter.emit(&BoardEvent::TilesCleared(report));
    }
}
