use std::time::Duration;

use log::trace;

use super::board::TileBoard;
use crate::model::{
    BoardPos, KindId, SwapKind, SwapRejection, SwapResult, SwapStep, Tile, TileId,
};

/// Everything a swap rule may inspect about a candidate pair.
pub struct SwapContext<'a> {
    pub board: &'a TileBoard,
    pub first: &'a Tile,
    pub second: &'a Tile,
    pub air: KindId,
}

impl SwapContext<'_> {
    fn is_air(&self, tile: &Tile) -> bool {
        tile.kind == self.air
    }

    fn any_air(&self) -> bool {
        self.is_air(self.first) || self.is_air(self.second)
    }

    /// The tile currently sitting higher on the board.
    fn higher(&self) -> &Tile {
        if self.first.pos.y > self.second.pos.y {
            self.first
        } else {
            self.second
        }
    }
}

/// One legality predicate. Rules run in order and short-circuit on the
/// first rejection; boards compose their pipeline as data instead of
/// overriding handler subclasses.
pub type SwapRule = fn(&SwapContext) -> Result<(), SwapRejection>;

/// Air tiles cannot be swapped along a horizontal component at all.
fn no_horizontal_air_swap(ctx: &SwapContext) -> Result<(), SwapRejection> {
    let crosses_columns = ctx.first.pos.x != ctx.second.pos.x;
    if crosses_columns && ctx.any_air() {
        return Err(SwapRejection::HorizontalAirSwap);
    }
    Ok(())
}

/// A vertical exchange whose currently-higher tile is air would leave air
/// floating above a solid tile; air falls, it does not float.
fn no_air_resting_above_solid(ctx: &SwapContext) -> Result<(), SwapRejection> {
    let crosses_rows = ctx.first.pos.y != ctx.second.pos.y;
    if crosses_rows && ctx.is_air(ctx.higher()) {
        return Err(SwapRejection::AirAboveSolid);
    }
    Ok(())
}

pub fn default_rules() -> Vec<SwapRule> {
    vec![no_horizontal_air_swap, no_air_resting_above_solid]
}

/// Classifies a candidate pair of positions into the swap kind they make,
/// or the reason they make none.
pub struct SwapValidator {
    air: KindId,
    rules: Vec<SwapRule>,
}

impl SwapValidator {
    pub fn new(air: KindId) -> Self {
        Self::with_rules(air, default_rules())
    }

    pub fn with_rules(air: KindId, rules: Vec<SwapRule>) -> Self {
        Self { air, rules }
    }

    pub fn classify(
        &self,
        board: &TileBoard,
        a: BoardPos,
        b: BoardPos,
    ) -> Result<SwapKind, SwapRejection> {
        for pos in [a, b] {
            if !board.in_bounds(pos) {
                return Err(SwapRejection::OutOfBounds(pos));
            }
        }
        if a == b {
            return Err(SwapRejection::SelfSwap(a));
        }
        let first = board.tile_at(a).ok_or(SwapRejection::NoTile(a))?;
        let second = board.tile_at(b).ok_or(SwapRejection::NoTile(b))?;

        let context = SwapContext {
            board,
            first,
            second,
            air: self.air,
        };
        for rule in &self.rules {
            rule(&context)?;
        }

        let air_involved = context.any_air();
        let kind = match a.abs_delta(b) {
            (1, 0) | (0, 1) if air_involved => SwapKind::GravityFree,
            (1, 0) | (0, 1) => SwapKind::Adjacent,
            (2, 1) | (1, 2) => SwapKind::Knight,
            _ => return Err(SwapRejection::OutOfReach(a, b)),
        };
        trace!(target: "swap", "Classified {} <-> {} as {:?}", a, b, kind);
        Ok(kind)
    }
}

/// Commits a classified swap. Adjacent and gravity-free swaps exchange the
/// two positions directly; knight swaps decompose into unit adjacent
/// exchanges, horizontal component first, strictly sequential because each
/// step's target depends on the board the previous step left behind.
pub struct SwapExecutor {
    move_duration: Duration,
}

impl SwapExecutor {
    pub fn new(move_duration: Duration) -> Self {
        Self { move_duration }
    }

    /// Panics if invoked with anything but two distinct tiles; that is a
    /// caller contract breach, not a recoverable rejection.
    pub fn execute(
        &self,
        board: &mut TileBoard,
        kind: SwapKind,
        first: TileId,
        second: TileId,
    ) -> SwapResult {
        assert_ne!(
            first, second,
            "swap execution needs exactly two distinct tiles"
        );
        let steps = match kind {
            SwapKind::Adjacent | SwapKind::GravityFree => {
                vec![exchange(board, first, second)]
            }
            SwapKind::Knight => self.knight_steps(board, first, second),
        };
        SwapResult {
            kind,
            tiles: [first, second],
            steps,
            move_duration: self.move_duration,
        }
    }

    fn knight_steps(&self, board: &mut TileBoard, moving: TileId, target: TileId) -> Vec<SwapStep> {
        let start = board.tile(moving).pos;
        let goal = board.tile(target).pos;
        let mut travel = (goal.x - start.x, goal.y - start.y);
        let mut steps = Vec::new();

        while travel.0 != 0 {
            let sign = travel.0.signum();
            let next = board.tile(moving).pos.offset(sign, 0);
            let neighbour = board
                .tile_id_at(next)
                .expect("knight decomposition stepped off the board");
            steps.push(exchange(board, moving, neighbour));
            travel.0 -= sign;
        }
        while travel.1 != 0 {
            let sign = travel.1.signum();
            let next = board.tile(moving).pos.offset(0, sign);
            let neighbour = board
                .tile_id_at(next)
                .expect("knight decomposition stepped off the board");
            steps.push(exchange(board, moving, neighbour));
            travel.1 -= sign;
        }
        steps
    }
}

fn exchange(board: &mut TileBoard, a: TileId, b: TileId) -> SwapStep {
    let step = SwapStep {
        from: board.tile(a).pos,
        to: board.tile(b).pos,
    };
    board.swap_positions(a, b);
    step
}
