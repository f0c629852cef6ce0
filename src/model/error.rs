use thiserror::Error;

use super::BoardPos;

/// Fatal at setup: the board cannot be generated. Surfaced before any
/// gameplay begins, never a silently degenerate board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board needs at least one row and one column, got {columns}x{rows}")]
    DegenerateBoard { columns: usize, rows: usize },
    #[error("tile catalog has no spawnable kinds")]
    NoSpawnableKinds,
    #[error("spawnable tile weights sum to zero")]
    ZeroTotalWeight,
}

/// Expected, recoverable: the swap is refused and the board is unchanged.
/// The session returns to the idle state waiting for new input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapRejection {
    #[error("position {0} is outside the board")]
    OutOfBounds(BoardPos),
    #[error("no tile recorded at {0}")]
    NoTile(BoardPos),
    #[error("a tile cannot swap with itself at {0}")]
    SelfSwap(BoardPos),
    #[error("air tiles cannot be swapped horizontally")]
    HorizontalAirSwap,
    #[error("air cannot come to rest above a solid tile")]
    AirAboveSolid,
    #[error("{0} and {1} are neither adjacent nor a knight's move apart")]
    OutOfReach(BoardPos, BoardPos),
    #[error("a previous swap is still resolving")]
    Busy,
}
