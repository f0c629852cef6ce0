use std::time::Duration;

use super::{BoardPos, TileId};

/// How a legal pair of positions may be exchanged. An illegal pair is a
/// `SwapRejection`, not a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapKind {
    /// One grid-step apart, both tiles solid. Triggers match detection.
    Adjacent,
    /// L-shaped (2,1) offset, decomposed into unit adjacent swaps.
    Knight,
    /// Adjacent swap involving an air tile; bypasses match detection.
    GravityFree,
}

/// One committed unit exchange, recorded with the pre-step coordinates of
/// the two tiles involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStep {
    pub from: BoardPos,
    pub to: BoardPos,
}

/// Details of one completed swap, handed to listeners and then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapResult {
    pub kind: SwapKind,
    pub tiles: [TileId; 2],
    /// Unit adjacent exchanges in commit order; a single entry except for
    /// knight swaps.
    pub steps: Vec<SwapStep>,
    /// Presentation metadata only; the logical commit is instantaneous.
    pub move_duration: Duration,
}

impl SwapResult {
    pub fn horizontal_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.from.y == s.to.y).count()
    }

    pub fn vertical_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.from.x == s.to.x).count()
    }
}
