use super::{BoardId, MatchReport, SwapResult};

/// Notifications handed to the presentation layer. Fire-and-forget; the
/// engine never blocks on or inspects how these are handled.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    BoardGenerated {
        board: BoardId,
        columns: usize,
        rows: usize,
    },
    SwapCompleted(SwapResult),
    TilesCleared(MatchReport),
}
