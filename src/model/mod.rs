mod board_event;
mod board_position;
mod error;
mod match_report;
mod swap;
mod tile;

pub use board_event::BoardEvent;
pub use board_position::BoardPos;
pub use error::{ConfigError, SwapRejection};
pub use match_report::MatchReport;
pub use swap::{SwapKind, SwapResult, SwapStep};
pub use tile::{BoardId, KindId, Tile, TileCatalog, TileId, TileKind};
