pub mod board;
pub mod config;
pub mod engine;
pub mod generator;
pub mod matches;
pub mod swap;

pub use board::TileBoard;
pub use config::BoardConfig;
pub use engine::BoardEngine;
pub use generator::BoardGenerator;
pub use matches::MatchDetector;
pub use swap::{default_rules, SwapContext, SwapExecutor, SwapRule, SwapValidator};
