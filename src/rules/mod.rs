// Heuristic rule layer
pub mod heuristics;
pub mod thresholds;

pub use heuristics::*;
pub use thresholds::*;

/// Bounds of the clamped risk score.
pub const MIN_RISK_SCORE: u8 = 0;
pub const MAX_RISK_SCORE: u8 = 100;
