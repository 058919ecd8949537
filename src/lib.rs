pub mod adapters;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod normalize;
pub mod rules;

pub use engine::{ProviderSet, RiskAggregator};
pub use error::types::*;
pub use models::{Report, RiskLevel};
