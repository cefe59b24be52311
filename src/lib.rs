pub mod choices;
pub mod config;
pub mod engine;
pub mod environment;
pub mod error;
pub mod export;
pub mod leaderboard;
pub mod ledger;
pub mod multipliers;
pub mod poisson;
pub mod preview;
pub mod tables;

pub use choices::{EnvironmentalCategory, EnvironmentalFactors, StrategicCategory, StrategyChoices};
pub use engine::{MatchOutcome, simulate_match, simulate_match_with};
pub use error::SimError;
