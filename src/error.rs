use thiserror::Error;

use crate::choices::StrategicCategory;

/// Input problems rejected at the simulation boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("prior efficiency must be a non-negative number, got {0}")]
    InvalidEfficiency(f64),
    #[error("unknown option '{option}' for {}", .category.key())]
    UnknownOption {
        category: StrategicCategory,
        option: String,
    },
    #[error("invalid wallet address '{0}'")]
    InvalidAddress(String),
    #[error("trial count must be at least 1")]
    InvalidTrials,
}
