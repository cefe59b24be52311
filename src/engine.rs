// Match simulation: environmental draw, multipliers, efficiency bonus and a
// Poisson goal count, packaged as a `MatchOutcome`.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::choices::{EnvironmentalFactors, StrategyChoices};
use crate::config::EngineConfig;
use crate::environment::generate_environmental_factors;
use crate::error::SimError;
use crate::multipliers::{
    calculate_efficiency_bonus, calculate_environmental_multiplier, calculate_strategy_multiplier,
};
use crate::poisson::poisson_sample;

/// Goal rate for a striker before any multiplier.
pub const BASE_RATE: f64 = 0.5;

const MATCH_ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub goals_scored: u32,
    pub lambda: f64,
    pub strategy_choices: StrategyChoices,
    pub environmental_factors: EnvironmentalFactors,
    pub strategy_multiplier: f64,
    pub environmental_multiplier: f64,
    pub efficiency_bonus: f64,
    /// Milliseconds since the Unix epoch (UTC).
    pub timestamp: i64,
    pub match_id: String,
}

/// Simulates one match with the thread-local RNG and default settings.
pub fn simulate_match(
    choices: &StrategyChoices,
    prior_efficiency: f64,
) -> Result<MatchOutcome, SimError> {
    let mut rng = rand::thread_rng();
    simulate_match_with(choices, prior_efficiency, &EngineConfig::default(), &mut rng)
}

pub fn simulate_match_with<R: Rng + ?Sized>(
    choices: &StrategyChoices,
    prior_efficiency: f64,
    config: &EngineConfig,
    rng: &mut R,
) -> Result<MatchOutcome, SimError> {
    let prior_efficiency = validate_efficiency(prior_efficiency)?;
    if config.strict_options
        && let Some((category, option)) = choices.unknown_options().into_iter().next()
    {
        return Err(SimError::UnknownOption {
            category,
            option: option.to_string(),
        });
    }

    let environmental_factors = generate_environmental_factors(rng);

    let strategy_multiplier = calculate_strategy_multiplier(choices);
    let environmental_multiplier = calculate_environmental_multiplier(&environmental_factors);
    let efficiency_bonus = calculate_efficiency_bonus(prior_efficiency);

    let lambda = BASE_RATE * strategy_multiplier * environmental_multiplier * efficiency_bonus;
    let goals_scored = poisson_sample(lambda, rng);

    let now = Utc::now();
    let timestamp = now.timestamp_millis();
    let match_id = format!("match_{timestamp}_{}", random_suffix(rng));

    Ok(MatchOutcome {
        goals_scored,
        lambda,
        strategy_choices: choices.clone(),
        environmental_factors,
        strategy_multiplier,
        environmental_multiplier,
        efficiency_bonus,
        timestamp,
        match_id,
    })
}

/// Intensity for a choice set under fixed conditions, without sampling.
pub fn expected_lambda(
    choices: &StrategyChoices,
    factors: &EnvironmentalFactors,
    prior_efficiency: f64,
) -> Result<f64, SimError> {
    let prior_efficiency = validate_efficiency(prior_efficiency)?;
    Ok(BASE_RATE
        * calculate_strategy_multiplier(choices)
        * calculate_environmental_multiplier(factors)
        * calculate_efficiency_bonus(prior_efficiency))
}

// NaN and negatives are rejected; +inf saturates the bonus at its ceiling.
fn validate_efficiency(efficiency: f64) -> Result<f64, SimError> {
    if efficiency.is_nan() || efficiency < 0.0 {
        return Err(SimError::InvalidEfficiency(efficiency));
    }
    Ok(efficiency)
}

fn random_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..MATCH_ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
