// Monte Carlo preview of a strategy: many simulated matches in parallel,
// summarised so a manager can compare choice sets before playing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::choices::{EnvironmentalCategory, StrategyChoices};
use crate::config::EngineConfig;
use crate::engine::{BASE_RATE, simulate_match_with};
use crate::error::SimError;
use crate::multipliers::{calculate_efficiency_bonus, calculate_strategy_multiplier};

const CHUNK_TRIALS: usize = 1_000;
/// Last bucket collects every result at or above this many goals.
pub const HISTOGRAM_CAP: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyPreview {
    pub trials: usize,
    pub mean_goals: f64,
    pub mean_lambda: f64,
    pub scoring_rate: f64,
    pub histogram: Vec<u64>,
}

#[derive(Debug, Clone)]
struct Tally {
    trials: usize,
    goals: u64,
    lambda_sum: f64,
    scored: u64,
    histogram: [u64; HISTOGRAM_CAP + 1],
}

impl Tally {
    fn empty() -> Self {
        Self {
            trials: 0,
            goals: 0,
            lambda_sum: 0.0,
            scored: 0,
            histogram: [0; HISTOGRAM_CAP + 1],
        }
    }

    fn merge(mut self, other: &Tally) -> Self {
        self.trials += other.trials;
        self.goals += other.goals;
        self.lambda_sum += other.lambda_sum;
        self.scored += other.scored;
        for (dst, src) in self.histogram.iter_mut().zip(other.histogram.iter()) {
            *dst += src;
        }
        self
    }
}

/// Runs `trials` matches on the global rayon pool. Every chunk keys ChaCha
/// with `seed` and draws from stream `i` (its chunk index), so the result
/// does not depend on how many threads execute it and neighbouring seeds
/// share no chunks.
pub fn preview_strategy(
    choices: &StrategyChoices,
    prior_efficiency: f64,
    trials: usize,
    seed: u64,
    config: &EngineConfig,
) -> Result<StrategyPreview, SimError> {
    if trials == 0 {
        return Err(SimError::InvalidTrials);
    }

    let chunks = trials.div_ceil(CHUNK_TRIALS);
    let tallies = (0..chunks)
        .into_par_iter()
        .map(|idx| {
            let n = CHUNK_TRIALS.min(trials - idx * CHUNK_TRIALS);
            run_chunk(choices, prior_efficiency, n, seed, idx as u64, config)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total = tallies.iter().fold(Tally::empty(), Tally::merge);
    let n = total.trials as f64;
    Ok(StrategyPreview {
        trials: total.trials,
        mean_goals: total.goals as f64 / n,
        mean_lambda: total.lambda_sum / n,
        scoring_rate: total.scored as f64 / n,
        histogram: total.histogram.to_vec(),
    })
}

/// Same as [`preview_strategy`] but on a dedicated pool of `threads` workers.
/// Falls back to the global pool if the dedicated one cannot be built.
pub fn preview_strategy_with_threads(
    choices: &StrategyChoices,
    prior_efficiency: f64,
    trials: usize,
    seed: u64,
    config: &EngineConfig,
    threads: usize,
) -> Result<StrategyPreview, SimError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .ok();
    let action = || preview_strategy(choices, prior_efficiency, trials, seed, config);
    match pool.as_ref() {
        Some(pool) => pool.install(action),
        None => action(),
    }
}

/// Expected goals averaged over every environmental combination, in closed
/// form (conditions are independent and uniform).
pub fn analytic_expected_goals(
    choices: &StrategyChoices,
    prior_efficiency: f64,
) -> Result<f64, SimError> {
    if prior_efficiency.is_nan() || prior_efficiency < 0.0 {
        return Err(SimError::InvalidEfficiency(prior_efficiency));
    }
    let env_mean: f64 = EnvironmentalCategory::ALL
        .into_iter()
        .map(|cat| {
            let opts = cat.options();
            opts.iter().map(|e| e.multiplier).sum::<f64>() / opts.len() as f64
        })
        .product();
    Ok(BASE_RATE
        * calculate_strategy_multiplier(choices)
        * env_mean
        * calculate_efficiency_bonus(prior_efficiency))
}

fn run_chunk(
    choices: &StrategyChoices,
    prior_efficiency: f64,
    n: usize,
    seed: u64,
    stream: u64,
    config: &EngineConfig,
) -> Result<Tally, SimError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    let mut tally = Tally::empty();
    for _ in 0..n {
        let outcome = simulate_match_with(choices, prior_efficiency, config, &mut rng)?;
        let goals = outcome.goals_scored as usize;
        tally.trials += 1;
        tally.goals += outcome.goals_scored as u64;
        tally.lambda_sum += outcome.lambda;
        if goals > 0 {
            tally.scored += 1;
        }
        tally.histogram[goals.min(HISTOGRAM_CAP)] += 1;
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_trials_is_an_error() {
        let err = preview_strategy(&StrategyChoices::default(), 0.0, 0, 1, &EngineConfig::default());
        assert_eq!(err, Err(SimError::InvalidTrials));
    }

    #[test]
    fn histogram_accounts_for_every_trial() {
        let p = preview_strategy(
            &StrategyChoices::default(),
            0.0,
            2_500,
            17,
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(p.trials, 2_500);
        assert_eq!(p.histogram.len(), HISTOGRAM_CAP + 1);
        assert_eq!(p.histogram.iter().sum::<u64>(), 2_500);
        assert_eq!(2_500 - p.histogram[0], (p.scoring_rate * 2_500.0).round() as u64);
    }

    #[test]
    fn result_is_independent_of_thread_count() {
        let choices = StrategyChoices::default();
        let cfg = EngineConfig::default();
        let one = preview_strategy_with_threads(&choices, 0.3, 5_000, 8, &cfg, 1).unwrap();
        let four = preview_strategy_with_threads(&choices, 0.3, 5_000, 8, &cfg, 4).unwrap();
        assert_eq!(one, four);
    }

    #[test]
    fn analytic_mean_matches_simulation() {
        let choices = StrategyChoices::default();
        let expected = analytic_expected_goals(&choices, 0.0).unwrap();
        let p = preview_strategy(&choices, 0.0, 40_000, 3, &EngineConfig::default()).unwrap();
        assert!((p.mean_lambda - expected).abs() < 0.01, "{} vs {expected}", p.mean_lambda);
        assert!((p.mean_goals - expected).abs() < 0.03, "{} vs {expected}", p.mean_goals);
    }
}
