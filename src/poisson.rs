use log::warn;
use rand::Rng;

/// Draws above this many multiplications get logged; they are never cut off.
pub const LONG_DRAW_STEPS: u32 = 64;

/// Knuth's multiplicative sampler: multiply uniform draws until the running
/// product drops to `e^-lambda`. Fine for the small intensities a match
/// produces; `e^-lambda` underflows for very large lambda.
pub fn poisson_sample<R: Rng + ?Sized>(lambda: f64, rng: &mut R) -> u32 {
    if lambda.is_nan() || lambda <= 0.0 {
        return 0;
    }

    let threshold = (-lambda).exp();
    let mut k: u32 = 0;
    let mut p = 1.0_f64;
    loop {
        k += 1;
        p *= rng.gen_range(0.0..1.0);
        if p <= threshold {
            break;
        }
    }

    if k > LONG_DRAW_STEPS {
        warn!("poisson draw took {k} steps for lambda {lambda:.4}");
    }
    k - 1
}

/// P(X = k) for k in 0..=max_k. Mass beyond `max_k` is folded into the last
/// bucket so the vector always sums to 1.
pub fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let mut out = vec![0.0; max_k + 1];
    let lambda = lambda.max(0.0);

    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }

    let sum: f64 = out.iter().sum();
    if sum < 1.0 {
        out[max_k] += 1.0 - sum;
    }
    out
}

/// Chance of at least one goal at intensity `lambda`.
pub fn scoring_probability(lambda: f64) -> f64 {
    1.0 - (-lambda.max(0.0)).exp()
}
