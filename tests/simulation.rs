use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use nads_league::config::EngineConfig;
use nads_league::engine::{BASE_RATE, expected_lambda};
use nads_league::environment::generate_environmental_factors;
use nads_league::multipliers::{
    calculate_efficiency_bonus, calculate_environmental_multiplier, calculate_strategy_multiplier,
    get_environmental_multipliers, get_strategy_multipliers,
};
use nads_league::tables::{environmental_entry, strategy_entry};
use nads_league::{
    EnvironmentalCategory, EnvironmentalFactors, MatchOutcome, StrategicCategory, StrategyChoices,
    simulate_match, simulate_match_with,
};

fn choices(values: [&str; 7]) -> StrategyChoices {
    let mut out = StrategyChoices::default();
    for (cat, value) in StrategicCategory::ALL.into_iter().zip(values) {
        out.set(cat, value);
    }
    out
}

fn random_choices(rng: &mut ChaCha8Rng) -> StrategyChoices {
    let mut out = StrategyChoices::default();
    for cat in StrategicCategory::ALL {
        let pick = cat.options().choose(rng).map(|e| e.name).unwrap_or("");
        out.set(cat, pick);
    }
    out
}

fn all_out_attack() -> StrategyChoices {
    choices([
        "3-4-3",
        "Gegenpressing",
        "Finishing Practice",
        "Quick Transitions",
        "Poacher",
        "Direct Style",
        "Desperate",
    ])
}

fn park_the_bus() -> StrategyChoices {
    choices([
        "5-3-2",
        "Low Block",
        "Physical Prep",
        "Build-Up Play",
        "Target Man",
        "Patient Build-Up",
        "Cautious",
    ])
}

#[test]
fn strategy_multiplier_is_product_of_lookups_for_random_sets() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..500 {
        let c = random_choices(&mut rng);
        let reference: f64 = c
            .entries()
            .iter()
            .map(|(cat, opt)| strategy_entry(*cat, opt).map(|e| e.multiplier).unwrap_or(f64::NAN))
            .product();
        let got = calculate_strategy_multiplier(&c);
        assert!((got - reference).abs() < 1e-12, "{c:?}: {got} vs {reference}");
        assert!((get_strategy_multipliers(&c).product() - reference).abs() < 1e-12);
    }
}

#[test]
fn environmental_multiplier_is_product_of_lookups_for_random_draws() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    for _ in 0..500 {
        let f = generate_environmental_factors(&mut rng);
        let reference: f64 = f
            .entries()
            .iter()
            .map(|(cat, opt)| {
                environmental_entry(*cat, opt)
                    .map(|e| e.multiplier)
                    .unwrap_or(f64::NAN)
            })
            .product();
        let got = calculate_environmental_multiplier(&f);
        assert!((got - reference).abs() < 1e-12, "{f:?}");
        assert!((get_environmental_multipliers(&f).product() - reference).abs() < 1e-12);
    }
}

#[test]
fn efficiency_bonus_is_bounded_and_monotone() {
    assert_eq!(calculate_efficiency_bonus(0.0), 1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mut samples = (0..1_000)
        .map(|_| rng.gen_range(1e-9..5.0))
        .collect::<Vec<f64>>();
    samples.sort_by(f64::total_cmp);
    let mut prev = 0.8;
    for e in samples {
        let b = calculate_efficiency_bonus(e);
        assert!((0.8..=1.2).contains(&b), "bonus({e}) = {b}");
        assert!(b >= prev, "bonus must not decrease at {e}");
        prev = b;
    }
}

#[test]
fn lookups_are_idempotent() {
    let c = all_out_attack();
    let f = EnvironmentalFactors {
        weather: "Heavy Rain".to_string(),
        pitch_conditions: "Muddy Pitch".to_string(),
        match_atmosphere: "Away + Hostile Crowd".to_string(),
        match_importance: "Dead Rubber".to_string(),
    };
    let a = get_strategy_multipliers(&c);
    let b = get_strategy_multipliers(&c);
    assert_eq!(a.product().to_bits(), b.product().to_bits());
    assert_eq!(a, b);
    assert_eq!(
        get_environmental_multipliers(&f),
        get_environmental_multipliers(&f)
    );
}

#[test]
fn all_out_attack_lands_in_expected_lambda_band() {
    let c = all_out_attack();
    assert!((calculate_strategy_multiplier(&c) - 1.3_f64.powi(7)).abs() < 1e-9);

    let cfg = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(14);
    for _ in 0..2_000 {
        let out = simulate_match_with(&c, 0.0, &cfg, &mut rng).unwrap();
        assert_eq!(out.efficiency_bonus, 1.0);
        assert!(out.lambda >= 1.63 && out.lambda <= 5.49, "lambda {}", out.lambda);
    }
}

#[test]
fn worst_case_strategy_mostly_blanks() {
    let c = park_the_bus();
    let strategy = calculate_strategy_multiplier(&c);
    assert!(strategy < 0.4, "strategy multiplier {strategy}");

    let cfg = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(15);
    let mut counts = [0u32; 8];
    for _ in 0..5_000 {
        let out = simulate_match_with(&c, 0.0, &cfg, &mut rng).unwrap();
        counts[(out.goals_scored as usize).min(7)] += 1;
    }
    let modal = counts
        .iter()
        .enumerate()
        .max_by_key(|(_, n)| **n)
        .map(|(k, _)| k);
    assert_eq!(modal, Some(0));
    assert!(counts[0] > 3_500, "blanks {}", counts[0]);
}

#[test]
fn simulate_match_always_has_positive_lambda() {
    let mut rng = ChaCha8Rng::seed_from_u64(16);
    for _ in 0..300 {
        let c = random_choices(&mut rng);
        let eff = rng.gen_range(0.0..3.0);
        let out: MatchOutcome = simulate_match(&c, eff).unwrap();
        assert!(out.lambda > 0.0);
        let again = expected_lambda(&c, &out.environmental_factors, eff).unwrap();
        assert!((again - out.lambda).abs() < 1e-12);
    }
}

#[test]
fn lambda_is_base_rate_times_all_factors() {
    let c = all_out_attack();
    let f = EnvironmentalFactors {
        weather: "Perfect Day".to_string(),
        pitch_conditions: "Artificial Turf".to_string(),
        match_atmosphere: "Home + Electric Crowd".to_string(),
        match_importance: "Cup Final".to_string(),
    };
    let lambda = expected_lambda(&c, &f, 1.0).unwrap();
    let expected = BASE_RATE * 1.3_f64.powi(7) * (1.0 * 1.05 * 1.15 * 1.1) * 1.2;
    assert!((lambda - expected).abs() < 1e-9, "{lambda} vs {expected}");
}

#[test]
fn every_category_key_round_trips_through_json() {
    let c = all_out_attack();
    let json = serde_json::to_value(&c).unwrap();
    for cat in StrategicCategory::ALL {
        assert_eq!(json[cat.key()], c.get(cat));
    }
    let f = EnvironmentalFactors {
        weather: "Light Rain".to_string(),
        pitch_conditions: "Worn Grass".to_string(),
        match_atmosphere: "Away + Neutral Crowd".to_string(),
        match_importance: "Derby Match".to_string(),
    };
    let json = serde_json::to_value(&f).unwrap();
    for cat in EnvironmentalCategory::ALL {
        assert_eq!(json[cat.key()], f.get(cat));
    }
}
