use std::str::FromStr;

use anyhow::{Result, bail};

use nads_league::config::AppConfig;
use nads_league::preview::{analytic_expected_goals, preview_strategy_with_threads};
use nads_league::{StrategicCategory, StrategyChoices};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    let config = AppConfig::from_env();
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let trials = parse_arg::<usize>(&args, "--trials")?.unwrap_or(0);
    let seed = parse_arg::<u64>(&args, "--seed")?
        .or(config.seed)
        .unwrap_or(2024);
    let baseline = StrategyChoices::default();

    // Varies one category at a time against the neutral baseline.
    for category in StrategicCategory::ALL {
        let mut rows = Vec::new();
        for entry in category.options() {
            let mut choices = baseline.clone();
            choices.set(category, entry.name);
            let expected = analytic_expected_goals(&choices, 0.0)?;
            let simulated = if trials > 0 {
                let preview = preview_strategy_with_threads(
                    &choices,
                    0.0,
                    trials,
                    seed,
                    &config.engine,
                    config.preview_threads,
                )?;
                Some(preview)
            } else {
                None
            };
            rows.push((entry.name, expected, simulated));
        }
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(b.0)));

        println!("{}", category.label());
        for (name, expected, simulated) in rows {
            match simulated {
                Some(p) => println!(
                    "  {name:<24} E[goals]={expected:.3}  sim={:.3}  P(score)={:.1}%",
                    p.mean_goals,
                    p.scoring_rate * 100.0
                ),
                None => println!("  {name:<24} E[goals]={expected:.3}"),
            }
        }
    }

    let best = best_choices();
    println!(
        "best combination: E[goals]={:.3} at zero efficiency, {:.3} at max bonus",
        analytic_expected_goals(&best, 0.0)?,
        analytic_expected_goals(&best, f64::INFINITY)?
    );
    Ok(())
}

fn best_choices() -> StrategyChoices {
    let mut choices = StrategyChoices::default();
    for category in StrategicCategory::ALL {
        if let Some(top) = category
            .options()
            .iter()
            .max_by(|a, b| a.multiplier.total_cmp(&b.multiplier))
        {
            choices.set(category, top.name);
        }
    }
    choices
}

fn parse_arg<T: FromStr>(args: &[String], name: &str) -> Result<Option<T>> {
    for (idx, arg) in args.iter().enumerate() {
        let raw = if let Some(raw) = arg.strip_prefix(&format!("{name}=")) {
            raw
        } else if arg == name
            && let Some(next) = args.get(idx + 1)
        {
            next.as_str()
        } else {
            continue;
        };
        return match raw.trim().parse::<T>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => bail!("invalid value '{raw}' for {name}"),
        };
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(parse_arg::<usize>(&args(&["--trials", "many"]), "--trials").is_err());
        assert!(parse_arg::<u64>(&args(&["--seed=-1"]), "--seed").is_err());
    }

    #[test]
    fn absent_and_valid_flags() {
        let a = args(&["--trials=250", "--seed", "7"]);
        assert_eq!(parse_arg::<usize>(&a, "--trials").unwrap(), Some(250));
        assert_eq!(parse_arg::<u64>(&a, "--seed").unwrap(), Some(7));
        assert_eq!(parse_arg::<u64>(&args(&[]), "--seed").unwrap(), None);
    }
}
