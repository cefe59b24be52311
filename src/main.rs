use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use nads_league::config::AppConfig;
use nads_league::engine::{MatchOutcome, simulate_match_with};
use nads_league::export::export_workbook;
use nads_league::leaderboard::{LeaderboardEntry, rank_players};
use nads_league::multipliers::{
    EnvironmentalMultipliers, StrategyMultipliers, get_environmental_multipliers,
    get_strategy_multipliers,
};
use nads_league::poisson::{poisson_pmf, scoring_probability};
use nads_league::preview::{analytic_expected_goals, preview_strategy_with_threads};
use nads_league::tables::OptionEntry;
use nads_league::{EnvironmentalCategory, StrategicCategory, StrategyChoices, ledger};

const DEFAULT_PREVIEW_TRIALS: usize = 10_000;
const DEFAULT_HISTORY_LIMIT: usize = 10;
// Last entry of `goalChances` covers this many goals or more.
const GOAL_CHANCE_CAP: u32 = 5;

const USAGE: &str = "usage:
  nads_league simulate <choices.json> [--efficiency E] [--seed S]
  nads_league play <address> <choices.json> [--db PATH] [--seed S]
  nads_league stats <address> [--db PATH]
  nads_league history <address> [--limit N] [--db PATH]
  nads_league name <address> <username> [--db PATH]
  nads_league leaderboard [--db PATH]
  nads_league preview <choices.json> [--efficiency E] [--trials N] [--seed S]
  nads_league export <out.xlsx> [--db PATH]
  nads_league options";

// Flags that consume the following argument.
const VALUE_FLAGS: [&str; 5] = ["--efficiency", "--seed", "--db", "--trials", "--limit"];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulationReport<'a> {
    outcome: &'a MatchOutcome,
    strategy_breakdown: StrategyMultipliers,
    environmental_breakdown: EnvironmentalMultipliers,
    scoring_chance: f64,
    goal_chances: Vec<f64>,
}

fn main() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let positional = positional_args(&args);
    let Some(command) = positional.first() else {
        println!("{USAGE}");
        return Ok(());
    };

    let mut config = AppConfig::from_env();
    if has_flag(&args, "--strict") {
        config.engine.strict_options = true;
    }

    match command.as_str() {
        "simulate" => cmd_simulate(&args, &positional, &config),
        "play" => cmd_play(&args, &positional, &config),
        "stats" => cmd_stats(&args, &positional, &config),
        "history" => cmd_history(&args, &positional, &config),
        "name" => cmd_name(&args, &positional, &config),
        "leaderboard" => cmd_leaderboard(&args, &config),
        "preview" => cmd_preview(&args, &positional, &config),
        "export" => cmd_export(&args, &positional, &config),
        "options" => {
            print_options();
            Ok(())
        }
        other => bail!("unknown command '{other}'\n{USAGE}"),
    }
}

fn cmd_simulate(args: &[String], positional: &[String], config: &AppConfig) -> Result<()> {
    let choices = load_choices(positional.get(1))?;
    let efficiency = parse_arg::<f64>(args, "--efficiency")?.unwrap_or(0.0);
    let mut rng = make_rng(args, config)?;
    let outcome = simulate_match_with(&choices, efficiency, &config.engine, &mut rng)?;
    print_report(&outcome)
}

fn cmd_play(args: &[String], positional: &[String], config: &AppConfig) -> Result<()> {
    let address = required(positional, 1, "address")?;
    let choices = load_choices(positional.get(2))?;
    let mut conn = ledger::open_db(&db_path(args, config)?)?;

    let efficiency = ledger::player_efficiency(&conn, address)?;
    let mut rng = make_rng(args, config)?;
    let outcome = simulate_match_with(&choices, efficiency, &config.engine, &mut rng)?;
    let stats = ledger::record_match(&mut conn, address, &outcome)?;

    print_report(&outcome)?;
    println!(
        "{}: {} goal(s) in {} match(es), efficiency {:.3}",
        stats.display_name(),
        stats.total_goals,
        stats.total_matches,
        stats.efficiency
    );
    Ok(())
}

fn cmd_stats(args: &[String], positional: &[String], config: &AppConfig) -> Result<()> {
    let address = required(positional, 1, "address")?;
    let conn = ledger::open_db(&db_path(args, config)?)?;
    match ledger::load_player_stats(&conn, address)? {
        Some(stats) => println!("{}", serde_json::to_string_pretty(&stats)?),
        None => println!("no matches recorded for {address}"),
    }
    Ok(())
}

fn cmd_history(args: &[String], positional: &[String], config: &AppConfig) -> Result<()> {
    let address = required(positional, 1, "address")?;
    let limit = parse_arg::<usize>(args, "--limit")?.unwrap_or(DEFAULT_HISTORY_LIMIT);
    let conn = ledger::open_db(&db_path(args, config)?)?;
    let matches = ledger::load_recent_matches(&conn, address, limit)?;
    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

fn cmd_name(args: &[String], positional: &[String], config: &AppConfig) -> Result<()> {
    let address = required(positional, 1, "address")?;
    let username = required(positional, 2, "username")?;
    let conn = ledger::open_db(&db_path(args, config)?)?;
    ledger::set_username(&conn, address, username)?;
    println!("{address} is now shown as {}", username.trim());
    Ok(())
}

fn cmd_leaderboard(args: &[String], config: &AppConfig) -> Result<()> {
    let conn = ledger::open_db(&db_path(args, config)?)?;
    let entries = rank_players(ledger::load_all_player_stats(&conn)?);
    if entries.is_empty() {
        println!("leaderboard is empty");
        return Ok(());
    }
    print_leaderboard(&entries);
    Ok(())
}

fn cmd_preview(args: &[String], positional: &[String], config: &AppConfig) -> Result<()> {
    let choices = load_choices(positional.get(1))?;
    let efficiency = parse_arg::<f64>(args, "--efficiency")?.unwrap_or(0.0);
    let trials = parse_arg::<usize>(args, "--trials")?.unwrap_or(DEFAULT_PREVIEW_TRIALS);
    let seed = parse_arg::<u64>(args, "--seed")?
        .or(config.seed)
        .unwrap_or_else(rand::random);

    let preview = preview_strategy_with_threads(
        &choices,
        efficiency,
        trials,
        seed,
        &config.engine,
        config.preview_threads,
    )?;
    let expected = analytic_expected_goals(&choices, efficiency)?;

    println!("{}", serde_json::to_string_pretty(&preview)?);
    println!("expected goals (exact): {expected:.4}");
    println!("seed: {seed}");
    Ok(())
}

fn cmd_export(args: &[String], positional: &[String], config: &AppConfig) -> Result<()> {
    let out = PathBuf::from(required(positional, 1, "output path")?);
    let conn = ledger::open_db(&db_path(args, config)?)?;
    let entries = rank_players(ledger::load_all_player_stats(&conn)?);
    let matches = ledger::load_all_matches(&conn)?;
    let report = export_workbook(&out, &entries, &matches)?;
    println!(
        "wrote {} player(s) and {} match(es) to {}",
        report.players,
        report.matches,
        out.display()
    );
    Ok(())
}

fn build_report(outcome: &MatchOutcome) -> SimulationReport<'_> {
    SimulationReport {
        outcome,
        strategy_breakdown: get_strategy_multipliers(&outcome.strategy_choices),
        environmental_breakdown: get_environmental_multipliers(&outcome.environmental_factors),
        scoring_chance: scoring_probability(outcome.lambda),
        goal_chances: poisson_pmf(outcome.lambda, GOAL_CHANCE_CAP),
    }
}

fn print_report(outcome: &MatchOutcome) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&build_report(outcome))?);
    Ok(())
}

fn print_leaderboard(entries: &[LeaderboardEntry]) {
    println!(
        "{:>4}  {:<20} {:<44} {:>6} {:>7} {:>6}",
        "#", "player", "wallet", "goals", "matches", "eff"
    );
    for e in entries {
        println!(
            "{:>4}  {:<20} {:<44} {:>6} {:>7} {:>6.3}",
            e.rank, e.username, e.wallet_address, e.total_goals, e.total_matches, e.efficiency
        );
    }
}

fn print_options() {
    for cat in StrategicCategory::ALL {
        println!("{} ({})", cat.label(), cat.key());
        for entry in cat.options() {
            println!("{}", option_line(entry));
        }
    }
    for cat in EnvironmentalCategory::ALL {
        println!("{} ({}, drawn each match)", cat.label(), cat.key());
        for entry in cat.options() {
            println!("{}", option_line(entry));
        }
    }
}

fn option_line(entry: &OptionEntry) -> String {
    format!(
        "  {:<24} x{:.2}  {}",
        entry.name, entry.multiplier, entry.description
    )
}

fn load_choices(path: Option<&String>) -> Result<StrategyChoices> {
    let Some(path) = path else {
        return Ok(StrategyChoices::default());
    };
    let path = Path::new(path);
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read choices from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse choices in {}", path.display()))
}

fn make_rng(args: &[String], config: &AppConfig) -> Result<ChaCha8Rng> {
    let rng = match parse_arg::<u64>(args, "--seed")?.or(config.seed) {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    Ok(rng)
}

fn db_path(args: &[String], config: &AppConfig) -> Result<PathBuf> {
    if let Some(path) = flag_value(args, "--db")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path.trim()));
    }
    config
        .db_path
        .clone()
        .context("no ledger path: pass --db or set NADS_DB_PATH")
}

fn required<'a>(positional: &'a [String], idx: usize, what: &str) -> Result<&'a str> {
    positional
        .get(idx)
        .map(String::as_str)
        .with_context(|| format!("missing {what}\n{USAGE}"))
}

fn positional_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg.starts_with("--") {
            skip_next = VALUE_FLAGS.contains(&arg.as_str());
            continue;
        }
        out.push(arg.clone());
    }
    out
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(name).and_then(|rest| rest.strip_prefix('=')) {
            return Some(raw);
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
        {
            return Some(next);
        }
    }
    None
}

fn parse_arg<T: FromStr>(args: &[String], name: &str) -> Result<Option<T>> {
    match flag_value(args, name) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => Ok(Some(v)),
            Err(_) => bail!("invalid value '{raw}' for {name}"),
        },
        None => Ok(None),
    }
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}
