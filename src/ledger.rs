// Local SQLite ledger of played matches and per-player running totals.
// Totals feed the efficiency ratio used by the next simulation.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};

use crate::choices::{EnvironmentalFactors, StrategyChoices};
use crate::engine::MatchOutcome;
use crate::leaderboard::{PlayerStats, normalize_address};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMatch {
    pub match_id: String,
    pub wallet_address: String,
    pub goals: u32,
    pub lambda: f64,
    pub strategy_multiplier: f64,
    pub environmental_multiplier: f64,
    pub efficiency_bonus: f64,
    pub strategy_choices: StrategyChoices,
    pub environmental_factors: EnvironmentalFactors,
    pub played_at: i64,
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    conn.execute_batch("PRAGMA journal_mode = WAL;")
        .context("enable wal")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("open in-memory sqlite db")?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS players (
            wallet_address TEXT PRIMARY KEY,
            username TEXT NULL,
            total_goals INTEGER NOT NULL DEFAULT 0,
            total_matches INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS matches (
            match_id TEXT PRIMARY KEY,
            wallet_address TEXT NOT NULL,
            goals INTEGER NOT NULL,
            lambda REAL NOT NULL,
            strategy_multiplier REAL NOT NULL,
            environmental_multiplier REAL NOT NULL,
            efficiency_bonus REAL NOT NULL,
            choices_json TEXT NOT NULL,
            environment_json TEXT NOT NULL,
            played_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_matches_wallet ON matches(wallet_address);
        CREATE INDEX IF NOT EXISTS idx_matches_played_at ON matches(played_at);
        "#,
    )
    .context("init ledger schema")?;
    Ok(())
}

/// Stores one outcome and bumps the player's totals in a single transaction.
/// Returns the updated totals.
pub fn record_match(
    conn: &mut Connection,
    address: &str,
    outcome: &MatchOutcome,
) -> Result<PlayerStats> {
    let address = normalize_address(address)?;
    let choices_json =
        serde_json::to_string(&outcome.strategy_choices).context("serialize choices")?;
    let environment_json =
        serde_json::to_string(&outcome.environmental_factors).context("serialize conditions")?;

    let tx = conn.transaction().context("begin ledger transaction")?;
    tx.execute(
        r#"
        INSERT INTO matches (
            match_id, wallet_address, goals, lambda,
            strategy_multiplier, environmental_multiplier, efficiency_bonus,
            choices_json, environment_json, played_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        "#,
        params![
            outcome.match_id,
            address,
            outcome.goals_scored as i64,
            outcome.lambda,
            outcome.strategy_multiplier,
            outcome.environmental_multiplier,
            outcome.efficiency_bonus,
            choices_json,
            environment_json,
            outcome.timestamp,
        ],
    )
    .with_context(|| format!("insert match {}", outcome.match_id))?;

    tx.execute(
        r#"
        INSERT INTO players (wallet_address, username, total_goals, total_matches, updated_at)
        VALUES (?1, NULL, ?2, 1, ?3)
        ON CONFLICT(wallet_address) DO UPDATE SET
            total_goals = players.total_goals + excluded.total_goals,
            total_matches = players.total_matches + 1,
            updated_at = excluded.updated_at
        "#,
        params![address, outcome.goals_scored as i64, Utc::now().to_rfc3339()],
    )
    .context("update player totals")?;
    tx.commit().context("commit ledger transaction")?;

    let stats = load_player_stats(conn, &address)?
        .with_context(|| format!("player {address} missing after update"))?;
    info!(
        "recorded {} for {}: {} goal(s), efficiency now {:.3}",
        outcome.match_id, address, outcome.goals_scored, stats.efficiency
    );
    Ok(stats)
}

pub fn set_username(conn: &Connection, address: &str, username: &str) -> Result<()> {
    let address = normalize_address(address)?;
    conn.execute(
        r#"
        INSERT INTO players (wallet_address, username, total_goals, total_matches, updated_at)
        VALUES (?1, ?2, 0, 0, ?3)
        ON CONFLICT(wallet_address) DO UPDATE SET
            username = excluded.username,
            updated_at = excluded.updated_at
        "#,
        params![address, username.trim(), Utc::now().to_rfc3339()],
    )
    .context("set username")?;
    Ok(())
}

pub fn load_player_stats(conn: &Connection, address: &str) -> Result<Option<PlayerStats>> {
    let address = normalize_address(address)?;
    conn.query_row(
        r#"
        SELECT wallet_address, username, total_goals, total_matches
        FROM players WHERE wallet_address = ?1
        "#,
        params![address],
        player_from_row,
    )
    .optional()
    .context("query player stats")
}

/// Prior efficiency for a player; 0 for unknown players.
pub fn player_efficiency(conn: &Connection, address: &str) -> Result<f64> {
    Ok(load_player_stats(conn, address)?
        .map(|p| p.efficiency)
        .unwrap_or(0.0))
}

pub fn load_all_player_stats(conn: &Connection) -> Result<Vec<PlayerStats>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT wallet_address, username, total_goals, total_matches
            FROM players ORDER BY wallet_address
            "#,
        )
        .context("prepare load players")?;
    let rows = stmt
        .query_map([], player_from_row)
        .context("query load players")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode player row")?);
    }
    Ok(out)
}

pub fn load_recent_matches(
    conn: &Connection,
    address: &str,
    limit: usize,
) -> Result<Vec<StoredMatch>> {
    let address = normalize_address(address)?;
    let mut stmt = conn
        .prepare(
            r#"
            SELECT match_id, wallet_address, goals, lambda,
                   strategy_multiplier, environmental_multiplier, efficiency_bonus,
                   choices_json, environment_json, played_at
            FROM matches WHERE wallet_address = ?1
            ORDER BY played_at DESC, rowid DESC
            LIMIT ?2
            "#,
        )
        .context("prepare load matches")?;
    let rows = stmt
        .query_map(params![address, limit as i64], match_from_row)
        .context("query load matches")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode match row")?);
    }
    Ok(out)
}

pub fn load_all_matches(conn: &Connection) -> Result<Vec<StoredMatch>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT match_id, wallet_address, goals, lambda,
                   strategy_multiplier, environmental_multiplier, efficiency_bonus,
                   choices_json, environment_json, played_at
            FROM matches ORDER BY played_at, rowid
            "#,
        )
        .context("prepare load all matches")?;
    let rows = stmt
        .query_map([], match_from_row)
        .context("query load all matches")?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.context("decode match row")?);
    }
    Ok(out)
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<PlayerStats> {
    let goals = row.get::<_, i64>(2)?.max(0) as u64;
    let matches = row.get::<_, i64>(3)?.max(0) as u64;
    Ok(PlayerStats::new(row.get(0)?, row.get(1)?, goals, matches))
}

fn match_from_row(row: &Row<'_>) -> rusqlite::Result<StoredMatch> {
    let choices_json: String = row.get(7)?;
    let environment_json: String = row.get(8)?;
    Ok(StoredMatch {
        match_id: row.get(0)?,
        wallet_address: row.get(1)?,
        goals: row.get::<_, i64>(2)?.max(0) as u32,
        lambda: row.get(3)?,
        strategy_multiplier: row.get(4)?,
        environmental_multiplier: row.get(5)?,
        efficiency_bonus: row.get(6)?,
        strategy_choices: decode_json(7, &choices_json)?,
        environmental_factors: decode_json(8, &environment_json)?,
        played_at: row.get(9)?,
    })
}

fn decode_json<T: serde::de::DeserializeOwned>(idx: usize, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}
