use std::path::Path;

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::leaderboard::LeaderboardEntry;
use crate::ledger::StoredMatch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub players: usize,
    pub matches: usize,
}

const LEADERBOARD_HEADER: [&str; 6] = [
    "Rank",
    "Username",
    "Wallet",
    "Total Goals",
    "Total Matches",
    "Efficiency",
];

const MATCHES_HEADER: [&str; 19] = [
    "Match ID",
    "Wallet",
    "Played At (UTC)",
    "Goals",
    "Lambda",
    "Strategy Multiplier",
    "Environmental Multiplier",
    "Efficiency Bonus",
    "Formation",
    "Defensive Philosophy",
    "Training Focus",
    "Attacking Approach",
    "Striker Role",
    "Tempo Style",
    "Match Mentality",
    "Weather",
    "Pitch Conditions",
    "Match Atmosphere",
    "Match Importance",
];

/// Writes the leaderboard and full match history into one workbook with the
/// sheets `Leaderboard` and `Matches`.
pub fn export_workbook(
    path: &Path,
    leaderboard: &[LeaderboardEntry],
    matches: &[StoredMatch],
) -> Result<ExportReport> {
    let mut leaderboard_rows = vec![header(&LEADERBOARD_HEADER)];
    leaderboard_rows.extend(leaderboard.iter().map(leaderboard_row));

    let mut match_rows = vec![header(&MATCHES_HEADER)];
    match_rows.extend(matches.iter().map(match_row));

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Leaderboard")?;
        write_rows(sheet, &leaderboard_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Matches")?;
        write_rows(sheet, &match_rows)?;
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export dir {}", parent.display()))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        players: leaderboard_rows.len().saturating_sub(1),
        matches: match_rows.len().saturating_sub(1),
    })
}

fn header(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn leaderboard_row(entry: &LeaderboardEntry) -> Vec<String> {
    vec![
        entry.rank.to_string(),
        entry.username.clone(),
        entry.wallet_address.clone(),
        entry.total_goals.to_string(),
        entry.total_matches.to_string(),
        format!("{:.3}", entry.efficiency),
    ]
}

fn match_row(m: &StoredMatch) -> Vec<String> {
    let mut row = vec![
        m.match_id.clone(),
        m.wallet_address.clone(),
        format_millis(m.played_at),
        m.goals.to_string(),
        format!("{:.4}", m.lambda),
        format!("{:.4}", m.strategy_multiplier),
        format!("{:.4}", m.environmental_multiplier),
        format!("{:.3}", m.efficiency_bonus),
    ];
    row.extend(m.strategy_choices.entries().map(|(_, opt)| opt.to_string()));
    row.extend(m.environmental_factors.entries().map(|(_, opt)| opt.to_string()));
    row
}

fn format_millis(millis: i64) -> String {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
