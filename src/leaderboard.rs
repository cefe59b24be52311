use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub wallet_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub total_goals: u64,
    pub total_matches: u64,
    pub efficiency: f64,
}

impl PlayerStats {
    pub fn new(wallet_address: String, username: Option<String>, goals: u64, matches: u64) -> Self {
        Self {
            wallet_address,
            username,
            total_goals: goals,
            total_matches: matches,
            efficiency: efficiency(goals, matches),
        }
    }

    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback_username(&self.wallet_address))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub username: String,
    pub wallet_address: String,
    pub total_goals: u64,
    pub total_matches: u64,
    pub efficiency: f64,
}

/// Goals per match; 0 when the player has not played yet.
pub fn efficiency(goals: u64, matches: u64) -> f64 {
    if matches == 0 {
        0.0
    } else {
        goals as f64 / matches as f64
    }
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn normalize_address(address: &str) -> Result<String, SimError> {
    let trimmed = address.trim();
    if !is_valid_address(trimmed) {
        return Err(SimError::InvalidAddress(address.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}

pub fn fallback_username(address: &str) -> String {
    let short = address.get(2..8).unwrap_or(address);
    format!("Player_{short}")
}

/// Orders active players by efficiency, then total goals. Players with no
/// matches are left out. Ranks start at 1.
pub fn rank_players(players: Vec<PlayerStats>) -> Vec<LeaderboardEntry> {
    let mut active = players
        .into_iter()
        .filter(|p| p.total_matches > 0)
        .collect::<Vec<_>>();

    active.sort_by(|a, b| {
        b.efficiency
            .partial_cmp(&a.efficiency)
            .unwrap_or(Ordering::Equal)
            .then(b.total_goals.cmp(&a.total_goals))
            .then_with(|| a.wallet_address.cmp(&b.wallet_address))
    });

    active
        .into_iter()
        .enumerate()
        .map(|(idx, p)| LeaderboardEntry {
            rank: idx + 1,
            username: p.display_name(),
            wallet_address: p.wallet_address,
            total_goals: p.total_goals,
            total_matches: p.total_matches,
            efficiency: p.efficiency,
        })
        .collect()
}
