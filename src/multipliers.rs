use log::debug;
use serde::{Deserialize, Serialize};

use crate::choices::{
    EnvironmentalCategory, EnvironmentalFactors, StrategicCategory, StrategyChoices,
};
use crate::tables::{self, NO_DESCRIPTION};

const EFFICIENCY_BONUS_MIN: f64 = 0.8;
const EFFICIENCY_BONUS_MAX: f64 = 1.2;
const EFFICIENCY_BONUS_SLOPE: f64 = 0.4;

/// Per-category strategy factors, for explaining a result to the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyMultipliers {
    pub formation: f64,
    pub defensive_philosophy: f64,
    pub training_focus: f64,
    pub attacking_approach: f64,
    pub striker_role: f64,
    pub tempo_style: f64,
    pub match_mentality: f64,
}

impl StrategyMultipliers {
    pub fn product(&self) -> f64 {
        self.formation
            * self.defensive_philosophy
            * self.training_focus
            * self.attacking_approach
            * self.striker_role
            * self.tempo_style
            * self.match_mentality
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalMultipliers {
    pub weather: f64,
    pub pitch_conditions: f64,
    pub match_atmosphere: f64,
    pub match_importance: f64,
}

impl EnvironmentalMultipliers {
    pub fn product(&self) -> f64 {
        self.weather * self.pitch_conditions * self.match_atmosphere * self.match_importance
    }
}

/// Table factor for one strategic pick; unknown options count as 1.0.
pub fn strategy_factor(category: StrategicCategory, option: &str) -> f64 {
    match tables::strategy_entry(category, option) {
        Some(entry) => entry.multiplier,
        None => {
            debug!(
                "unknown {} option '{}', using neutral multiplier",
                category.key(),
                option
            );
            1.0
        }
    }
}

pub fn environmental_factor(category: EnvironmentalCategory, option: &str) -> f64 {
    match tables::environmental_entry(category, option) {
        Some(entry) => entry.multiplier,
        None => {
            debug!(
                "unknown {} condition '{}', using neutral multiplier",
                category.key(),
                option
            );
            1.0
        }
    }
}

pub fn calculate_strategy_multiplier(choices: &StrategyChoices) -> f64 {
    choices
        .entries()
        .into_iter()
        .map(|(cat, option)| strategy_factor(cat, option))
        .product()
}

pub fn calculate_environmental_multiplier(factors: &EnvironmentalFactors) -> f64 {
    factors
        .entries()
        .into_iter()
        .map(|(cat, option)| environmental_factor(cat, option))
        .product()
}

/// Bonus from historical goals per match, in [0.8, 1.2]. A player with no
/// history (exactly 0) gets a neutral 1.0 instead of the formula's floor.
pub fn calculate_efficiency_bonus(efficiency: f64) -> f64 {
    if efficiency == 0.0 {
        return 1.0;
    }
    (EFFICIENCY_BONUS_MIN + efficiency * EFFICIENCY_BONUS_SLOPE)
        .clamp(EFFICIENCY_BONUS_MIN, EFFICIENCY_BONUS_MAX)
}

pub fn get_strategy_multipliers(choices: &StrategyChoices) -> StrategyMultipliers {
    let f = |cat: StrategicCategory| strategy_factor(cat, choices.get(cat));
    StrategyMultipliers {
        formation: f(StrategicCategory::Formation),
        defensive_philosophy: f(StrategicCategory::DefensivePhilosophy),
        training_focus: f(StrategicCategory::TrainingFocus),
        attacking_approach: f(StrategicCategory::AttackingApproach),
        striker_role: f(StrategicCategory::StrikerRole),
        tempo_style: f(StrategicCategory::TempoStyle),
        match_mentality: f(StrategicCategory::MatchMentality),
    }
}

pub fn get_environmental_multipliers(factors: &EnvironmentalFactors) -> EnvironmentalMultipliers {
    let f = |cat: EnvironmentalCategory| environmental_factor(cat, factors.get(cat));
    EnvironmentalMultipliers {
        weather: f(EnvironmentalCategory::Weather),
        pitch_conditions: f(EnvironmentalCategory::PitchConditions),
        match_atmosphere: f(EnvironmentalCategory::MatchAtmosphere),
        match_importance: f(EnvironmentalCategory::MatchImportance),
    }
}

pub fn get_strategy_description(option: &str, category: StrategicCategory) -> &'static str {
    tables::strategy_entry(category, option)
        .map(|e| e.description)
        .unwrap_or(NO_DESCRIPTION)
}

pub fn get_environmental_description(option: &str, category: EnvironmentalCategory) -> &'static str {
    tables::environmental_entry(category, option)
        .map(|e| e.description)
        .unwrap_or(NO_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_out_attack() -> StrategyChoices {
        StrategyChoices {
            formation: "3-4-3".to_string(),
            defensive_philosophy: "Gegenpressing".to_string(),
            training_focus: "Finishing Practice".to_string(),
            attacking_approach: "Quick Transitions".to_string(),
            striker_role: "Poacher".to_string(),
            tempo_style: "Direct Style".to_string(),
            match_mentality: "Desperate".to_string(),
        }
    }

    #[test]
    fn neutral_choices_multiply_to_one() {
        let m = calculate_strategy_multiplier(&StrategyChoices::default());
        assert!((m - 1.0).abs() < 1e-12);
    }

    #[test]
    fn max_choices_multiply_to_1_3_pow_7() {
        let m = calculate_strategy_multiplier(&all_out_attack());
        assert!((m - 1.3_f64.powi(7)).abs() < 1e-9);
    }

    #[test]
    fn unknown_option_is_neutral() {
        let mut choices = all_out_attack();
        choices.formation = "2-3-5".to_string();
        let m = calculate_strategy_multiplier(&choices);
        assert!((m - 1.3_f64.powi(6)).abs() < 1e-9);
        assert_eq!(get_strategy_multipliers(&choices).formation, 1.0);
    }

    #[test]
    fn environmental_product_of_four() {
        let factors = EnvironmentalFactors {
            weather: "Light Rain".to_string(),
            pitch_conditions: "Muddy Pitch".to_string(),
            match_atmosphere: "Home + Electric Crowd".to_string(),
            match_importance: "Cup Final".to_string(),
        };
        let expected = 0.95 * 0.85 * 1.15 * 1.1;
        let m = calculate_environmental_multiplier(&factors);
        assert!((m - expected).abs() < 1e-12);
        assert!((get_environmental_multipliers(&factors).product() - expected).abs() < 1e-12);
    }

    #[test]
    fn unknown_condition_is_neutral_and_undescribed() {
        let factors = EnvironmentalFactors {
            weather: "Snow".to_string(),
            pitch_conditions: "Muddy Pitch".to_string(),
            match_atmosphere: "Home + Electric Crowd".to_string(),
            match_importance: "Cup Final".to_string(),
        };
        let breakdown = get_environmental_multipliers(&factors);
        assert_eq!(breakdown.weather, 1.0);
        let expected = 0.85 * 1.15 * 1.1;
        assert!((calculate_environmental_multiplier(&factors) - expected).abs() < 1e-12);
        assert_eq!(
            get_environmental_description("Snow", EnvironmentalCategory::Weather),
            NO_DESCRIPTION
        );
    }

    #[test]
    fn efficiency_bonus_edges() {
        assert_eq!(calculate_efficiency_bonus(0.0), 1.0);
        assert!((calculate_efficiency_bonus(0.25) - 0.9).abs() < 1e-12);
        assert!((calculate_efficiency_bonus(0.5) - 1.0).abs() < 1e-12);
        assert!((calculate_efficiency_bonus(1.0) - 1.2).abs() < 1e-12);
        assert_eq!(calculate_efficiency_bonus(7.5), 1.2);
        assert!(calculate_efficiency_bonus(1e-9) >= 0.8);
    }

    #[test]
    fn descriptions_fall_back_for_unknowns() {
        assert_eq!(
            get_strategy_description("Poacher", StrategicCategory::StrikerRole),
            "Stay in box, focus purely on finishing"
        );
        assert_eq!(
            get_strategy_description("Poacher", StrategicCategory::Formation),
            NO_DESCRIPTION
        );
        assert_eq!(
            get_environmental_description("Dead Rubber", EnvironmentalCategory::MatchImportance),
            "Nothing to play for, low motivation"
        );
    }
}
