use serde::{Deserialize, Serialize};

use crate::tables::{self, OptionEntry};

/// The seven knobs a manager controls before kickoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategicCategory {
    Formation,
    DefensivePhilosophy,
    TrainingFocus,
    AttackingApproach,
    StrikerRole,
    TempoStyle,
    MatchMentality,
}

impl StrategicCategory {
    pub const ALL: [Self; 7] = [
        Self::Formation,
        Self::DefensivePhilosophy,
        Self::TrainingFocus,
        Self::AttackingApproach,
        Self::StrikerRole,
        Self::TempoStyle,
        Self::MatchMentality,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Formation => "formation",
            Self::DefensivePhilosophy => "defensivePhilosophy",
            Self::TrainingFocus => "trainingFocus",
            Self::AttackingApproach => "attackingApproach",
            Self::StrikerRole => "strikerRole",
            Self::TempoStyle => "tempoStyle",
            Self::MatchMentality => "matchMentality",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Formation => "Formation",
            Self::DefensivePhilosophy => "Defensive Philosophy",
            Self::TrainingFocus => "Training Focus",
            Self::AttackingApproach => "Attacking Approach",
            Self::StrikerRole => "Striker Role",
            Self::TempoStyle => "Tempo Style",
            Self::MatchMentality => "Match Mentality",
        }
    }

    pub fn options(self) -> &'static [OptionEntry] {
        tables::strategy_options(self)
    }
}

/// Conditions drawn at random for every match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentalCategory {
    Weather,
    PitchConditions,
    MatchAtmosphere,
    MatchImportance,
}

impl EnvironmentalCategory {
    pub const ALL: [Self; 4] = [
        Self::Weather,
        Self::PitchConditions,
        Self::MatchAtmosphere,
        Self::MatchImportance,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::PitchConditions => "pitchConditions",
            Self::MatchAtmosphere => "matchAtmosphere",
            Self::MatchImportance => "matchImportance",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Weather => "Weather",
            Self::PitchConditions => "Pitch Conditions",
            Self::MatchAtmosphere => "Match Atmosphere",
            Self::MatchImportance => "Match Importance",
        }
    }

    pub fn options(self) -> &'static [OptionEntry] {
        tables::environmental_options(self)
    }
}

/// One selected option per strategic category. Values are the display names
/// from the option tables (e.g. `"3-4-3"`, `"Gegenpressing"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyChoices {
    pub formation: String,
    pub defensive_philosophy: String,
    pub training_focus: String,
    pub attacking_approach: String,
    pub striker_role: String,
    pub tempo_style: String,
    pub match_mentality: String,
}

impl StrategyChoices {
    pub fn get(&self, category: StrategicCategory) -> &str {
        match category {
            StrategicCategory::Formation => &self.formation,
            StrategicCategory::DefensivePhilosophy => &self.defensive_philosophy,
            StrategicCategory::TrainingFocus => &self.training_focus,
            StrategicCategory::AttackingApproach => &self.attacking_approach,
            StrategicCategory::StrikerRole => &self.striker_role,
            StrategicCategory::TempoStyle => &self.tempo_style,
            StrategicCategory::MatchMentality => &self.match_mentality,
        }
    }

    pub fn set(&mut self, category: StrategicCategory, option: impl Into<String>) {
        let slot = match category {
            StrategicCategory::Formation => &mut self.formation,
            StrategicCategory::DefensivePhilosophy => &mut self.defensive_philosophy,
            StrategicCategory::TrainingFocus => &mut self.training_focus,
            StrategicCategory::AttackingApproach => &mut self.attacking_approach,
            StrategicCategory::StrikerRole => &mut self.striker_role,
            StrategicCategory::TempoStyle => &mut self.tempo_style,
            StrategicCategory::MatchMentality => &mut self.match_mentality,
        };
        *slot = option.into();
    }

    pub fn entries(&self) -> [(StrategicCategory, &str); 7] {
        StrategicCategory::ALL.map(|cat| (cat, self.get(cat)))
    }

    /// Categories whose chosen option is not in the table.
    pub fn unknown_options(&self) -> Vec<(StrategicCategory, &str)> {
        self.entries()
            .into_iter()
            .filter(|(cat, option)| tables::strategy_entry(*cat, option).is_none())
            .collect()
    }
}

impl Default for StrategyChoices {
    /// The neutral 1.0 option in every category.
    fn default() -> Self {
        Self {
            formation: "4-4-2".to_string(),
            defensive_philosophy: "Mid Block".to_string(),
            training_focus: "Team Shape".to_string(),
            attacking_approach: "Long Balls".to_string(),
            striker_role: "Target Man".to_string(),
            tempo_style: "Controlled Pace".to_string(),
            match_mentality: "Expressive".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalFactors {
    pub weather: String,
    pub pitch_conditions: String,
    pub match_atmosphere: String,
    pub match_importance: String,
}

impl EnvironmentalFactors {
    pub fn get(&self, category: EnvironmentalCategory) -> &str {
        match category {
            EnvironmentalCategory::Weather => &self.weather,
            EnvironmentalCategory::PitchConditions => &self.pitch_conditions,
            EnvironmentalCategory::MatchAtmosphere => &self.match_atmosphere,
            EnvironmentalCategory::MatchImportance => &self.match_importance,
        }
    }

    pub fn entries(&self) -> [(EnvironmentalCategory, &str); 4] {
        EnvironmentalCategory::ALL.map(|cat| (cat, self.get(cat)))
    }
}
