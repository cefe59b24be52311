// Static option tables: every (category, option) pair with its goal-rate
// multiplier and the blurb shown next to it in the match breakdown.
//
// Strategy multipliers live in [0.8, 1.3], environmental ones in
// [0.85, 1.15]. Both ranges are strictly positive, which keeps the Poisson
// intensity positive for any valid choice set.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::choices::{EnvironmentalCategory, StrategicCategory};

pub const NO_DESCRIPTION: &str = "No description available";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionEntry {
    pub name: &'static str,
    pub multiplier: f64,
    pub description: &'static str,
}

const fn entry(name: &'static str, multiplier: f64, description: &'static str) -> OptionEntry {
    OptionEntry {
        name,
        multiplier,
        description,
    }
}

pub static FORMATION: [OptionEntry; 6] = [
    entry("4-3-3", 1.2, "Classic attacking setup with wide forwards"),
    entry("4-4-2", 1.0, "Traditional balanced approach with twin strikers"),
    entry("3-5-2", 0.9, "Wing-backs provide width, compact middle"),
    entry("4-2-3-1", 1.1, "Single striker with attacking midfield support"),
    entry("5-3-2", 0.8, "Defensive solidity, counter-attack ready"),
    entry("3-4-3", 1.3, "Aggressive, high attacking line"),
];

pub static DEFENSIVE_PHILOSOPHY: [OptionEntry; 6] = [
    entry("High Press", 1.2, "Aggressive pressing in opponent's half"),
    entry("Gegenpressing", 1.3, "Immediate counter-press after losing ball"),
    entry("Mid Block", 1.0, "Compact defensive shape in middle third"),
    entry("Low Block", 0.8, "Deep defensive line, absorb pressure"),
    entry("Counter-Attack", 1.1, "Sit deep, hit on quick transitions"),
    entry("Offside Trap", 1.0, "High line with coordinated stepping up"),
];

pub static TRAINING_FOCUS: [OptionEntry; 6] = [
    entry("Set Pieces", 1.1, "Focus on corners, free kicks, penalties"),
    entry("Finishing Practice", 1.3, "Shooting accuracy and power training"),
    entry("Movement Drills", 1.2, "Practice runs, positioning, timing"),
    entry("Team Shape", 1.0, "Work on positional play and coordination"),
    entry("Individual Skills", 1.1, "Focus on 1v1 situations and technical work"),
    entry("Physical Prep", 0.9, "Fitness, sprint work, and strength training"),
];

pub static ATTACKING_APPROACH: [OptionEntry; 6] = [
    entry("Wing Play", 1.1, "Use crosses and wide attacks"),
    entry("Through the Middle", 1.2, "Central penetration and passing"),
    entry("Long Balls", 1.0, "Direct balls to striker"),
    entry("Build-Up Play", 0.9, "Patient possession-based attacks"),
    entry("Quick Transitions", 1.3, "Fast counter-attacks"),
    entry("Individual Brilliance", 1.1, "Give your best players freedom"),
];

pub static STRIKER_ROLE: [OptionEntry; 6] = [
    entry("Target Man", 1.0, "Hold up play, bring others into game"),
    entry("Poacher", 1.3, "Stay in box, focus purely on finishing"),
    entry("False 9", 1.1, "Drop deep, create space for others"),
    entry("Wide Forward", 1.2, "Drift wide, cut inside to shoot"),
    entry("Deep Striker", 1.0, "Link play, create as well as score"),
    entry("Penalty Box Predator", 1.2, "Attack crosses and rebounds"),
];

pub static TEMPO_STYLE: [OptionEntry; 6] = [
    entry("High Tempo", 1.2, "Quick passing, constant movement"),
    entry("Controlled Pace", 1.0, "Dictate rhythm, vary speed"),
    entry("Patient Build-Up", 0.8, "Slow, methodical progression"),
    entry("Direct Style", 1.3, "Get ball forward quickly"),
    entry("Reactive Play", 1.0, "Adapt to opponent's tempo"),
    entry("Chaos Ball", 1.1, "High energy, unpredictable attacks"),
];

pub static MATCH_MENTALITY: [OptionEntry; 6] = [
    entry("Aggressive", 1.2, "Take risks, force the action"),
    entry("Confident", 1.1, "Believe in abilities, play natural game"),
    entry("Cautious", 0.9, "Avoid mistakes, build confidence gradually"),
    entry("Desperate", 1.3, "Throw everything forward, all-or-nothing"),
    entry("Clinical", 1.1, "Stay composed, take chances when they come"),
    entry("Expressive", 1.0, "Play with flair and creativity"),
];

pub static WEATHER: [OptionEntry; 6] = [
    entry("Perfect Day", 1.0, "Sunny, mild temperature, no wind - ideal conditions"),
    entry("Light Rain", 0.95, "Slippery surface affects passing and ball control"),
    entry("Heavy Rain", 0.9, "Difficult ball control, favors direct play"),
    entry("Strong Wind", 0.9, "Affects long passes and shooting accuracy"),
    entry("Cold Weather", 0.95, "Players need time to warm up, affects performance"),
    entry("Extreme Heat", 0.9, "Fatigue sets in faster, endurance matters more"),
];

pub static PITCH_CONDITIONS: [OptionEntry; 6] = [
    entry("Perfect Grass", 1.0, "Pristine natural surface, optimal for all play styles"),
    entry("Worn Grass", 0.95, "Patches and divots affect ball roll and bounce"),
    entry("Artificial Turf", 1.05, "Consistent but fast surface, favors quick play"),
    entry("Muddy Pitch", 0.85, "Heavy, slow conditions favor physical play"),
    entry("Dry/Hard Pitch", 1.05, "Ball bounces more, favors technical players"),
    entry("Newly Laid Grass", 0.9, "Soft surface with unpredictable bounces"),
];

pub static MATCH_ATMOSPHERE: [OptionEntry; 6] = [
    entry("Home + Electric Crowd", 1.15, "Maximum support, intimidating for opponents"),
    entry("Home + Supportive Crowd", 1.1, "Good backing from home fans"),
    entry("Home + Quiet Crowd", 1.0, "Neutral atmosphere at home stadium"),
    entry("Away + Hostile Crowd", 0.85, "Intimidating away environment"),
    entry("Away + Neutral Crowd", 0.95, "Standard away match difficulty"),
    entry("Away + Friendly Crowd", 1.0, "Welcoming or mixed support away"),
];

pub static MATCH_IMPORTANCE: [OptionEntry; 6] = [
    entry("Cup Final", 1.1, "Big stage brings out the best in players"),
    entry("Derby Match", 1.05, "Extra motivation against local rivals"),
    entry("Regular League", 1.0, "Standard match pressure and motivation"),
    entry("End of Season", 0.95, "Some players already on vacation mode"),
    entry("Relegation Battle", 1.05, "Desperation brings extra intensity"),
    entry("Dead Rubber", 0.9, "Nothing to play for, low motivation"),
];

pub fn strategy_options(category: StrategicCategory) -> &'static [OptionEntry] {
    match category {
        StrategicCategory::Formation => &FORMATION,
        StrategicCategory::DefensivePhilosophy => &DEFENSIVE_PHILOSOPHY,
        StrategicCategory::TrainingFocus => &TRAINING_FOCUS,
        StrategicCategory::AttackingApproach => &ATTACKING_APPROACH,
        StrategicCategory::StrikerRole => &STRIKER_ROLE,
        StrategicCategory::TempoStyle => &TEMPO_STYLE,
        StrategicCategory::MatchMentality => &MATCH_MENTALITY,
    }
}

pub fn environmental_options(category: EnvironmentalCategory) -> &'static [OptionEntry] {
    match category {
        EnvironmentalCategory::Weather => &WEATHER,
        EnvironmentalCategory::PitchConditions => &PITCH_CONDITIONS,
        EnvironmentalCategory::MatchAtmosphere => &MATCH_ATMOSPHERE,
        EnvironmentalCategory::MatchImportance => &MATCH_IMPORTANCE,
    }
}

type Index<C> = HashMap<C, HashMap<&'static str, &'static OptionEntry>>;

static STRATEGY_INDEX: Lazy<Index<StrategicCategory>> = Lazy::new(|| {
    StrategicCategory::ALL
        .into_iter()
        .map(|cat| {
            let by_name = strategy_options(cat).iter().map(|e| (e.name, e)).collect();
            (cat, by_name)
        })
        .collect()
});

static ENVIRONMENT_INDEX: Lazy<Index<EnvironmentalCategory>> = Lazy::new(|| {
    EnvironmentalCategory::ALL
        .into_iter()
        .map(|cat| {
            let by_name = environmental_options(cat).iter().map(|e| (e.name, e)).collect();
            (cat, by_name)
        })
        .collect()
});

/// Exact-match lookup; option names are case sensitive.
pub fn strategy_entry(category: StrategicCategory, option: &str) -> Option<&'static OptionEntry> {
    STRATEGY_INDEX.get(&category)?.get(option).copied()
}

pub fn environmental_entry(
    category: EnvironmentalCategory,
    option: &str,
) -> Option<&'static OptionEntry> {
    ENVIRONMENT_INDEX.get(&category)?.get(option).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_six_distinct_options() {
        for cat in StrategicCategory::ALL {
            let opts = strategy_options(cat);
            assert_eq!(opts.len(), 6, "{cat:?}");
            for e in opts {
                assert_eq!(strategy_entry(cat, e.name), Some(e));
            }
        }
        for cat in EnvironmentalCategory::ALL {
            let opts = environmental_options(cat);
            assert_eq!(opts.len(), 6, "{cat:?}");
            for e in opts {
                assert_eq!(environmental_entry(cat, e.name), Some(e));
            }
        }
    }

    #[test]
    fn multipliers_stay_in_documented_ranges() {
        for cat in StrategicCategory::ALL {
            for e in strategy_options(cat) {
                assert!((0.8..=1.3).contains(&e.multiplier), "{}", e.name);
            }
        }
        for cat in EnvironmentalCategory::ALL {
            for e in environmental_options(cat) {
                assert!((0.85..=1.15).contains(&e.multiplier), "{}", e.name);
            }
        }
    }

    #[test]
    fn lookup_is_scoped_to_category() {
        // "Poacher" is a striker role, not a formation.
        assert!(strategy_entry(StrategicCategory::Formation, "Poacher").is_none());
        assert!(strategy_entry(StrategicCategory::StrikerRole, "poacher").is_none());
    }
}
