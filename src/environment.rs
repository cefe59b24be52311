use rand::Rng;

use crate::choices::{EnvironmentalCategory, EnvironmentalFactors};
use crate::tables::OptionEntry;

/// Draws a fresh set of match conditions, one uniform pick per category.
pub fn generate_environmental_factors<R: Rng + ?Sized>(rng: &mut R) -> EnvironmentalFactors {
    EnvironmentalFactors {
        weather: pick(EnvironmentalCategory::Weather.options(), rng),
        pitch_conditions: pick(EnvironmentalCategory::PitchConditions.options(), rng),
        match_atmosphere: pick(EnvironmentalCategory::MatchAtmosphere.options(), rng),
        match_importance: pick(EnvironmentalCategory::MatchImportance.options(), rng),
    }
}

fn pick<R: Rng + ?Sized>(options: &[OptionEntry], rng: &mut R) -> String {
    let idx = rng.gen_range(0..options.len());
    options[idx].name.to_string()
}
