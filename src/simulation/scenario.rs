use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::{HashtagConfig, HourBandsConfig, SimulationConfig};
use crate::error::SimError;
use crate::DayOfWeek;

/// One hypothetical publication plan for a piece of content. Everything in
/// here is known before publication; real engagement never appears.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub publication_hour: u8,
    pub publication_day: DayOfWeek,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub has_text_overlays: bool,
    #[serde(default)]
    pub has_transitions: bool,
    #[serde(default)]
    pub has_call_to_action: bool,
    #[serde(default = "default_multiplier")]
    pub engagement_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub reach_multiplier: f64,
    /// Overrides the record's duration when the plan includes a re-cut.
    #[serde(default)]
    pub video_length_seconds: Option<f64>,
}

fn default_multiplier() -> f64 {
    1.0
}

const MULTIPLIER_MIN: f64 = 0.1;
const MULTIPLIER_MAX: f64 = 10.0;

impl Scenario {
    /// Neutral midweek-midday plan used as the comparison baseline.
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            description: "Neutral midweek midday publication".to_string(),
            publication_hour: 12,
            publication_day: DayOfWeek::Wednesday,
            hashtags: Vec::new(),
            has_text_overlays: false,
            has_transitions: false,
            has_call_to_action: false,
            engagement_multiplier: 1.0,
            reach_multiplier: 1.0,
            video_length_seconds: None,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.name.trim().is_empty() {
            return Err(SimError::validation("scenario name must not be empty"));
        }
        if self.publication_hour > 23 {
            return Err(SimError::validation(format!(
                "scenario '{}': publication hour {} out of range 0-23",
                self.name, self.publication_hour
            )));
        }
        for (label, value) in [
            ("engagement", self.engagement_multiplier),
            ("reach", self.reach_multiplier),
        ] {
            if !(MULTIPLIER_MIN..=MULTIPLIER_MAX).contains(&value) {
                return Err(SimError::validation(format!(
                    "scenario '{}': {} multiplier {} out of range {}-{}",
                    self.name, label, value, MULTIPLIER_MIN, MULTIPLIER_MAX
                )));
            }
        }
        if let Some(length) = self.video_length_seconds {
            if length <= 0.0 {
                return Err(SimError::validation(format!(
                    "scenario '{}': video length must be positive",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Derives "what if" variants from a base scenario: one per peak hour of the
/// scenario's day, extra trending hashtags when the base already reaches
/// for trending tags, and an engagement-boost variant. The base scenario is
/// always first in the output.
pub struct ScenarioVariationGenerator<'a> {
    hours: &'a HourBandsConfig,
    hashtags: &'a HashtagConfig,
    simulation: &'a SimulationConfig,
}

impl<'a> ScenarioVariationGenerator<'a> {
    pub fn new(
        hours: &'a HourBandsConfig,
        hashtags: &'a HashtagConfig,
        simulation: &'a SimulationConfig,
    ) -> Self {
        Self {
            hours,
            hashtags,
            simulation,
        }
    }

    pub fn generate(&self, base: &Scenario, rng: &mut StdRng) -> Vec<Scenario> {
        let mut variations = vec![base.clone()];

        for peak in self.hours.peaks_for(base.publication_day) {
            if *peak == base.publication_hour {
                continue;
            }
            let mut variant = base.clone();
            variant.name = format!("{}_optimal_hour_{}", base.name, peak);
            variant.description = format!(
                "Published {} at peak hour {}:00",
                base.publication_day.label(),
                peak
            );
            variant.publication_hour = *peak;
            variations.push(variant);
        }

        if base.hashtags.iter().any(|tag| self.hashtags.is_trending(tag)) {
            let mut pool = self.hashtags.trending_pool.clone();
            pool.shuffle(rng);
            let mut variant = base.clone();
            variant.name = format!("{}_trending_hashtags", base.name);
            variant.description = "Base hashtags plus sampled trending hashtags".to_string();
            variant.hashtags.extend(pool.into_iter().take(3));
            variations.push(variant);
        }

        let mut boosted = base.clone();
        boosted.name = format!("{}_engagement_boost", base.name);
        boosted.description = "Assumes boosted engagement and reach".to_string();
        boosted.engagement_multiplier = base.engagement_multiplier * self.simulation.engagement_boost;
        boosted.reach_multiplier = base.reach_multiplier * self.simulation.reach_boost;
        variations.push(boosted);

        variations
    }
}
