use crate::config::{DurationBandsConfig, HashtagConfig, HourBandsConfig, TimingFactorsConfig};
use crate::simulation::Scenario;
use crate::{ContentRecord, FeatureVector};

/// Builds the feature vector a scenario would produce before publication.
///
/// Inputs are restricted to the scenario itself, the record's duration and
/// its static quality attributes. Real engagement counters are off limits:
/// they do not exist at decision time, and reading them would leak the
/// outcome into the prediction.
pub struct PrePublicationFeatureSynthesizer<'a> {
    hours: &'a HourBandsConfig,
    factors: &'a TimingFactorsConfig,
    hashtags: &'a HashtagConfig,
    duration: &'a DurationBandsConfig,
}

impl<'a> PrePublicationFeatureSynthesizer<'a> {
    pub fn new(
        hours: &'a HourBandsConfig,
        factors: &'a TimingFactorsConfig,
        hashtags: &'a HashtagConfig,
        duration: &'a DurationBandsConfig,
    ) -> Self {
        Self {
            hours,
            factors,
            hashtags,
            duration,
        }
    }

    pub fn synthesize(&self, content: &ContentRecord, scenario: &Scenario) -> FeatureVector {
        let mut features = FeatureVector::new();

        let duration = scenario
            .video_length_seconds
            .unwrap_or(content.duration_seconds);

        features.insert("publication_hour", scenario.publication_hour as i64);
        features.insert("hour_factor", self.hour_factor(scenario));
        features.insert("day_factor", self.day_factor(scenario));
        features.insert(
            "hashtag_virality_score",
            self.hashtag_virality(&scenario.hashtags),
        );
        features.insert("hashtag_count", scenario.hashtags.len() as i64);
        features.insert("video_length", duration);
        features.insert(
            "video_duration_optimized",
            self.duration.synthesized_score(duration),
        );

        features.insert("has_text_overlays", scenario.has_text_overlays);
        features.insert("has_transitions", scenario.has_transitions);
        features.insert("has_call_to_action", scenario.has_call_to_action);
        features.insert("engagement_multiplier", scenario.engagement_multiplier);
        features.insert("reach_multiplier", scenario.reach_multiplier);

        features.insert(
            "audience_connection_score",
            content.quality.audience_connection,
        );
        features.insert("color_vibrancy_score", content.quality.color_vibrancy);
        features.insert("music_energy", content.quality.music_energy);
        features.insert(
            "emotional_trigger_count",
            content.quality.emotional_trigger_count as i64,
        );
        features.insert(
            "production_quality_score",
            content.quality.production_quality,
        );

        features
    }

    fn hour_factor(&self, scenario: &Scenario) -> f64 {
        let day = scenario.publication_day;
        let hour = scenario.publication_hour;
        if self.hours.is_peak(day, hour) {
            self.factors.hour_peak
        } else if self.hours.is_near_peak(day, hour) {
            self.factors.hour_near_peak
        } else {
            self.factors.hour_off_peak
        }
    }

    fn day_factor(&self, scenario: &Scenario) -> f64 {
        if scenario.publication_day.is_weekend() {
            self.factors.day_weekend
        } else {
            self.factors.day_weekday
        }
    }

    /// Additive hashtag score: trending tags weigh more than generic ones,
    /// an optimal count and multiple trending tags earn bonuses. An empty
    /// list is neutral rather than zero, since posting without hashtags is
    /// a legitimate choice, not a defect.
    pub fn hashtag_virality(&self, hashtags: &[String]) -> f64 {
        if hashtags.is_empty() {
            return self.hashtags.neutral_score;
        }

        let trending_count = hashtags
            .iter()
            .filter(|tag| self.hashtags.is_trending(tag))
            .count();
        let generic_count = hashtags.len() - trending_count;

        let mut score = trending_count as f64 * self.hashtags.trending_weight
            + generic_count as f64 * self.hashtags.base_weight;

        if self.hashtags.is_optimal_count(hashtags.len()) {
            score += self.hashtags.count_bonus;
        }
        if trending_count >= 2 {
            score += self.hashtags.trending_bonus;
        }

        score.min(1.0)
    }
}
