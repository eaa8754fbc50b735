use std::sync::Arc;

use chrono::{Datelike, Timelike};

use crate::config::{DurationBandsConfig, HourBandsConfig};
use crate::features::{
    ContentAnalysisBasicFeatureSet, ExtractionError, FeatureSet, MetadataFeatureSet,
    VisualGranularFeatureSet,
};
use crate::{text_contains, AiContentAnalysis, ContentRecord, DayOfWeek, FeatureVector};

const ADVANCED_FEATURE_NAMES: &[&str] = &[
    "video_duration_optimized",
    "hashtag_effectiveness_score",
    "music_trend_alignment",
    "publish_timing_score",
    "seasonal_timing_score",
    "trending_moment_alignment",
    "competition_level",
    "music_energy",
    "audio_visual_sync_score",
    "voice_emotion",
    "attention_grab_strength",
    "emotional_hook_strength",
    "relatability_score",
    "originality_score",
    "creative_technique_count",
    "story_structure_type",
    "cultural_relevance_score",
    "generational_appeal",
    "social_issue_relevance",
    "shareability_score",
    "meme_potential",
    "challenge_potential",
    "completion_rate_prediction",
    "virality_velocity",
    "user_experience_score",
];

/// Composite set: merges the metadata, basic-analysis and granular-visual
/// sets, then layers derived heuristics on top. Constituents are injected at
/// construction so tests can substitute fakes and nothing is re-allocated
/// per extraction call.
pub struct ComprehensiveFeatureSet {
    constituents: Vec<Arc<dyn FeatureSet>>,
    hours: HourBandsConfig,
    duration: DurationBandsConfig,
}

impl ComprehensiveFeatureSet {
    pub fn new(
        constituents: Vec<Arc<dyn FeatureSet>>,
        hours: HourBandsConfig,
        duration: DurationBandsConfig,
    ) -> Self {
        Self {
            constituents,
            hours,
            duration,
        }
    }

    pub fn with_defaults(hours: HourBandsConfig, duration: DurationBandsConfig) -> Self {
        Self::new(
            vec![
                Arc::new(MetadataFeatureSet),
                Arc::new(ContentAnalysisBasicFeatureSet),
                Arc::new(VisualGranularFeatureSet),
            ],
            hours,
            duration,
        )
    }

    fn extract_advanced(
        &self,
        content: &ContentRecord,
        analysis: Option<&AiContentAnalysis>,
    ) -> FeatureVector {
        let mut features = FeatureVector::new();

        features.insert(
            "video_duration_optimized",
            self.duration.band_score(content.duration_seconds),
        );
        features.insert(
            "hashtag_effectiveness_score",
            hashtag_band_score(content.hashtags.len()),
        );
        features.insert("publish_timing_score", self.publish_timing(content));
        features.insert("seasonal_timing_score", seasonal_timing(content));

        // Upstream judgments not yet available; fixed documented defaults.
        features.insert("music_trend_alignment", 0.5);
        features.insert("trending_moment_alignment", 0.5);
        features.insert("competition_level", 0.5);
        features.insert("audio_visual_sync_score", 0.7);
        features.insert("voice_emotion", "neutral");
        features.insert("relatability_score", 0.5);
        features.insert("creative_technique_count", 2i64);
        features.insert("story_structure_type", "linear");
        features.insert("cultural_relevance_score", 0.5);
        features.insert("generational_appeal", "gen_z");
        features.insert("social_issue_relevance", 0.3);
        features.insert("completion_rate_prediction", 0.7);
        features.insert("virality_velocity", 0.5);
        features.insert("user_experience_score", 0.6);

        features.insert("music_energy", content.quality.music_energy);

        let engagement = analysis.and_then(|analysis| analysis.engagement_factors.as_ref());
        let structure = analysis.and_then(|analysis| analysis.content_structure.as_ref());
        let trends = analysis.and_then(|analysis| analysis.trend_alignment.as_ref());

        let attention = match structure {
            Some(structure) if text_contains(&structure.hook_effectiveness, "effective") => 0.8,
            _ => 0.6,
        };
        features.insert("attention_grab_strength", attention);

        let trigger_count = engagement
            .and_then(|engagement| engagement.emotional_triggers.as_deref())
            .map(|text| {
                text.split(',')
                    .filter(|trigger| !trigger.trim().is_empty())
                    .count()
            })
            .unwrap_or(0);
        let emotional_hook = if trigger_count >= 3 { 0.9 } else { 0.7 };
        features.insert("emotional_hook_strength", emotional_hook);

        let originality = match engagement {
            Some(engagement)
                if text_contains(&engagement.viral_potential, "original")
                    || text_contains(&engagement.viral_potential, "unique") =>
            {
                0.8
            }
            _ => 0.6,
        };
        features.insert("originality_score", originality);

        let shareability = match engagement {
            Some(engagement) if text_contains(&engagement.viral_potential, "high") => 0.8,
            _ => 0.6,
        };
        features.insert("shareability_score", shareability);

        let meme = if trends
            .map(|trends| text_contains(&trends.hashtag_potential, "meme"))
            .unwrap_or(false)
            || engagement
                .map(|engagement| text_contains(&engagement.emotional_triggers, "humor"))
                .unwrap_or(false)
        {
            0.7
        } else {
            0.4
        };
        features.insert("meme_potential", meme);

        let challenge = match trends {
            Some(trends) if text_contains(&trends.current_trends, "challenge") => 0.8,
            _ => 0.5,
        };
        features.insert("challenge_potential", challenge);

        features
    }

    fn publish_timing(&self, content: &ContentRecord) -> f64 {
        let Some(created_at) = content.created_at else {
            return 0.5;
        };

        let day = day_from_chrono(created_at.weekday());
        let hour = created_at.hour() as u8;
        if self.hours.is_peak(day, hour) {
            1.0
        } else if self.hours.is_near_peak(day, hour) {
            0.7
        } else {
            0.4
        }
    }
}

impl FeatureSet for ComprehensiveFeatureSet {
    fn name(&self) -> &str {
        "comprehensive"
    }

    fn description(&self) -> &str {
        "Full feature set: constituent sets plus derived heuristics"
    }

    fn declared_feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for constituent in &self.constituents {
            for name in constituent.declared_feature_names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        for name in ADVANCED_FEATURE_NAMES {
            let name = name.to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    fn extract(
        &self,
        content: &ContentRecord,
        analysis: Option<&AiContentAnalysis>,
    ) -> Result<FeatureVector, ExtractionError> {
        let mut features = FeatureVector::new();
        for constituent in &self.constituents {
            features.merge(constituent.extract(content, analysis)?);
        }
        features.merge(self.extract_advanced(content, analysis));
        Ok(features)
    }
}

/// Hashtag-count bands: 3-5 optimal, 1-7 acceptable, otherwise poor.
fn hashtag_band_score(count: usize) -> f64 {
    if (3..=5).contains(&count) {
        1.0
    } else if (1..=7).contains(&count) {
        0.7
    } else {
        0.3
    }
}

fn seasonal_timing(content: &ContentRecord) -> f64 {
    let Some(created_at) = content.created_at else {
        return 0.6;
    };

    match created_at.month() {
        6..=8 => 0.8,
        12 | 1 | 2 => 0.7,
        _ => 0.6,
    }
}

fn day_from_chrono(weekday: chrono::Weekday) -> DayOfWeek {
    match weekday {
        chrono::Weekday::Mon => DayOfWeek::Monday,
        chrono::Weekday::Tue => DayOfWeek::Tuesday,
        chrono::Weekday::Wed => DayOfWeek::Wednesday,
        chrono::Weekday::Thu => DayOfWeek::Thursday,
        chrono::Weekday::Fri => DayOfWeek::Friday,
        chrono::Weekday::Sat => DayOfWeek::Saturday,
        chrono::Weekday::Sun => DayOfWeek::Sunday,
    }
}
