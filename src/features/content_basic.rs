use crate::features::{ExtractionError, FeatureSet};
use crate::{text_contains, AiContentAnalysis, ContentRecord, FeatureVector};

const FEATURE_NAMES: &[&str] = &[
    "has_text_overlays",
    "has_transitions",
    "visual_quality_score",
    "has_hook",
    "has_story",
    "has_call_to_action",
    "viral_potential_score",
    "emotional_trigger_count",
    "audience_connection_score",
    "length_optimized",
    "sound_quality_score",
    "production_quality_score",
    "trend_alignment_score",
    "estimated_hashtag_count",
];

/// Neutral score used whenever a judgment is missing or inconclusive.
const NEUTRAL_SCORE: f64 = 0.5;

/// Basic features derived from the AI analysis sections via keyword matching.
///
/// Every feature resolves to a documented default when the analysis, a
/// section, or a field is missing: scores fall back to 0.5, flags to false,
/// counts to 0. The vector shape is identical with or without analysis.
#[derive(Debug, Clone, Default)]
pub struct ContentAnalysisBasicFeatureSet;

impl FeatureSet for ContentAnalysisBasicFeatureSet {
    fn name(&self) -> &str {
        "gemini_basic"
    }

    fn description(&self) -> &str {
        "Basic AI-analysis features (visual, structure, engagement, technical, trends)"
    }

    fn declared_feature_names(&self) -> Vec<String> {
        FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn extract(
        &self,
        _content: &ContentRecord,
        analysis: Option<&AiContentAnalysis>,
    ) -> Result<FeatureVector, ExtractionError> {
        let mut features = FeatureVector::new();

        let visual = analysis.and_then(|analysis| analysis.visual.as_ref());
        let structure = analysis.and_then(|analysis| analysis.content_structure.as_ref());
        let engagement = analysis.and_then(|analysis| analysis.engagement_factors.as_ref());
        let technical = analysis.and_then(|analysis| analysis.technical_elements.as_ref());
        let trends = analysis.and_then(|analysis| analysis.trend_alignment.as_ref());

        features.insert(
            "has_text_overlays",
            visual
                .map(|visual| text_contains(&visual.text_overlays, "text overlays"))
                .unwrap_or(false),
        );
        features.insert(
            "has_transitions",
            visual
                .map(|visual| text_contains(&visual.transitions, "transitions"))
                .unwrap_or(false),
        );
        features.insert(
            "visual_quality_score",
            judgment_score(visual.map(|visual| &visual.style_quality), "high quality"),
        );

        features.insert(
            "has_hook",
            judgment_score(
                structure.map(|structure| &structure.hook_effectiveness),
                "effective",
            ),
        );
        features.insert(
            "has_story",
            structure
                .map(|structure| text_contains(&structure.story_flow, "story"))
                .unwrap_or(false),
        );
        features.insert(
            "has_call_to_action",
            structure
                .map(|structure| text_contains(&structure.call_to_action, "call to action"))
                .unwrap_or(false),
        );

        features.insert(
            "viral_potential_score",
            judgment_score(
                engagement.map(|engagement| &engagement.viral_potential),
                "high",
            ),
        );
        features.insert(
            "emotional_trigger_count",
            engagement
                .map(|engagement| trigger_count(&engagement.emotional_triggers))
                .unwrap_or(0),
        );
        features.insert(
            "audience_connection_score",
            judgment_score(
                engagement.map(|engagement| &engagement.audience_connection),
                "strong",
            ),
        );

        features.insert(
            "length_optimized",
            technical
                .map(|technical| text_contains(&technical.length_optimization, "appropriate"))
                .unwrap_or(false),
        );
        features.insert(
            "sound_quality_score",
            judgment_score(
                technical.map(|technical| &technical.sound_design),
                "high quality",
            ),
        );
        features.insert(
            "production_quality_score",
            judgment_score(
                technical.map(|technical| &technical.production_quality),
                "high",
            ),
        );

        features.insert(
            "trend_alignment_score",
            judgment_score(trends.map(|trends| &trends.current_trends), "perfectly"),
        );
        features.insert(
            "estimated_hashtag_count",
            trends
                .map(|trends| hashtag_count(&trends.hashtag_potential))
                .unwrap_or(0),
        );

        Ok(features)
    }
}

fn judgment_score(field: Option<&Option<String>>, positive_needle: &str) -> f64 {
    match field {
        Some(field) if text_contains(field, positive_needle) => 1.0,
        _ => NEUTRAL_SCORE,
    }
}

fn trigger_count(field: &Option<String>) -> i64 {
    field
        .as_deref()
        .map(|text| {
            text.split(',')
                .filter(|trigger| !trigger.trim().is_empty())
                .count() as i64
        })
        .unwrap_or(0)
}

fn hashtag_count(field: &Option<String>) -> i64 {
    field
        .as_deref()
        .map(|text| text.matches('#').count() as i64)
        .unwrap_or(0)
}
