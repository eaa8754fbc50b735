use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    Metadata,
    Visual,
    Audio,
    Temporal,
    Psychological,
    Cultural,
    Creativity,
    Performance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Easy,
    Moderate,
    Complex,
}

/// Static metadata describing one known feature. Built once at startup and
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDefinition {
    pub name: String,
    pub category: FeatureCategory,
    pub data_type: String,
    pub description: String,
    pub complexity: ComplexityTier,
    pub research_based: bool,
    pub actionable: bool,
}

fn definition(
    name: &str,
    category: FeatureCategory,
    data_type: &str,
    description: &str,
    complexity: ComplexityTier,
    research_based: bool,
    actionable: bool,
) -> FeatureDefinition {
    FeatureDefinition {
        name: name.to_string(),
        category,
        data_type: data_type.to_string(),
        description: description.to_string(),
        complexity,
        research_based,
        actionable,
    }
}

/// The catalog of researched feature definitions. Covers the derived and
/// analysis-backed features; raw passthrough fields (ids, titles, counters)
/// are intentionally not catalogued.
pub fn feature_catalog() -> Vec<FeatureDefinition> {
    use ComplexityTier::*;
    use FeatureCategory::*;

    vec![
        definition(
            "video_duration_optimized",
            Metadata,
            "float",
            "Duration fit for the platform (15-30s optimal band)",
            Easy,
            true,
            true,
        ),
        definition(
            "hashtag_effectiveness_score",
            Metadata,
            "float",
            "Hashtag count effectiveness (3-5 tags optimal)",
            Moderate,
            true,
            true,
        ),
        definition(
            "publish_timing_score",
            Temporal,
            "float",
            "Publication timing against the peak-hour table",
            Easy,
            true,
            true,
        ),
        definition(
            "seasonal_timing_score",
            Temporal,
            "float",
            "Seasonal fit of the publication month",
            Easy,
            true,
            false,
        ),
        definition(
            "human_count",
            Visual,
            "int",
            "Number of people visible in the clip",
            Moderate,
            true,
            true,
        ),
        definition(
            "eye_contact_with_camera",
            Visual,
            "bool",
            "Direct eye contact with the camera",
            Moderate,
            true,
            true,
        ),
        definition(
            "shot_type",
            Visual,
            "str",
            "Dominant shot framing (close_up, medium, wide)",
            Moderate,
            true,
            true,
        ),
        definition(
            "color_vibrancy_score",
            Visual,
            "float",
            "Color saturation judgment mapped to a 0-1 score",
            Moderate,
            true,
            true,
        ),
        definition(
            "music_energy",
            Audio,
            "float",
            "Energy of the backing track",
            Complex,
            true,
            true,
        ),
        definition(
            "audio_visual_sync_score",
            Audio,
            "float",
            "How tightly cuts track the audio",
            Complex,
            true,
            false,
        ),
        definition(
            "attention_grab_strength",
            Psychological,
            "float",
            "Strength of the opening attention grab",
            Complex,
            true,
            true,
        ),
        definition(
            "emotional_hook_strength",
            Psychological,
            "float",
            "Strength of the emotional hook",
            Complex,
            true,
            true,
        ),
        definition(
            "relatability_score",
            Psychological,
            "float",
            "How relatable the content reads to a broad audience",
            Complex,
            true,
            false,
        ),
        definition(
            "originality_score",
            Creativity,
            "float",
            "Originality versus trend-following",
            Complex,
            true,
            true,
        ),
        definition(
            "creative_technique_count",
            Creativity,
            "int",
            "Distinct creative techniques identified",
            Complex,
            false,
            true,
        ),
        definition(
            "cultural_relevance_score",
            Cultural,
            "float",
            "Alignment with current cultural context",
            Complex,
            false,
            false,
        ),
        definition(
            "generational_appeal",
            Cultural,
            "str",
            "Generation the content most appeals to",
            Complex,
            false,
            false,
        ),
        definition(
            "meme_potential",
            Cultural,
            "float",
            "Likelihood of remix/meme propagation",
            Complex,
            false,
            true,
        ),
        definition(
            "challenge_potential",
            Cultural,
            "float",
            "Likelihood of spawning an imitation challenge",
            Complex,
            false,
            true,
        ),
        definition(
            "completion_rate_prediction",
            Performance,
            "float",
            "Predicted watch-through rate",
            Moderate,
            true,
            false,
        ),
        definition(
            "virality_velocity",
            Performance,
            "float",
            "Predicted early spread velocity",
            Complex,
            false,
            false,
        ),
        definition(
            "user_experience_score",
            Performance,
            "float",
            "Overall viewing experience quality",
            Moderate,
            false,
            true,
        ),
    ]
}
