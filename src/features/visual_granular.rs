use crate::features::{ExtractionError, FeatureSet};
use crate::{text_contains, AiContentAnalysis, ContentRecord, FeatureVector};

const FEATURE_NAMES: &[&str] = &[
    "human_count",
    "eye_contact_with_camera",
    "shot_type",
    "color_vibrancy_score",
    "rule_of_thirds_score",
    "depth_of_field_type",
    "color_palette_type",
    "movement_intensity_score",
    "composition_balance",
    "lighting_quality",
];

/// Granular visual features keyed off the visual analysis section.
///
/// Composition features that the analysis service does not yet judge
/// (rule of thirds, palette, movement, balance, lighting) carry fixed
/// documented defaults; the analysis-backed ones degrade to their own
/// neutral defaults when the section is absent.
#[derive(Debug, Clone, Default)]
pub struct VisualGranularFeatureSet;

impl FeatureSet for VisualGranularFeatureSet {
    fn name(&self) -> &str {
        "visual_granular"
    }

    fn description(&self) -> &str {
        "Granular, actionable visual features (framing, presence, color)"
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

        let human_presence = visual.map(|visual| &visual.human_presence);
        let human_count = match human_presence {
            Some(field) if text_contains(field, "multiple people") => 3,
            Some(field) if text_contains(field, "two people") => 2,
            Some(field)
                if text_contains(field, "person") || text_contains(field, "human") =>
            {
                1
            }
            _ => 0,
        };
        features.insert("human_count", human_count as i64);

        features.insert(
            "eye_contact_with_camera",
            human_presence
                .map(|field| text_contains(field, "eye contact"))
                .unwrap_or(false),
        );

        let shot_field = visual.map(|visual| &visual.shot_type);
        let shot_type = match shot_field {
            Some(field) if text_contains(field, "close-up") => "close_up",
            Some(field) if text_contains(field, "medium") => "medium",
            Some(field) if text_contains(field, "wide") => "wide",
            _ => "unknown",
        };
        features.insert("shot_type", shot_type);

        let color_field = visual.map(|visual| &visual.color_analysis);
        let color_vibrancy = match color_field {
            Some(field)
                if text_contains(field, "vibrant") || text_contains(field, "saturated") =>
            {
                0.8
            }
            Some(field) if text_contains(field, "bright") => 0.6,
            Some(field) if text_contains(field, "muted") || text_contains(field, "dull") => 0.3,
            _ => 0.5,
        };
        features.insert("color_vibrancy_score", color_vibrancy);

        // Not yet judged upstream; fixed documented defaults.
        features.insert("rule_of_thirds_score", 0.7);
        features.insert("depth_of_field_type", "medium");
        features.insert("color_palette_type", "complementary");
        features.insert("movement_intensity_score", 0.6);
        features.insert("composition_balance", 0.7);
        features.insert("lighting_quality", 0.8);

        Ok(features)
    }
}
