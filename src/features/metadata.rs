use chrono::{Datelike, Timelike};

use crate::features::{ExtractionError, FeatureSet};
use crate::{AiContentAnalysis, ContentRecord, FeatureVector};

const FEATURE_NAMES: &[&str] = &[
    "video_id",
    "title",
    "description",
    "duration",
    "view_count",
    "like_count",
    "comment_count",
    "share_count",
    "like_rate",
    "comment_rate",
    "share_rate",
    "engagement_rate",
    "hashtags",
    "hashtag_count",
    "music_info",
    "hour_of_day",
    "day_of_week",
    "month",
    "is_weekend",
    "is_business_hours",
];

// Temporal defaults used when the record carries no creation timestamp:
// midday midweek, the most neutral slot in the timing tables.
const DEFAULT_HOUR: u32 = 12;
const DEFAULT_WEEKDAY: u32 = 2;
const DEFAULT_MONTH: u32 = 6;

/// Platform metadata features: raw counters, engagement ratios, hashtags and
/// publication-time breakdown. This set reads the real engagement counters;
/// it serves post-publication analysis and must never feed the
/// pre-publication synthesizer.
#[derive(Debug, Clone, Default)]
pub struct MetadataFeatureSet;

impl FeatureSet for MetadataFeatureSet {
    fn name(&self) -> &str {
        "metadata"
    }

    fn description(&self) -> &str {
        "Platform metadata features (duration, engagement ratios, hashtags, timing)"
    }

    fn declared_feature_names(&self) -> Vec<String> {
        FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn extract(
        &self,
        content: &ContentRecord,
        _analysis: Option<&AiContentAnalysis>,
    ) -> Result<FeatureVector, ExtractionError> {
        let mut features = FeatureVector::new();

        features.insert("video_id", content.id.as_str());
        features.insert("title", content.description.as_str());
        features.insert("description", content.description.as_str());
        features.insert("duration", content.duration_seconds);

        let views = content.engagement.views;
        features.insert("view_count", views as i64);
        features.insert("like_count", content.engagement.likes as i64);
        features.insert("comment_count", content.engagement.comments as i64);
        features.insert("share_count", content.engagement.shares as i64);

        if views > 0 {
            let views = views as f64;
            let likes = content.engagement.likes as f64;
            let comments = content.engagement.comments as f64;
            let shares = content.engagement.shares as f64;
            features.insert("like_rate", likes / views);
            features.insert("comment_rate", comments / views);
            features.insert("share_rate", shares / views);
            features.insert("engagement_rate", (likes + comments + shares) / views);
        } else {
            features.insert("like_rate", 0.0);
            features.insert("comment_rate", 0.0);
            features.insert("share_rate", 0.0);
            features.insert("engagement_rate", 0.0);
        }

        features.insert(
            "hashtags",
            crate::FeatureValue::List(content.hashtags.clone()),
        );
        features.insert("hashtag_count", content.hashtags.len() as i64);

        let music_info = content
            .music
            .as_ref()
            .map(|music| format!("{} - {}", music.author, music.name))
            .unwrap_or_default();
        features.insert("music_info", music_info);

        let (hour, weekday, month) = match content.created_at {
            Some(created_at) => (
                created_at.hour(),
                created_at.weekday().num_days_from_monday(),
                created_at.month(),
            ),
            None => (DEFAULT_HOUR, DEFAULT_WEEKDAY, DEFAULT_MONTH),
        };
        features.insert("hour_of_day", hour as i64);
        features.insert("day_of_week", weekday as i64);
        features.insert("month", month as i64);
        features.insert("is_weekend", weekday >= 5);
        features.insert("is_business_hours", (9..=17).contains(&hour));

        Ok(features)
    }
}
