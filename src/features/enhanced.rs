use crate::features::{ExtractionError, FeatureSet};
use crate::{clamp01, text_contains, AiContentAnalysis, ContentRecord, FeatureVector};

const FEATURE_NAMES: &[&str] = &[
    "hashtag_quality_score",
    "creator_popularity_bias",
    "content_uniqueness_score",
    "completion_rate_estimate",
    "engagement_velocity_score",
    "trend_alignment_score",
    "emotional_impact_score",
    "shareability_score",
];

const POPULAR_TAGS: &[&str] = &["fyp", "viral", "trending", "foryou", "foryoupage"];

/// Quality-oriented features: hashtag quality over quantity, creator-size
/// bias correction, uniqueness and shareability heuristics.
///
/// `trend_alignment_score` here deliberately shares its name with the
/// gemini_basic feature; when both sets run, pipeline order decides which
/// value survives the merge.
#[derive(Debug, Clone, Default)]
pub struct EnhancedQualityFeatureSet;

impl FeatureSet for EnhancedQualityFeatureSet {
    fn name(&self) -> &str {
        "enhanced_quality"
    }

    fn description(&self) -> &str {
        "Enhanced quality-based features for viral prediction"
    }

    fn declared_feature_names(&self) -> Vec<String> {
        FEATURE_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn extract(
        &self,
        content: &ContentRecord,
        analysis: Option<&AiContentAnalysis>,
    ) -> Result<FeatureVector, ExtractionError> {
        let mut features = FeatureVector::new();

        features.insert("hashtag_quality_score", hashtag_quality(content));
        features.insert("creator_popularity_bias", creator_bias(content));
        features.insert(
            "content_uniqueness_score",
            content_uniqueness(content, analysis),
        );
        features.insert(
            "completion_rate_estimate",
            completion_rate(content.duration_seconds),
        );
        features.insert("engagement_velocity_score", engagement_velocity(content));
        features.insert("trend_alignment_score", trend_alignment(content, analysis));
        features.insert("emotional_impact_score", emotional_impact(analysis));
        features.insert("shareability_score", shareability(content, analysis));

        Ok(features)
    }
}

fn hashtag_quality(content: &ContentRecord) -> f64 {
    let hashtags = &content.hashtags;
    if hashtags.is_empty() {
        return 0.0;
    }

    let popular_count = hashtags
        .iter()
        .filter(|tag| POPULAR_TAGS.contains(&tag.to_lowercase().as_str()))
        .count();
    let specific_count = hashtags.len() - popular_count;

    // Specific tags signal niche content; generic trend tags dilute it.
    let mut quality = specific_count as f64 / hashtags.len() as f64 * 0.5;

    if (3..=5).contains(&hashtags.len()) {
        quality += 0.3;
    } else if hashtags.len() > 5 {
        quality += 0.1;
    }

    let avg_length =
        hashtags.iter().map(|tag| tag.chars().count()).sum::<usize>() as f64 / hashtags.len() as f64;
    if avg_length > 8.0 {
        quality += 0.2;
    }

    clamp01(quality)
}

fn creator_bias(content: &ContentRecord) -> f64 {
    let Some(stats) = content.author_stats else {
        return 0.5;
    };

    if stats.follower_count > 1_000_000 {
        0.2
    } else if stats.follower_count > 100_000 {
        0.4
    } else if stats.follower_count > 10_000 {
        0.6
    } else {
        0.8
    }
}

fn content_uniqueness(content: &ContentRecord, analysis: Option<&AiContentAnalysis>) -> f64 {
    let mut score = 0.5;

    if let Some(engagement) = analysis.and_then(|analysis| analysis.engagement_factors.as_ref()) {
        if text_contains(&engagement.viral_potential, "original")
            || text_contains(&engagement.viral_potential, "unique")
        {
            score += 0.3;
        }
    }
    if let Some(trends) = analysis.and_then(|analysis| analysis.trend_alignment.as_ref()) {
        if text_contains(&trends.current_trends, "generic") {
            score -= 0.2;
        }
    }

    // Unusual lengths stand out against the feed's median.
    if content.duration_seconds < 10.0 || content.duration_seconds > 60.0 {
        score += 0.1;
    }

    clamp01(score)
}

fn completion_rate(duration: f64) -> f64 {
    if (15.0..=30.0).contains(&duration) {
        0.9
    } else if duration < 10.0 {
        0.8
    } else if (10.0..=45.0).contains(&duration) {
        0.7
    } else if duration > 60.0 {
        0.3
    } else {
        0.5
    }
}

fn engagement_velocity(content: &ContentRecord) -> f64 {
    let views = content.engagement.views;
    if views == 0 {
        return 0.0;
    }

    let rate = (content.engagement.likes as f64 + content.engagement.comments as f64 * 2.0)
        / views as f64;
    if rate > 0.1 {
        1.0
    } else if rate > 0.05 {
        0.7
    } else if rate > 0.02 {
        0.4
    } else {
        0.1
    }
}

fn trend_alignment(content: &ContentRecord, analysis: Option<&AiContentAnalysis>) -> f64 {
    let mut score = 0.5;

    let trending_count = content
        .hashtags
        .iter()
        .filter(|tag| POPULAR_TAGS.contains(&tag.to_lowercase().as_str()))
        .count();
    if trending_count > 0 {
        score += 0.2;
    }

    if let Some(trends) = analysis.and_then(|analysis| analysis.trend_alignment.as_ref()) {
        if text_contains(&trends.current_trends, "align") {
            score += 0.3;
        }
    }

    clamp01(score)
}

fn emotional_impact(analysis: Option<&AiContentAnalysis>) -> f64 {
    let Some(engagement) = analysis.and_then(|analysis| analysis.engagement_factors.as_ref())
    else {
        return 0.5;
    };

    let trigger_count = engagement
        .emotional_triggers
        .as_deref()
        .map(|text| {
            text.split(',')
                .filter(|trigger| !trigger.trim().is_empty())
                .count()
        })
        .unwrap_or(0);

    clamp01(0.5 + trigger_count as f64 * 0.1)
}

fn shareability(content: &ContentRecord, analysis: Option<&AiContentAnalysis>) -> f64 {
    let mut score = 0.5;

    if content.duration_seconds <= 30.0 {
        score += 0.2;
    } else if content.duration_seconds > 60.0 {
        score -= 0.1;
    }

    if let Some(structure) = analysis.and_then(|analysis| analysis.content_structure.as_ref()) {
        if text_contains(&structure.hook_effectiveness, "effective") {
            score += 0.2;
        }
        if text_contains(&structure.story_flow, "story") {
            score += 0.1;
        }
    }

    clamp01(score)
}
