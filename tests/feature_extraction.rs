use std::sync::Arc;

use clip_sim::config::SimConfig;
use clip_sim::features::{
    feature_catalog, ContentAnalysisBasicFeatureSet, FeatureExtractionManager, FeatureSet,
    FeatureSetRegistry,
};
use clip_sim::{
    AiContentAnalysis, ContentRecord, ContentStructure, EngagementCounters, EngagementFactors,
    FeatureValue, TrendAlignment,
};

fn sample_content() -> ContentRecord {
    ContentRecord {
        id: "clip-001".to_string(),
        description: "morning routine".to_string(),
        duration_seconds: 25.5,
        hashtags: vec!["morningroutine".to_string(), "productivity".to_string()],
        music: None,
        engagement: EngagementCounters::default(),
        created_at: None,
        author_stats: None,
        quality: Default::default(),
    }
}

fn sample_analysis() -> AiContentAnalysis {
    AiContentAnalysis {
        content_structure: Some(ContentStructure {
            hook_effectiveness: Some("highly effective opening".to_string()),
            story_flow: Some("clear story arc".to_string()),
            call_to_action: None,
        }),
        engagement_factors: Some(EngagementFactors {
            viral_potential: Some("high".to_string()),
            emotional_triggers: Some("joy, surprise, curiosity".to_string()),
            audience_connection: Some("strong connection".to_string()),
        }),
        trend_alignment: Some(TrendAlignment {
            current_trends: Some("aligns perfectly with current trends".to_string()),
            hashtag_potential: Some("#fyp #viral".to_string()),
        }),
        ..Default::default()
    }
}

#[test]
fn every_set_emits_all_declared_features_without_analysis() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let content = sample_content();

    for info in registry.list() {
        let set = registry.get(&info.name).unwrap();
        let features = set.extract(&content, None).unwrap();
        assert_eq!(
            features.len(),
            info.feature_names.len(),
            "set '{}' emitted {} of {} declared features",
            info.name,
            features.len(),
            info.feature_names.len()
        );
        for name in &info.feature_names {
            assert!(
                features.contains(name),
                "set '{}' missing feature '{}'",
                info.name,
                name
            );
        }
    }
}

#[test]
fn vector_shape_is_identical_with_and_without_analysis() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let content = sample_content();
    let analysis = sample_analysis();

    for info in registry.list() {
        let set = registry.get(&info.name).unwrap();
        let bare = set.extract(&content, None).unwrap();
        let full = set.extract(&content, Some(&analysis)).unwrap();
        assert_eq!(bare.names(), full.names(), "set '{}'", info.name);
    }
}

#[test]
fn default_pipeline_merges_to_expected_size() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let pipeline = vec![
        "metadata".to_string(),
        "gemini_basic".to_string(),
        "visual_granular".to_string(),
    ];
    let manager = FeatureExtractionManager::new(&registry, &pipeline);
    let features = manager.extract(&sample_content(), None);

    // 20 metadata + 14 basic + 10 visual, no shared names across those sets.
    assert_eq!(features.len(), 44);
    assert_eq!(manager.feature_count(), 44);
}

#[test]
fn extraction_is_deterministic() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let pipeline = vec![
        "metadata".to_string(),
        "gemini_basic".to_string(),
        "comprehensive".to_string(),
    ];
    let manager = FeatureExtractionManager::new(&registry, &pipeline);
    let content = sample_content();
    let analysis = sample_analysis();

    let first = manager.extract(&content, Some(&analysis));
    let second = manager.extract(&content, Some(&analysis));
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn later_sets_override_shared_feature_names() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let content = sample_content();
    let analysis = sample_analysis();

    // gemini_basic scores trend alignment 1.0 ("perfectly"); enhanced_quality
    // scores the same name 0.8 (no trending tags, "align" present).
    let basic_first = FeatureExtractionManager::new(
        &registry,
        &["gemini_basic".to_string(), "enhanced_quality".to_string()],
    )
    .extract(&content, Some(&analysis));
    assert!((basic_first.get_f64("trend_alignment_score").unwrap() - 0.8).abs() < 1e-6);

    let enhanced_first = FeatureExtractionManager::new(
        &registry,
        &["enhanced_quality".to_string(), "gemini_basic".to_string()],
    )
    .extract(&content, Some(&analysis));
    assert!((enhanced_first.get_f64("trend_alignment_score").unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn unknown_pipeline_entries_are_skipped() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let manager = FeatureExtractionManager::new(
        &registry,
        &["metadata".to_string(), "does_not_exist".to_string()],
    );
    assert_eq!(manager.set_names(), vec!["metadata".to_string()]);

    let features = manager.extract(&sample_content(), None);
    assert_eq!(features.len(), 20);
}

#[test]
fn metadata_uses_neutral_temporal_defaults() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let set = registry.get("metadata").unwrap();
    let features = set.extract(&sample_content(), None).unwrap();

    assert_eq!(features.get("hour_of_day"), Some(&FeatureValue::Int(12)));
    assert_eq!(features.get("day_of_week"), Some(&FeatureValue::Int(2)));
    assert_eq!(features.get("month"), Some(&FeatureValue::Int(6)));
    assert_eq!(features.get("is_weekend"), Some(&FeatureValue::Bool(false)));
    assert_eq!(
        features.get("is_business_hours"),
        Some(&FeatureValue::Bool(true))
    );
}

#[test]
fn metadata_guards_ratios_against_zero_views() {
    let registry = FeatureSetRegistry::with_defaults(&SimConfig::default());
    let set = registry.get("metadata").unwrap();
    let features = set.extract(&sample_content(), None).unwrap();

    for name in ["like_rate", "comment_rate", "share_rate", "engagement_rate"] {
        assert_eq!(features.get_f64(name), Some(0.0), "{}", name);
    }
}

#[test]
fn basic_set_falls_back_to_documented_defaults() {
    let set = ContentAnalysisBasicFeatureSet;
    let features = set.extract(&sample_content(), None).unwrap();

    for name in [
        "visual_quality_score",
        "has_hook",
        "viral_potential_score",
        "audience_connection_score",
        "sound_quality_score",
        "production_quality_score",
        "trend_alignment_score",
    ] {
        assert!(
            (features.get_f64(name).unwrap() - 0.5).abs() < 1e-6,
            "{}",
            name
        );
    }
    for name in [
        "has_text_overlays",
        "has_transitions",
        "has_story",
        "has_call_to_action",
        "length_optimized",
    ] {
        assert_eq!(features.get(name), Some(&FeatureValue::Bool(false)), "{}", name);
    }
    assert_eq!(features.get("emotional_trigger_count"), Some(&FeatureValue::Int(0)));
    assert_eq!(features.get("estimated_hashtag_count"), Some(&FeatureValue::Int(0)));
}

#[test]
fn basic_set_counts_emotional_triggers() {
    let set = ContentAnalysisBasicFeatureSet;
    let features = set
        .extract(&sample_content(), Some(&sample_analysis()))
        .unwrap();

    assert_eq!(
        features.get("emotional_trigger_count"),
        Some(&FeatureValue::Int(3))
    );
    assert_eq!(features.get("estimated_hashtag_count"), Some(&FeatureValue::Int(2)));
    assert!((features.get_f64("viral_potential_score").unwrap() - 1.0).abs() < 1e-6);
    assert!((features.get_f64("audience_connection_score").unwrap() - 1.0).abs() < 1e-6);
}

#[test]
fn registry_replaces_duplicate_registrations() {
    let mut registry = FeatureSetRegistry::new();
    registry.register(Arc::new(ContentAnalysisBasicFeatureSet));
    registry.register(Arc::new(ContentAnalysisBasicFeatureSet));
    assert_eq!(registry.len(), 1);
}

#[test]
fn catalog_covers_registered_defaults() {
    let catalog = feature_catalog();
    assert!(!catalog.is_empty());
    for definition in &catalog {
        assert!(!definition.name.is_empty());
        assert!(!definition.description.is_empty());
    }
}
