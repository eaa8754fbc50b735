use rand::rngs::StdRng;
use rand::SeedableRng;

use clip_sim::config::SimConfig;
use clip_sim::error::SimError;
use clip_sim::predictor::{HeuristicPredictor, Prediction, Predictor};
use clip_sim::simulation::{
    PrePublicationFeatureSynthesizer, Scenario, ScenarioVariationGenerator, SimulationRunner,
};
use clip_sim::{ContentRecord, DayOfWeek, EngagementCounters, FeatureVector};

fn sample_content() -> ContentRecord {
    ContentRecord {
        id: "clip-042".to_string(),
        description: "street food tour".to_string(),
        duration_seconds: 24.0,
        hashtags: vec!["streetfood".to_string()],
        music: None,
        engagement: EngagementCounters::default(),
        created_at: None,
        author_stats: None,
        quality: Default::default(),
    }
}

fn scenario(name: &str, hour: u8, day: DayOfWeek, hashtags: &[&str]) -> Scenario {
    Scenario {
        name: name.to_string(),
        description: String::new(),
        publication_hour: hour,
        publication_day: day,
        hashtags: hashtags.iter().map(|tag| tag.to_string()).collect(),
        has_text_overlays: false,
        has_transitions: false,
        has_call_to_action: false,
        engagement_multiplier: 1.0,
        reach_multiplier: 1.0,
        video_length_seconds: None,
    }
}

struct FailingPredictor;

impl Predictor for FailingPredictor {
    async fn score(&self, _features: &FeatureVector) -> Result<Prediction, SimError> {
        Err(SimError::Predictor("connection refused".to_string()))
    }
}

/// Scores the baseline, then fails every trial.
struct FailAfterBaseline {
    calls: std::sync::atomic::AtomicUsize,
}

impl Predictor for FailAfterBaseline {
    async fn score(&self, _features: &FeatureVector) -> Result<Prediction, SimError> {
        let call = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if call == 0 {
            Ok(Prediction {
                virality_score: 0.5,
                confidence: 0.85,
                feature_importances: Default::default(),
            })
        } else {
            Err(SimError::Predictor("model went away".to_string()))
        }
    }
}

/// Fails only the plans published at one specific hour.
struct FailsAtHour(f64);

impl Predictor for FailsAtHour {
    async fn score(&self, features: &FeatureVector) -> Result<Prediction, SimError> {
        if features.get_f64("publication_hour") == Some(self.0) {
            return Err(SimError::Predictor("model went away".to_string()));
        }
        Ok(Prediction {
            virality_score: 0.6,
            confidence: 0.85,
            feature_importances: Default::default(),
        })
    }
}

#[test]
fn scenario_validation_rejects_bad_inputs() {
    let mut bad_hour = scenario("late", 24, DayOfWeek::Monday, &[]);
    assert!(bad_hour.validate().is_err());
    bad_hour.publication_hour = 23;
    assert!(bad_hour.validate().is_ok());

    let mut bad_multiplier = scenario("boost", 12, DayOfWeek::Monday, &[]);
    bad_multiplier.engagement_multiplier = 50.0;
    assert!(bad_multiplier.validate().is_err());

    let mut bad_length = scenario("recut", 12, DayOfWeek::Monday, &[]);
    bad_length.video_length_seconds = Some(-3.0);
    assert!(bad_length.validate().is_err());
}

#[test]
fn hashtag_score_is_bounded_and_rewards_trending_tags() {
    let config = SimConfig::default();
    let synthesizer = PrePublicationFeatureSynthesizer::new(
        &config.hours,
        &config.factors,
        &config.hashtags,
        &config.duration,
    );

    let empty = synthesizer.hashtag_virality(&[]);
    assert!((empty - 0.5).abs() < 1e-6);

    let one_generic = synthesizer.hashtag_virality(&["cooking".to_string()]);
    let one_trending = synthesizer.hashtag_virality(&["fyp".to_string()]);
    assert!(one_trending > one_generic);

    let three_trending = synthesizer.hashtag_virality(&[
        "fyp".to_string(),
        "viral".to_string(),
        "trending".to_string(),
    ]);
    assert!(three_trending > one_trending);
    assert!((three_trending - 1.0).abs() < 1e-6);

    // Holding the total at four tags, swapping generic tags for trending
    // ones never lowers the score.
    let pool = ["fyp", "foryou", "viral", "trending"];
    let mut previous = 0.0;
    for trending_count in 0..=4 {
        let tags: Vec<String> = pool
            .iter()
            .take(trending_count)
            .map(|tag| tag.to_string())
            .chain((trending_count..4).map(|i| format!("generic{}", i)))
            .collect();
        let score = synthesizer.hashtag_virality(&tags);
        assert!(
            score >= previous,
            "{} trending gave {} after {}",
            trending_count,
            score,
            previous
        );
        previous = score;
    }

    for count in 0..12 {
        let tags: Vec<String> = (0..count).map(|i| format!("tag{}", i)).collect();
        let score = synthesizer.hashtag_virality(&tags);
        assert!((0.0..=1.0).contains(&score), "count {} gave {}", count, score);
    }
}

#[test]
fn synthesizer_never_reads_engagement_counters() {
    let config = SimConfig::default();
    let synthesizer = PrePublicationFeatureSynthesizer::new(
        &config.hours,
        &config.factors,
        &config.hashtags,
        &config.duration,
    );
    let plan = scenario("launch", 18, DayOfWeek::Friday, &["fyp"]);

    let unpublished = sample_content();
    let mut published = sample_content();
    published.engagement = EngagementCounters {
        views: 2_500_000,
        likes: 400_000,
        comments: 31_000,
        shares: 12_000,
    };

    assert_eq!(
        synthesizer.synthesize(&unpublished, &plan),
        synthesizer.synthesize(&published, &plan)
    );
}

#[test]
fn synthesizer_applies_timing_factors() {
    let config = SimConfig::default();
    let synthesizer = PrePublicationFeatureSynthesizer::new(
        &config.hours,
        &config.factors,
        &config.hashtags,
        &config.duration,
    );
    let content = sample_content();

    let peak = synthesizer.synthesize(&content, &scenario("a", 9, DayOfWeek::Monday, &[]));
    assert!((peak.get_f64("hour_factor").unwrap() - 1.5).abs() < 1e-6);
    assert!((peak.get_f64("day_factor").unwrap() - 1.0).abs() < 1e-6);

    let near = synthesizer.synthesize(&content, &scenario("b", 8, DayOfWeek::Monday, &[]));
    assert!((near.get_f64("hour_factor").unwrap() - 1.2).abs() < 1e-6);

    let weekend_off = synthesizer.synthesize(&content, &scenario("c", 3, DayOfWeek::Sunday, &[]));
    assert!((weekend_off.get_f64("hour_factor").unwrap() - 0.8).abs() < 1e-6);
    assert!((weekend_off.get_f64("day_factor").unwrap() - 1.3).abs() < 1e-6);
}

#[test]
fn variation_generation_is_deterministic_under_a_fixed_seed() {
    let config = SimConfig::default();
    let generator = ScenarioVariationGenerator::new(
        &config.hours,
        &config.hashtags,
        &config.simulation,
    );
    let base = scenario("launch", 15, DayOfWeek::Saturday, &["fyp", "dance"]);

    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    let first = generator.generate(&base, &mut rng_a);
    let second = generator.generate(&base, &mut rng_b);

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.publication_hour, b.publication_hour);
        assert_eq!(a.hashtags, b.hashtags);
    }
}

#[tokio::test]
async fn reports_are_reproducible_under_a_fixed_seed() {
    let config = SimConfig::default();
    let predictor = HeuristicPredictor;
    let runner = SimulationRunner::new(&config, &predictor);
    let content = sample_content();
    let scenarios = vec![scenario("evening", 18, DayOfWeek::Friday, &["fyp", "food"])];

    let first = runner.run(&content, &scenarios, Some(4), 7).await.unwrap();
    let second = runner.run(&content, &scenarios, Some(4), 7).await.unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn trial_aggregates_are_ordered() {
    let config = SimConfig::default();
    let predictor = HeuristicPredictor;
    let runner = SimulationRunner::new(&config, &predictor);
    let scenarios = vec![
        scenario("morning", 9, DayOfWeek::Monday, &["fyp", "viral", "food"]),
        scenario("night", 2, DayOfWeek::Tuesday, &[]),
    ];

    let report = runner
        .run(&sample_content(), &scenarios, Some(6), 1)
        .await
        .unwrap();

    assert!(!report.scenarios.is_empty());
    for result in &report.scenarios {
        assert!(result.worst_score <= result.average_score, "{}", result.name);
        assert!(result.average_score <= result.best_score, "{}", result.name);
        assert!((0.0..=1.0).contains(&result.average_score));
    }

    let max_average = report
        .scenarios
        .iter()
        .map(|result| result.average_score)
        .fold(f64::MIN, f64::max);
    assert!((report.best_score - max_average).abs() < 1e-9);
    assert_eq!(
        report.summary.total_trials,
        report
            .scenarios
            .iter()
            .map(|result| result.trials_completed)
            .sum::<usize>()
    );
}

#[tokio::test]
async fn well_timed_plan_outscores_off_peak_plan() {
    let mut config = SimConfig::default();
    config.simulation.jitter = 0.0;
    let predictor = HeuristicPredictor;
    let runner = SimulationRunner::new(&config, &predictor);

    let scenarios = vec![
        scenario(
            "planned_peak",
            9,
            DayOfWeek::Monday,
            &["fyp", "viral", "trending"],
        ),
        scenario("late_night", 3, DayOfWeek::Monday, &[]),
    ];

    let report = runner
        .run(&sample_content(), &scenarios, Some(3), 11)
        .await
        .unwrap();

    let score_of = |name: &str| {
        report
            .scenarios
            .iter()
            .find(|result| result.name == name)
            .map(|result| result.average_score)
            .unwrap()
    };
    assert!(score_of("planned_peak") > score_of("late_night"));
}

#[tokio::test]
async fn variations_include_peak_hours_and_boost() {
    let mut config = SimConfig::default();
    config.simulation.jitter = 0.0;
    let predictor = HeuristicPredictor;
    let runner = SimulationRunner::new(&config, &predictor);
    let scenarios = vec![scenario("base", 15, DayOfWeek::Saturday, &["fyp", "dance"])];

    let report = runner
        .run(&sample_content(), &scenarios, Some(2), 3)
        .await
        .unwrap();

    assert_eq!(report.scenarios.len(), 1);
    let result = &report.scenarios[0];
    assert_eq!(result.name, "base");
    let names: Vec<&str> = result
        .variations
        .iter()
        .map(|variation| variation.name.as_str())
        .collect();
    assert!(names.contains(&"base"));
    // One variant per weekend peak hour, plus hashtag and boost variants.
    for peak in [10, 14, 19, 22] {
        let expected = format!("base_optimal_hour_{}", peak);
        assert!(names.contains(&expected.as_str()), "missing {}", expected);
    }
    assert!(names.contains(&"base_trending_hashtags"));
    assert!(names.contains(&"base_engagement_boost"));
}

#[test]
fn trending_variant_keeps_the_base_hashtags() {
    let config = SimConfig::default();
    let generator = ScenarioVariationGenerator::new(
        &config.hours,
        &config.hashtags,
        &config.simulation,
    );
    let base = scenario("launch", 15, DayOfWeek::Saturday, &["fyp", "dance"]);

    let mut rng = StdRng::seed_from_u64(17);
    let variations = generator.generate(&base, &mut rng);
    let trending = variations
        .iter()
        .find(|variation| variation.name == "launch_trending_hashtags")
        .unwrap();

    assert_eq!(trending.hashtags.len(), base.hashtags.len() + 3);
    assert_eq!(&trending.hashtags[..base.hashtags.len()], &base.hashtags[..]);
    for tag in &trending.hashtags[base.hashtags.len()..] {
        assert!(config.hashtags.is_trending(tag), "unexpected tag {}", tag);
    }
}

#[tokio::test]
async fn weak_plans_get_rule_based_recommendations() {
    let config = SimConfig::default();
    let predictor = HeuristicPredictor;
    let runner = SimulationRunner::new(&config, &predictor);
    let scenarios = vec![scenario("graveyard", 3, DayOfWeek::Monday, &["food"])];

    let report = runner
        .run(&sample_content(), &scenarios, Some(2), 8)
        .await
        .unwrap();

    let recommendations = &report.scenarios[0].recommendations;
    let mentions = |needle: &str| recommendations.iter().any(|text| text.contains(needle));
    assert!(mentions("peak hour"), "{:?}", recommendations);
    assert!(mentions("hashtags"), "{:?}", recommendations);
    assert!(mentions("call to action"), "{:?}", recommendations);
    assert!(mentions("text overlays"), "{:?}", recommendations);
}

#[tokio::test]
async fn well_formed_plans_get_no_recommendations() {
    let config = SimConfig::default();
    let predictor = HeuristicPredictor;
    let runner = SimulationRunner::new(&config, &predictor);

    let mut plan = scenario("polished", 9, DayOfWeek::Monday, &["fyp", "food", "dance", "viral"]);
    plan.has_call_to_action = true;
    plan.has_text_overlays = true;

    let report = runner
        .run(&sample_content(), &[plan], Some(2), 8)
        .await
        .unwrap();
    assert!(report.scenarios[0].recommendations.is_empty());
}

#[tokio::test]
async fn empty_scenario_list_is_rejected() {
    let config = SimConfig::default();
    let predictor = HeuristicPredictor;
    let runner = SimulationRunner::new(&config, &predictor);

    let err = runner
        .run(&sample_content(), &[], Some(2), 3)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::Validation(_)));
}

#[tokio::test]
async fn baseline_failure_surfaces_as_predictor_error() {
    let config = SimConfig::default();
    let predictor = FailingPredictor;
    let runner = SimulationRunner::new(&config, &predictor);
    let scenarios = vec![scenario("evening", 18, DayOfWeek::Friday, &[])];

    let err = runner
        .run(&sample_content(), &scenarios, Some(3), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::Predictor(_)));
}

#[tokio::test]
async fn failed_variation_is_dropped_without_failing_the_run() {
    let config = SimConfig::default();
    let predictor = FailsAtHour(9.0);
    let runner = SimulationRunner::new(&config, &predictor);
    let scenarios = vec![scenario("plan", 12, DayOfWeek::Monday, &[])];

    let report = runner
        .run(&sample_content(), &scenarios, Some(3), 5)
        .await
        .unwrap();

    let names: Vec<&str> = report.scenarios[0]
        .variations
        .iter()
        .map(|variation| variation.name.as_str())
        .collect();
    assert!(!names.contains(&"plan_optimal_hour_9"), "{:?}", names);
    assert!(names.contains(&"plan"));
    assert!(names.contains(&"plan_optimal_hour_18"));
    assert!(names.contains(&"plan_optimal_hour_21"));
    assert!(names.contains(&"plan_engagement_boost"));
}

#[tokio::test]
async fn all_trials_failing_surfaces_as_no_completed_trials() {
    let config = SimConfig::default();
    let predictor = FailAfterBaseline {
        calls: std::sync::atomic::AtomicUsize::new(0),
    };
    let runner = SimulationRunner::new(&config, &predictor);
    let scenarios = vec![scenario("evening", 18, DayOfWeek::Friday, &[])];

    let err = runner
        .run(&sample_content(), &scenarios, Some(3), 5)
        .await
        .unwrap_err();
    assert!(matches!(err, SimError::NoCompletedTrials { .. }));
}

#[tokio::test]
async fn heuristic_predictor_is_deterministic() {
    let config = SimConfig::default();
    let synthesizer = PrePublicationFeatureSynthesizer::new(
        &config.hours,
        &config.factors,
        &config.hashtags,
        &config.duration,
    );
    let features = synthesizer.synthesize(
        &sample_content(),
        &scenario("plan", 12, DayOfWeek::Wednesday, &["fyp"]),
    );

    let predictor = HeuristicPredictor;
    let first = predictor.score(&features).await.unwrap();
    let second = predictor.score(&features).await.unwrap();
    assert_eq!(first.virality_score, second.virality_score);
    assert!((0.0..=1.0).contains(&first.virality_score));
    assert!((first.confidence - 0.85).abs() < 1e-6);
    assert!(!first.feature_importances.is_empty());
}
