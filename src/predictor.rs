use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::PredictorConfig;
use crate::error::SimError;
use crate::{clamp01, FeatureVector};

/// Score returned by a predictor for one feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub virality_score: f64,
    pub confidence: f64,
    #[serde(default)]
    pub feature_importances: BTreeMap<String, f64>,
}

/// Scores a feature vector. The simulation orchestrator is generic over
/// this, so a remote model and the offline heuristic are interchangeable
/// and tests can plug in a canned scorer.
pub trait Predictor: Send + Sync {
    fn score(
        &self,
        features: &FeatureVector,
    ) -> impl Future<Output = Result<Prediction, SimError>> + Send;
}

/// Remote model service client. Posts the feature vector as JSON to
/// `{endpoint}/predict` and expects a `Prediction` back.
#[derive(Clone)]
pub struct HttpPredictor {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpPredictor {
    pub fn from_config(config: &PredictorConfig) -> Result<Self, SimError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        HttpPredictor::new(config.endpoint.clone(), timeout)
    }

    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, SimError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SimError::Predictor(format!("failed to build client: {}", err)))?;
        Ok(Self { endpoint, client })
    }
}

impl Predictor for HttpPredictor {
    async fn score(&self, features: &FeatureVector) -> Result<Prediction, SimError> {
        let url = format!("{}/predict", self.endpoint.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .json(features)
            .send()
            .await
            .map_err(|err| SimError::Predictor(format!("request failed: {}", err)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SimError::Predictor(format!("status {}: {}", status, body)));
        }

        response
            .json::<Prediction>()
            .await
            .map_err(|err| SimError::Predictor(format!("response parse failed: {}", err)))
    }
}

/// Deterministic offline scorer used when no model service is reachable.
///
/// A weighted blend of the timing and content features the synthesizer
/// emits; weights mirror the observed importance ordering of the trained
/// model so relative comparisons between scenarios stay meaningful.
#[derive(Debug, Clone, Default)]
pub struct HeuristicPredictor;

const HEURISTIC_CONFIDENCE: f64 = 0.85;

/// (feature, weight, neutral default when the feature is absent)
const WEIGHTS: &[(&str, f64, f64)] = &[
    ("hour_factor", 0.25, 1.0),
    ("hashtag_virality_score", 0.20, 0.5),
    ("video_duration_optimized", 0.15, 0.6),
    ("audience_connection_score", 0.15, 0.5),
    ("day_factor", 0.10, 1.0),
    ("production_quality_score", 0.10, 0.5),
    ("visual_quality_score", 0.05, 0.5),
];

// Hour and day factors live on a multiplier scale; everything else is [0,1].
const HOUR_FACTOR_MAX: f64 = 1.5;
const DAY_FACTOR_MAX: f64 = 1.3;

impl HeuristicPredictor {
    fn blend(features: &FeatureVector) -> f64 {
        let mut score = 0.0;
        for (name, weight, neutral) in WEIGHTS {
            let raw = features.get_f64(name).unwrap_or(*neutral);
            let normalized = match *name {
                "hour_factor" => raw / HOUR_FACTOR_MAX,
                "day_factor" => raw / DAY_FACTOR_MAX,
                _ => raw,
            };
            score += weight * clamp01(normalized);
        }
        clamp01(score)
    }

    fn importances() -> BTreeMap<String, f64> {
        [
            ("audience_connection_score", 0.124),
            ("hour_of_day", 0.108),
            ("video_duration_optimized", 0.101),
            ("emotional_trigger_count", 0.099),
            ("estimated_hashtag_count", 0.096),
        ]
        .iter()
        .map(|(name, weight)| (name.to_string(), *weight))
        .collect()
    }
}

impl Predictor for HeuristicPredictor {
    async fn score(&self, features: &FeatureVector) -> Result<Prediction, SimError> {
        Ok(Prediction {
            virality_score: Self::blend(features),
            confidence: HEURISTIC_CONFIDENCE,
            feature_importances: Self::importances(),
        })
    }
}

/// Runtime choice between the remote model and the offline heuristic.
#[derive(Clone)]
pub enum AnyPredictor {
    Http(HttpPredictor),
    Heuristic(HeuristicPredictor),
}

impl AnyPredictor {
    pub fn from_config(config: &PredictorConfig, offline: bool) -> Result<Self, SimError> {
        if offline {
            Ok(AnyPredictor::Heuristic(HeuristicPredictor))
        } else {
            Ok(AnyPredictor::Http(HttpPredictor::from_config(config)?))
        }
    }
}

impl Predictor for AnyPredictor {
    async fn score(&self, features: &FeatureVector) -> Result<Prediction, SimError> {
        match self {
            AnyPredictor::Http(predictor) => predictor.score(features).await,
            AnyPredictor::Heuristic(predictor) => predictor.score(features).await,
        }
    }
}
