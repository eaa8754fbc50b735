use serde::{Deserialize, Serialize};

use clip_sim::error::SimError;
use clip_sim::features::{FeatureExtractionManager, FeatureSetInfo, FeatureSetRegistry};
use clip_sim::simulation::{Scenario, SimulationReport};
use clip_sim::{AiContentAnalysis, ContentRecord, FeatureVector};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub content: ContentRecord,
    #[serde(default)]
    pub analysis: Option<AiContentAnalysis>,
    /// Ordered pipeline override; defaults to the configured pipeline.
    #[serde(default)]
    pub feature_sets: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub features: FeatureVector,
    pub feature_count: usize,
    pub sets_used: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub content: ContentRecord,
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub trials: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub report: SimulationReport,
}

#[derive(Debug, Serialize)]
pub struct FeatureSetsResponse {
    pub feature_sets: Vec<FeatureSetInfo>,
}

/// Strict pipeline resolution for the API boundary: any unknown set name is
/// rejected outright, unlike the manager's lenient skip for configured
/// pipelines.
pub fn resolve_pipeline(
    registry: &FeatureSetRegistry,
    requested: Option<&[String]>,
    configured: &[String],
) -> Result<Vec<String>, SimError> {
    let pipeline: Vec<String> = match requested {
        Some(sets) if !sets.is_empty() => sets.to_vec(),
        _ => configured.to_vec(),
    };

    for name in &pipeline {
        if !registry.contains(name) {
            return Err(SimError::configuration(format!(
                "unknown feature set '{}', available: {}",
                name,
                registry.names().join(", ")
            )));
        }
    }
    Ok(pipeline)
}

pub fn extract(
    registry: &FeatureSetRegistry,
    request: ExtractRequest,
    configured: &[String],
) -> Result<ExtractResponse, SimError> {
    let pipeline = resolve_pipeline(registry, request.feature_sets.as_deref(), configured)?;
    let manager = FeatureExtractionManager::new(registry, &pipeline);
    let features = manager.extract(&request.content, request.analysis.as_ref());
    Ok(ExtractResponse {
        feature_count: features.len(),
        sets_used: manager.set_names(),
        features,
    })
}
