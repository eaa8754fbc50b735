use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::features::{FeatureSet, FeatureSetRegistry};
use crate::{AiContentAnalysis, ContentRecord, FeatureVector};

/// Runs an ordered pipeline of feature sets and merges their outputs.
///
/// Set names are resolved against the registry once, at construction;
/// unknown names are skipped with a warning so a stale pipeline entry
/// degrades the vector instead of failing the request. A set that errors
/// at extraction time is logged and contributes nothing, later sets still
/// run. Merge order is pipeline order, so a set later in the pipeline
/// overrides earlier values for a shared feature name.
pub struct FeatureExtractionManager {
    extractors: Vec<Arc<dyn FeatureSet>>,
}

impl FeatureExtractionManager {
    pub fn new(registry: &FeatureSetRegistry, pipeline: &[String]) -> Self {
        let mut extractors = Vec::with_capacity(pipeline.len());
        for name in pipeline {
            match registry.get(name) {
                Some(set) => extractors.push(set),
                None => warn!(set = %name, "unknown feature set in pipeline, skipping"),
            }
        }
        Self { extractors }
    }

    /// Names of the sets that survived pipeline resolution, in run order.
    pub fn set_names(&self) -> Vec<String> {
        self.extractors
            .iter()
            .map(|set| set.name().to_string())
            .collect()
    }

    /// Distinct feature names the pipeline can emit, in merge order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for set in &self.extractors {
            for name in set.declared_feature_names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names().len()
    }

    pub fn extract(
        &self,
        content: &ContentRecord,
        analysis: Option<&AiContentAnalysis>,
    ) -> FeatureVector {
        if analysis.is_none() {
            warn!(content = %content.id, "no AI analysis provided, using neutral defaults");
        }

        let mut merged = FeatureVector::new();
        for set in &self.extractors {
            match set.extract(content, analysis) {
                Ok(features) => {
                    debug!(set = %set.name(), count = features.len(), "extracted features");
                    merged.merge(features);
                }
                Err(err) => {
                    error!(set = %set.name(), error = %err, "feature set failed, skipping");
                }
            }
        }
        merged
    }
}
