use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::config::SimConfig;
use crate::features::{
    ComprehensiveFeatureSet, ContentAnalysisBasicFeatureSet, EnhancedQualityFeatureSet,
    FeatureSet, MetadataFeatureSet, VisualGranularFeatureSet,
};

/// Summary of a registered set, shaped for listing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureSetInfo {
    pub name: String,
    pub description: String,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

/// Name-keyed registry of feature sets. Registration of a duplicate name
/// overwrites the previous set with a warning.
#[derive(Default)]
pub struct FeatureSetRegistry {
    sets: HashMap<String, Arc<dyn FeatureSet>>,
}

impl FeatureSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with every built-in set.
    pub fn with_defaults(config: &SimConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MetadataFeatureSet));
        registry.register(Arc::new(ContentAnalysisBasicFeatureSet));
        registry.register(Arc::new(VisualGranularFeatureSet));
        registry.register(Arc::new(EnhancedQualityFeatureSet));
        registry.register(Arc::new(ComprehensiveFeatureSet::with_defaults(
            config.hours.clone(),
            config.duration.clone(),
        )));
        registry
    }

    pub fn register(&mut self, set: Arc<dyn FeatureSet>) {
        let name = set.name().to_string();
        if self.sets.insert(name.clone(), set).is_some() {
            warn!(set = %name, "feature set re-registered, previous one replaced");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn FeatureSet>> {
        self.sets.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    /// Sorted names of every registered set.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sets.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn list(&self) -> Vec<FeatureSetInfo> {
        let mut infos: Vec<FeatureSetInfo> = self
            .sets
            .values()
            .map(|set| FeatureSetInfo {
                name: set.name().to_string(),
                description: set.description().to_string(),
                feature_count: set.feature_count(),
                feature_names: set.declared_feature_names(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
