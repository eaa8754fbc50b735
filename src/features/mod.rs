pub mod catalog;
pub mod comprehensive;
pub mod content_basic;
pub mod enhanced;
pub mod manager;
pub mod metadata;
pub mod registry;
pub mod visual_granular;

pub use catalog::{feature_catalog, ComplexityTier, FeatureCategory, FeatureDefinition};
pub use comprehensive::ComprehensiveFeatureSet;
pub use content_basic::ContentAnalysisBasicFeatureSet;
pub use enhanced::EnhancedQualityFeatureSet;
pub use manager::FeatureExtractionManager;
pub use metadata::MetadataFeatureSet;
pub use registry::{FeatureSetInfo, FeatureSetRegistry};
pub use visual_granular::VisualGranularFeatureSet;

use thiserror::Error;

use crate::{AiContentAnalysis, ContentRecord, FeatureVector};

/// Internal failure of one feature set. Never crosses the manager boundary:
/// the manager logs it and the set contributes zero features to the merge.
#[derive(Debug, Error)]
#[error("feature set '{set}' failed: {message}")]
pub struct ExtractionError {
    pub set: String,
    pub message: String,
}

/// A named, pluggable unit converting a content record plus optional AI
/// analysis into named feature values.
///
/// Implementations must emit every declared feature name on every call,
/// substituting the documented neutral default wherever the analysis (or a
/// section of it) is missing. Returning `Err` is reserved for genuinely
/// unexpected internal failures; the manager contains those.
pub trait FeatureSet: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn declared_feature_names(&self) -> Vec<String>;

    fn extract(
        &self,
        content: &ContentRecord,
        analysis: Option<&AiContentAnalysis>,
    ) -> Result<FeatureVector, ExtractionError>;

    fn feature_count(&self) -> usize {
        self.declared_feature_names().len()
    }
}
