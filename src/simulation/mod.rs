pub mod orchestrator;
pub mod scenario;
pub mod synthesize;

pub use orchestrator::{
    ScenarioResult, SimulationReport, SimulationRunner, SimulationSummary, VariationResult,
};
pub use scenario::{Scenario, ScenarioVariationGenerator};
pub use synthesize::PrePublicationFeatureSynthesizer;
