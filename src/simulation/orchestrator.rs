use std::time::{Duration, Instant};

use futures::future::join_all;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::predictor::Predictor;
use crate::simulation::{PrePublicationFeatureSynthesizer, Scenario, ScenarioVariationGenerator};
use crate::{clamp01, format_percent, stable_hash64, ContentRecord};

/// Trial aggregate for one derived variant of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationResult {
    pub name: String,
    pub description: String,
    pub trials_completed: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
}

/// Aggregated outcome of one input scenario: every trial of every variant
/// pooled, with the per-variant breakdown kept as a nested detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub description: String,
    pub trials_completed: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
    pub improvement_over_baseline: f64,
    pub recommendations: Vec<String>,
    pub variations: Vec<VariationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub total_trials: usize,
    pub scenarios_tested: usize,
    pub improvement_potential: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub baseline_score: f64,
    pub scenarios: Vec<ScenarioResult>,
    pub best_scenario_name: String,
    pub best_score: f64,
    pub recommendations: Vec<String>,
    pub summary: SimulationSummary,
}

/// Runs pre-publication what-if simulations: expands each scenario into
/// variations, synthesizes the feature vector each variation would produce,
/// scores it over repeated jittered trials and aggregates the outcomes
/// against a neutral baseline.
pub struct SimulationRunner<'a, P: Predictor> {
    config: &'a SimConfig,
    predictor: &'a P,
}

impl<'a, P: Predictor> SimulationRunner<'a, P> {
    pub fn new(config: &'a SimConfig, predictor: &'a P) -> Self {
        Self { config, predictor }
    }

    pub async fn run(
        &self,
        content: &ContentRecord,
        scenarios: &[Scenario],
        trials: Option<usize>,
        seed: u64,
    ) -> Result<SimulationReport, SimError> {
        if scenarios.is_empty() {
            return Err(SimError::validation("at least one scenario is required"));
        }
        for scenario in scenarios {
            scenario.validate()?;
        }

        let trials = trials.unwrap_or(self.config.simulation.default_trials).max(1);
        let synthesizer = PrePublicationFeatureSynthesizer::new(
            &self.config.hours,
            &self.config.factors,
            &self.config.hashtags,
            &self.config.duration,
        );
        let generator = ScenarioVariationGenerator::new(
            &self.config.hours,
            &self.config.hashtags,
            &self.config.simulation,
        );

        let baseline_features = synthesizer.synthesize(content, &Scenario::baseline());
        let baseline_score = self.predictor.score(&baseline_features).await?.virality_score;
        debug!(baseline_score, "baseline scored");

        let deadline = self
            .config
            .simulation
            .run_deadline_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));
        let deadline_reached = || deadline.map(|at| Instant::now() >= at).unwrap_or(false);

        let mut variation_rng = StdRng::seed_from_u64(seed);
        let mut results: Vec<ScenarioResult> = Vec::new();
        let mut total_trials = 0usize;

        for base in scenarios {
            if deadline_reached() {
                warn!(scenario = %base.name, "run deadline reached, skipping remaining scenarios");
                break;
            }

            let mut pooled: Vec<f64> = Vec::new();
            let mut variations: Vec<VariationResult> = Vec::new();

            for variation in generator.generate(base, &mut variation_rng) {
                if deadline_reached() {
                    warn!(
                        scenario = %variation.name,
                        "run deadline reached, skipping remaining variations"
                    );
                    break;
                }

                let features = synthesizer.synthesize(content, &variation);
                let outcomes = join_all((0..trials).map(|_| async {
                    self.predictor
                        .score(&features)
                        .await
                        .map(|prediction| prediction.virality_score)
                }))
                .await;

                let mut scores = Vec::with_capacity(trials);
                for (trial, outcome) in outcomes.into_iter().enumerate() {
                    match outcome {
                        Ok(score) => {
                            scores.push(self.jitter(score, &variation.name, trial, seed));
                        }
                        Err(err) => {
                            warn!(
                                scenario = %variation.name,
                                trial,
                                error = %err,
                                "trial failed, dropping it"
                            );
                        }
                    }
                }

                // An exhausted variation reduces coverage, not the run.
                if scores.is_empty() {
                    warn!(scenario = %variation.name, "every trial failed, dropping variation");
                    continue;
                }

                total_trials += scores.len();
                let (average, best, worst) = stats(&scores);
                variations.push(VariationResult {
                    name: variation.name.clone(),
                    description: variation.description.clone(),
                    trials_completed: scores.len(),
                    average_score: average,
                    best_score: best,
                    worst_score: worst,
                });
                pooled.extend(scores);
            }

            if pooled.is_empty() {
                warn!(scenario = %base.name, "no variation completed any trial, dropping scenario");
                continue;
            }

            let (average, best, worst) = stats(&pooled);
            results.push(ScenarioResult {
                name: base.name.clone(),
                description: base.description.clone(),
                trials_completed: pooled.len(),
                average_score: average,
                best_score: best,
                worst_score: worst,
                improvement_over_baseline: average - baseline_score,
                recommendations: self.scenario_recommendations(base),
                variations,
            });
        }

        if results.is_empty() {
            return Err(SimError::NoCompletedTrials {
                scenario: scenarios[0].name.clone(),
            });
        }

        let best = results
            .iter()
            .max_by(|a, b| a.average_score.total_cmp(&b.average_score))
            .cloned()
            .ok_or_else(|| SimError::NoCompletedTrials {
                scenario: scenarios[0].name.clone(),
            })?;

        let recommendations = self.run_recommendations(&best, baseline_score);
        info!(
            best = %best.name,
            best_score = best.average_score,
            scenarios = results.len(),
            total_trials,
            "simulation complete"
        );

        Ok(SimulationReport {
            baseline_score,
            best_scenario_name: best.name.clone(),
            best_score: best.average_score,
            recommendations,
            summary: SimulationSummary {
                total_trials,
                scenarios_tested: results.len(),
                improvement_potential: best.average_score - baseline_score,
            },
            scenarios: results,
        })
    }

    /// Per-trial noise, reproducible from the run seed, the variation name
    /// and the trial index so reruns produce identical reports.
    fn jitter(&self, score: f64, variation: &str, trial: usize, seed: u64) -> f64 {
        let amplitude = self.config.simulation.jitter;
        if amplitude <= 0.0 {
            return clamp01(score);
        }
        let trial_seed = (seed ^ stable_hash64(variation)).wrapping_add(trial as u64);
        let mut rng = StdRng::seed_from_u64(trial_seed);
        clamp01(score + rng.gen_range(-amplitude..=amplitude))
    }

    /// Rule checks against the plan itself: timing, hashtag count, and the
    /// content flags a creator can still change before publishing.
    fn scenario_recommendations(&self, scenario: &Scenario) -> Vec<String> {
        let mut recommendations = Vec::new();

        let hours = &self.config.hours;
        if !hours.is_peak(scenario.publication_day, scenario.publication_hour) {
            let peaks: Vec<String> = hours
                .peaks_for(scenario.publication_day)
                .iter()
                .map(|hour| format!("{}:00", hour))
                .collect();
            recommendations.push(format!(
                "Move publication from {}:00 to a peak hour ({})",
                scenario.publication_hour,
                peaks.join(", ")
            ));
        }

        let hashtags = &self.config.hashtags;
        if !hashtags.is_optimal_count(scenario.hashtags.len()) {
            recommendations.push(format!(
                "Use {}-{} hashtags for better reach (currently {})",
                hashtags.optimal_min,
                hashtags.optimal_max,
                scenario.hashtags.len()
            ));
        }

        if !scenario.has_call_to_action {
            recommendations.push("Add a call to action to drive engagement".to_string());
        }
        if !scenario.has_text_overlays {
            recommendations.push("Add text overlays to improve retention".to_string());
        }

        recommendations
    }

    fn run_recommendations(&self, best: &ScenarioResult, baseline_score: f64) -> Vec<String> {
        let mut recommendations = Vec::new();

        if best.average_score < self.config.simulation.redesign_threshold {
            recommendations.push(format!(
                "Even the best scenario scores below {:.2}; consider reworking the content \
                 itself rather than its publication plan",
                self.config.simulation.redesign_threshold
            ));
        }

        if best.average_score > baseline_score {
            recommendations.push(format!(
                "Best plan '{}' scores {} above the neutral baseline",
                best.name,
                format_percent(best.average_score - baseline_score)
            ));
        }

        recommendations
    }
}

fn stats(scores: &[f64]) -> (f64, f64, f64) {
    let best = scores.iter().cloned().fold(f64::MIN, f64::max);
    let worst = scores.iter().cloned().fold(f64::MAX, f64::min);
    let average = scores.iter().sum::<f64>() / scores.len() as f64;
    (average, best, worst)
}
