use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::DayOfWeek;

/// Peak-hour lookup per day plus the band radius that defines "near peak".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourBandsConfig {
    pub weekday_peaks: Vec<u8>,
    pub weekend_peaks: Vec<u8>,
    pub near_peak_radius: u8,
}

impl Default for HourBandsConfig {
    fn default() -> Self {
        Self {
            weekday_peaks: vec![9, 12, 18, 21],
            weekend_peaks: vec![10, 14, 19, 22],
            near_peak_radius: 1,
        }
    }
}

impl HourBandsConfig {
    pub fn peaks_for(&self, day: DayOfWeek) -> &[u8] {
        if day.is_weekend() {
            &self.weekend_peaks
        } else {
            &self.weekday_peaks
        }
    }

    pub fn is_peak(&self, day: DayOfWeek, hour: u8) -> bool {
        self.peaks_for(day).contains(&hour)
    }

    pub fn is_near_peak(&self, day: DayOfWeek, hour: u8) -> bool {
        if self.is_peak(day, hour) {
            return false;
        }
        let radius = self.near_peak_radius as i16;
        self.peaks_for(day)
            .iter()
            .any(|peak| (hour as i16 - *peak as i16).abs() <= radius)
    }
}

/// Timing multipliers applied by the pre-publication synthesizer. Heuristic
/// constants preserved from the reference heuristics, not fitted values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingFactorsConfig {
    pub hour_peak: f64,
    pub hour_near_peak: f64,
    pub hour_off_peak: f64,
    pub day_weekend: f64,
    pub day_weekday: f64,
}

impl Default for TimingFactorsConfig {
    fn default() -> Self {
        Self {
            hour_peak: 1.5,
            hour_near_peak: 1.2,
            hour_off_peak: 0.8,
            day_weekend: 1.3,
            day_weekday: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagConfig {
    pub trending_pool: Vec<String>,
    pub trending_weight: f64,
    pub base_weight: f64,
    pub count_bonus: f64,
    pub trending_bonus: f64,
    pub optimal_min: usize,
    pub optimal_max: usize,
    pub neutral_score: f64,
}

impl Default for HashtagConfig {
    fn default() -> Self {
        Self {
            trending_pool: [
                "fyp", "foryou", "viral", "trending", "tiktok", "funny", "dance", "comedy",
                "food", "fashion", "beauty", "fitness", "travel", "music",
            ]
            .iter()
            .map(|tag| tag.to_string())
            .collect(),
            trending_weight: 0.3,
            base_weight: 0.1,
            count_bonus: 0.2,
            trending_bonus: 0.3,
            optimal_min: 3,
            optimal_max: 5,
            neutral_score: 0.5,
        }
    }
}

impl HashtagConfig {
    pub fn is_trending(&self, tag: &str) -> bool {
        let lowered = tag.to_lowercase();
        self.trending_pool
            .iter()
            .any(|candidate| candidate.to_lowercase() == lowered)
    }

    pub fn is_optimal_count(&self, count: usize) -> bool {
        count >= self.optimal_min && count <= self.optimal_max
    }
}

/// Duration scoring bands. The full bands grade how well a cut fits the
/// platform; the coarser synthesizer pair only distinguishes in-range from
/// out-of-range, matching what the predictor was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationBandsConfig {
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub acceptable_max: f64,
    pub optimal_score: f64,
    pub short_score: f64,
    pub acceptable_score: f64,
    pub long_score: f64,
    pub synth_in_score: f64,
    pub synth_out_score: f64,
}

impl Default for DurationBandsConfig {
    fn default() -> Self {
        Self {
            optimal_min: 15.0,
            optimal_max: 30.0,
            acceptable_max: 60.0,
            optimal_score: 1.0,
            short_score: 0.8,
            acceptable_score: 0.6,
            long_score: 0.3,
            synth_in_score: 1.0,
            synth_out_score: 0.8,
        }
    }
}

impl DurationBandsConfig {
    pub fn band_score(&self, duration: f64) -> f64 {
        if (self.optimal_min..=self.optimal_max).contains(&duration) {
            self.optimal_score
        } else if duration <= self.optimal_min {
            self.short_score
        } else if duration <= self.acceptable_max {
            self.acceptable_score
        } else {
            self.long_score
        }
    }

    pub fn synthesized_score(&self, duration: f64) -> f64 {
        if (self.optimal_min..=self.acceptable_max).contains(&duration) {
            self.synth_in_score
        } else {
            self.synth_out_score
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub jitter: f64,
    pub redesign_threshold: f64,
    pub engagement_boost: f64,
    pub reach_boost: f64,
    pub default_trials: usize,
    /// Soft deadline for a whole run; once elapsed no further trials are
    /// issued and the report is built from completed trials.
    pub run_deadline_ms: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            jitter: 0.05,
            redesign_threshold: 0.6,
            engagement_boost: 1.5,
            reach_boost: 1.3,
            default_trials: 5,
            run_deadline_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorConfig {
    pub endpoint: String,
    pub timeout_ms: u64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ordered feature-set pipeline used when a request does not name one.
    pub pipeline: Vec<String>,
    pub hours: HourBandsConfig,
    pub factors: TimingFactorsConfig,
    pub hashtags: HashtagConfig,
    pub duration: DurationBandsConfig,
    pub simulation: SimulationConfig,
    pub predictor: PredictorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pipeline: vec![
                "metadata".to_string(),
                "gemini_basic".to_string(),
                "visual_granular".to_string(),
            ],
            hours: HourBandsConfig::default(),
            factors: TimingFactorsConfig::default(),
            hashtags: HashtagConfig::default(),
            duration: DurationBandsConfig::default(),
            simulation: SimulationConfig::default(),
            predictor: PredictorConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                SimConfig::default()
            }
        } else {
            SimConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = env::var("PREDICTOR_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.predictor.endpoint = endpoint;
            }
        }
        if let Ok(timeout) = env::var("PREDICTOR_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.predictor.timeout_ms = value;
            }
        }
        if let Ok(trials) = env::var("SIM_TRIALS") {
            if let Ok(value) = trials.parse::<usize>() {
                self.simulation.default_trials = value;
            }
        }
        if let Ok(deadline) = env::var("SIM_RUN_DEADLINE_MS") {
            if let Ok(value) = deadline.parse::<u64>() {
                self.simulation.run_deadline_ms = Some(value);
            }
        }
        if let Ok(pipeline) = env::var("SIM_PIPELINE") {
            let sets: Vec<String> = pipeline
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
            if !sets.is_empty() {
                self.pipeline = sets;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("SIM_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/simulation.toml")))
}
