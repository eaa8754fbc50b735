pub mod config;
pub mod error;
pub mod features;
pub mod predictor;
pub mod simulation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "monday" | "mon" => Some(DayOfWeek::Monday),
            "tuesday" | "tue" => Some(DayOfWeek::Tuesday),
            "wednesday" | "wed" => Some(DayOfWeek::Wednesday),
            "thursday" | "thu" => Some(DayOfWeek::Thursday),
            "friday" | "fri" => Some(DayOfWeek::Friday),
            "saturday" | "sat" => Some(DayOfWeek::Saturday),
            "sunday" | "sun" => Some(DayOfWeek::Sunday),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
            DayOfWeek::Sunday => "sunday",
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }
}

/// Real post-publication counters. Present on every record so published
/// content can be analyzed; the pre-publication synthesizer never reads them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EngagementCounters {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AuthorStats {
    pub follower_count: u64,
    pub following_count: u64,
    pub video_count: u64,
    pub verified: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicInfo {
    pub name: String,
    pub author: String,
}

/// Static content-quality attributes carried on the record itself. These are
/// judgments about the clip, not measurements of its audience, so the
/// synthesizer may copy them into pre-publication vectors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContentQuality {
    pub audience_connection: f64,
    pub color_vibrancy: f64,
    pub music_energy: f64,
    pub emotional_trigger_count: u32,
    pub production_quality: f64,
}

impl Default for ContentQuality {
    fn default() -> Self {
        Self {
            audience_connection: 0.75,
            color_vibrancy: 0.7,
            music_energy: 0.8,
            emotional_trigger_count: 3,
            production_quality: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub duration_seconds: f64,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub music: Option<MusicInfo>,
    #[serde(default)]
    pub engagement: EngagementCounters,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author_stats: Option<AuthorStats>,
    #[serde(default)]
    pub quality: ContentQuality,
}

/// Structured judgments from the upstream multimodal analysis service.
/// Every section is optional, and every field inside a section is optional;
/// extraction degrades to documented defaults at whichever level is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiContentAnalysis {
    #[serde(default)]
    pub visual: Option<VisualAnalysis>,
    #[serde(default)]
    pub content_structure: Option<ContentStructure>,
    #[serde(default)]
    pub engagement_factors: Option<EngagementFactors>,
    #[serde(default)]
    pub technical_elements: Option<TechnicalElements>,
    #[serde(default)]
    pub trend_alignment: Option<TrendAlignment>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisualAnalysis {
    #[serde(default)]
    pub human_presence: Option<String>,
    #[serde(default)]
    pub shot_type: Option<String>,
    #[serde(default)]
    pub color_analysis: Option<String>,
    #[serde(default)]
    pub text_overlays: Option<String>,
    #[serde(default)]
    pub transitions: Option<String>,
    #[serde(default)]
    pub style_quality: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentStructure {
    #[serde(default)]
    pub hook_effectiveness: Option<String>,
    #[serde(default)]
    pub story_flow: Option<String>,
    #[serde(default)]
    pub call_to_action: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngagementFactors {
    #[serde(default)]
    pub viral_potential: Option<String>,
    #[serde(default)]
    pub emotional_triggers: Option<String>,
    #[serde(default)]
    pub audience_connection: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalElements {
    #[serde(default)]
    pub length_optimization: Option<String>,
    #[serde(default)]
    pub sound_design: Option<String>,
    #[serde(default)]
    pub production_quality: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendAlignment {
    #[serde(default)]
    pub current_trends: Option<String>,
    #[serde(default)]
    pub hashtag_potential: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl FeatureValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Bool(value) => Some(bool_to_f64(*value)),
            FeatureValue::Int(value) => Some(*value as f64),
            FeatureValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FeatureValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Int(value)
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Float(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

/// Merged mapping of feature name to value for one content item. Backed by a
/// BTreeMap so two extractions of the same input serialize identically;
/// inserting an existing name overwrites it, which is how later sets in a
/// configured pipeline override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(flatten)]
    values: BTreeMap<String, FeatureValue>,
}

impl FeatureVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<FeatureValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(FeatureValue::as_f64)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FeatureValue)> {
        self.values.iter()
    }

    /// Folds `other` into `self`, overwriting existing names.
    pub fn merge(&mut self, other: FeatureVector) {
        for (name, value) in other.values {
            self.values.insert(name, value);
        }
    }
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub fn bool_to_f64(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Case-insensitive needle search against an optional free-text judgment.
pub fn text_contains(field: &Option<String>, needle: &str) -> bool {
    field
        .as_deref()
        .map(|text| text.to_lowercase().contains(needle))
        .unwrap_or(false)
}

pub fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
