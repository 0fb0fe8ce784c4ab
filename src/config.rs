use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::{AnnotationSet, Normalizer, DEFAULT_ANNOTATIONS};
use crate::stats::DEFAULT_HISTOGRAM_BINS;

pub const DEFAULT_CONFIG_FILE: &str = "transcripts.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub id: String,
    #[serde(default)]
    pub inputs: Option<InputsConfig>,
    #[serde(default)]
    pub outputs: Option<OutputsConfig>,
    /// Ordered annotation patterns; `None` keeps the built-in set.
    #[serde(default)]
    pub annotations: Option<Vec<String>>,
    #[serde(default)]
    pub histogram: Option<HistogramConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputsConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputsConfig {
    /// Where cleaned transcripts are written.
    pub dir: Option<String>,
    #[serde(default)]
    pub report_dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramConfig {
    pub bins: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            id: "transcripts".to_string(),
            inputs: None,
            outputs: None,
            annotations: None,
            histogram: None,
        }
    }
}

/// Read and validate a run configuration.
pub fn validate_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
    parse_config(&raw)
}

/// Parse and validate configuration text.
pub fn parse_config(raw: &str) -> Result<RunConfig, ConfigError> {
    let cfg: RunConfig = serde_yaml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if cfg.id.trim().is_empty() {
        return Err(ConfigError::Invalid("missing id".into()));
    }
    if let Some(h) = &cfg.histogram {
        if h.bins == Some(0) {
            return Err(ConfigError::Invalid("histogram.bins must be at least 1".into()));
        }
    }
    // compile once here so a bad pattern fails the run up front
    cfg.annotation_set()?;

    Ok(cfg)
}

impl RunConfig {
    pub fn input_glob(&self) -> String {
        self.inputs
            .as_ref()
            .and_then(|i| i.path.clone())
            .unwrap_or_else(|| "./transcripts/*.md".to_string())
    }

    pub fn output_dir(&self) -> String {
        self.outputs
            .as_ref()
            .and_then(|o| o.dir.clone())
            .unwrap_or_else(|| "./cleaned".to_string())
    }

    pub fn report_dir(&self) -> String {
        self.outputs
            .as_ref()
            .and_then(|o| o.report_dir.clone())
            .unwrap_or_else(|| ".".to_string())
    }

    pub fn histogram_bins(&self) -> usize {
        self.histogram
            .as_ref()
            .and_then(|h| h.bins)
            .unwrap_or(DEFAULT_HISTOGRAM_BINS)
    }

    pub fn annotation_set(&self) -> Result<AnnotationSet, ConfigError> {
        match &self.annotations {
            Some(patterns) => AnnotationSet::new(patterns).map_err(|e| ConfigError::Invalid(e.to_string())),
            None => Ok(AnnotationSet::default()),
        }
    }

    pub fn normalizer(&self) -> Result<Normalizer, ConfigError> {
        Ok(Normalizer::new(self.annotation_set()?))
    }

    /// Annotation patterns in effect, for logging.
    pub fn annotation_patterns(&self) -> Vec<String> {
        match &self.annotations {
            Some(p) => p.clone(),
            None => DEFAULT_ANNOTATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
