//! Defines the tunable matching configuration: fuzzy-ranking weights and
//! review thresholds, with defaults that match the shipped behavior and
//! optional overrides from a TOML file.

use crate::error::Result;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// TOML configuration file structure.
#[derive(Deserialize, Debug, Default)]
struct ConfigFile {
    matching: Option<MatchingSection>,
    review: Option<ReviewSection>,
}

#[derive(Deserialize, Debug, Default)]
struct MatchingSection {
    min_similarity_threshold: Option<f64>,
    confidence_threshold: Option<f64>,
    name_weight: Option<f64>,
    method_weight: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
struct ReviewSection {
    name_mismatch_threshold: Option<f64>,
}

/// Weights and thresholds for fuzzy candidate matching and review.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Minimum name similarity for a contact to be scored at all. Lower
    /// values cast a wider net for potential matches.
    pub min_similarity_threshold: f64,
    /// Minimum weighted score for a match to be suggested to the user.
    pub confidence_threshold: f64,
    /// Share of the final score contributed by name similarity.
    pub name_weight: f64,
    /// Share of the final score contributed by contact-method overlap.
    /// Together with `name_weight` this must sum to 1.
    pub method_weight: f64,
    /// Name-similarity score below which a suggested match is decorated as
    /// a name mismatch by the decision layer.
    pub name_mismatch_threshold: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            min_similarity_threshold: 0.3,
            confidence_threshold: 0.5,
            name_weight: 0.6,
            method_weight: 0.4,
            name_mismatch_threshold: 0.5,
        }
    }
}

impl MatchConfig {
    /// Weighted confidence score for a match: name similarity plus the
    /// fraction of the contact's methods the candidate also carries. A
    /// contact with no countable methods is scored on name alone.
    pub fn score(&self, name_similarity: f64, method_matches: usize, total_methods: usize) -> f64 {
        let mut score = name_similarity * self.name_weight;
        if total_methods > 0 {
            score += (method_matches as f64 / total_methods as f64) * self.method_weight;
        }
        score
    }

    /// Loads configuration from a TOML file, applying its values over the
    /// defaults and validating the result. A missing file is an error; use
    /// `MatchConfig::default()` when no file is expected.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let file_config: ConfigFile = toml::from_str(&content)?;

        let mut config = MatchConfig::default();
        apply_file_config(&mut config, &file_config);
        validate_config(&mut config);

        tracing::debug!("Loaded matching configuration from {}", path.display());
        Ok(config)
    }
}

fn apply_file_config(config: &mut MatchConfig, file_config: &ConfigFile) {
    if let Some(matching) = &file_config.matching {
        if let Some(threshold) = matching.min_similarity_threshold {
            config.min_similarity_threshold = threshold;
        }
        if let Some(threshold) = matching.confidence_threshold {
            config.confidence_threshold = threshold;
        }
        if let Some(weight) = matching.name_weight {
            config.name_weight = weight;
        }
        if let Some(weight) = matching.method_weight {
            config.method_weight = weight;
        }
    }

    if let Some(review) = &file_config.review {
        if let Some(threshold) = review.name_mismatch_threshold {
            config.name_mismatch_threshold = threshold;
        }
    }
}

fn validate_config(config: &mut MatchConfig) {
    for (name, value) in [
        ("min_similarity_threshold", &mut config.min_similarity_threshold),
        ("confidence_threshold", &mut config.confidence_threshold),
        ("name_mismatch_threshold", &mut config.name_mismatch_threshold),
    ] {
        if !(0.0..=1.0).contains(value) {
            let clamped = value.clamp(0.0, 1.0);
            tracing::warn!("{} was {} and out of range. Clamping to {}.", name, value, clamped);
            *value = clamped;
        }
    }

    let sum = config.name_weight + config.method_weight;
    if sum <= 0.0 || config.name_weight < 0.0 || config.method_weight < 0.0 {
        let defaults = MatchConfig::default();
        tracing::warn!(
            "Score weights were unusable ({}, {}). Resetting to defaults.",
            config.name_weight,
            config.method_weight
        );
        config.name_weight = defaults.name_weight;
        config.method_weight = defaults.method_weight;
    } else if (sum - 1.0).abs() > 1e-9 {
        tracing::warn!(
            "Score weights summed to {}. Rescaling so they sum to 1.",
            sum
        );
        config.name_weight /= sum;
        config.method_weight /= sum;
    }
}
