//! Index configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::AnalyzerConfig;
use crate::error::{Result, SiftError};

/// Default number of empty positions inserted between two field values.
pub const DEFAULT_POSITION_GAP: u32 = 100;

/// Configuration supplied when an index is constructed.
///
/// `fields` enumerates the searchable fields and their relative weight. An
/// empty map indexes every field with weight 1.0.
///
/// # Examples
///
/// ```
/// use sift::index::IndexConfig;
///
/// let config = IndexConfig::default()
///     .with_field("title", 3.0)
///     .with_field("body", 1.0);
///
/// assert_eq!(config.field_weight("title"), Some(3.0));
/// assert_eq!(config.field_weight("footer"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Searchable fields and their weights.
    pub fields: BTreeMap<String, f32>,

    /// Positions skipped between consecutive field values, so a phrase
    /// cannot match across a field boundary. Must be at least 1.
    pub position_gap: u32,

    /// Analyzer used for documents and queries alike.
    pub analyzer: AnalyzerConfig,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            fields: BTreeMap::new(),
            position_gap: DEFAULT_POSITION_GAP,
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a field as searchable with the given weight.
    pub fn with_field<S: Into<String>>(mut self, name: S, weight: f32) -> Self {
        self.fields.insert(name.into(), weight);
        self
    }

    pub fn with_position_gap(mut self, gap: u32) -> Self {
        self.position_gap = gap;
        self
    }

    pub fn with_analyzer(mut self, analyzer: AnalyzerConfig) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Weight of `name`, or `None` if the field is not searchable.
    pub fn field_weight(&self, name: &str) -> Option<f32> {
        if self.fields.is_empty() {
            Some(1.0)
        } else {
            self.fields.get(name).copied()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.position_gap == 0 {
            return Err(SiftError::invalid_config("position_gap must be at least 1"));
        }
        for (name, weight) in &self.fields {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(SiftError::invalid_config(format!(
                    "weight of field {name:?} must be a positive number, got {weight}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_indexes_every_field() {
        let config = IndexConfig::default();
        assert_eq!(config.field_weight("anything"), Some(1.0));
        assert_eq!(config.position_gap, DEFAULT_POSITION_GAP);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(IndexConfig::default().with_position_gap(0).validate().is_err());
        assert!(IndexConfig::default().with_field("title", 0.0).validate().is_err());
        assert!(IndexConfig::default().with_field("title", f32::NAN).validate().is_err());
        assert!(IndexConfig::default().with_field("title", 2.5).validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let config: IndexConfig =
            serde_json::from_str(r#"{"fields": {"title": 2.0}, "analyzer": {"stop_words": true}}"#)
                .unwrap();
        assert_eq!(config.field_weight("title"), Some(2.0));
        assert_eq!(config.field_weight("body"), None);
        assert_eq!(config.position_gap, DEFAULT_POSITION_GAP);
        assert!(config.analyzer.stop_words);
    }
}
