//! Build configuration
//!
//! Defaults reproduce the documented caps; a YAML file may override any
//! subset of fields.

use crate::graph::GroupTag;
use crate::pipeline::ClusterRule;
use crate::synth::{Section, SynthesisMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Per-section leaf caps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionCaps {
    pub news: usize,
    pub filings: usize,
    pub statement_periods: usize,
    pub statement_lines: usize,
    pub insider: usize,
}

impl Default for SectionCaps {
    fn default() -> Self {
        Self {
            news: 5,
            filings: 5,
            statement_periods: 5,
            statement_lines: 3,
            insider: 10,
        }
    }
}

/// Everything a graph build needs besides the records and the filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub mode: SynthesisMode,
    pub caps: SectionCaps,
    pub cluster: Vec<ClusterRule>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            mode: SynthesisMode::default(),
            caps: SectionCaps::default(),
            cluster: vec![ClusterRule {
                section: Section::News,
                child_group: GroupTag::NewsItem,
                label: "News Cluster".to_string(),
            }],
        }
    }
}

impl BuildConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Same configuration without any clustering
    pub fn without_clustering(mut self) -> Self {
        self.cluster.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::RdfView;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BuildConfig::default();
        assert_eq!(config.caps.news, 5);
        assert_eq!(config.caps.filings, 5);
        assert_eq!(config.caps.statement_periods, 5);
        assert_eq!(config.caps.statement_lines, 3);
        assert_eq!(config.caps.insider, 10);
        assert_eq!(config.cluster.len(), 1);
        assert_eq!(config.mode, SynthesisMode::Combined);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = BuildConfig::from_yaml_str("caps:\n  news: 3\ncluster: []\n").unwrap();
        assert_eq!(config.caps.news, 3);
        assert_eq!(config.caps.insider, 10);
        assert!(config.cluster.is_empty());
    }

    #[test]
    fn test_mode_from_yaml() {
        let config = BuildConfig::from_yaml_str("mode: !Rdf Simplified\n").unwrap();
        assert_eq!(config.mode, SynthesisMode::Rdf(RdfView::Simplified));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "caps:\n  insider: 4").unwrap();
        let config = BuildConfig::from_path(file.path()).unwrap();
        assert_eq!(config.caps.insider, 4);

        assert!(matches!(
            BuildConfig::from_path("/nonexistent/fingraph.yaml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            BuildConfig::from_yaml_str("caps: [1, 2"),
            Err(ConfigError::Yaml(_))
        ));
    }
}
