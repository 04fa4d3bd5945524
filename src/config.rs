//! Configuration bundle for both engines.
//!
//! Every tunable has a default, so a config file only needs the values it
//! changes:
//!
//! ```
//! use nbayes::config::NbayesConfig;
//!
//! let config = NbayesConfig::from_json_str(r#"{ "optimizer": { "epsilon": 0.2 } }"#).unwrap();
//! assert_eq!(config.optimizer.epsilon, 0.2);
//! assert_eq!(config.analysis.min_token_length, 3);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{AnalysisConfig, PipelineAnalyzer};
use crate::classification::{Analyzer, AnalyzerConfig};
use crate::error::Result;
use crate::optimization::{Optimizer, OptimizerConfig};

/// All tunables of the library.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NbayesConfig {
    /// Tokenization pipeline.
    pub analysis: AnalysisConfig,
    /// Categorization scoring and decision rule.
    pub analyzer: AnalyzerConfig,
    /// Variant selection policy.
    pub optimizer: OptimizerConfig,
}

impl NbayesConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: NbayesConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.analyzer.validate()?;
        self.optimizer.validate()?;
        Ok(())
    }

    /// Build the tokenization pipeline.
    pub fn text_analyzer(&self) -> Result<PipelineAnalyzer> {
        PipelineAnalyzer::from_config(&self.analysis)
    }

    /// Build the categorizer.
    pub fn analyzer(&self) -> Result<Analyzer> {
        Analyzer::new(self.analyzer.clone())
    }

    /// Build an empty optimizer.
    pub fn optimizer(&self) -> Result<Optimizer> {
        Optimizer::new(self.optimizer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NbayesError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = NbayesConfig::default();
        config.validate().unwrap();
        assert_eq!(config.analyzer.decision_threshold, 0.05);
        assert_eq!(config.analyzer.smoothing, 1.0);
        assert_eq!(config.optimizer.epsilon, 0.10);
        assert_eq!(config.optimizer.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let config = NbayesConfig::from_json_str(
            r#"{ "analysis": { "stop_words": ["the"] }, "optimizer": { "seed": 9 } }"#,
        )
        .unwrap();
        assert_eq!(config.analysis.stop_words, vec!["the"]);
        assert_eq!(config.analysis.max_token_length, 64);
        assert_eq!(config.optimizer.seed, Some(9));
        assert!(config.optimizer().is_ok());
        assert!(config.text_analyzer().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = NbayesConfig::from_json_str(r#"{ "optimizer": { "epsilon": 2.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, NbayesError::InvalidArgument(_)));

        let err = NbayesConfig::from_json_str(r#"{ "analyzer": { "smoothing": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, NbayesError::InvalidArgument(_)));

        let err = NbayesConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, NbayesError::Json(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "analyzer": {{ "decision_threshold": 0.5 }} }}"#).unwrap();

        let config = NbayesConfig::load(file.path()).unwrap();
        assert_eq!(config.analyzer.decision_threshold, 0.5);
        assert_eq!(config.analyzer().unwrap().config().decision_threshold, 0.5);
    }
}
