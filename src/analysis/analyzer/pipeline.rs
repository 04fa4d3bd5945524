//! Pipeline analyzer that combines a tokenizer and token filters.
//!
//! # Examples
//!
//! ```
//! use nbayes::analysis::analyzer::{PipelineAnalyzer, TextAnalyzer};
//! use nbayes::analysis::tokenizer::RegexTokenizer;
//! use nbayes::analysis::token_filter::{LowercaseFilter, StopFilter};
//! use std::sync::Arc;
//!
//! let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
//! let analyzer = PipelineAnalyzer::new(tokenizer)
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])));
//!
//! let tokens: Vec<_> = analyzer.analyze("Hello THE world AND test").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::TextAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::stop::ENGLISH_STOP_WORDS;
use crate::analysis::token_filter::{Filter, LengthFilter, LowercaseFilter, StopFilter};
use crate::analysis::tokenizer::regex::DEFAULT_PATTERN;
use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::{NbayesError, Result};

/// Settings for the tokenization pipeline used to build entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Regex matching one token.
    pub pattern: String,
    /// Tokens with fewer characters are dropped.
    pub min_token_length: usize,
    /// Tokens with more characters are dropped.
    pub max_token_length: usize,
    /// Lowercase every token.
    pub lowercase: bool,
    /// Words removed after lowercasing.
    pub stop_words: Vec<String>,
    /// Also remove common English function words.
    pub english_stop_words: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            min_token_length: 3,
            max_token_length: 64,
            lowercase: true,
            stop_words: Vec::new(),
            english_stop_words: false,
        }
    }
}

impl AnalysisConfig {
    /// Check the settings for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.min_token_length == 0 {
            return Err(NbayesError::invalid_config(
                "min_token_length must be at least 1",
            ));
        }
        if self.min_token_length > self.max_token_length {
            return Err(NbayesError::invalid_config(format!(
                "min_token_length ({}) exceeds max_token_length ({})",
                self.min_token_length, self.max_token_length
            )));
        }
        Ok(())
    }
}

/// A tokenizer followed by filters applied in insertion order.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Create a pipeline with only a tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Build the pipeline described by `config`:
    /// regex tokenizer → lowercase → stop words → length limits.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let mut analyzer = Self::new(Arc::new(RegexTokenizer::with_pattern(&config.pattern)?));
        if config.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        let mut stop_words = config.stop_words.clone();
        if config.english_stop_words {
            stop_words.extend(ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()));
        }
        if !stop_words.is_empty() {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::from_words(stop_words)));
        }
        Ok(analyzer.add_filter(Arc::new(LengthFilter::new(
            config.min_token_length,
            config.max_token_length,
        ))))
    }

    /// Append a filter to the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// The tokenizer at the head of the pipeline.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// The filters, in application order.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Default for PipelineAnalyzer {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        PipelineAnalyzer::new(Arc::new(RegexTokenizer::default()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(LengthFilter::new(
                config.min_token_length,
                config.max_token_length,
            )))
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TextAnalyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}
