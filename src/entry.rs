//! Tokenized documents.
//!
//! An [`Entry`] is the immutable bag of significant tokens extracted from
//! one piece of text. Entries are what indexes are trained on and what the
//! [`Analyzer`](crate::classification::Analyzer) categorizes.
//!
//! # Examples
//!
//! ```
//! use nbayes::entry::Entry;
//!
//! let entry = Entry::from_str("The new event was GREAT!");
//! assert_eq!(entry.tokens(), ["the", "new", "event", "was", "great"]);
//!
//! assert!(Entry::from_str("").is_empty());
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::LazyLock;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{PipelineAnalyzer, TextAnalyzer};
use crate::error::{NbayesError, Result};

static DEFAULT_ANALYZER: LazyLock<PipelineAnalyzer> = LazyLock::new(PipelineAnalyzer::default);

/// An ordered sequence of normalized tokens extracted from one text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    tokens: Vec<String>,
}

impl Entry {
    /// Tokenize `text` with the default pipeline.
    ///
    /// Splits on every non-alphanumeric character, lowercases, and keeps
    /// tokens of 3 to 64 characters. The empty string yields an empty entry.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::analyze_or_empty(text, &*DEFAULT_ANALYZER)
    }

    /// Analyzer failures are logged and yield an empty entry.
    fn analyze_or_empty(text: &str, analyzer: &dyn TextAnalyzer) -> Self {
        match Self::with_analyzer(text, analyzer) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Analyzer {} failed, using an empty entry: {e}", analyzer.name());
                Entry::default()
            }
        }
    }

    /// Tokenize `text` with a caller-supplied analyzer.
    pub fn with_analyzer(text: &str, analyzer: &dyn TextAnalyzer) -> Result<Self> {
        let tokens = analyzer
            .analyze(text)?
            .filter(|token| !token.is_empty())
            .map(|token| token.text)
            .collect();

        Ok(Entry { tokens })
    }

    /// Tokenize raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| NbayesError::invalid_argument(format!("entry text is not UTF-8: {e}")))?;
        Ok(Self::from_str(text))
    }

    /// Build an entry from tokens that were normalized elsewhere.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Entry {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// The tokens in document order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens, counting repeats.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the entry has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Occurrence count of each distinct token, in lexical order.
    pub fn term_frequencies(&self) -> BTreeMap<&str, u64> {
        let mut frequencies = BTreeMap::new();
        for token in &self.tokens {
            *frequencies.entry(token.as_str()).or_insert(0) += 1;
        }
        frequencies
    }
}

impl FromStr for Entry {
    type Err = NbayesError;

    fn from_str(text: &str) -> Result<Self> {
        Ok(Entry::from_str(text))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::analysis::token_filter::LowercaseFilter;
    use crate::analysis::tokenizer::UnicodeWordTokenizer;

    #[test]
    fn test_from_str_normalizes() {
        let entry = Entry::from_str("OMG! No way! I can't believe that! Terrible!");
        assert_eq!(entry.tokens(), ["omg", "way", "can", "believe", "that", "terrible"]);
    }

    #[test]
    fn test_empty_text() {
        let entry = Entry::from_str("");
        assert!(entry.is_empty());
        assert_eq!(entry.len(), 0);

        let entry = Entry::from_str("?! ... i a");
        assert!(entry.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = "I thought that new phone was ideal, some of the key features blew my mind!";
        assert_eq!(Entry::from_str(text), Entry::from_str(text));
    }

    #[test]
    fn test_term_frequencies() {
        let entry = Entry::from_str("terrible, just terrible. TERRIBLE service");
        let frequencies = entry.term_frequencies();

        assert_eq!(frequencies.len(), 3);
        assert_eq!(frequencies["terrible"], 3);
        assert_eq!(frequencies["just"], 1);
        assert_eq!(frequencies["service"], 1);
    }

    #[test]
    fn test_from_bytes() {
        let entry = Entry::from_bytes("great event".as_bytes()).unwrap();
        assert_eq!(entry.tokens(), ["great", "event"]);

        let err = Entry::from_bytes(&[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, NbayesError::InvalidArgument(_)));
    }

    #[test]
    fn test_parse() {
        let entry: Entry = "Awesome read".parse().unwrap();
        assert_eq!(entry.tokens(), ["awesome", "read"]);
    }

    #[derive(Debug)]
    struct FailingAnalyzer;

    impl TextAnalyzer for FailingAnalyzer {
        fn analyze(&self, _text: &str) -> Result<crate::analysis::token::TokenStream> {
            Err(NbayesError::analysis("tokenizer unavailable"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_analyzer_failure_yields_empty_entry() {
        assert!(Entry::with_analyzer("great event", &FailingAnalyzer).is_err());
        assert!(Entry::analyze_or_empty("great event", &FailingAnalyzer).is_empty());
        assert_eq!(
            Entry::analyze_or_empty("great event", &*DEFAULT_ANALYZER).tokens(),
            ["great", "event"]
        );
    }

    #[test]
    fn test_with_analyzer() {
        let analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));
        let entry = Entry::with_analyzer("I can't", &analyzer).unwrap();
        assert_eq!(entry.tokens(), ["i", "can't"]);
    }
}
