//! Scoring entries against indexes.
//!
//! Each index is treated as a multinomial word model. An entry's score
//! against index `i` is the log-likelihood of its tokens under that model
//! with additive (Laplace) smoothing:
//!
//! ```text
//! score_i = Σ_t  n_t · ln( (f_i(t) + α) / (T_i + α·|V|) )
//! ```
//!
//! where `n_t` is the token's occurrences in the entry, `f_i(t)` its
//! frequency in index `i`, `T_i` the index's total token count and `|V|`
//! the size of the combined vocabulary of the compared indexes. Tokens
//! absent from every compared index are skipped, so an entry with no known
//! tokens scores 0 everywhere and is undetermined.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::classification::result::CategorizationResult;
use crate::entry::Entry;
use crate::error::{NbayesError, Result};
use crate::index::Index;

/// Tunables for the [`Analyzer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Minimum score gap (in nats) needed to pick a side.
    pub decision_threshold: f64,
    /// Additive smoothing constant α.
    pub smoothing: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            decision_threshold: 0.05,
            smoothing: 1.0,
        }
    }
}

impl AnalyzerConfig {
    /// Check the settings for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if !self.decision_threshold.is_finite() || self.decision_threshold < 0.0 {
            return Err(NbayesError::invalid_config(format!(
                "decision_threshold must be a finite, non-negative number (got {})",
                self.decision_threshold
            )));
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(NbayesError::invalid_config(format!(
                "smoothing must be a finite, positive number (got {})",
                self.smoothing
            )));
        }
        Ok(())
    }
}

/// Log-likelihood scores of one entry against two indexes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// Score against the first index.
    pub first: f64,
    /// Score against the second index.
    pub second: f64,
    /// Token occurrences in the entry that at least one index has seen.
    pub known_tokens: u64,
}

impl Scores {
    /// Absolute difference between the two scores.
    pub fn margin(&self) -> f64 {
        (self.first - self.second).abs()
    }
}

/// Categorizes entries by comparing their likelihood under trained indexes.
///
/// The analyzer holds no training state; the same instance can score
/// against any indexes, from any thread.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer with validated settings.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Analyzer { config })
    }

    /// The settings in use.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Decide whether `entry` belongs with `first` or `second`.
    ///
    /// Returns [`Undetermined`](CategorizationResult::Undetermined) when
    /// the scores differ by less than the decision threshold, which covers
    /// empty entries, entries with no known tokens, and untrained indexes.
    pub fn categorize(
        &self,
        entry: &Entry,
        first: &dyn Index,
        second: &dyn Index,
    ) -> CategorizationResult {
        let scores = self.scores(entry, first, second);
        let result = self.decide(&scores);
        debug!(
            "Categorized entry of {} tokens ({} known): {:.4} vs {:.4} -> {}",
            entry.len(),
            scores.known_tokens,
            scores.first,
            scores.second,
            result
        );
        result
    }

    /// Score `entry` against both indexes without deciding.
    pub fn scores(&self, entry: &Entry, first: &dyn Index, second: &dyn Index) -> Scores {
        let (scores, known_tokens) = self.score_all(entry, &[first, second]);
        Scores {
            first: scores[0],
            second: scores[1],
            known_tokens,
        }
    }

    /// Pick the best of any number of indexes.
    ///
    /// Returns the position of the index whose score beats every other by
    /// at least the decision threshold, or `None` if there is no such
    /// index. Fewer than two indexes, or an entry with no token known to
    /// any of them, is always `None`.
    pub fn categorize_many(&self, entry: &Entry, indexes: &[&dyn Index]) -> Option<usize> {
        if indexes.len() < 2 {
            return None;
        }

        let (scores, known_tokens) = self.score_all(entry, indexes);
        if known_tokens == 0 {
            debug!(
                "Entry of {} tokens has no known tokens in {} indexes",
                entry.len(),
                indexes.len()
            );
            return None;
        }
        let (best, best_score) = scores
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |acc, (i, score)| {
                if score > acc.1 { (i, score) } else { acc }
            });

        let contested = scores.iter().enumerate().any(|(i, &score)| {
            i != best && (best_score - score < self.config.decision_threshold || score == best_score)
        });

        let winner = if contested { None } else { Some(best) };
        debug!(
            "Categorized entry of {} tokens ({} known) against {} indexes -> {:?}",
            entry.len(),
            known_tokens,
            indexes.len(),
            winner
        );
        winner
    }

    fn decide(&self, scores: &Scores) -> CategorizationResult {
        if scores.first == scores.second || scores.margin() < self.config.decision_threshold {
            CategorizationResult::Undetermined
        } else if scores.first > scores.second {
            CategorizationResult::First
        } else {
            CategorizationResult::Second
        }
    }

    /// Scores in `indexes` order, plus the count of known token occurrences.
    ///
    /// Tokens are visited in lexical order so the floating-point sum is the
    /// same for every call with the same inputs.
    fn score_all(&self, entry: &Entry, indexes: &[&dyn Index]) -> (Vec<f64>, u64) {
        let alpha = self.config.smoothing;
        let vocabulary = combined_vocabulary_size(indexes) as f64;
        let denominators: Vec<f64> = indexes
            .iter()
            .map(|index| index.total_token_count() as f64 + alpha * vocabulary)
            .collect();

        let mut scores = vec![0.0; indexes.len()];
        let mut known_tokens = 0;
        let mut frequencies = vec![0u64; indexes.len()];

        for (token, occurrences) in entry.term_frequencies() {
            for (slot, index) in frequencies.iter_mut().zip(indexes) {
                *slot = index.token_frequency(token);
            }
            if frequencies.iter().all(|&f| f == 0) {
                continue;
            }

            known_tokens += occurrences;
            for ((score, &frequency), &denominator) in
                scores.iter_mut().zip(&frequencies).zip(&denominators)
            {
                *score += occurrences as f64 * ((frequency as f64 + alpha) / denominator).ln();
            }
            trace!("token {token:?} x{occurrences}: frequencies {frequencies:?}");
        }

        (scores, known_tokens)
    }
}

/// Number of distinct tokens across all `indexes`.
///
/// The same index passed twice contributes its vocabulary once.
fn combined_vocabulary_size(indexes: &[&dyn Index]) -> usize {
    let mut total = 0;
    for (position, index) in indexes.iter().enumerate() {
        let earlier = &indexes[..position];
        if earlier.iter().any(|other| {
            std::ptr::addr_eq(*other as *const dyn Index, *index as *const dyn Index)
        }) {
            continue;
        }
        if earlier.is_empty() {
            total += index.vocabulary_size();
            continue;
        }
        index.visit_tokens(&mut |token, _| {
            if !earlier.iter().any(|other| other.contains(token)) {
                total += 1;
            }
        });
    }
    total
}
