//! Length filter implementation.

use super::Filter;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Drops tokens whose character count falls outside `min..=max`.
///
/// Short tokens ("i", "is", "an") carry almost no sentiment signal and
/// dominate word counts, so the default analysis pipeline removes
/// anything shorter than three characters. The rule is a pure function of
/// the token text.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min: usize,
    max: usize,
}

impl LengthFilter {
    /// Create a new length filter keeping tokens with `min..=max` characters.
    pub fn new(min: usize, max: usize) -> Self {
        LengthFilter { min, max }
    }

    /// Minimum number of characters a token must have.
    pub fn min(&self) -> usize {
        self.min
    }

    /// Maximum number of characters a token may have.
    pub fn max(&self) -> usize {
        self.max
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let (min, max) = (self.min, self.max);
        let kept: Vec<Token> = tokens
            .filter(|token| {
                let len = token.char_len();
                len >= min && len <= max
            })
            .collect();

        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}
