//! Core text analyzer trait definition.
//!
//! ```text
//! Raw Text → TextAnalyzer → Token Stream → Entry
//!               ↓
//!           Tokenizer
//!               ↓
//!           Filter 1 … Filter N
//! ```
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use nbayes::analysis::analyzer::TextAnalyzer;
//! use nbayes::analysis::token::{Token, TokenStream};
//! use nbayes::error::Result;
//!
//! struct CommaAnalyzer;
//!
//! impl TextAnalyzer for CommaAnalyzer {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         let tokens: Vec<Token> = text
//!             .split(',')
//!             .enumerate()
//!             .map(|(i, s)| Token::new(s.trim(), i))
//!             .collect();
//!         Ok(Box::new(tokens.into_iter()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "comma"
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Turns raw text into the token stream an [`Entry`](crate::entry::Entry) is built from.
///
/// Implementations must be deterministic: the same text always yields
/// the same tokens in the same order.
pub trait TextAnalyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
