//! Text analysis for nbayes.
//!
//! Raw text is turned into tokens by a [`Tokenizer`], normalized by a
//! chain of [`Filter`]s, and the survivors become the bag of words an
//! [`Entry`](crate::entry::Entry) carries into training and scoring.

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
