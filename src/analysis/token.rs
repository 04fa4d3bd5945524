//! The unit flowing through an analysis pipeline.
//!
//! Tokenizers emit [`Token`]s, filters rewrite or drop them, and an
//! [`Entry`](crate::entry::Entry) keeps only the final texts. Positions
//! and byte offsets point back into the analyzed text so that individual
//! pipeline stages can be checked in isolation.
//!
//! ```
//! use nbayes::analysis::token::Token;
//!
//! let token = Token::with_offsets("world", 1, 6, 11);
//! assert_eq!(&"hello world"[token.start_offset..token.end_offset], "world");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One token and where it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    /// Index in the tokenizer's output, starting at 0.
    pub position: usize,
    /// Byte range in the analyzed text.
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Token {
    /// A token without source offsets.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
        }
    }

    /// Length in characters, not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Same position and offsets, new text.
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A boxed iterator of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_zero_offsets() {
        let token = Token::new("hello", 3);
        assert_eq!(token.text, "hello");
        assert_eq!(token.position, 3);
        assert_eq!((token.start_offset, token.end_offset), (0, 0));
    }

    #[test]
    fn test_char_len_counts_characters() {
        let token = Token::new("café", 0);
        assert_eq!(token.char_len(), 4);
        assert_eq!(token.text.len(), 5);
    }

    #[test]
    fn test_with_text_keeps_location() {
        let renamed = Token::with_offsets("Test", 2, 10, 14).with_text("test");
        assert_eq!(renamed, Token::with_offsets("test", 2, 10, 14));
        assert_eq!(renamed.to_string(), "test");
    }
}
