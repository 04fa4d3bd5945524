//! The outcome of a categorization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of two indexes an entry belongs to, if either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategorizationResult {
    /// The first index explains the entry better.
    First,
    /// The second index explains the entry better.
    Second,
    /// The evidence is too weak or too close to call.
    Undetermined,
}

impl CategorizationResult {
    /// Whether a side was picked.
    pub fn is_determined(self) -> bool {
        self != CategorizationResult::Undetermined
    }

    /// The result with the two sides exchanged.
    pub fn swapped(self) -> Self {
        match self {
            CategorizationResult::First => CategorizationResult::Second,
            CategorizationResult::Second => CategorizationResult::First,
            CategorizationResult::Undetermined => CategorizationResult::Undetermined,
        }
    }
}

impl fmt::Display for CategorizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CategorizationResult::First => "first",
            CategorizationResult::Second => "second",
            CategorizationResult::Undetermined => "undetermined",
        };
        f.write_str(name)
    }
}
