//! Error types for the nbayes library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`NbayesError`] enum. Errors raised by the classification and
//! optimization engines are synchronous and deterministic; errors from
//! the storage collaborator (I/O, serialization) are passed through
//! unchanged.
//!
//! # Examples
//!
//! ```
//! use nbayes::error::{NbayesError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(NbayesError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for nbayes operations.
#[derive(Error, Debug)]
pub enum NbayesError {
    /// I/O errors raised by a storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Null, empty or otherwise malformed input to a pure operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A variant with the same name is already registered.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// `choose` was called before any variant was added.
    #[error("Optimizer has no variants to choose from")]
    EmptyOptimizer,

    /// Analysis-related errors (tokenizer construction, filtering).
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Index-related errors.
    #[error("Index error: {0}")]
    Index(String),

    /// Storage-related errors.
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with NbayesError.
pub type Result<T> = std::result::Result<T, NbayesError>;

impl NbayesError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        NbayesError::InvalidArgument(msg.into())
    }

    /// Create a new duplicate error.
    pub fn duplicate<S: Into<String>>(msg: S) -> Self {
        NbayesError::Duplicate(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        NbayesError::Analysis(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        NbayesError::Index(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        NbayesError::Storage(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        NbayesError::InvalidArgument(format!("Invalid configuration: {}", msg.into()))
    }
}
