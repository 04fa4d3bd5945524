//! Text analyzers: a tokenizer plus an ordered chain of filters.

mod analyzer;
mod pipeline;

pub use analyzer::TextAnalyzer;
pub use pipeline::{AnalysisConfig, PipelineAnalyzer};
