//! Adaptive selection among competing alternatives.
//!
//! An [`Optimizer`] hands out [`Variant`]s and learns from success
//! feedback reported on them, so the variants that succeed most get
//! chosen most, while the rest keep being explored occasionally.

pub mod optimizer;
pub mod variant;

pub use optimizer::{Optimizer, OptimizerConfig};
pub use variant::{Variant, VariantStats};
