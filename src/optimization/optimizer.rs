//! Epsilon-greedy selection over a fixed, growing set of variants.
//!
//! Each [`choose`](Optimizer::choose) call works in three steps:
//!
//! 1. **Cold start.** While any variant has never been tried, the first
//!    such variant (in insertion order) is returned. Every variant is
//!    therefore tried once before any is favored.
//! 2. **Exploration.** With probability `ε(n) = ε₀ / (1 + n·k)`, where `n`
//!    is the total number of trials so far, a variant is drawn uniformly.
//! 3. **Exploitation.** Otherwise the variant with the highest success
//!    rate wins; ties go to the variant with fewer trials, then to the one
//!    added first.
//!
//! # Examples
//!
//! ```
//! use nbayes::optimization::{Optimizer, OptimizerConfig, Variant};
//!
//! let optimizer = Optimizer::new(OptimizerConfig::default().with_seed(7)).unwrap();
//! let orange = optimizer.add(Variant::named("Orange").unwrap()).unwrap();
//! optimizer.add(Variant::named("Green").unwrap()).unwrap();
//!
//! let selected = optimizer.choose().unwrap();
//! assert_eq!(selected.name(), "Orange");
//! orange.increment_successes();
//! assert_eq!(orange.trials(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{NbayesError, Result};
use crate::optimization::variant::{Variant, VariantStats};

/// Tunables for the [`Optimizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Initial exploration probability ε₀.
    pub epsilon: f64,
    /// Decay factor k in `ε₀ / (1 + n·k)`; 0 keeps ε constant.
    pub epsilon_decay: f64,
    /// Seed for reproducible runs; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.10,
            epsilon_decay: 0.0,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the settings for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(NbayesError::invalid_config(format!(
                "epsilon must be within [0, 1] (got {})",
                self.epsilon
            )));
        }
        if !self.epsilon_decay.is_finite() || self.epsilon_decay < 0.0 {
            return Err(NbayesError::invalid_config(format!(
                "epsilon_decay must be a finite, non-negative number (got {})",
                self.epsilon_decay
            )));
        }
        Ok(())
    }
}

/// Picks among variants, shifting toward the ones that succeed.
///
/// Variants are append-only. Selection and its trial increment happen
/// under one lock, so concurrent `choose` calls are serialized;
/// success feedback only takes the reported variant's own lock.
pub struct Optimizer {
    config: OptimizerConfig,
    variants: RwLock<Vec<Arc<Variant>>>,
    rng: Mutex<StdRng>,
}

impl Optimizer {
    /// Create an optimizer with validated settings.
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Optimizer {
            config,
            variants: RwLock::new(Vec::new()),
            rng: Mutex::new(rng),
        })
    }

    /// The settings in use.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Register a variant and return the shared handle used for feedback.
    ///
    /// Fails with [`NbayesError::Duplicate`] if a variant with the same
    /// name is already registered; nothing is added in that case.
    pub fn add<V: Into<Arc<Variant>>>(&self, variant: V) -> Result<Arc<Variant>> {
        let variant = variant.into();
        let mut variants = self.variants.write();
        if variants.iter().any(|existing| existing.name() == variant.name()) {
            return Err(NbayesError::duplicate(format!(
                "variant {:?} is already registered",
                variant.name()
            )));
        }

        variants.push(Arc::clone(&variant));
        debug!("Added variant {} ({} total)", variant.name(), variants.len());
        Ok(variant)
    }

    /// Select a variant and count the selection as one trial.
    pub fn choose(&self) -> Result<Arc<Variant>> {
        let mut rng = self.rng.lock();
        let variants = self.variants.read();
        if variants.is_empty() {
            return Err(NbayesError::EmptyOptimizer);
        }

        let stats: Vec<VariantStats> = variants.iter().map(|v| v.stats()).collect();

        let (position, reason) = if let Some(untried) = stats.iter().position(|s| s.trials == 0) {
            (untried, "cold start")
        } else {
            let epsilon = self.epsilon_for(stats.iter().map(|s| s.trials).sum());
            if rng.random::<f64>() < epsilon {
                (rng.random_range(0..variants.len()), "explore")
            } else {
                (greedy_position(&stats), "exploit")
            }
        };

        let selected = Arc::clone(&variants[position]);
        selected.record_trial();
        debug!("Chose variant {} ({reason})", selected.name());
        Ok(selected)
    }

    /// [`choose`](Self::choose) for callers inside an async pipeline.
    ///
    /// The selection itself never suspends.
    pub async fn choose_async(&self) -> Result<Arc<Variant>> {
        self.choose()
    }

    /// The variant the greedy rule would pick right now, without recording a trial.
    pub fn best(&self) -> Option<Arc<Variant>> {
        let variants = self.variants.read();
        if variants.is_empty() {
            return None;
        }
        let stats: Vec<VariantStats> = variants.iter().map(|v| v.stats()).collect();
        Some(Arc::clone(&variants[greedy_position(&stats)]))
    }

    /// Look up a registered variant by name.
    pub fn get(&self, name: &str) -> Option<Arc<Variant>> {
        self.variants
            .read()
            .iter()
            .find(|variant| variant.name() == name)
            .cloned()
    }

    /// All variants in insertion order.
    pub fn variants(&self) -> Vec<Arc<Variant>> {
        self.variants.read().clone()
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.read().len()
    }

    /// Whether no variant is registered.
    pub fn is_empty(&self) -> bool {
        self.variants.read().is_empty()
    }

    /// Sum of trials over all variants.
    pub fn total_trials(&self) -> u64 {
        self.variants.read().iter().map(|v| v.trials()).sum()
    }

    /// The exploration probability that applies to the next selection.
    pub fn current_epsilon(&self) -> f64 {
        self.epsilon_for(self.total_trials())
    }

    fn epsilon_for(&self, total_trials: u64) -> f64 {
        self.config.epsilon / (1.0 + total_trials as f64 * self.config.epsilon_decay)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Optimizer {
            config: OptimizerConfig::default(),
            variants: RwLock::new(Vec::new()),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optimizer")
            .field("config", &self.config)
            .field("variants", &*self.variants.read())
            .finish()
    }
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for variant in self.variants.read().iter() {
            writeln!(f, "{variant}")?;
        }
        Ok(())
    }
}

/// Highest success rate, then fewest trials, then earliest insertion.
fn greedy_position(stats: &[VariantStats]) -> usize {
    let mut best = 0;
    for (position, candidate) in stats.iter().enumerate().skip(1) {
        let current = &stats[best];
        let (rate, best_rate) = (candidate.success_rate(), current.success_rate());
        if rate > best_rate || (rate == best_rate && candidate.trials < current.trials) {
            best = position;
        }
    }
    best
}
