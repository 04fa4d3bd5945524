//! Selectable alternatives with trial/success counters.

use std::fmt;
use std::hash::{Hash, Hasher};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{NbayesError, Result};

/// Counter values of a [`Variant`] at one point in time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantStats {
    /// Times the variant was selected (or backfilled by feedback).
    pub trials: u64,
    /// Times the variant was reported successful.
    pub successes: u64,
}

impl VariantStats {
    /// `successes / max(trials, 1)`.
    pub fn success_rate(&self) -> f64 {
        self.successes as f64 / self.trials.max(1) as f64
    }
}

/// One alternative tracked by an [`Optimizer`](super::Optimizer).
///
/// A variant is identified by its name. Both counters only grow, and
/// `successes <= trials` holds at every observable point: each update
/// happens under the variant's own lock.
#[derive(Debug)]
pub struct Variant {
    name: String,
    counters: Mutex<VariantStats>,
}

impl Variant {
    /// Create a variant with zeroed counters.
    pub fn named<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NbayesError::invalid_argument("variant name must not be empty"));
        }

        Ok(Variant {
            name,
            counters: Mutex::new(VariantStats::default()),
        })
    }

    /// The variant's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record one success.
    ///
    /// If this would leave more successes than trials (feedback for a
    /// variant that was never chosen), the trial counter is raised in the
    /// same step.
    pub fn increment_successes(&self) {
        let mut counters = self.counters.lock();
        counters.successes += 1;
        if counters.trials < counters.successes {
            counters.trials = counters.successes;
        }
    }

    /// Record that the variant was selected.
    pub(crate) fn record_trial(&self) {
        self.counters.lock().trials += 1;
    }

    /// Times the variant was tried.
    pub fn trials(&self) -> u64 {
        self.counters.lock().trials
    }

    /// Times the variant succeeded.
    pub fn successes(&self) -> u64 {
        self.counters.lock().successes
    }

    /// Both counters, read together.
    pub fn stats(&self) -> VariantStats {
        *self.counters.lock()
    }

    /// `successes / max(trials, 1)`, in `[0, 1]`.
    pub fn success_rate(&self) -> f64 {
        self.stats().success_rate()
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variant {}

impl Hash for Variant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "{} ({}/{} = {:.3})",
            self.name,
            stats.successes,
            stats.trials,
            stats.success_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_named() {
        let variant = Variant::named("Orange").unwrap();
        assert_eq!(variant.name(), "Orange");
        assert_eq!(variant.trials(), 0);
        assert_eq!(variant.successes(), 0);
        assert_eq!(variant.success_rate(), 0.0);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            Variant::named(""),
            Err(NbayesError::InvalidArgument(_))
        ));
        assert!(Variant::named("   ").is_err());
    }

    #[test]
    fn test_success_backfills_trial() {
        let variant = Variant::named("A").unwrap();
        variant.increment_successes();

        assert_eq!(variant.trials(), 1);
        assert_eq!(variant.successes(), 1);
        assert_eq!(variant.success_rate(), 1.0);
    }

    #[test]
    fn test_success_after_trials_does_not_add_trials() {
        let variant = Variant::named("A").unwrap();
        variant.record_trial();
        variant.record_trial();
        variant.increment_successes();

        assert_eq!(variant.stats(), VariantStats { trials: 2, successes: 1 });
        assert_eq!(variant.success_rate(), 0.5);
    }

    #[test]
    fn test_concurrent_updates_keep_invariant() {
        let variant = Arc::new(Variant::named("Green").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let variant = Arc::clone(&variant);
                thread::spawn(move || {
                    for _ in 0..500 {
                        if i % 2 == 0 {
                            variant.record_trial();
                        } else {
                            variant.increment_successes();
                        }
                        let stats = variant.stats();
                        assert!(stats.successes <= stats.trials);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = variant.stats();
        assert_eq!(stats.successes, 1000);
        assert!(stats.trials >= 1000);
    }

    #[test]
    fn test_identity_and_display() {
        let a = Variant::named("White").unwrap();
        let b = Variant::named("White").unwrap();
        assert_eq!(a, b);

        a.increment_successes();
        assert_eq!(a.to_string(), "White (1/1 = 1.000)");
    }
}
