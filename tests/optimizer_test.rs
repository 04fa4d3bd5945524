//! Behavioural tests for the epsilon-greedy optimizer.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use nbayes::error::{NbayesError, Result};
use nbayes::optimization::{Optimizer, OptimizerConfig, Variant};

fn seeded_optimizer(seed: u64, names: &[&str]) -> Result<Optimizer> {
    let optimizer = Optimizer::new(OptimizerConfig::default().with_seed(seed))?;
    for name in names {
        optimizer.add(Variant::named(*name)?)?;
    }
    Ok(optimizer)
}

#[test]
fn test_cold_start_tries_every_variant_first() -> Result<()> {
    for seed in 0..20 {
        let optimizer = seeded_optimizer(seed, &["orange", "green", "white"])?;
        let first_three: Vec<String> = (0..3)
            .map(|_| optimizer.choose().map(|v| v.name().to_string()))
            .collect::<Result<_>>()?;
        assert_eq!(first_three, ["orange", "green", "white"]);
    }
    Ok(())
}

#[test]
fn test_rewarded_variant_dominates() -> Result<()> {
    let optimizer = seeded_optimizer(7, &["x", "y", "z"])?;
    let cycles = 300;
    let tail_start = cycles - cycles / 5;
    let mut tail_counts: HashMap<String, usize> = HashMap::new();

    for cycle in 0..cycles {
        let variant = optimizer.choose()?;
        if variant.name() == "x" {
            variant.increment_successes();
        }
        if cycle >= tail_start {
            *tail_counts.entry(variant.name().to_string()).or_insert(0) += 1;
        }
    }

    let x = tail_counts.get("x").copied().unwrap_or(0);
    let y = tail_counts.get("y").copied().unwrap_or(0);
    let z = tail_counts.get("z").copied().unwrap_or(0);
    assert!(x >= 2 * y.max(1), "x={x} y={y}");
    assert!(x >= 2 * z.max(1), "x={x} z={z}");
    assert_eq!(optimizer.best().map(|v| v.name().to_string()), Some("x".to_string()));
    assert_eq!(optimizer.total_trials(), cycles as u64);

    Ok(())
}

/// White is rewarded for the first 35 of 100 tries, Green for the rest.
/// Returns the names ordered by final success rate.
fn run_preference_switch(config: OptimizerConfig) -> Result<Vec<String>> {
    let optimizer = Optimizer::new(config)?;
    for name in ["Orange", "Green", "White"] {
        optimizer.add(Variant::named(name)?)?;
    }

    let tries = 100;
    let switch_at = tries * 35 / 100;
    for attempt in 0..tries {
        let variant = optimizer.choose()?;
        let preferred = if attempt < switch_at { "White" } else { "Green" };
        if variant.name() == preferred {
            variant.increment_successes();
        }
    }

    let mut ranked = optimizer.variants();
    ranked.sort_by(|a, b| b.success_rate().total_cmp(&a.success_rate()));
    Ok(ranked.iter().map(|v| v.name().to_string()).collect())
}

#[test]
fn test_follows_preference_switch() -> Result<()> {
    let seeds = 100;
    let mut followed = 0;
    for seed in 0..seeds {
        let config = OptimizerConfig {
            epsilon: 0.3,
            ..OptimizerConfig::default()
        }
        .with_seed(seed);
        let ranked = run_preference_switch(config)?;
        if ranked[..2] == ["Green", "White"] {
            followed += 1;
        }
    }

    // About 98% of runs follow the switch at this exploration rate.
    assert!(followed >= 85, "followed the switch in {followed}/{seeds} runs");
    Ok(())
}

#[test]
fn test_preference_switch_is_reproducible() -> Result<()> {
    let config = OptimizerConfig {
        epsilon: 0.3,
        ..OptimizerConfig::default()
    }
    .with_seed(21);
    assert_eq!(
        run_preference_switch(config.clone())?,
        run_preference_switch(config)?
    );
    Ok(())
}

#[test]
fn test_feedback_before_any_choice() -> Result<()> {
    let optimizer = seeded_optimizer(1, &["A", "B"])?;
    let a = optimizer.get("A").ok_or(NbayesError::EmptyOptimizer)?;

    a.increment_successes();
    assert_eq!(a.trials(), 1);
    assert_eq!(a.successes(), 1);

    // "A" already has a trial, so the cold start goes to "B".
    assert_eq!(optimizer.choose()?.name(), "B");

    Ok(())
}

#[test]
fn test_successes_never_exceed_trials() -> Result<()> {
    let optimizer = seeded_optimizer(3, &["a", "b", "c", "d"])?;
    for round in 0..500 {
        let variant = optimizer.choose()?;
        if round % 3 != 0 {
            variant.increment_successes();
        }
        if round % 7 == 0 {
            variant.increment_successes();
        }
        for variant in optimizer.variants() {
            let stats = variant.stats();
            assert!(stats.successes <= stats.trials, "{variant}");
        }
    }
    Ok(())
}

#[test]
fn test_seeded_runs_repeat() -> Result<()> {
    let run = |seed| -> Result<Vec<String>> {
        let optimizer = seeded_optimizer(seed, &["orange", "green", "white"])?;
        let mut picks = Vec::new();
        for _ in 0..100 {
            let variant = optimizer.choose()?;
            if variant.name() == "white" {
                variant.increment_successes();
            }
            picks.push(variant.name().to_string());
        }
        Ok(picks)
    };

    assert_eq!(run(11)?, run(11)?);
    Ok(())
}

#[test]
fn test_concurrent_choose_and_feedback() -> Result<()> {
    let optimizer = Arc::new(seeded_optimizer(5, &["a", "b", "c"])?);
    let threads = 8;
    let rounds = 250;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let optimizer = Arc::clone(&optimizer);
            thread::spawn(move || -> Result<()> {
                for _ in 0..rounds {
                    let variant = optimizer.choose()?;
                    if variant.name() != "c" {
                        variant.increment_successes();
                    }
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked")?;
    }

    assert_eq!(optimizer.total_trials(), (threads * rounds) as u64);
    for variant in optimizer.variants() {
        assert!(variant.successes() <= variant.trials());
    }

    Ok(())
}

#[test]
fn test_choose_async() -> Result<()> {
    let optimizer = seeded_optimizer(2, &["only"])?;
    let variant = tokio_test::block_on(optimizer.choose_async())?;
    assert_eq!(variant.name(), "only");
    assert_eq!(variant.trials(), 1);
    Ok(())
}

#[test]
fn test_empty_and_duplicate() -> Result<()> {
    let optimizer = Optimizer::default();
    assert!(matches!(optimizer.choose(), Err(NbayesError::EmptyOptimizer)));
    assert!(optimizer.best().is_none());

    optimizer.add(Variant::named("green")?)?;
    assert!(matches!(
        optimizer.add(Variant::named("green")?),
        Err(NbayesError::Duplicate(_))
    ));
    assert_eq!(optimizer.len(), 1);

    Ok(())
}
