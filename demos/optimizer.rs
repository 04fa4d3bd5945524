//! Simulate a button-color experiment whose favorite changes midway.
//!
//! Visitors reward White for the first 35% of tries and Green afterwards.
//! With a constant exploration rate of 0.3 the optimizer usually ends
//! with Green ahead of White; at the default 0.10 it explores too little
//! to notice the switch in about one run out of five.

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

use nbayes::optimization::{Optimizer, OptimizerConfig, Variant};

const TRIES: usize = 100;
const SWITCH_AT: usize = TRIES * 35 / 100;

fn main() -> anyhow::Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let mut config = OptimizerConfig {
        epsilon: 0.3,
        ..OptimizerConfig::default()
    };
    if let Some(seed) = std::env::args().nth(1) {
        config = config.with_seed(seed.parse()?);
    }

    let optimizer = Optimizer::new(config)?;
    for color in ["Orange", "Green", "White"] {
        optimizer.add(Variant::named(color)?)?;
    }

    for attempt in 0..TRIES {
        let variant = optimizer.choose()?;
        let preferred = if attempt < SWITCH_AT { "White" } else { "Green" };
        if variant.name() == preferred {
            variant.increment_successes();
        }
        println!("{attempt:>3}: {}", variant.name());
    }

    println!("\nExpected: Green first, White second. After {TRIES} tries:");
    print!("{optimizer}");
    if let Some(best) = optimizer.best() {
        println!("best: {}", best.name());
    }

    Ok(())
}
