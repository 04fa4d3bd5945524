//! Pull an expensive sequence once and replay it from several cursors.

use std::io::Write;

use env_logger::Builder;
use log::{LevelFilter, info};

use nbayes::util::BufferedIter;

fn main() -> anyhow::Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let squares = BufferedIter::new((1..=5u64).map(|n| {
        info!("computing {n}^2");
        n * n
    }));

    let first_two: Vec<u64> = squares.iter().take(2).collect();
    println!("first two: {first_two:?}");

    let all: Vec<u64> = squares.iter().collect();
    println!("all: {all:?}");

    let sum: u64 = (&squares).into_iter().sum();
    println!("sum: {sum} (buffered {}, exhausted {})", squares.buffered_len(), squares.is_exhausted());

    Ok(())
}
