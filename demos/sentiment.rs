//! Train a positive and a negative index, then sort headlines by tone.
//!
//! Run with `cargo run --example sentiment -- [index-dir]`. When a
//! directory is given, the trained indexes are saved there and reused on
//! the next run.

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

use nbayes::classification::{Analyzer, CategorizationResult};
use nbayes::entry::Entry;
use nbayes::index::{FileIndex, Index, MemoryIndex, train};

const POSITIVE: &[&str] = &[
    "This is awesome",
    "I really enjoyed this program",
    "I thought that new phone was ideal, some of the key features blew my mind!",
    "Awesome read, must try",
    "Great event",
    "Super idea, love it",
];

const NEGATIVE: &[&str] = &[
    "Terrible experience",
    "OMG! No way! I can't believe that! Terrible!",
    "Awful service, never again",
    "Worst purchase I ever made",
    "That movie was boring and way too long",
    "Broken on arrival, hate it",
];

const HEADLINES: &[&str] = &[
    "Local team throws awesome charity event",
    "Commuters report terrible delays, worst week yet",
    "New phone features blew reviewers away",
    "Council publishes quarterly budget",
];

fn main() -> anyhow::Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let analyzer = Analyzer::default();

    match std::env::args().nth(1) {
        Some(dir) => {
            let dir = std::path::Path::new(&dir);
            let positive = FileIndex::at_path(dir.join("positive.json"))?;
            let negative = FileIndex::at_path(dir.join("negative.json"))?;
            if positive.document_count() == 0 {
                train(&positive, POSITIVE)?;
                positive.save()?;
            }
            if negative.document_count() == 0 {
                train(&negative, NEGATIVE)?;
                negative.save()?;
            }
            report(&analyzer, &positive, &negative);
        }
        None => {
            let positive = MemoryIndex::new();
            let negative = MemoryIndex::new();
            train(&positive, POSITIVE)?;
            train(&negative, NEGATIVE)?;
            report(&analyzer, &positive, &negative);
        }
    }

    Ok(())
}

fn report(analyzer: &Analyzer, positive: &dyn Index, negative: &dyn Index) {
    for headline in HEADLINES {
        let entry = Entry::from_str(headline);
        let tone = match analyzer.categorize(&entry, positive, negative) {
            CategorizationResult::First => "positive",
            CategorizationResult::Second => "negative",
            CategorizationResult::Undetermined => "neutral",
        };
        println!("{tone:>8}  {headline}");
    }
}
