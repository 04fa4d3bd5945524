//! Bulk training helpers.

use log::debug;
use rayon::prelude::*;

use crate::analysis::analyzer::TextAnalyzer;
use crate::entry::Entry;
use crate::error::Result;
use crate::index::index::Index;

/// Tokenize `texts` in parallel and add them to `index` as one batch.
///
/// Tokenization runs on the rayon pool; the index update itself happens
/// once, under the index's own lock. If any text fails to analyze,
/// nothing is added. Returns the number of entries added.
pub fn train_parallel<S>(index: &dyn Index, texts: &[S], analyzer: &dyn TextAnalyzer) -> Result<usize>
where
    S: AsRef<str> + Sync,
{
    let entries = texts
        .par_iter()
        .map(|text| Entry::with_analyzer(text.as_ref(), analyzer))
        .collect::<Result<Vec<Entry>>>()?;

    index.add_all(&entries)?;
    debug!("Trained index with {} documents in parallel", entries.len());
    Ok(entries.len())
}

/// Tokenize `texts` with the default pipeline and add them in order.
pub fn train<S: AsRef<str>>(index: &dyn Index, texts: &[S]) -> Result<usize> {
    let entries: Vec<Entry> = texts.iter().map(|t| Entry::from_str(t.as_ref())).collect();
    index.add_all(&entries)?;
    Ok(entries.len())
}
