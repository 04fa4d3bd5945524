//! Durable index tests against the real filesystem.

use nbayes::classification::{Analyzer, CategorizationResult};
use nbayes::entry::Entry;
use nbayes::error::Result;
use nbayes::index::{FileIndex, Index, train};
use nbayes::storage::Storage;
use tempfile::TempDir;

#[test]
fn test_trained_indexes_survive_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let positive_path = dir.path().join("positive.json");
    let negative_path = dir.path().join("negative.json");
    let entry = Entry::from_str("this event was great");

    // First session: train and save.
    let expected = {
        let positive = FileIndex::at_path(&positive_path)?;
        let negative = FileIndex::at_path(&negative_path)?;
        train(&positive, &["this is awesome", "i really enjoyed this", "great event"])?;
        train(&negative, &["terrible experience", "awful service", "worst purchase"])?;
        positive.save()?;
        negative.save()?;

        Analyzer::default().scores(&entry, &positive, &negative)
    };

    // Second session: reload and score again.
    let positive = FileIndex::at_path(&positive_path)?;
    let negative = FileIndex::at_path(&negative_path)?;
    assert_eq!(positive.document_count(), 3);
    assert_eq!(negative.document_count(), 3);

    let analyzer = Analyzer::default();
    assert_eq!(analyzer.scores(&entry, &positive, &negative), expected);
    assert_eq!(
        analyzer.categorize(&entry, &positive, &negative),
        CategorizationResult::First
    );

    Ok(())
}

#[test]
fn test_save_leaves_no_temp_files() -> Result<()> {
    let dir = TempDir::new()?;
    let index = FileIndex::at_path(dir.path().join("model.json"))?;

    for round in 0..3 {
        index.add(&Entry::from_str(&format!("round number {round} finished")))?;
        index.save()?;
    }

    assert_eq!(index.storage().list_files()?, vec!["model.json".to_string()]);
    Ok(())
}

#[test]
fn test_missing_directory_is_created() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("models").join("spam.json");

    let index = FileIndex::at_path(&path)?;
    assert_eq!(index.document_count(), 0);

    index.add(&Entry::from_str("cheap pills online"))?;
    index.save()?;
    assert!(path.exists());

    Ok(())
}

#[test]
fn test_unsaved_changes_are_not_persisted() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("ham.json");

    let index = FileIndex::at_path(&path)?;
    index.add(&Entry::from_str("lunch meeting tomorrow"))?;
    index.save()?;
    index.add(&Entry::from_str("quarterly report attached"))?;
    assert!(index.has_unsaved_changes());

    let reopened = FileIndex::at_path(&path)?;
    assert_eq!(reopened.document_count(), 1);
    assert_eq!(reopened.token_frequency("report"), 0);

    Ok(())
}
