//! Materializer facade: build the fixture and write it out.

use std::fmt;
use std::path::PathBuf;

use crate::dataset::SplitKind;
use crate::error::DatasetResult;
use crate::fixture::build_dataset;
use crate::persist::persist;

/// Configuration for a materializer run.
#[derive(Debug, Clone)]
pub struct MaterializerConfig {
    /// Destination file (default: `data_fold3.bin` in the working directory).
    pub output_path: PathBuf,
}

impl Default for MaterializerConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("data_fold3.bin"),
        }
    }
}

/// What a run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeReport {
    pub path: PathBuf,
    pub bytes_written: u64,
    /// Sentence count per split, in train/valid/test order.
    pub sentences: [(SplitKind, usize); 3],
    pub labels: usize,
    pub tables: usize,
    pub words: usize,
}

impl fmt::Display for MaterializeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wrote {} ({} bytes)", self.path.display(), self.bytes_written)?;
        for (kind, n) in &self.sentences {
            writeln!(f, "  {kind:<5} {n} sentences")?;
        }
        write!(
            f,
            "  dicts labels={} tables={} words={}",
            self.labels, self.tables, self.words
        )
    }
}

/// Build the dataset and persist it to `config.output_path`.
pub fn materialize(config: &MaterializerConfig) -> DatasetResult<MaterializeReport> {
    let bundle = build_dataset();
    let bytes_written = persist(&bundle, &config.output_path)?;

    let sentences = bundle.splits().map(|(kind, split)| (kind, split.len()));
    tracing::info!(
        path = %config.output_path.display(),
        bytes = bytes_written,
        train = sentences[0].1,
        valid = sentences[1].1,
        test = sentences[2].1,
        "materialized dataset"
    );

    Ok(MaterializeReport {
        path: config.output_path.clone(),
        bytes_written,
        sentences,
        labels: bundle.dicts.labels2idx.len(),
        tables: bundle.dicts.tables2idx.len(),
        words: bundle.dicts.words2idx.len(),
    })
}
