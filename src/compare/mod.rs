//! Whole-file comparison: key reconciliation, per-entry dispatch and the
//! terminal verdict.
//!
//! This is a single-verdict, fail-fast check: the first mismatching entry
//! ends the run. It is not a full diff report.

pub mod histogram;
mod table;
pub mod tolerance;

use std::collections::BTreeSet;

pub use histogram::{canonical_string, histograms_are_identical};

use crate::config::CompareConfig;
use crate::error::Result;
use crate::reader::{AnalysisFile, Entry};
use crate::utils::log_name_diff;

/// Terminal verdict of a whole-file comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Same keys, same columns, every entry identical
    Identical,
    /// Every shared entry identical, but the tables' column sets differ
    IdenticalSharedColumns,
    /// At least one entry differs; the first mismatch stopped the run
    Different,
    /// The top-level key sets differ; no entry was compared
    KeySetsDiffer,
}

impl Verdict {
    /// Process exit code mandated for this verdict.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Identical | Verdict::IdenticalSharedColumns => 0,
            Verdict::Different | Verdict::KeySetsDiffer => 3,
        }
    }

    /// True for the two exit-code-0 states.
    #[must_use]
    pub fn is_identical(self) -> bool {
        self.exit_code() == 0
    }
}

/// Compare two analysis files entry by entry.
///
/// If the top-level key sets differ no entry is compared at all. Otherwise
/// shared keys are walked in file-native order and the first mismatch
/// (histogram, table, or an entry whose kind is unrecognized or disagrees
/// between the files) ends the walk with [`Verdict::Different`].
pub fn compare_files(
    file1: &AnalysisFile,
    file2: &AnalysisFile,
    config: &CompareConfig,
) -> Result<Verdict> {
    log::info!(
        "Comparing analysis files {} and {}",
        file1.name(),
        file2.name()
    );

    let key_list = file1.keys()?;
    let keys1: BTreeSet<String> = key_list.iter().cloned().collect();
    let keys2: BTreeSet<String> = file2.keys()?.into_iter().collect();
    if keys1 != keys2 {
        log::info!("Analysis files do not contain the same keys");
        log_name_diff(&keys1, &keys2, file1.name(), file2.name());
        return Ok(Verdict::KeySetsDiffer);
    }

    let mut same_columns = true;
    for key in &key_list {
        log::debug!("Comparing key = {key}");
        let entry1 = file1.entry(key)?;
        let entry2 = file2.entry(key)?;
        match (entry1, entry2) {
            (Entry::Histogram(hist1), Entry::Histogram(hist2)) => {
                if !histograms_are_identical(&hist1, &hist2) {
                    log::info!("The histogram {key} is different between files");
                    histogram::log_histogram_diff(&hist1, &hist2, file1.name(), file2.name());
                    log::info!("Analysis files are not identical");
                    return Ok(Verdict::Different);
                }
            }
            (Entry::Table(table1), Entry::Table(table2)) => {
                let result =
                    table::compare_tables(&table1, &table2, config, file1.name(), file2.name())?;
                if !result.identical {
                    log::info!("The table {key} is different between files");
                    log::info!("Analysis files are not identical");
                    return Ok(Verdict::Different);
                }
                same_columns &= result.same_columns;
            }
            (entry1, entry2) => {
                log::warn!("Unrecognized or differing object types for key = {key}");
                log::warn!("In {}, this is a {}", file1.name(), entry1.kind());
                log::warn!("In {}, this is a {}", file2.name(), entry2.kind());
                log::info!("Analysis files are not identical");
                return Ok(Verdict::Different);
            }
        }
    }

    if same_columns {
        log::info!("Analysis files are identical");
        Ok(Verdict::Identical)
    } else {
        log::info!(
            "Analysis files have different columns but the columns in common are identical"
        );
        Ok(Verdict::IdenticalSharedColumns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_verdict() {
        assert_eq!(Verdict::Identical.exit_code(), 0);
        assert_eq!(Verdict::IdenticalSharedColumns.exit_code(), 0);
        assert_eq!(Verdict::Different.exit_code(), 3);
        assert_eq!(Verdict::KeySetsDiffer.exit_code(), 3);
    }

    #[test]
    fn only_exit_zero_verdicts_count_as_identical() {
        assert!(Verdict::Identical.is_identical());
        assert!(Verdict::IdenticalSharedColumns.is_identical());
        assert!(!Verdict::Different.is_identical());
        assert!(!Verdict::KeySetsDiffer.is_identical());
    }
}
