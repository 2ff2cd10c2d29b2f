//! Sampled row-by-row comparison of two table entries.

use std::collections::BTreeSet;

use indicatif::ProgressBar;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use rustc_hash::FxHashSet;

use crate::compare::tolerance::close_enough;
use crate::config::CompareConfig;
use crate::error::Result;
use crate::reader::{RowValue, Table};
use crate::utils::log_name_diff;

/// Outcome of comparing one pair of tables.
pub(crate) struct TableComparison {
    /// Every sampled cell of every shared comparable column agreed
    pub identical: bool,
    /// The two column-name sets were exactly equal
    pub same_columns: bool,
}

/// Compare two tables on a bounded sample of rows.
///
/// Row counts gate the whole check; differing column sets narrow it to the
/// intersection and are reported through [`TableComparison::same_columns`];
/// non-primitive columns are warned about and skipped. The first
/// mismatching cell ends the comparison.
pub(crate) fn compare_tables(
    table1: &Table,
    table2: &Table,
    config: &CompareConfig,
    label1: &str,
    label2: &str,
) -> Result<TableComparison> {
    let name = table1.name();
    let different = TableComparison {
        identical: false,
        same_columns: true,
    };

    let n_rows = table1.n_rows();
    if n_rows != table2.n_rows() {
        log::error!("Differing number of entries for table {name}");
        log::debug!("In {label1}, there are {} entries", table1.n_rows());
        log::debug!("In {label2}, there are {} entries", table2.n_rows());
        return Ok(different);
    }

    let columns1 = table1.column_names();
    let columns2 = table2.column_names();
    let same_columns = columns1 == columns2;
    if !same_columns {
        log::warn!("Differing columns found for table {name}");
        log_name_diff(&columns1, &columns2, label1, label2);
    }
    let shared: BTreeSet<&String> = columns1.intersection(&columns2).collect();

    let mut skipped: FxHashSet<&str> = FxHashSet::default();
    for table in [table1, table2] {
        for (column, type_description) in table.non_primitive_columns() {
            if skipped.insert(column.as_str()) {
                log::warn!(
                    "Column {column} of table {name} is of non-primitive type {type_description}. Ignoring this column"
                );
            }
        }
    }

    let columns: Vec<(&str, _, _)> = shared
        .iter()
        .filter(|column| !skipped.contains(column.as_str()))
        .filter_map(|column| {
            let accessor1 = table1.column(column.as_str())?;
            let accessor2 = table2.column(column.as_str())?;
            Some((column.as_str(), accessor1, accessor2))
        })
        .collect();

    let rows = sample_rows(n_rows, config);
    log::info!(
        "Comparing {} sampled rows from table {name}",
        rows.len()
    );
    let progress = ProgressBar::new(rows.len() as u64);
    for &row in &rows {
        for (column, accessor1, accessor2) in &columns {
            let value1 = accessor1.value(row)?;
            let value2 = accessor2.value(row)?;
            if !cells_agree(&value1, &value2, column, row, config) {
                progress.finish_and_clear();
                return Ok(different);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(TableComparison {
        identical: true,
        same_columns,
    })
}

/// Ascending sample of distinct row indices. The first and last row always
/// participate, replacing the random extremes.
fn sample_rows(n_rows: usize, config: &CompareConfig) -> Vec<usize> {
    if n_rows == 0 {
        return Vec::new();
    }
    let amount = n_rows.min(config.n_sample_rows);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut rows = index::sample(&mut rng, n_rows, amount).into_vec();
    rows.sort_unstable();
    rows[0] = 0;
    if let Some(last) = rows.last_mut() {
        *last = n_rows - 1;
    }
    rows.dedup();
    rows
}

fn cells_agree(
    value1: &RowValue,
    value2: &RowValue,
    column: &str,
    row: usize,
    config: &CompareConfig,
) -> bool {
    match (value1, value2) {
        (RowValue::Scalar(a), RowValue::Scalar(b)) => {
            if !close_enough(*a, *b, config.rel_tol, config.abs_tol) {
                // precision of the message matches the tolerance scale
                log::debug!("Column {column} differs for row {row}: {a:.7} vs {b:.7}");
                return false;
            }
            log::debug!("Column {column} is the same for row {row}: {a:.7} vs {b:.7}");
            true
        }
        (RowValue::Vector(a), RowValue::Vector(b)) => {
            if a.len() != b.len() {
                log::debug!(
                    "Column {column} differs for row {row}: vector size = {} vs {}",
                    a.len(),
                    b.len()
                );
                return false;
            }
            for (element, (x, y)) in a.iter().zip(b.iter()).enumerate() {
                if !close_enough(*x, *y, config.rel_tol, config.abs_tol) {
                    log::debug!(
                        "Column {column} differs for row {row} and idx {element}: {x:.7} vs {y:.7}"
                    );
                    return false;
                }
            }
            log::debug!("Column {column} is the same for row {row}: {a:?} vs {b:?}");
            true
        }
        _ => {
            log::debug!("Column {column} differs for row {row}: scalar vs vector cell");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_seed(seed: u64) -> CompareConfig {
        CompareConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn sample_always_contains_first_and_last_row() {
        for seed in 0..20 {
            let rows = sample_rows(1000, &config_with_seed(seed));
            assert_eq!(rows.first(), Some(&0));
            assert_eq!(rows.last(), Some(&999));
            assert!(rows.len() <= 10);
            assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn small_tables_are_sampled_in_full() {
        let rows = sample_rows(4, &config_with_seed(7));
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }

    #[test]
    fn single_row_table_samples_row_zero() {
        assert_eq!(sample_rows(1, &config_with_seed(7)), vec![0]);
    }

    #[test]
    fn empty_table_samples_nothing() {
        assert!(sample_rows(0, &config_with_seed(7)).is_empty());
    }

    #[test]
    fn sampling_is_deterministic_under_a_seed() {
        let first = sample_rows(500, &config_with_seed(42));
        let second = sample_rows(500, &config_with_seed(42));
        assert_eq!(first, second);
    }

    #[test]
    fn mismatched_cell_kinds_disagree() {
        let config = CompareConfig::default();
        let scalar = RowValue::Scalar(1.0);
        let vector = RowValue::Vector([1.0].into_iter().collect());
        assert!(!cells_agree(&scalar, &vector, "x", 0, &config));
    }

    #[test]
    fn vector_cells_compare_element_wise() {
        let config = CompareConfig::default();
        let a = RowValue::Vector([1.0, 2.0, 3.0].into_iter().collect());
        let close = RowValue::Vector([1.0, 2.000_000_5, 3.0].into_iter().collect());
        let far = RowValue::Vector([1.0, 2.1, 3.0].into_iter().collect());
        let short = RowValue::Vector([1.0, 2.0].into_iter().collect());
        assert!(cells_agree(&a, &close, "v", 0, &config));
        assert!(!cells_agree(&a, &far, "v", 0, &config));
        assert!(!cells_agree(&a, &short, "v", 0, &config));
    }
}
