//! Shared helpers for the comparison tools.

pub mod logging;
pub mod test_utils;

use std::collections::BTreeSet;

use itertools::Itertools;

/// Log the asymmetric difference between two name sets at debug level.
///
/// Used for both top-level keys and table columns; the labels name the two
/// files being compared.
pub fn log_name_diff(
    names1: &BTreeSet<String>,
    names2: &BTreeSet<String>,
    label1: &str,
    label2: &str,
) {
    log::debug!("Names unique to {label1}:");
    log::debug!(">> {}", names1.difference(names2).join(", "));
    log::debug!("Names unique to {label2}:");
    log::debug!(">> {}", names2.difference(names1).join(", "));
}
