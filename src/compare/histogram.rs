//! Canonical text form of a histogram and the equality check built on it.

use itertools::Itertools;

use crate::reader::{Axis, Histogram};

/// Compare two histograms for exact structural equality.
///
/// Equality is character-for-character equality of the canonical forms:
/// dimensionality, bin count, bin edges (at 5-decimal precision) and every
/// bin content including the under/overflow bins must match. Bin contents
/// enter the text with their default float formatting, so no numeric
/// tolerance applies here; that is an intentional, if debatable, property
/// of the check.
#[must_use]
pub fn histograms_are_identical(hist1: &Histogram, hist2: &Histogram) -> bool {
    canonical_string(hist1) == canonical_string(hist2)
}

/// Render the full bin grid as text, one labelled cell per bin.
///
/// 1-D histograms become a single labelled row, 2-D histograms a grid with
/// x bins as columns and y bins as rows, 3-D histograms one such grid per
/// z bin with a header line naming the slice.
#[must_use]
pub fn canonical_string(hist: &Histogram) -> String {
    match hist.n_dims() {
        1 => serialize_1d(hist),
        2 => serialize_grid(hist, None),
        _ => serialize_3d(hist),
    }
}

/// Log both canonical forms at debug level, for the first mismatch.
pub(crate) fn log_histogram_diff(hist1: &Histogram, hist2: &Histogram, label1: &str, label2: &str) {
    log::debug!("Histogram from {label1}:");
    log::debug!("\n{}", canonical_string(hist1));
    log::debug!("Histogram from {label2}:");
    log::debug!("\n{}", canonical_string(hist2));
}

/// `"(<index>) <range>"` labels for every content index of an axis,
/// under/overflow included.
fn bin_labels(axis: &Axis) -> Vec<String> {
    (0..axis.n_bins() + 2)
        .map(|index| format!("({index}) {}", axis.bin_label(index)))
        .collect()
}

fn serialize_1d(hist: &Histogram) -> String {
    let headers = bin_labels(&hist.axes()[0]);
    let values = (0..headers.len())
        .map(|x| format!("{}", hist.bin_content(&[x])))
        .collect();
    render_table(&headers, &[values])
}

/// Grid over the first two axes: x bins as columns, y bins as rows. For 3-D
/// histograms `fixed_z` selects the slice.
fn serialize_grid(hist: &Histogram, fixed_z: Option<usize>) -> String {
    let x_labels = bin_labels(&hist.axes()[0]);
    let y_labels = bin_labels(&hist.axes()[1]);
    let mut headers = vec![String::new()];
    headers.extend(x_labels.iter().cloned());
    let rows: Vec<Vec<String>> = y_labels
        .iter()
        .enumerate()
        .map(|(y, y_label)| {
            let mut row = vec![y_label.clone()];
            row.extend((0..x_labels.len()).map(|x| {
                let content = match fixed_z {
                    None => hist.bin_content(&[x, y]),
                    Some(z) => hist.bin_content(&[x, y, z]),
                };
                format!("{content}")
            }));
            row
        })
        .collect();
    render_table(&headers, &rows)
}

fn serialize_3d(hist: &Histogram) -> String {
    let z_labels = bin_labels(&hist.axes()[2]);
    let mut out = String::new();
    for (z, z_label) in z_labels.iter().enumerate() {
        out.push_str(z_label);
        out.push('\n');
        out.push_str(&serialize_grid(hist, Some(z)));
        out.push_str("\n\n");
    }
    out
}

/// Right-aligned text table with a separator line under the headers.
fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .map(|row| row[column].len())
                .chain([header.len()])
                .max()
                .unwrap_or(0)
        })
        .collect();
    let format_row = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:>width$}", width = *width))
            .join(" | ")
    };
    let mut out = String::new();
    out.push_str(&format_row(headers));
    out.push('\n');
    out.push_str(&widths.iter().map(|width| "-".repeat(*width)).join("-+-"));
    out.push('\n');
    for row in rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use ndarray::{ArrayD, IxDyn};

    fn hist_1d(name: &str, edges: &[f64], contents: &[f64]) -> Result<Histogram> {
        let axis = Axis::new(edges.to_vec())?;
        let counts = ArrayD::from_shape_vec(IxDyn(&[contents.len()]), contents.to_vec())
            .expect("shape matches");
        Histogram::new(name, vec![axis], counts)
    }

    #[test]
    fn canonical_string_labels_every_bin() {
        let hist = hist_1d("h1", &[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 5.0, 3.0, 1.0]).unwrap();
        let text = canonical_string(&hist);
        assert!(text.contains("(0) < 0.00000"));
        assert!(text.contains("(1) 0.00000-1.00000"));
        assert!(text.contains("(4) > 3.00000"));
        assert!(text.contains('5'));
    }

    #[test]
    fn histogram_is_identical_to_itself() {
        let hist = hist_1d("h1", &[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 5.0, 3.0, 1.0]).unwrap();
        assert!(histograms_are_identical(&hist, &hist.clone()));
    }

    #[test]
    fn differing_overflow_content_is_not_identical() {
        let base = hist_1d("h1", &[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 5.0, 3.0, 5.0]).unwrap();
        let overflow = hist_1d("h1", &[0.0, 1.0, 2.0, 3.0], &[0.0, 2.0, 5.0, 3.0, 6.0]).unwrap();
        assert!(!histograms_are_identical(&base, &overflow));
    }

    #[test]
    fn differing_edges_are_not_identical() {
        let hist1 = hist_1d("h1", &[0.0, 1.0, 2.0], &[0.0, 2.0, 5.0, 3.0]).unwrap();
        let hist2 = hist_1d("h1", &[0.0, 1.0, 2.5], &[0.0, 2.0, 5.0, 3.0]).unwrap();
        assert!(!histograms_are_identical(&hist1, &hist2));
    }

    #[test]
    fn two_dim_grid_has_one_row_per_y_bin() {
        let x = Axis::new(vec![0.0, 1.0]).unwrap();
        let y = Axis::new(vec![0.0, 0.5, 1.0]).unwrap();
        let counts = ArrayD::zeros(IxDyn(&[3, 4]));
        let hist = Histogram::new("h2", vec![x, y], counts).unwrap();
        let text = canonical_string(&hist);
        // header + separator + one row per y content index (2 bins + 2)
        assert_eq!(text.trim_end().lines().count(), 2 + 4);
    }

    #[test]
    fn three_dim_form_names_every_slice() {
        let x = Axis::new(vec![0.0, 1.0]).unwrap();
        let y = Axis::new(vec![0.0, 1.0]).unwrap();
        let z = Axis::new(vec![0.0, 2.0]).unwrap();
        let counts = ArrayD::zeros(IxDyn(&[3, 3, 3]));
        let hist = Histogram::new("h3", vec![x, y, z], counts).unwrap();
        let text = canonical_string(&hist);
        assert!(text.contains("(0) < 0.00000\n"));
        assert!(text.contains("(1) 0.00000-2.00000\n"));
        assert!(text.contains("(2) > 2.00000\n"));
    }
}
