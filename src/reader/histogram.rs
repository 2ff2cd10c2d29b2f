//! In-memory model of a binned histogram entry.

use hdf5::Group;
use ndarray::{ArrayD, IxDyn};

use crate::error::{Error, Result};

/// Dataset names holding the per-axis bin edges, in axis order.
pub(crate) const EDGE_DATASETS: [&str; 3] = ["x_edges", "y_edges", "z_edges"];

/// One histogram axis: its bin edges, strictly increasing.
#[derive(Debug, Clone)]
pub struct Axis {
    edges: Vec<f64>,
}

impl Axis {
    /// Build an axis, validating the edge invariant.
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::format("axis", "needs at least two bin edges"));
        }
        if !edges.windows(2).all(|pair| pair[0] < pair[1]) {
            return Err(Error::format("axis", "bin edges must be strictly increasing"));
        }
        Ok(Self { edges })
    }

    /// Number of visible bins (excluding under/overflow).
    #[must_use]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// The bin edges, low to high.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin-range label for content index `index` (0 = underflow,
    /// `n_bins + 1` = overflow), with edges at 5-decimal precision.
    #[must_use]
    pub fn bin_label(&self, index: usize) -> String {
        let n_bins = self.n_bins();
        if index == 0 {
            format!("< {:.5}", self.edges[0])
        } else if index == n_bins + 1 {
            format!("> {:.5}", self.edges[n_bins])
        } else {
            format!("{:.5}-{:.5}", self.edges[index - 1], self.edges[index])
        }
    }
}

/// A histogram entry: per-axis bin edges plus a dense content array whose
/// extent per axis is `n_bins + 2` (underflow at index 0, overflow at
/// `n_bins + 1`).
#[derive(Debug, Clone)]
pub struct Histogram {
    name: String,
    axes: Vec<Axis>,
    counts: ArrayD<f64>,
}

impl Histogram {
    /// Build a histogram, validating that the content shape matches the
    /// axes.
    pub fn new(name: impl Into<String>, axes: Vec<Axis>, counts: ArrayD<f64>) -> Result<Self> {
        let name = name.into();
        if axes.is_empty() || axes.len() > EDGE_DATASETS.len() {
            return Err(Error::format(name.as_str(), "histograms have 1 to 3 axes"));
        }
        if counts.ndim() != axes.len() {
            return Err(Error::format(
                name.as_str(),
                format!(
                    "counts has {} dimensions but there are {} axes",
                    counts.ndim(),
                    axes.len()
                ),
            ));
        }
        for (axis_index, axis) in axes.iter().enumerate() {
            let expected = axis.n_bins() + 2;
            if counts.shape()[axis_index] != expected {
                return Err(Error::format(
                    name.as_str(),
                    format!(
                        "axis {axis_index} holds {} bins plus under/overflow but counts extent is {}",
                        axis.n_bins(),
                        counts.shape()[axis_index]
                    ),
                ));
            }
        }
        Ok(Self { name, axes, counts })
    }

    /// Read a tagged histogram group.
    pub(crate) fn from_group(group: &Group, name: &str) -> Result<Self> {
        let mut axes = Vec::new();
        for dataset_name in EDGE_DATASETS {
            if !group.link_exists(dataset_name) {
                break;
            }
            let edges = group.dataset(dataset_name)?.read_raw::<f64>()?;
            let axis = Axis::new(edges)
                .map_err(|_| Error::format(name, format!("invalid {dataset_name}")))?;
            axes.push(axis);
        }
        if axes.is_empty() {
            return Err(Error::format(name, "histogram group has no x_edges dataset"));
        }
        if !group.link_exists("counts") {
            return Err(Error::format(name, "histogram group has no counts dataset"));
        }
        let counts = group.dataset("counts")?.read_dyn::<f64>()?;
        Self::new(name, axes, counts)
    }

    /// Entry name of this histogram.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of axes (1, 2 or 3).
    #[must_use]
    pub fn n_dims(&self) -> usize {
        self.axes.len()
    }

    /// The axes, in x/y/z order.
    #[must_use]
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Content of the bin at the given per-axis indices (0 = underflow).
    #[must_use]
    pub fn bin_content(&self, index: &[usize]) -> f64 {
        self.counts[IxDyn(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    fn axis(edges: &[f64]) -> Axis {
        Axis::new(edges.to_vec()).unwrap()
    }

    #[test]
    fn bin_labels_cover_under_and_overflow() {
        let axis = axis(&[0.0, 1.5, 3.0]);
        assert_eq!(axis.bin_label(0), "< 0.00000");
        assert_eq!(axis.bin_label(1), "0.00000-1.50000");
        assert_eq!(axis.bin_label(2), "1.50000-3.00000");
        assert_eq!(axis.bin_label(3), "> 3.00000");
    }

    #[test]
    fn non_increasing_edges_are_rejected() {
        assert!(Axis::new(vec![0.0, 1.0, 1.0]).is_err());
        assert!(Axis::new(vec![0.0, 2.0, 1.0]).is_err());
        assert!(Axis::new(vec![1.0]).is_err());
    }

    #[test]
    fn counts_shape_must_match_axes() {
        let counts = ArrayD::zeros(IxDyn(&[4]));
        assert!(Histogram::new("h", vec![axis(&[0.0, 1.0, 2.0])], counts.clone()).is_ok());
        // 3 visible bins need extent 5, not 4
        assert!(Histogram::new("h", vec![axis(&[0.0, 1.0, 2.0, 3.0])], counts).is_err());
    }

    #[test]
    fn bin_content_uses_per_axis_indices() {
        let mut counts = ArrayD::zeros(IxDyn(&[3, 4]));
        counts[IxDyn(&[2, 3])] = 7.0;
        let hist = Histogram::new(
            "h2",
            vec![axis(&[0.0, 1.0]), axis(&[0.0, 0.5, 1.0])],
            counts,
        )
        .unwrap();
        assert_eq!(hist.bin_content(&[2, 3]), 7.0);
        assert_eq!(hist.bin_content(&[0, 0]), 0.0);
    }
}
