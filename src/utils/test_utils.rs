//! Helpers for building analysis-file fixtures in tests.
//!
//! The writers produce the exact layout [`crate::reader`] expects: tagged
//! top-level groups with `x_edges`/`counts` datasets for histograms and one
//! dataset per column for tables.

use std::path::Path;
use std::str::FromStr;

use hdf5::types::VarLenUnicode;
use hdf5::{File, Group};
use ndarray::{Array2, ArrayD, IxDyn};

use crate::error::{Error, Result};
use crate::reader::{CLASS_ATTR, EDGE_DATASETS, HISTOGRAM_CLASS, TABLE_CLASS};

/// Create an empty analysis file at `path`, truncating any existing file.
pub fn create_analysis_file(path: &Path) -> Result<File> {
    Ok(File::create(path)?)
}

/// Write a tagged histogram group. `edges` holds one edge vector per axis;
/// `counts` must already include the under/overflow bins.
pub fn write_histogram(
    file: &File,
    name: &str,
    edges: &[Vec<f64>],
    counts: &ArrayD<f64>,
) -> Result<()> {
    let group = file.create_group(name)?;
    set_class(&group, HISTOGRAM_CLASS)?;
    for (axis_edges, dataset_name) in edges.iter().zip(EDGE_DATASETS) {
        group
            .new_dataset_builder()
            .with_data(axis_edges)
            .create(dataset_name)?;
    }
    group.new_dataset_builder().with_data(counts).create("counts")?;
    Ok(())
}

/// Write a 1-D histogram from its edge list and contents (under/overflow
/// included).
pub fn write_histogram_1d(file: &File, name: &str, edges: &[f64], contents: &[f64]) -> Result<()> {
    let counts = ArrayD::from_shape_vec(IxDyn(&[contents.len()]), contents.to_vec())
        .map_err(|shape_error| Error::format(name, shape_error.to_string()))?;
    write_histogram(file, name, &[edges.to_vec()], &counts)
}

/// Create a tagged table group; fill it with the column helpers below.
pub fn create_table(file: &File, name: &str) -> Result<Group> {
    let group = file.create_group(name)?;
    set_class(&group, TABLE_CLASS)?;
    Ok(group)
}

/// Scalar f64 column.
pub fn add_scalar_column(group: &Group, name: &str, values: &[f64]) -> Result<()> {
    group.new_dataset_builder().with_data(values).create(name)?;
    Ok(())
}

/// Scalar i32 column, for exercising integer widening.
pub fn add_int_column(group: &Group, name: &str, values: &[i32]) -> Result<()> {
    group.new_dataset_builder().with_data(values).create(name)?;
    Ok(())
}

/// Fixed-length vector column, one row per matrix row.
pub fn add_vector_column(group: &Group, name: &str, values: &Array2<f64>) -> Result<()> {
    group.new_dataset_builder().with_data(values).create(name)?;
    Ok(())
}

/// String column; non-primitive, so comparison warns and skips it.
pub fn add_string_column(group: &Group, name: &str, values: &[&str]) -> Result<()> {
    let data = values
        .iter()
        .map(|value| {
            VarLenUnicode::from_str(value)
                .map_err(|string_error| Error::format(name, string_error.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    group.new_dataset_builder().with_data(&data).create(name)?;
    Ok(())
}

fn set_class(group: &Group, class: &str) -> Result<()> {
    let value = VarLenUnicode::from_str(class)
        .map_err(|string_error| Error::format(CLASS_ATTR, string_error.to_string()))?;
    group
        .new_attr::<VarLenUnicode>()
        .create(CLASS_ATTR)?
        .write_scalar(&value)?;
    Ok(())
}
