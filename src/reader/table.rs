//! In-memory model of a flat table entry.
//!
//! Only the schema is read up front; cell values are fetched row by row,
//! since comparison touches a bounded sample of rows.

use std::collections::BTreeSet;

use hdf5::types::TypeDescriptor;
use hdf5::{Dataset, Group};
use ndarray::s;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::reader::type_name;

/// Value of one table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Scalar numeric cell
    Scalar(f64),
    /// Fixed-length numeric vector cell
    Vector(SmallVec<[f64; 8]>),
}

/// Shape of a comparable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// One number per row
    Scalar,
    /// A fixed-length vector per row; the payload is the element count
    Vector(usize),
}

/// Accessor for one comparable column.
pub struct Column {
    dataset: Dataset,
    kind: ColumnKind,
}

impl Column {
    /// Shape of this column.
    #[must_use]
    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    /// Read the cell at `row`. All numeric storage types are widened to
    /// `f64`.
    pub fn value(&self, row: usize) -> Result<RowValue> {
        match self.kind {
            ColumnKind::Scalar => {
                let cell = self.dataset.read_slice_1d::<f64, _>(s![row..=row])?;
                Ok(RowValue::Scalar(cell[0]))
            }
            ColumnKind::Vector(_) => {
                let cells = self.dataset.read_slice_1d::<f64, _>(s![row, ..])?;
                Ok(RowValue::Vector(cells.iter().copied().collect()))
            }
        }
    }
}

/// A flat table entry: a fixed row count plus a column-name → accessor map
/// built when the group is opened.
pub struct Table {
    name: String,
    n_rows: usize,
    columns: FxHashMap<String, Column>,
    non_primitive: Vec<(String, String)>,
}

impl Table {
    /// Read a tagged table group, building the accessor map.
    pub(crate) fn from_group(group: &Group, name: &str) -> Result<Self> {
        let mut columns = FxHashMap::default();
        let mut non_primitive = Vec::new();
        let mut n_rows: Option<usize> = None;
        for column_name in group.member_names()? {
            let Ok(dataset) = group.dataset(&column_name) else {
                non_primitive.push((column_name, "not a dataset".to_string()));
                continue;
            };
            let descriptor = dataset.dtype()?.to_descriptor()?;
            if !is_numeric(&descriptor) {
                non_primitive.push((column_name, type_name(&descriptor)));
                continue;
            }
            let shape = dataset.shape();
            let kind = match shape.len() {
                1 => ColumnKind::Scalar,
                2 => ColumnKind::Vector(shape[1]),
                n => {
                    non_primitive.push((column_name, format!("{n}-dimensional dataset")));
                    continue;
                }
            };
            let rows = shape[0];
            match n_rows {
                None => n_rows = Some(rows),
                Some(expected) if expected != rows => {
                    return Err(Error::format(
                        name,
                        format!("column '{column_name}' has {rows} rows, expected {expected}"),
                    ));
                }
                Some(_) => {}
            }
            columns.insert(column_name, Column { dataset, kind });
        }
        Ok(Self {
            name: name.to_string(),
            n_rows: n_rows.unwrap_or(0),
            columns,
            non_primitive,
        })
    }

    /// Entry name of this table.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed row count.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Names of every column, comparable or not.
    #[must_use]
    pub fn column_names(&self) -> BTreeSet<String> {
        self.columns
            .keys()
            .cloned()
            .chain(self.non_primitive.iter().map(|(name, _)| name.clone()))
            .collect()
    }

    /// Accessor for a comparable column, if there is one by that name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Columns excluded from comparison, with a description of their type.
    #[must_use]
    pub fn non_primitive_columns(&self) -> &[(String, String)] {
        &self.non_primitive
    }
}

fn is_numeric(descriptor: &TypeDescriptor) -> bool {
    matches!(
        descriptor,
        TypeDescriptor::Integer(_) | TypeDescriptor::Unsigned(_) | TypeDescriptor::Float(_)
    )
}
