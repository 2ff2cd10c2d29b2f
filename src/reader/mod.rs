//! Read-only access to hierarchical analysis files.
//!
//! An analysis file is an HDF5 file whose top-level groups carry a string
//! `class` attribute naming their kind. A `"histogram"` group holds
//! `x_edges` (and optionally `y_edges`, `z_edges`) plus a dense `counts`
//! array whose extent per axis is `n_bins + 2`: underflow at index 0,
//! overflow at the last index. A `"table"` group holds one dataset per
//! column: 1-D numeric datasets are scalar columns, 2-D numeric datasets
//! are fixed-length vector columns, anything else is a non-primitive
//! column that comparison skips. Any other top-level member is an entry of
//! unknown kind.

mod histogram;
mod table;

pub use histogram::{Axis, Histogram};
pub(crate) use histogram::EDGE_DATASETS;
pub use table::{Column, ColumnKind, RowValue, Table};

use std::path::Path;

use hdf5::Group;
use hdf5::types::{TypeDescriptor, VarLenUnicode};

use crate::error::{Error, Result};

/// Attribute naming the kind of a top-level entry group
pub const CLASS_ATTR: &str = "class";
/// `class` value tagging a histogram group
pub const HISTOGRAM_CLASS: &str = "histogram";
/// `class` value tagging a table group
pub const TABLE_CLASS: &str = "table";

/// A read-only handle to an analysis file.
///
/// The underlying HDF5 handle closes when this value is dropped, on every
/// exit path.
pub struct AnalysisFile {
    file: hdf5::File,
    name: String,
}

impl AnalysisFile {
    /// Open the file at `path` for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = hdf5::File::open(path)?;
        Ok(Self {
            file,
            name: path.display().to_string(),
        })
    }

    /// Display name of the file (the path it was opened with).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the top-level entries, in file-native order.
    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.file.member_names()?)
    }

    /// Fetch the entry with the given name as a typed object.
    pub fn entry(&self, key: &str) -> Result<Entry> {
        if let Ok(group) = self.file.group(key) {
            match read_class_attr(&group)?.as_deref() {
                Some(HISTOGRAM_CLASS) => Ok(Entry::Histogram(Histogram::from_group(&group, key)?)),
                Some(TABLE_CLASS) => Ok(Entry::Table(Table::from_group(&group, key)?)),
                Some(other) => Ok(Entry::Other {
                    kind: format!("group tagged '{other}'"),
                }),
                None => Ok(Entry::Other {
                    kind: "untagged group".into(),
                }),
            }
        } else if self.file.dataset(key).is_ok() {
            Ok(Entry::Other {
                kind: "bare dataset".into(),
            })
        } else {
            Err(Error::format(key, "no such entry"))
        }
    }
}

/// A typed top-level entry of an analysis file.
pub enum Entry {
    /// N-dimensional binned histogram, under/overflow bins included
    Histogram(Histogram),
    /// Flat fixed-schema table
    Table(Table),
    /// Anything the comparator does not understand
    Other {
        /// Short description of what was found instead
        kind: String,
    },
}

impl Entry {
    /// Short human-readable kind, used in mismatch messages.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Entry::Histogram(_) => "histogram",
            Entry::Table(_) => "table",
            Entry::Other { kind } => kind,
        }
    }
}

fn read_class_attr(group: &Group) -> Result<Option<String>> {
    if !group.attr_names()?.iter().any(|name| name == CLASS_ATTR) {
        return Ok(None);
    }
    let attr = group.attr(CLASS_ATTR)?;
    let value = attr.read_scalar::<VarLenUnicode>()?;
    Ok(Some(value.as_str().to_string()))
}

/// Short name for a dataset element type, e.g. `float64` or `str`.
#[must_use]
pub(crate) fn type_name(descriptor: &TypeDescriptor) -> String {
    use TypeDescriptor as TD;
    match descriptor {
        TD::Integer(size) => format!("int{}", 8 * *size as usize),
        TD::Unsigned(size) => format!("uint{}", 8 * *size as usize),
        TD::Float(size) => format!("float{}", 8 * *size as usize),
        TD::Boolean => "bool".into(),
        TD::Enum(_) => "enum".into(),
        TD::Compound(_) => "compound".into(),
        TD::FixedArray(inner, n) => format!("{}[{n}]", type_name(inner)),
        TD::FixedAscii(n) | TD::FixedUnicode(n) => format!("str{n}"),
        TD::VarLenAscii | TD::VarLenUnicode => "str".into(),
        TD::VarLenArray(inner) => format!("{}[]", type_name(inner)),
    }
}
