//! Structure report of an HDF5 file: the group tree with attributes,
//! datasets and compound-type fields, one line per object.

use std::io::Write;

use hdf5::types::{TypeDescriptor, VarLenUnicode};
use hdf5::{Group, Location};

use crate::error::Result;
use crate::reader::type_name;

const TAB: &str = "    ";

/// Write the structure of `file` to `out`.
pub fn summarize_file<W: Write>(file: &hdf5::File, out: &mut W) -> Result<()> {
    write_group(file, out, "")
}

fn write_group<W: Write>(group: &Group, out: &mut W, indent: &str) -> Result<()> {
    writeln!(out, "{indent}- {}", group.name())?;
    write_attributes(group, out, &format!("{indent}{TAB}"))?;
    let mut n_datasets = 0;
    for member in group.member_names()? {
        if let Ok(child) = group.group(&member) {
            write_group(&child, out, &format!("{indent}{TAB}"))?;
        } else if let Ok(dataset) = group.dataset(&member) {
            n_datasets += 1;
            let descriptor = dataset.dtype()?.to_descriptor()?;
            let type_note = match &descriptor {
                TypeDescriptor::Compound(_) => String::new(),
                other => format!(" [{}]", type_name(other)),
            };
            writeln!(
                out,
                "{indent}{TAB}- Dataset {n_datasets:>3}) {member} {:?}{type_note}",
                dataset.shape()
            )?;
            write_attributes(&dataset, out, &format!("{indent}{TAB}{TAB}"))?;
            if let TypeDescriptor::Compound(compound) = &descriptor {
                write_compound_fields(compound, out, &format!("{indent}{TAB}{TAB}"))?;
            }
        } else {
            writeln!(out, "{indent}{TAB}- Unknown member: {member}")?;
        }
    }
    Ok(())
}

fn write_attributes<W: Write>(location: &Location, out: &mut W, indent: &str) -> Result<()> {
    let attr_names = location.attr_names()?;
    if attr_names.is_empty() {
        return Ok(());
    }
    writeln!(out, "{indent}- Attributes")?;
    for name in attr_names {
        let attr = location.attr(&name)?;
        writeln!(out, "{indent}{TAB}- {name} : {}", attribute_repr(&attr))?;
    }
    Ok(())
}

/// Best-effort rendering of an attribute value: string, then numeric, then
/// just the element type.
fn attribute_repr(attr: &hdf5::Attribute) -> String {
    if let Ok(text) = attr.read_scalar::<VarLenUnicode>() {
        return text.to_string();
    }
    if let Ok(values) = attr.read_raw::<f64>() {
        if values.len() == 1 {
            return format!("{}", values[0]);
        }
        return format!("{values:?}");
    }
    match attr.dtype().and_then(|dtype| dtype.to_descriptor()) {
        Ok(descriptor) => format!("<{}>", type_name(&descriptor)),
        Err(_) => "<unreadable>".to_string(),
    }
}

fn write_compound_fields<W: Write>(
    compound: &hdf5::types::CompoundType,
    out: &mut W,
    indent: &str,
) -> Result<()> {
    for field in &compound.fields {
        if let TypeDescriptor::Compound(inner) = &field.ty {
            writeln!(out, "{indent}- {}", field.name)?;
            write_compound_fields(inner, out, &format!("{indent}{TAB}"))?;
        } else {
            writeln!(out, "{indent}- {} [{}]", field.name, type_name(&field.ty))?;
        }
    }
    Ok(())
}
