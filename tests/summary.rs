//! Structure-report output over a real file.

use hdf5::H5Type;
use tempfile::TempDir;

use hdf_compare::Result;
use hdf_compare::summary::summarize_file;
use hdf_compare::utils::test_utils::{
    add_scalar_column, create_analysis_file, create_table, write_histogram_1d,
};

#[derive(H5Type, Clone)]
#[repr(C)]
struct TrackPoint {
    x: f64,
    charge: i32,
}

#[test]
fn report_lists_groups_datasets_and_attributes() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("a.h5");
    {
        let file = create_analysis_file(&path)?;
        write_histogram_1d(&file, "h1", &[0.0, 1.0, 2.0], &[0.0, 3.0, 4.0, 1.0])?;
        let table = create_table(&file, "tree1")?;
        add_scalar_column(&table, "x", &[1.0, 2.0])?;
    }

    let file = hdf5::File::open(&path)?;
    let mut out = Vec::new();
    summarize_file(&file, &mut out)?;
    let report = String::from_utf8(out).expect("report is UTF-8");

    assert!(report.contains("- /"));
    assert!(report.contains("/h1"));
    assert!(report.contains("/tree1"));
    assert!(report.contains("- Attributes"));
    assert!(report.contains("class : histogram"));
    assert!(report.contains("class : table"));
    assert!(report.contains("x_edges [3] [float64]"));
    assert!(report.contains("counts [4] [float64]"));
    assert!(report.contains("x [2] [float64]"));
    Ok(())
}

#[test]
fn report_expands_compound_dataset_fields() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("a.h5");
    {
        let file = create_analysis_file(&path)?;
        let points = vec![
            TrackPoint { x: 0.5, charge: -1 },
            TrackPoint { x: 1.5, charge: 1 },
        ];
        file.new_dataset_builder()
            .with_data(&points)
            .create("points")?;
    }

    let file = hdf5::File::open(&path)?;
    let mut out = Vec::new();
    summarize_file(&file, &mut out)?;
    let report = String::from_utf8(out).expect("report is UTF-8");

    assert!(report.contains("points [2]"));
    assert!(report.contains("- x [float64]"));
    assert!(report.contains("- charge [int32]"));
    Ok(())
}
