//! Print the structure of an HDF5 file.
//!
//! Examples
//!     summarize_hdf file.hdf5 > output.txt

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use hdf_compare::summary::summarize_file;

/// Print the structure of an HDF5 file
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Input HDF5 file
    ifile_path: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    if !args.ifile_path.is_file() {
        eprintln!("ERROR :: Cannot find input file: {}", args.ifile_path.display());
        return Ok(ExitCode::from(3));
    }

    println!("Exploring {}", args.ifile_path.display());
    let start = Instant::now();
    let file = hdf5::File::open(&args.ifile_path)
        .with_context(|| format!("failed to open {}", args.ifile_path.display()))?;
    let stdout = io::stdout();
    summarize_file(&file, &mut stdout.lock())?;
    println!("Time to process: {:?}", start.elapsed());
    Ok(ExitCode::SUCCESS)
}
