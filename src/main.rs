//! Check if two analysis files containing histograms and/or flat tables are
//! identical.
//!
//! Examples
//!     hdf-compare file1.h5 file2.h5

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use hdf_compare::compare::compare_files;
use hdf_compare::config::CompareConfig;
use hdf_compare::reader::AnalysisFile;
use hdf_compare::utils::logging;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

/// Exit code shared by "files differ" and "no valid comparison possible".
const EXIT_NOT_IDENTICAL: u8 = 3;

/// Check if two analysis files containing histograms and/or flat tables are identical
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// 1st input file for comparison
    file1: PathBuf,

    /// 2nd input file for comparison
    file2: PathBuf,

    /// Logger message level
    #[arg(short = 'd', long, default_value = "WARNING")]
    debug_level: String,

    /// JSON file with comparison settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of randomly sampled rows compared per table
    #[arg(long)]
    n_sample_rows: Option<usize>,

    /// Relative tolerance for numeric cells
    #[arg(long)]
    rel_tol: Option<f64>,

    /// Fixed sampling seed; sampled from the OS when unset
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let args = Args::parse();

    let level = logging::parse_level(&args.debug_level)
        .with_context(|| format!("unknown debug level '{}'", args.debug_level))?;
    logging::init_logging(level);
    log::debug!("{}", ">".repeat(40));
    log::debug!("Running hdf-compare...");

    for path in [&args.file1, &args.file2] {
        if !path.is_file() {
            log::error!("Cannot find input file: {}", path.display());
            return Ok(ExitCode::from(EXIT_NOT_IDENTICAL));
        }
    }

    let mut config = match &args.config {
        Some(path) => CompareConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CompareConfig::default(),
    };
    if let Some(n_sample_rows) = args.n_sample_rows {
        config.n_sample_rows = n_sample_rows;
    }
    if let Some(rel_tol) = args.rel_tol {
        config.rel_tol = rel_tol;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate().context("invalid comparison settings")?;

    let file1 = AnalysisFile::open(&args.file1)
        .with_context(|| format!("failed to open {}", args.file1.display()))?;
    let file2 = AnalysisFile::open(&args.file2)
        .with_context(|| format!("failed to open {}", args.file2.display()))?;

    let verdict = compare_files(&file1, &file2, &config)?;

    log::debug!("TOTAL TIME: {:?}", start.elapsed());
    log::debug!("{}", "<".repeat(40));
    Ok(ExitCode::from(verdict.exit_code()))
}
