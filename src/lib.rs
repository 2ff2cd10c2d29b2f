//! A Rust library for structural comparison of hierarchical analysis files
//! holding binned histograms and flat tables.
//!
//! The comparison is a whole-file pass/fail check: the top-level key sets of
//! the two files are reconciled first, then every shared entry is compared
//! in turn and the run stops at the first mismatch. Histograms compare
//! through a canonical text form (under/overflow bins included); tables
//! compare a bounded random sample of rows with numeric tolerance.

pub mod compare;
pub mod config;
pub mod error;
pub mod reader;
pub mod summary;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use compare::{Verdict, compare_files};
pub use config::CompareConfig;
pub use error::{Error, Result};
pub use reader::{AnalysisFile, Entry, Histogram, Table};
