//! Error handling for the analysis-file tools.

use std::io;

/// Errors that can occur while reading or comparing analysis files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the underlying HDF5 library
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An entry group that does not follow the expected layout
    #[error("Format error in '{object}': {message}")]
    Format {
        /// Name of the offending entry or dataset
        object: String,
        /// What was wrong with it
        message: String,
    },

    /// Malformed JSON in a configuration file
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Rejected configuration value
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a [`Error::Format`] about the named object.
    pub(crate) fn format(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            object: object.into(),
            message: message.into(),
        }
    }
}

/// Result type for analysis-file operations
pub type Result<T> = std::result::Result<T, Error>;
