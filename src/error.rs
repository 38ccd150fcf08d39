use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a run, each with its own process exit code.
#[derive(Debug, Error)]
pub enum PitchError {
    #[error("Error reading input file {} ({message})", .path.display())]
    Input { path: PathBuf, message: String },

    #[error("Error writing output file {} ({source})", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl PitchError {
    /// Clap already uses 2 for usage errors, so input and output failures sit
    /// at the top of the range.
    pub fn exit_code(&self) -> u8 {
        match self {
            PitchError::Config(_) => 1,
            PitchError::Input { .. } => 254,
            PitchError::Output { .. } => 253,
        }
    }
}
