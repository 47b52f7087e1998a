use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the visualization pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// A precondition on a parameter was violated.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        name: &'static str,
        message: String
    },

    /// The centroid stream does not split into whole iterations.
    #[error("centroid stream of {len} records is not a multiple of cluster count {k}")]
    StructuralMismatch {
        len: usize,
        k: usize
    },

    /// The external clustering step produced no centroid records.
    #[error("no centroid records found in {}", path.display())]
    EmptyCentroidStream {
        path: PathBuf
    },

    /// The external clustering program could not be started.
    #[error("could not start {}: {source}", executable.display())]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error
    },

    /// The external clustering program exited unsuccessfully.
    #[error("{} exited unsuccessfully ({status})", executable.display())]
    ExternalFailure {
        executable: PathBuf,
        status: std::process::ExitStatus
    },

    /// The external clustering program exited without writing its output file.
    #[error("expected output file {} was not written", path.display())]
    MissingOutput {
        path: PathBuf
    },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    /// Drawing backend failure while exporting an image.
    #[error("could not render {}: {message}", path.display())]
    Render {
        path: PathBuf,
        message: String
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter { name, message: message.into() }
    }
}
