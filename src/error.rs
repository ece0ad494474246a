//! Error types for the import and persistence pipeline
//!
//! Every fallible operation in the crate returns [`Result`]. Parsers report
//! failure to the caller instead of panicking; only internal invariant
//! violations (for example an index buffer whose length is not a multiple of
//! three after triangulation) are treated as programming errors and guarded
//! with debug assertions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for import and scene persistence operations
#[derive(Error, Debug)]
pub enum Error {
    /// The primary input file (OBJ or scene file) could not be opened.
    ///
    /// A missing material library is *not* reported through this variant to
    /// the import caller; the geometry parser logs a warning and continues
    /// with an empty material table.
    #[error("could not open '{path}': {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A face directive listed fewer than three vertex references.
    #[error("malformed face on line {line}: found {found} vertex reference(s), need at least 3")]
    MalformedFace { line: usize, found: usize },

    /// A face directive listed more than three vertex references while the
    /// importer was configured to reject n-gons.
    #[error("face on line {line} is not a triangle (n-gon rejection enabled)")]
    NonTriangularFace { line: usize },

    /// A face reference was not a positive integer, or pointed past the end
    /// of the vertex list parsed so far.
    #[error("face on line {line}: invalid vertex reference '{reference}' ({vertex_count} vertices defined)")]
    InvalidFaceIndex {
        line: usize,
        reference: String,
        vertex_count: usize,
    },

    /// A scene file could not be parsed as the expected document tree.
    #[error("corrupt scene file: {reason}")]
    CorruptScene { reason: String },

    /// An underlying I/O failure while reading or writing an open file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for meshview operations
pub type Result<T> = std::result::Result<T, Error>;
