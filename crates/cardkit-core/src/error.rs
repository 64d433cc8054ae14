//! Error handling for CardKit
//!
//! Provides error types for all layers of the editor:
//! - Document errors (malformed or inconsistent templates)
//! - Codec errors (barcode and QR symbol generation)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Document error type
///
/// Raised at the boundary when an external template (file import, stored
/// session) cannot be accepted. The live document is never modified when one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// Input could not be parsed as a template
    #[error("Malformed template: {reason}")]
    Malformed {
        /// Parser diagnostic.
        reason: String,
    },

    /// A required top-level section is absent
    #[error("Template is missing required section '{section}'")]
    MissingSection {
        /// Name of the missing section.
        section: String,
    },

    /// Two elements share an identifier
    #[error("Duplicate element id '{id}'")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// Element identifiers must not be empty
    #[error("Element at index {index} has an empty id")]
    EmptyId {
        /// Position of the element in paint order.
        index: usize,
    },

    /// Grid pitch must be a positive integer
    #[error("Invalid grid size {size}")]
    InvalidGrid {
        /// The rejected pitch.
        size: i64,
    },

    /// Card page dimensions must be positive
    #[error("Invalid page size {width}x{height}")]
    InvalidPage {
        /// Card width in pixels.
        width: f64,
        /// Card height in pixels.
        height: f64,
    },

    /// No element with the given id
    #[error("Unknown element '{id}'")]
    UnknownElement {
        /// The identifier that was looked up.
        id: String,
    },
}

/// Codec error type
///
/// Represents failures of the symbol encoders. These never abort a render;
/// the caller degrades to drawing nothing for the symbol.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Barcode payload is empty
    #[error("Cannot encode an empty value")]
    EmptyValue,

    /// CODE128 encoder rejected the payload
    #[error("CODE128 encoding failed for '{value}': {reason}")]
    Code128 {
        /// The rejected payload.
        value: String,
        /// Encoder diagnostic.
        reason: String,
    },

    /// QR encoder rejected the payload
    #[error("QR encoding failed: {reason}")]
    Qr {
        /// Encoder diagnostic.
        reason: String,
    },

    /// Target raster could not be allocated
    #[error("Cannot allocate a {width}x{height} symbol raster")]
    Raster {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The background worker went away before answering
    #[error("Symbol worker disconnected")]
    WorkerGone,
}

/// Main error type for CardKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Codec error
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a document error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }

    /// Check if this is a codec error
    pub fn is_codec_error(&self) -> bool {
        matches!(self, Error::Codec(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
