//! Error types for framestore
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::container::NodeKind;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for framestore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    /// Operation attempted after `close()`. Always fatal to the call.
    #[error("store is closed")]
    ClosedStore,

    /// Mutating call on a store opened read-only.
    #[error("store is read-only: {op} requires write access")]
    ReadOnly { op: &'static str },

    /// `create-must-not-exist` open against an existing file.
    #[error("container file already exists: {path}")]
    AlreadyExists { path: String },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    /// Referenced frame, dataset, or group does not exist. Never auto-created
    /// on a read path.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Frame number does not fit the fixed 7-digit group-name width.
    #[error("frame number {frame} exceeds the supported range")]
    FrameOutOfRange { frame: u64 },

    /// Dataset name with no usable path segments.
    #[error("invalid dataset name: {name:?}")]
    InvalidName { name: String },

    // -------------------------------------------------------------------------
    // Structural Errors
    // -------------------------------------------------------------------------
    /// A path names the wrong kind of node (group where a dataset was
    /// expected, or vice versa). Indicates container corruption or an
    /// inconsistent caller schema.
    #[error("structural error at '{path}' in {file:?}: expected {expected}, found {found}")]
    Structural {
        path: String,
        expected: NodeKind,
        found: NodeKind,
        file: PathBuf,
    },

    // -------------------------------------------------------------------------
    // Conflict Errors
    // -------------------------------------------------------------------------
    /// Attribute set collided with existing keys and `overwrite` was false.
    /// All-or-nothing: no keys were written.
    #[error("attribute conflict at '{path}': keys {keys:?} already exist")]
    AttrConflict { path: String, keys: Vec<String> },

    /// Dataset already exists and `overwrite` was false.
    #[error("dataset already exists: {path}")]
    DatasetExists { path: String },

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    /// Shape does not match the number of elements.
    #[error("shape mismatch: shape holds {expected} elements, data holds {actual}")]
    ShapeMismatch { expected: u64, actual: usize },

    // -------------------------------------------------------------------------
    // Container Format Errors
    // -------------------------------------------------------------------------
    #[error("container corruption detected: {0}")]
    Corruption(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
