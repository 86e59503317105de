//! Error types for the scene exporter.

use thiserror::Error;

/// Result type alias using ExportError.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for scene export operations.
#[derive(Error, Debug)]
pub enum ExportError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or parse JSON data.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to read or process an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// No exportable nodes after filtering (nothing selected or all inactive).
    #[error("No exportable nodes in the scene")]
    EmptySelection,

    /// A scene handle points outside its arena.
    #[error("Invalid scene data: {0}")]
    InvalidScene(String),

    /// Failed to produce the output document or files.
    #[error("Export error: {0}")]
    Export(String),
}
