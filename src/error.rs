//! Error types for the pdf-stamp crate.

/// Errors that can occur while preparing a stamp or compositing it onto a PDF.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stamp image could not be decoded or the processed stamp could not be encoded.
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The PDF document could not be loaded, edited, or saved.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// The requested stamp height is not a positive number of points.
    #[error("invalid stamp size {0}: must be at least 1 point")]
    InvalidSize(u32),

    /// The input document has no pages to stamp.
    #[error("document has no pages")]
    EmptyDocument,

    /// A page has no usable `MediaBox`, so its geometry is unknown.
    #[error("page {0} has no usable MediaBox")]
    MissingMediaBox(u32),

    /// A page dictionary or its resources have an unexpected shape.
    #[error("malformed page {page}: {reason}")]
    MalformedPage {
        /// 1-based page number.
        page: u32,
        /// What was wrong with the page.
        reason: String,
    },
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
