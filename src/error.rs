use thiserror::Error;

/// Every error the assembly engine can surface to its caller.
///
/// Per-attachment problems (fetch failures, unparseable PDFs, undecodable
/// images, unsupported media types) are deliberately *not* represented here:
/// they are logged and skipped inside the merge loop. The only caller-visible
/// failure points are base-page rendering and final serialization.
#[derive(Error, Debug)]
pub enum Error {
    /// A filesystem or buffer I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory document could not be parsed or serialized.
    #[error("PDF structure error: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Failure reported by an [`AttachmentFetcher`](crate::AttachmentFetcher)
/// implementation. Not-found and transient network errors are treated
/// identically by the merger: the attachment is skipped.
#[derive(Error, Debug)]
#[error("attachment fetch failed: {reason}")]
pub struct FetchError {
    pub reason: String,
}

impl FetchError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}
