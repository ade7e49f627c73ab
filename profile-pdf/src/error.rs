use pdf_core::ImageError;

/// Broad failure class, for callers mapping errors onto responses
/// (bad input → 4xx, unexpected → 5xx).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadInput,
    Unexpected,
}

/// Engine-level document generation failure.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The avatar-only document was requested without image bytes.
    #[error("image bytes are required but none were supplied")]
    MissingImage,

    #[error("image could not be decoded: {0}")]
    Decode(#[from] ImageError),

    #[error("invalid profile payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("I/O error while generating document: {0}")]
    Io(#[from] std::io::Error),

    #[error("document generation failed: {0}")]
    Internal(String),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::MissingImage
            | ReportError::Decode(_)
            | ReportError::InvalidPayload(_) => ErrorKind::BadInput,
            ReportError::Io(_) | ReportError::Internal(_) => ErrorKind::Unexpected,
        }
    }
}
