//! Failure types shared by the form session and its platform adapters.
//!
//! `FormError` is what the session reports; its `Display` text is the message shown to
//! the user. `TransportError` and `PresentError` come from the platform capabilities
//! and are mapped onto `FormError` by the session.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please upload a valid Excel file (.xls or .xlsx)")]
    InvalidSpreadsheet,

    #[error("Please upload a valid DOCX template file")]
    InvalidTemplate,

    #[error("File size must not exceed 10MB")]
    FileTooLarge,

    #[error("Please select {0} before submitting")]
    MissingFile(&'static str),

    #[error("Measurement row {index} does not exist ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("At least one measurement row is required")]
    LastMeasurementRow,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("A download is already in progress")]
    DownloadInProgress,

    #[error("Could not encode measurements: {0}")]
    Encode(String),

    /// Server-provided text, or the generic upload failure message.
    #[error("{0}")]
    Upload(String),

    #[error("Submission cancelled")]
    Cancelled,

    #[error("Download failed, please try again later")]
    DownloadFailed,
}

/// Failure of a request issued by a `ReportEndpoint`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server responded with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("could not read attachment: {0}")]
    Attachment(String),

    #[error("request aborted")]
    Aborted,
}

/// Failure to hand a fetched document over to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not save {filename}: {reason}")]
pub struct PresentError {
    pub filename: String,
    pub reason: String,
}

impl PresentError {
    pub fn new(filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] TransportError),

    #[error(transparent)]
    Present(#[from] PresentError),
}
