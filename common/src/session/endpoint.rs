//! Platform capabilities the session is driven with.

use crate::error::{PresentError, TransportError};
use crate::model::upload::UploadResponse;
use crate::requests::UploadPayload;

/// The report service: one multipart upload, and binary fetches of generated documents.
///
/// Futures are not required to be `Send`; the browser implementation holds JS values
/// across await points.
#[allow(async_fn_in_trait)]
pub trait ReportEndpoint {
    /// Platform handle carried by `SelectedFile`.
    type File;

    /// `POST /upload` with the payload encoded as `multipart/form-data`.
    ///
    /// A non-2xx answer must be reported as `TransportError::Status`, carrying the
    /// `message` of the JSON error body when there is one.
    async fn upload(&self, payload: UploadPayload<Self::File>) -> Result<UploadResponse, TransportError>;

    /// `GET <url>` returning the raw document bytes. Any non-2xx status is a failure.
    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Hands a fetched document to the user: a one-shot browser save, or a file write.
pub trait DownloadPresenter {
    fn present(&self, bytes: &[u8], filename: &str) -> Result<(), PresentError>;
}
