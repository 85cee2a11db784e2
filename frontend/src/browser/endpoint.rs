use gloo_net::http::{Request, Response};
use web_sys::{AbortSignal, File, FormData};

use common::error::TransportError;
use common::model::upload::{ErrorBody, UploadResponse};
use common::requests::{FormPart, UPLOAD_PATH, UploadPayload};
use common::session::ReportEndpoint;

use super::describe_js;

/// The report service on the page's own origin.
///
/// When built `with_abort_signal`, aborting the signal cancels the upload and the
/// failure is reported as `TransportError::Aborted`.
#[derive(Clone, Default)]
pub struct BrowserEndpoint {
    base_url: String,
    signal: Option<AbortSignal>,
}

impl BrowserEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_abort_signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request_failed(&self, err: gloo_net::Error) -> TransportError {
        if self.signal.as_ref().is_some_and(AbortSignal::aborted) {
            TransportError::Aborted
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Copies the payload into a `FormData`, part by part, keeping original file names.
fn encode_form(payload: UploadPayload<File>) -> Result<FormData, TransportError> {
    let form = FormData::new().map_err(|e| TransportError::Attachment(describe_js(&e)))?;
    for part in payload.into_parts() {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, &value),
            FormPart::File { name, file } => {
                form.append_with_blob_and_filename(name, &file.handle, &file.name)
            }
        }
        .map_err(|e| TransportError::Attachment(describe_js(&e)))?;
    }
    Ok(form)
}

async fn error_status(response: Response) -> TransportError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message);
    TransportError::Status { status, message }
}

impl ReportEndpoint for BrowserEndpoint {
    type File = File;

    async fn upload(&self, payload: UploadPayload<File>) -> Result<UploadResponse, TransportError> {
        let form = encode_form(payload)?;
        let request = Request::post(&self.url(UPLOAD_PATH))
            .abort_signal(self.signal.as_ref())
            .body(form)
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let response = request.send().await.map_err(|e| self.request_failed(e))?;
        if !response.ok() {
            return Err(error_status(response).await);
        }

        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(TransportError::Status {
                status: response.status(),
                message: None,
            });
        }

        response
            .binary()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
