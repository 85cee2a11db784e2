//! The report service over HTTP.
//!
//! Payload parts map one to one onto a `reqwest::multipart::Form`; file parts are read
//! from disk when the request is built and keep their original file names.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};

use common::error::TransportError;
use common::model::file::SelectedFile;
use common::model::upload::{ErrorBody, UploadResponse};
use common::requests::{FormPart, UPLOAD_PATH, UploadPayload};
use common::session::ReportEndpoint;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    client: Client,
    base_url: Url,
}

impl HttpEndpoint {
    pub fn new(server: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(server).with_context(|| format!("invalid server URL {server:?}"))?;
        let client = Client::builder()
            .user_agent(concat!("report-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("cannot build HTTP client")?;
        Ok(Self { client, base_url })
    }

    /// Resolves a path or URL from the service against the base URL.
    pub fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(url)
            .map_err(|e| TransportError::Network(format!("invalid URL {url:?}: {e}")))
    }
}

async fn file_part(file: SelectedFile<PathBuf>) -> Result<Part, TransportError> {
    let bytes = tokio::fs::read(&file.handle)
        .await
        .map_err(|e| TransportError::Attachment(format!("{}: {e}", file.handle.display())))?;
    let media_type = if file.media_type.is_empty() {
        OCTET_STREAM
    } else {
        file.media_type.as_str()
    };
    Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str(media_type)
        .map_err(|e| TransportError::Attachment(format!("{}: {e}", file.name)))
}

async fn encode_form(payload: UploadPayload<PathBuf>) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, file } => form.part(name, file_part(file).await?),
        };
    }
    Ok(form)
}

fn network_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Network("request timed out".to_string())
    } else {
        TransportError::Network(err.to_string())
    }
}

async fn error_status(response: Response) -> TransportError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message);
    TransportError::Status { status, message }
}

impl ReportEndpoint for HttpEndpoint {
    type File = PathBuf;

    async fn upload(&self, payload: UploadPayload<PathBuf>) -> Result<UploadResponse, TransportError> {
        let url = self.resolve(UPLOAD_PATH)?;
        let form = encode_form(payload).await?;

        log::debug!("POST {url}");
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(network_error)?;
        if !response.status().is_success() {
            return Err(error_status(response).await);
        }

        response
            .json::<UploadResponse>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn fetch_document(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.resolve(url)?;

        log::debug!("GET {url}");
        let response = self.client.get(url).send().await.map_err(network_error)?;
        if !response.status().is_success() {
            return Err(TransportError::Status {
                status: response.status().as_u16(),
                message: None,
            });
        }

        let bytes = response.bytes().await.map_err(network_error)?;
        Ok(bytes.to_vec())
    }
}
