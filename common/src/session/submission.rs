//! Submission builder.
//!
//! # Workflow
//!
//! 1. `begin_submission` checks that the required files are selected (otherwise nothing
//!    happens), raises the `loading` flag, clears the previous notice and download URL
//!    and assembles the `UploadPayload`.
//! 2. The caller hands the payload to its `ReportEndpoint`.
//! 3. `finish_submission` maps the endpoint outcome onto the session: the download URL
//!    and success notice, or an error notice. Dropping the guard lowers `loading`.
//!
//! `submit` runs the three steps in one future.

use super::{BusyGuard, FormSession, Notice, ReportEndpoint, SUCCESS_MESSAGE, UPLOAD_FALLBACK_MESSAGE};
use crate::error::{FormError, TransportError};
use crate::model::upload::UploadResponse;
use crate::requests::{
    IMAGES_FIELD, MEASUREMENTS_FIELD, PRIMARY_FIELD, TEMPLATE_FIELD, UploadPayload,
    encode_measurements,
};

/// An accepted submission: the payload to send and the guard keeping `loading` raised.
#[derive(Debug)]
pub struct SubmissionTicket<H> {
    payload: UploadPayload<H>,
    guard: BusyGuard,
}

impl<H> SubmissionTicket<H> {
    pub fn payload(&self) -> &UploadPayload<H> {
        &self.payload
    }

    pub fn into_parts(self) -> (UploadPayload<H>, BusyGuard) {
        (self.payload, self.guard)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A required file was missing; no request was made and the session is untouched.
    Skipped,
    Completed { download_url: String },
}

impl<H> FormSession<H> {
    /// Assembles the multipart payload from the current state, in wire order.
    pub fn build_payload(&self) -> Result<UploadPayload<H>, FormError>
    where
        H: Clone,
    {
        let mut payload = UploadPayload::new();

        if let Some(file) = &self.primary {
            payload.push_file(PRIMARY_FIELD, file.clone());
        }
        if let Some(file) = self.template.as_ref().filter(|_| self.variant.requires_template()) {
            payload.push_file(TEMPLATE_FIELD, file.clone());
        }
        for image in &self.images {
            payload.push_file(IMAGES_FIELD, image.clone());
        }
        for (field, value) in self.fields.iter() {
            payload.push_text(field.form_name(), value);
        }

        let measurements =
            encode_measurements(&self.measurements).map_err(|e| FormError::Encode(e.to_string()))?;
        payload.push_text(MEASUREMENTS_FIELD, measurements);

        log::debug!("payload parts: {:?}", payload.names());
        Ok(payload)
    }

    /// Starts a submission.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - a required file is missing; nothing changed.
    /// * `Ok(Some(ticket))` - the payload to upload, with `loading` raised until the
    ///   ticket's guard is dropped.
    /// * `Err(SubmissionInProgress)` - another submission holds the flag; the notice is
    ///   left alone.
    pub fn begin_submission(&mut self) -> Result<Option<SubmissionTicket<H>>, FormError>
    where
        H: Clone,
    {
        if let Some(missing) = self.missing_requirement() {
            log::debug!("submission skipped: {missing}");
            return Ok(None);
        }

        let guard = self
            .loading
            .try_acquire()
            .ok_or(FormError::SubmissionInProgress)?;

        self.notice = None;
        self.download_url = None;

        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(error) => {
                self.report(&error);
                return Err(error);
            }
        };

        log::info!(
            "submitting report with {} image(s) and {} measurement row(s)",
            self.images.len(),
            self.measurements.len()
        );
        Ok(Some(SubmissionTicket { payload, guard }))
    }

    /// Applies the endpoint outcome and releases `loading`.
    ///
    /// # Arguments
    ///
    /// * `guard` - Guard taken from the `SubmissionTicket`.
    /// * `outcome` - What the endpoint returned for the upload.
    ///
    /// # Returns
    ///
    /// The stored download URL, or the error now shown as the notice.
    pub fn finish_submission(
        &mut self,
        guard: BusyGuard,
        outcome: Result<UploadResponse, TransportError>,
    ) -> Result<String, FormError> {
        let result = match outcome {
            Ok(response) => response
                .into_download_url()
                .map_err(|message| FormError::Upload(message.unwrap_or_else(fallback_message))),
            Err(TransportError::Aborted) => Err(FormError::Cancelled),
            Err(TransportError::Status { status, message }) => {
                log::warn!("upload rejected with status {status}");
                Err(FormError::Upload(message.unwrap_or_else(fallback_message)))
            }
            Err(other) => {
                log::error!("upload failed: {other}");
                Err(FormError::Upload(fallback_message()))
            }
        };

        match &result {
            Ok(url) => {
                log::info!("report generated at {url}");
                self.download_url = Some(url.clone());
                self.notice = Some(Notice::Success(SUCCESS_MESSAGE.to_string()));
            }
            Err(error) => {
                log::warn!("submission failed: {error}");
                self.report(error);
            }
        }

        drop(guard);
        result
    }

    /// Builds, uploads and records the outcome of one submission.
    pub async fn submit<E>(&mut self, endpoint: &E) -> Result<SubmitOutcome, FormError>
    where
        E: ReportEndpoint<File = H>,
        H: Clone,
    {
        let Some(ticket) = self.begin_submission()? else {
            return Ok(SubmitOutcome::Skipped);
        };
        let (payload, guard) = ticket.into_parts();
        let outcome = endpoint.upload(payload).await;
        let download_url = self.finish_submission(guard, outcome)?;
        Ok(SubmitOutcome::Completed { download_url })
    }
}

fn fallback_message() -> String {
    UPLOAD_FALLBACK_MESSAGE.to_string()
}
