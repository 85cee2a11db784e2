//! Download trigger.
//!
//! Fetches a generated document and hands it to a `DownloadPresenter` under a filename
//! derived from the URL. Any failure, whether fetching or presenting, ends with the same
//! generic notice; the stored download URL is kept so the user can simply retry.

use super::{BusyGuard, DownloadPresenter, FormSession, ReportEndpoint};
use crate::error::{DownloadError, FormError};

pub const FALLBACK_FILENAME: &str = "report.docx";

/// Filename for a document URL: its last path segment, ignoring query and fragment.
pub fn suggested_filename(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next().unwrap_or_default() {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        segment => segment.to_string(),
    }
}

/// An accepted download; `downloading` stays raised until the ticket is dropped.
#[derive(Debug)]
pub struct DownloadTicket {
    url: String,
    filename: String,
    _guard: BusyGuard,
}

impl DownloadTicket {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Fetches the ticket's URL and presents the bytes. No session state is touched.
pub async fn fetch_and_present<E, P>(
    endpoint: &E,
    presenter: &P,
    ticket: &DownloadTicket,
) -> Result<(), DownloadError>
where
    E: ReportEndpoint,
    P: DownloadPresenter,
{
    let bytes = endpoint.fetch_document(&ticket.url).await?;
    log::debug!("fetched {} byte(s) from {}", bytes.len(), ticket.url);
    presenter.present(&bytes, &ticket.filename)?;
    Ok(())
}

impl<H> FormSession<H> {
    /// Starts a download of the last generated document, if there is one.
    pub fn begin_download(&mut self) -> Result<Option<DownloadTicket>, FormError> {
        let Some(url) = self.download_url.clone() else {
            return Ok(None);
        };
        self.begin_download_from(url).map(Some)
    }

    /// Starts a download of an arbitrary document URL.
    pub fn begin_download_from(&mut self, url: impl Into<String>) -> Result<DownloadTicket, FormError> {
        let guard = self
            .downloading
            .try_acquire()
            .ok_or(FormError::DownloadInProgress)?;

        self.notice = None;
        let url = url.into();
        let filename = suggested_filename(&url);
        log::info!("downloading {url} as {filename}");

        Ok(DownloadTicket {
            url,
            filename,
            _guard: guard,
        })
    }

    /// Records the outcome of `fetch_and_present` and releases `downloading`.
    ///
    /// # Returns
    ///
    /// The filename the document was presented under.
    pub fn finish_download(
        &mut self,
        ticket: DownloadTicket,
        outcome: Result<(), DownloadError>,
    ) -> Result<String, FormError> {
        match outcome {
            Ok(()) => {
                log::info!("saved {}", ticket.filename);
                Ok(ticket.filename)
            }
            Err(error) => {
                log::warn!("download of {} failed: {error}", ticket.url);
                let error = FormError::DownloadFailed;
                self.report(&error);
                Err(error)
            }
        }
    }

    /// Downloads the stored URL. `Ok(None)` when no document has been generated yet.
    pub async fn download<E, P>(&mut self, endpoint: &E, presenter: &P) -> Result<Option<String>, FormError>
    where
        E: ReportEndpoint,
        P: DownloadPresenter,
    {
        let Some(ticket) = self.begin_download()? else {
            return Ok(None);
        };
        let outcome = fetch_and_present(endpoint, presenter, &ticket).await;
        self.finish_download(ticket, outcome).map(Some)
    }

    pub async fn download_from<E, P>(
        &mut self,
        url: impl Into<String>,
        endpoint: &E,
        presenter: &P,
    ) -> Result<String, FormError>
    where
        E: ReportEndpoint,
        P: DownloadPresenter,
    {
        let ticket = self.begin_download_from(url)?;
        let outcome = fetch_and_present(endpoint, presenter, &ticket).await;
        self.finish_download(ticket, outcome)
    }
}
