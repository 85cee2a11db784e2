//! Update function for the report form component.
//!
//! Elm-style: `update` receives the component, the `Context` and a `Msg`, mutates the
//! session and returns whether the view should re-render.
//!
//! Key behaviors
//! - File selections and drops go through the session validator; its notice is what
//!   the view shows.
//! - Row edits forward to the row manager; the `change` event of a measurement name
//!   triggers the catalog autofill.
//! - Submission and download are split around the network call. `begin_*` runs here,
//!   the request runs in `spawn_local`, and the result comes back as a `*Finished`
//!   message carrying the busy guard.
//! - Busy rejections are shown as toasts and leave the form notice alone.

use web_sys::AbortController;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::FormError;
use common::session::{ReportEndpoint, fetch_and_present};

use crate::browser::{AnchorDownload, BrowserEndpoint};

use super::helpers::{selected_file, show_toast};
use super::messages::Msg;
use super::state::ReportFormComponent;

/// Central update function for the component.
///
/// Contract
/// - Mutates `component` based on `msg`.
/// - May dispatch further messages via `ctx.link()` from async tasks.
/// - Returns `true` to re-render the view.
pub fn update(
    component: &mut ReportFormComponent,
    ctx: &Context<ReportFormComponent>,
    msg: Msg,
) -> bool {
    let session = &mut component.session;
    match msg {
        Msg::PrimarySelected(file) => {
            // Rejections are already reflected in the session notice.
            let _ = session.select_primary(file.map(selected_file));
            true
        }
        Msg::TemplateSelected(file) => {
            let _ = session.select_template(file.map(selected_file));
            true
        }
        Msg::ImagesSelected(files) => {
            let _ = session.select_images(files.into_iter().map(selected_file).collect());
            true
        }
        Msg::DragOver => {
            if session.is_dragging() {
                return false;
            }
            session.drag_over();
            true
        }
        Msg::DragLeave => {
            session.drag_leave();
            true
        }
        Msg::Dropped(file) => {
            let _ = session.drop_primary(file.map(selected_file));
            true
        }
        Msg::FieldChanged(field, value) => {
            session.set_field(field, value);
            false
        }
        Msg::AddRow => {
            session.add_row();
            true
        }
        Msg::RemoveRow(index) => report_row_result(session.remove_row(index).map(|_| ())),
        Msg::RowMeasurementInput(index, name) => {
            report_row_result(session.set_row_measurement(index, name))
        }
        Msg::RowMeasurementChanged(index, name) => {
            report_row_result(session.on_row_measurement_changed(index, name).map(|_| ()))
        }
        Msg::RowCertificateNoChanged(index, value) => {
            report_row_result(session.set_row_certificate_no(index, value))
        }
        Msg::RowCertificateDateChanged(index, value) => {
            report_row_result(session.set_row_certificate_date(index, value))
        }
        Msg::Submit => {
            let ticket = match session.begin_submission() {
                Ok(Some(ticket)) => ticket,
                Ok(None) => return false,
                Err(FormError::SubmissionInProgress) => {
                    show_toast(&FormError::SubmissionInProgress.to_string());
                    return false;
                }
                Err(_) => return true,
            };

            let mut endpoint = BrowserEndpoint::new();
            match AbortController::new() {
                Ok(controller) => {
                    endpoint = endpoint.with_abort_signal(controller.signal());
                    component.abort = Some(controller);
                }
                Err(err) => log::warn!("upload cannot be cancelled: {err:?}"),
            }

            let (payload, guard) = ticket.into_parts();
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = endpoint.upload(payload).await;
                link.send_message(Msg::SubmissionFinished { guard, outcome });
            });
            true
        }
        Msg::CancelSubmission => {
            if let Some(controller) = component.abort.take() {
                log::info!("cancelling upload");
                controller.abort();
            }
            false
        }
        Msg::SubmissionFinished { guard, outcome } => {
            component.abort = None;
            let _ = session.finish_submission(guard, outcome);
            true
        }
        Msg::Download => {
            let ticket = match session.begin_download() {
                Ok(Some(ticket)) => ticket,
                Ok(None) => return false,
                Err(err) => {
                    show_toast(&err.to_string());
                    return false;
                }
            };

            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = fetch_and_present(&BrowserEndpoint::new(), &AnchorDownload, &ticket).await;
                link.send_message(Msg::DownloadFinished { ticket, outcome });
            });
            true
        }
        Msg::DownloadFinished { ticket, outcome } => {
            let _ = session.finish_download(ticket, outcome);
            true
        }
        Msg::CatalogLoaded(catalog) => {
            log::info!("instrument catalog loaded ({} entries)", catalog.len());
            session.set_catalog(catalog);
            true
        }
    }
}

/// Row indexes come from the rendered list, so a failure means the view is stale.
fn report_row_result(result: Result<(), FormError>) -> bool {
    if let Err(err) = result {
        show_toast(&err.to_string());
    }
    true
}
