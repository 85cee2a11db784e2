use web_sys::File;

use common::error::{DownloadError, TransportError};
use common::model::catalog::MeasurementCatalog;
use common::model::report::ReportField;
use common::model::upload::UploadResponse;
use common::session::{BusyGuard, DownloadTicket};

pub enum Msg {
    PrimarySelected(Option<File>),
    TemplateSelected(Option<File>),
    ImagesSelected(Vec<File>),
    DragOver,
    DragLeave,
    Dropped(Option<File>),
    FieldChanged(ReportField, String),
    AddRow,
    RemoveRow(usize),
    RowMeasurementInput(usize, String),
    RowMeasurementChanged(usize, String),
    RowCertificateNoChanged(usize, String),
    RowCertificateDateChanged(usize, String),
    Submit,
    CancelSubmission,
    SubmissionFinished {
        guard: BusyGuard,
        outcome: Result<UploadResponse, TransportError>,
    },
    Download,
    DownloadFinished {
        ticket: DownloadTicket,
        outcome: Result<(), DownloadError>,
    },
    CatalogLoaded(MeasurementCatalog),
}
