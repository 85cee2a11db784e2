//! Form session controller.
//!
//! `FormSession` owns the whole state of one report form: the selected files, the
//! report header fields, the measurement rows and the transient UI state (dragging,
//! busy flags, the current notice and the last download URL). Front ends mutate it
//! through the methods spread over the submodules:
//!
//! - `validator`: file selection and the ordered validation gate.
//! - `rows`: the measurement row list and catalog autofill.
//! - `submission`: payload assembly and the upload round trip.
//! - `download`: fetching the generated document and handing it to the user.
//!
//! The two network operations come in two shapes. `submit` / `download` are plain
//! async methods for callers that can hold `&mut FormSession` across the await (the
//! CLI). `begin_*` / `finish_*` split the same operation around the await for
//! message-driven UIs, with the busy guard travelling in between.

mod busy;
mod download;
mod endpoint;
mod rows;
mod submission;
mod validator;

pub use busy::{BusyFlag, BusyGuard};
pub use download::{DownloadTicket, FALLBACK_FILENAME, fetch_and_present, suggested_filename};
pub use endpoint::{DownloadPresenter, ReportEndpoint};
pub use submission::{SubmissionTicket, SubmitOutcome};
pub use validator::{MAX_FILE_SIZE, ValidationOutcome, validate, validate_images};

use crate::error::FormError;
use crate::model::catalog::MeasurementCatalog;
use crate::model::file::SelectedFile;
use crate::model::measurement::MeasurementRow;
use crate::model::report::{DateTimeParts, ReportField, ReportFields};

pub const SUCCESS_MESSAGE: &str = "Report generated successfully!";
pub const UPLOAD_FALLBACK_MESSAGE: &str = "File upload failed, please try again";

/// Which files the form asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormVariant {
    /// Spreadsheet only; the service applies its own template.
    SpreadsheetOnly,
    /// Spreadsheet plus a DOCX template, both required.
    #[default]
    WithTemplate,
}

impl FormVariant {
    pub fn requires_template(self) -> bool {
        matches!(self, FormVariant::WithTemplate)
    }
}

/// The single user-visible message. Error and success text never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Error(text) | Notice::Success(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

#[derive(Debug)]
pub struct FormSession<H> {
    variant: FormVariant,
    catalog: MeasurementCatalog,
    primary: Option<SelectedFile<H>>,
    template: Option<SelectedFile<H>>,
    images: Vec<SelectedFile<H>>,
    fields: ReportFields,
    measurements: Vec<MeasurementRow>,
    dragging: bool,
    loading: BusyFlag,
    downloading: BusyFlag,
    notice: Option<Notice>,
    download_url: Option<String>,
}

impl<H> FormSession<H> {
    /// A fresh form: no files, blank fields and a single empty measurement row.
    pub fn new(variant: FormVariant, catalog: MeasurementCatalog) -> Self {
        Self {
            variant,
            catalog,
            primary: None,
            template: None,
            images: Vec::new(),
            fields: ReportFields::default(),
            measurements: vec![MeasurementRow::default()],
            dragging: false,
            loading: BusyFlag::new(),
            downloading: BusyFlag::new(),
            notice: None,
            download_url: None,
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn catalog(&self) -> &MeasurementCatalog {
        &self.catalog
    }

    /// Swaps the instrument list used by autofill. Existing rows keep their values.
    pub fn set_catalog(&mut self, catalog: MeasurementCatalog) {
        self.catalog = catalog;
    }

    pub fn primary(&self) -> Option<&SelectedFile<H>> {
        self.primary.as_ref()
    }

    pub fn template(&self) -> Option<&SelectedFile<H>> {
        self.template.as_ref()
    }

    pub fn images(&self) -> &[SelectedFile<H>] {
        &self.images
    }

    pub fn fields(&self) -> &ReportFields {
        &self.fields
    }

    pub fn set_field(&mut self, field: ReportField, value: impl Into<String>) {
        self.fields.set(field, value);
    }

    pub fn set_start(&mut self, parts: DateTimeParts) {
        self.fields.set_start(parts);
    }

    pub fn set_end(&mut self, parts: DateTimeParts) {
        self.fields.set_end(parts);
    }

    pub fn measurements(&self) -> &[MeasurementRow] {
        &self.measurements
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading.is_set()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.notice.as_ref().filter(|n| n.is_error()).map(Notice::message)
    }

    pub fn success(&self) -> Option<&str> {
        self.notice.as_ref().filter(|n| !n.is_error()).map(Notice::message)
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    /// True when every file the variant requires is selected.
    pub fn can_submit(&self) -> bool {
        self.missing_requirement().is_none()
    }

    /// The first required file that is still missing.
    pub fn missing_requirement(&self) -> Option<FormError> {
        if self.primary.is_none() {
            return Some(FormError::MissingFile("a spreadsheet file"));
        }
        if self.variant.requires_template() && self.template.is_none() {
            return Some(FormError::MissingFile("a template file"));
        }
        None
    }

    fn report(&mut self, error: &FormError) {
        self.notice = Some(Notice::Error(error.to_string()));
    }
}
