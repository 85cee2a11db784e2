//! Component state for the report form.
//!
//! The form itself lives in a `FormSession`; the component only adds the DOM handles
//! it needs around it.

use web_sys::{AbortController, File};
use yew::prelude::*;

use common::model::catalog::MeasurementCatalog;
use common::session::{FormSession, FormVariant};

pub struct ReportFormComponent {
    /// Files, fields, rows and the transient flags of the form.
    pub session: FormSession<File>,

    /// The spreadsheet `<input type="file">`; dropped files are written back into it.
    pub primary_input_ref: NodeRef,

    /// Controller of the upload in flight, used by the Cancel button.
    pub abort: Option<AbortController>,

    /// Guard to avoid fetching the catalog more than once.
    pub loaded: bool,
}

impl ReportFormComponent {
    pub fn new(variant: FormVariant) -> Self {
        Self {
            session: FormSession::new(variant, MeasurementCatalog::builtin()),
            primary_input_ref: NodeRef::default(),
            abort: None,
            loaded: false,
        }
    }
}
