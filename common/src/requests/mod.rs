//! Multipart payload for `POST /upload`.
//!
//! The session assembles an `UploadPayload` from its state; each platform endpoint then
//! translates the parts one to one into its own multipart body (`FormData` in the
//! browser, `reqwest::multipart::Form` natively). Part order is part of the contract:
//!
//! 1. `file` (spreadsheet)
//! 2. `templateFile` (only when the form variant requires a template)
//! 3. one `images` part per attachment, in selection order, original names kept
//! 4. every scalar report field, in `ReportField::ALL` order
//! 5. `measurements`, a single JSON array of `{measurement, certificateNo, certificateDate}`

use crate::model::file::SelectedFile;
use crate::model::measurement::MeasurementRow;

pub const UPLOAD_PATH: &str = "/upload";
pub const PRIMARY_FIELD: &str = "file";
pub const TEMPLATE_FIELD: &str = "templateFile";
pub const IMAGES_FIELD: &str = "images";
pub const MEASUREMENTS_FIELD: &str = "measurements";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart<H> {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: SelectedFile<H> },
}

impl<H> FormPart<H> {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload<H> {
    parts: Vec<FormPart<H>>,
}

impl<H> Default for UploadPayload<H> {
    fn default() -> Self {
        Self { parts: Vec::new() }
    }
}

impl<H> UploadPayload<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: &'static str, value: impl Into<String>) {
        self.parts.push(FormPart::Text {
            name,
            value: value.into(),
        });
    }

    pub fn push_file(&mut self, name: &'static str, file: SelectedFile<H>) {
        self.parts.push(FormPart::File { name, file });
    }

    pub fn parts(&self) -> &[FormPart<H>] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart<H>> {
        self.parts
    }

    /// Value of the first text part called `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All file parts called `name`, in payload order.
    pub fn files<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SelectedFile<H>> + 'a {
        self.parts.iter().filter_map(move |part| match part {
            FormPart::File { name: n, file } if *n == name => Some(file),
            _ => None,
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.parts.iter().map(FormPart::name).collect()
    }
}

/// Serializes the measurement rows as the single JSON text field the service expects.
pub fn encode_measurements(rows: &[MeasurementRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string(rows)
}
