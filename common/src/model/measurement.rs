use serde::{Deserialize, Serialize};

/// Calibration certificate attached to an instrument.
///
/// Serialized as `{ "certificateNo": ..., "certificateDate": ... }`, the same shape
/// the catalog file uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateInfo {
    pub certificate_no: String,
    pub certificate_date: String,
}

impl CertificateInfo {
    pub fn new(certificate_no: impl Into<String>, certificate_date: impl Into<String>) -> Self {
        Self {
            certificate_no: certificate_no.into(),
            certificate_date: certificate_date.into(),
        }
    }
}

/// One instrument line of the report form.
///
/// The whole list is sent as a single JSON array in the `measurements` field, so the
/// serialized names are part of the upload contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRow {
    pub measurement: String,
    pub certificate_no: String,
    pub certificate_date: String,
}

impl MeasurementRow {
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            ..Self::default()
        }
    }

    /// Overwrites both certificate fields: catalog values when `info` is present,
    /// blanks otherwise. Manual edits are never merged.
    pub fn apply_certificate(&mut self, info: Option<&CertificateInfo>) {
        match info {
            Some(info) => {
                self.certificate_no = info.certificate_no.clone();
                self.certificate_date = info.certificate_date.clone();
            }
            None => {
                self.certificate_no.clear();
                self.certificate_date.clear();
            }
        }
    }
}
