//! Instrument catalog used to autofill certificate data on measurement rows.
//!
//! The catalog is reference data: it is built once (either the built-in list or a
//! JSON file supplied by the deployment) and only read afterwards. Lookups are exact,
//! case-sensitive matches on the instrument name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::measurement::CertificateInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurementCatalog {
    entries: BTreeMap<String, CertificateInfo>,
}

impl MeasurementCatalog {
    /// The instrument list shipped with the form.
    pub fn builtin() -> Self {
        Self::from_entries([
            ("FLUKE-1777", CertificateInfo::new("11111", "2025.6.23")),
            ("选项2", CertificateInfo::new("22222", "2026.1.1")),
            ("选项3", CertificateInfo::new("33333", "2027.3.15")),
        ])
    }

    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, CertificateInfo)>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, info)| (name.into(), info))
                .collect(),
        }
    }

    /// Parses a catalog file of the form
    /// `{ "<name>": { "certificateNo": "...", "certificateDate": "..." }, ... }`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn lookup(&self, name: &str) -> Option<&CertificateInfo> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
